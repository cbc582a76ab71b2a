use rand::Rng;

/// 生成大写字母与数字混合的随机码（用于教室加入码等）
///
/// 排除了易混淆字符 0/O/1/I。
pub fn generate_random_code(length: usize) -> String {
    const CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_length() {
        assert_eq!(generate_random_code(6).len(), 6);
        assert_eq!(generate_random_code(8).len(), 8);
    }

    #[test]
    fn test_code_charset() {
        let code = generate_random_code(64);
        assert!(code.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
        assert!(!code.contains('0'));
        assert!(!code.contains('O'));
        assert!(!code.contains('1'));
        assert!(!code.contains('I'));
    }
}
