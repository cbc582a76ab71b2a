/*!
 * 考试日期提取
 *
 * 从标题、描述或上传的大纲文本中扫描日期串，返回最早的有效日期。
 *
 * 约定：斜杠/短横线分隔的纯数字日期按「日-月-年」解析，
 * 即 `03/11/25` 是 2025 年 11 月 3 日，而不是 3 月 11 日。
 */

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

static ISO_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{4})-(\d{2})-(\d{2})\b").unwrap());

static NUMERIC_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{1,2})[/-](\d{1,2})[/-](\d{2,4})\b").unwrap());

static MONTH_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\.?\s+(\d{1,2})(?:st|nd|rd|th)?(?:,?\s*(\d{4}))?",
    )
    .unwrap()
});

fn month_number(name: &str) -> Option<u32> {
    let prefix = name.get(..3)?.to_ascii_lowercase();
    let month = match prefix.as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

/// 从自由文本中提取考试日期。
///
/// 收集所有能解析出的候选日期（ISO、数字日-月-年、英文月份名），
/// 丢弃无效日历日期与早于 `now - 24h` 的日期，返回剩余中最早的一个。
/// 全部无效时返回 `None`。
pub fn extract_exam_date(text: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let mut candidates: Vec<NaiveDate> = Vec::new();

    for caps in ISO_DATE_RE.captures_iter(text) {
        let (Ok(year), Ok(month), Ok(day)) = (
            caps[1].parse::<i32>(),
            caps[2].parse::<u32>(),
            caps[3].parse::<u32>(),
        ) else {
            continue;
        };
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            candidates.push(date);
        }
    }

    // 日-月-年，两位年份补 2000
    for caps in NUMERIC_DATE_RE.captures_iter(text) {
        let (Ok(day), Ok(month), Ok(mut year)) = (
            caps[1].parse::<u32>(),
            caps[2].parse::<u32>(),
            caps[3].parse::<i32>(),
        ) else {
            continue;
        };
        if year < 100 {
            year += 2000;
        }
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            candidates.push(date);
        }
    }

    // 英文月份名，缺省年份取当前年
    for caps in MONTH_NAME_RE.captures_iter(text) {
        let Some(month) = month_number(&caps[1]) else {
            continue;
        };
        let Ok(day) = caps[2].parse::<u32>() else {
            continue;
        };
        let year = caps
            .get(3)
            .and_then(|m| m.as_str().parse::<i32>().ok())
            .unwrap_or_else(|| now.year());
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            candidates.push(date);
        }
    }

    let cutoff = now - Duration::hours(24);
    candidates
        .into_iter()
        .filter_map(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
        .filter(|dt| *dt >= cutoff)
        .min()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_iso_date() {
        let result = extract_exam_date("Final exam on 2025-11-03 in room 204", fixed_now());
        assert_eq!(
            result,
            Some(Utc.with_ymd_and_hms(2025, 11, 3, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_numeric_date_is_day_first() {
        // 03/11/25 读作 2025 年 11 月 3 日
        let result = extract_exam_date("Midterm scheduled for 03/11/25", fixed_now());
        assert_eq!(
            result,
            Some(Utc.with_ymd_and_hms(2025, 11, 3, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_iso_and_numeric_agree() {
        let iso = extract_exam_date("2025-11-03", fixed_now());
        let numeric = extract_exam_date("03/11/25", fixed_now());
        assert_eq!(iso, numeric);
    }

    #[test]
    fn test_month_name_with_year() {
        let result = extract_exam_date("Physics exam: November 3, 2025", fixed_now());
        assert_eq!(
            result,
            Some(Utc.with_ymd_and_hms(2025, 11, 3, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_month_name_abbreviated_without_year() {
        // 年份缺省取当前年
        let result = extract_exam_date("quiz on Nov 3rd", fixed_now());
        assert_eq!(
            result,
            Some(Utc.with_ymd_and_hms(2025, 11, 3, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_earliest_candidate_wins() {
        let result = extract_exam_date(
            "Mock test 2025-12-01, real exam 2025-11-03",
            fixed_now(),
        );
        assert_eq!(
            result,
            Some(Utc.with_ymd_and_hms(2025, 11, 3, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_past_dates_filtered() {
        let result = extract_exam_date("Last year it was 2024-11-03", fixed_now());
        assert_eq!(result, None);
    }

    #[test]
    fn test_invalid_calendar_date_dropped() {
        let result = extract_exam_date("see 2025-13-40 and 31/02/25", fixed_now());
        assert_eq!(result, None);
    }

    #[test]
    fn test_no_date_in_text() {
        assert_eq!(extract_exam_date("Chapter 5 review", fixed_now()), None);
    }

    #[test]
    fn test_slashed_four_digit_year() {
        let result = extract_exam_date("03/11/2025", fixed_now());
        assert_eq!(
            result,
            Some(Utc.with_ymd_and_hms(2025, 11, 3, 0, 0, 0).unwrap())
        );
    }
}
