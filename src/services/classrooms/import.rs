//! 名册 CSV 导入

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::StreamExt;
use std::io::Cursor;

use super::{ClassroomService, check_classroom_manage_permission, roster::create_student_account};
use crate::middlewares::RequireJWT;
use crate::models::classrooms::entities::RosterStudent;
use crate::models::classrooms::requests::AddStudentRequest;
use crate::models::classrooms::responses::RosterImportResponse;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::validate_email;

const MAX_IMPORT_ROWS: usize = 1000;

enum ImportParseError {
    MissingColumn(String),
    ParseFailed(String),
}

impl ImportParseError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::MissingColumn(_) => ErrorCode::ImportFileMissingColumn,
            Self::ParseFailed(_) => ErrorCode::ImportFileParseFailed,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::MissingColumn(col) => format!("缺少必需列: {col}"),
            Self::ParseFailed(msg) => msg.clone(),
        }
    }
}

#[derive(Debug, Clone)]
struct ImportRow {
    name: String,
    email: String,
}

/// 导入名册：CSV 需要 name,email 两列。
/// 邮箱已有账号的直接进名册，没有的创建学生账号；
/// 已在名册中或数据无效的行计入 skipped。
pub async fn import_roster(
    service: &ClassroomService,
    request: &HttpRequest,
    classroom_id: i64,
    mut payload: Multipart,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(current_user) = RequireJWT::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized()
            .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
    };

    if let Err(resp) =
        check_classroom_manage_permission(&storage, &current_user, classroom_id).await
    {
        return Ok(resp);
    }

    let file_bytes = match read_file_from_multipart(&mut payload).await {
        Ok(bytes) => bytes,
        Err(e) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::FileUploadFailed,
                format!("文件读取失败: {e}"),
            )));
        }
    };

    let rows = match parse_csv(&file_bytes) {
        Ok(rows) => rows,
        Err(e) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(e.error_code(), e.message())));
        }
    };

    if rows.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ImportFileDataInvalid,
            "文件中没有数据行",
        )));
    }
    if rows.len() > MAX_IMPORT_ROWS {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ImportFileDataInvalid,
            format!("单次导入最多支持 {MAX_IMPORT_ROWS} 行"),
        )));
    }

    let mut added: Vec<RosterStudent> = Vec::new();
    let mut skipped: i64 = 0;

    for row in rows {
        if validate_email(&row.email).is_err() {
            skipped += 1;
            continue;
        }

        let student = match storage.get_user_by_email(&row.email).await {
            Ok(Some(user)) if user.role == UserRole::Student => user,
            Ok(Some(_)) => {
                // 邮箱属于教师/管理员账号
                skipped += 1;
                continue;
            }
            Ok(None) => {
                let add_request = AddStudentRequest {
                    name: row.name.clone(),
                    email: row.email.clone(),
                    create_account: true,
                };
                match create_student_account(&storage, &add_request).await {
                    Ok((user, _temp_password)) => user,
                    Err(_) => {
                        skipped += 1;
                        continue;
                    }
                }
            }
            Err(e) => {
                tracing::warn!("Roster import: failed to look up {}: {}", row.email, e);
                skipped += 1;
                continue;
            }
        };

        match storage.join_classroom(classroom_id, student.id).await {
            Ok(true) => added.push(RosterStudent {
                id: student.id,
                username: student.username.clone(),
                email: student.email.clone(),
                display_name: student.display_name.clone(),
                joined_at: chrono::Utc::now(),
            }),
            Ok(false) => skipped += 1,
            Err(e) => {
                tracing::warn!("Roster import: failed to add {}: {}", student.id, e);
                skipped += 1;
            }
        }
    }

    tracing::info!(
        "Roster import for classroom {}: {} added, {} skipped",
        classroom_id,
        added.len(),
        skipped
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        RosterImportResponse { added, skipped },
        "导入完成",
    )))
}

async fn read_file_from_multipart(payload: &mut Multipart) -> Result<Vec<u8>, String> {
    let mut file_bytes = Vec::new();

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| format!("读取字段失败: {e}"))?;

        if field.name().map(|n| n == "file").unwrap_or(false) {
            while let Some(chunk) = field.next().await {
                let data = chunk.map_err(|e| format!("读取数据失败: {e}"))?;
                file_bytes.extend_from_slice(&data);
            }
        }
    }

    if file_bytes.is_empty() {
        return Err("未找到文件字段".to_string());
    }

    Ok(file_bytes)
}

fn parse_csv(data: &[u8]) -> Result<Vec<ImportRow>, ImportParseError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(Cursor::new(data));

    let headers = rdr
        .headers()
        .map_err(|e| ImportParseError::ParseFailed(format!("读取表头失败: {e}")))?;
    let header_map: std::collections::HashMap<_, _> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.trim().to_lowercase(), i))
        .collect();

    let name_idx = *header_map
        .get("name")
        .ok_or_else(|| ImportParseError::MissingColumn("name".to_string()))?;
    let email_idx = *header_map
        .get("email")
        .ok_or_else(|| ImportParseError::MissingColumn("email".to_string()))?;

    let mut rows = Vec::new();
    for (row_num, result) in rdr.records().enumerate() {
        let record = result.map_err(|e| {
            ImportParseError::ParseFailed(format!("第 {} 行解析失败: {e}", row_num + 2))
        })?;

        rows.push(ImportRow {
            name: record.get(name_idx).unwrap_or("").trim().to_string(),
            email: record.get(email_idx).unwrap_or("").trim().to_string(),
        });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv_with_headers() {
        let data = b"name,email\nAlice,alice@example.com\nBob,bob@example.com\n";
        let rows = parse_csv(data).ok().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Alice");
        assert_eq!(rows[1].email, "bob@example.com");
    }

    #[test]
    fn test_parse_csv_missing_column() {
        let data = b"name\nAlice\n";
        let err = parse_csv(data).err().unwrap();
        assert!(matches!(err, ImportParseError::MissingColumn(_)));
    }

    #[test]
    fn test_parse_csv_header_case_insensitive() {
        let data = b"Name,EMAIL\nAlice,alice@example.com\n";
        let rows = parse_csv(data).ok().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].email, "alice@example.com");
    }
}
