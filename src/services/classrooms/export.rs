//! 名册 CSV 导出

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ClassroomService, check_classroom_manage_permission};
use crate::middlewares::RequireJWT;
use crate::models::classrooms::entities::RosterStudent;
use crate::models::{ApiResponse, ErrorCode};

pub async fn export_roster(
    service: &ClassroomService,
    request: &HttpRequest,
    classroom_id: i64,
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

    let students = match storage.list_roster(classroom_id).await {
        Ok(students) => students,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询名册失败: {e}"),
                )),
            );
        }
    };

    match generate_csv(&students) {
        Ok(buffer) => {
            let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S").to_string();
            let filename = format!("classroom_{classroom_id}_roster_{timestamp}.csv");

            Ok(HttpResponse::Ok()
                .content_type("text/csv; charset=utf-8")
                .insert_header((
                    "Content-Disposition",
                    format!("attachment; filename=\"{filename}\""),
                ))
                .body(buffer))
        }
        Err(e) => {
            tracing::error!("Failed to generate roster CSV: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "生成名册文件失败",
                )),
            )
        }
    }
}

fn generate_csv(students: &[RosterStudent]) -> Result<Vec<u8>, String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());

    wtr.write_record(["name", "username", "email", "joined_at"])
        .map_err(|e| e.to_string())?;

    for student in students {
        wtr.write_record([
            student
                .display_name
                .clone()
                .unwrap_or_else(|| student.username.clone()),
            student.username.clone(),
            student.email.clone(),
            student.joined_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ])
        .map_err(|e| e.to_string())?;
    }

    wtr.into_inner().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_csv_header_and_rows() {
        let students = vec![RosterStudent {
            id: 1,
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            display_name: Some("Alice L".to_string()),
            joined_at: chrono::Utc::now(),
        }];
        let buffer = generate_csv(&students).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("name,username,email,joined_at\n"));
        assert!(text.contains("Alice L,alice,alice@example.com"));
    }
}
