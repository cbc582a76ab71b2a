use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ExamService;
use crate::middlewares::RequireJWT;
use crate::models::exams::requests::ExamListQuery;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

/// 列出考试。指定 classroom_id 时学生须为成员、教师须为归属教师。
pub async fn list_exams(
    service: &ExamService,
    request: &HttpRequest,
    query: ExamListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(current_user) = RequireJWT::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized()
            .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
    };

    if let Some(classroom_id) = query.classroom_id
        && current_user.role != UserRole::Admin
    {
        let allowed = match current_user.role {
            UserRole::Student => storage
                .is_student_in_classroom(classroom_id, current_user.id)
                .await
                .unwrap_or(false),
            _ => match storage.get_classroom_by_id(classroom_id).await {
                Ok(Some(classroom)) => classroom.teacher_id == Some(current_user.id),
                _ => false,
            },
        };
        if !allowed {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::ClassroomPermissionDenied,
                "您无权查看该教室的考试",
            )));
        }
    }

    match storage.list_exams_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "获取成功"))),
        Err(e) => {
            tracing::error!("Failed to list exams: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "获取考试列表失败",
                )),
            )
        }
    }
}
