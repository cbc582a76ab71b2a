use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ExamService, check_exam_manage_permission};
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};

/// 删除考试。已生成的学习计划保留，由持有者自行删除。
pub async fn delete_exam(
    service: &ExamService,
    request: &HttpRequest,
    exam_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(current_user) = RequireJWT::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized()
            .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
    };

    if let Err(resp) = check_exam_manage_permission(&storage, &current_user, exam_id).await {
        return Ok(resp);
    }

    match storage.delete_exam(exam_id).await {
        Ok(true) => {
            tracing::info!("Exam {} deleted by user {}", exam_id, current_user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("考试删除成功")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ExamNotFound,
            "考试不存在",
        ))),
        Err(e) => {
            tracing::error!("Failed to delete exam {}: {}", exam_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "考试删除失败",
                )),
            )
        }
    }
}
