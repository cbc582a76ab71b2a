use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ExamService, check_exam_manage_permission};
use crate::middlewares::RequireJWT;
use crate::models::exams::requests::UpdateExamRequest;
use crate::models::{ApiResponse, ErrorCode};

/// 更新考试。改动不回溯已生成的学习计划。
pub async fn update_exam(
    service: &ExamService,
    request: &HttpRequest,
    exam_id: i64,
    update_request: UpdateExamRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(current_user) = RequireJWT::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized()
            .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
    };

    if let Err(resp) = check_exam_manage_permission(&storage, &current_user, exam_id).await {
        return Ok(resp);
    }

    if let Some(title) = &update_request.title
        && title.trim().is_empty()
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "考试标题不能为空",
        )));
    }

    match storage.update_exam(exam_id, update_request).await {
        Ok(Some(exam)) => {
            tracing::info!("Exam {} updated by user {}", exam_id, current_user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(exam, "考试更新成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ExamNotFound,
            "考试不存在",
        ))),
        Err(e) => {
            tracing::error!("Failed to update exam {}: {}", exam_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "考试更新失败",
                )),
            )
        }
    }
}
