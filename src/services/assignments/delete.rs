use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::models::{ApiResponse, ErrorCode};

/// 管理员路由的删除即归档，提交记录保留
pub async fn delete_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.set_assignment_archived(assignment_id, true).await {
        Ok(true) => {
            tracing::info!("Assignment {} archived via admin delete", assignment_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("作业已归档")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AssignmentNotFound,
            "作业不存在",
        ))),
        Err(e) => {
            tracing::error!("Failed to archive assignment {}: {}", assignment_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "作业删除失败",
                )),
            )
        }
    }
}
