use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassroomService;
use crate::models::{ApiResponse, ErrorCode};

/// 管理员路由的删除即归档，名册与历史数据保留
pub async fn delete_classroom(
    service: &ClassroomService,
    request: &HttpRequest,
    classroom_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.set_classroom_archived(classroom_id, true).await {
        Ok(Some(_)) => {
            tracing::info!("Classroom {} archived via admin delete", classroom_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("教室已归档")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ClassroomNotFound,
            "教室不存在",
        ))),
        Err(e) => {
            tracing::error!("Failed to archive classroom {}: {}", classroom_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "教室删除失败",
                )),
            )
        }
    }
}
