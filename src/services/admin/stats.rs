use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AdminService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_platform_stats(
    service: &AdminService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_platform_stats().await {
        Ok(stats) => Ok(HttpResponse::Ok().json(ApiResponse::success(stats, "获取成功"))),
        Err(e) => {
            tracing::error!("Failed to load platform stats: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "获取平台统计失败",
                )),
            )
        }
    }
}
