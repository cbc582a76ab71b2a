use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::NotificationService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};

/// 标记单条已读，user_id 一起过滤避免标到别人的通知
pub async fn mark_read(
    service: &NotificationService,
    request: &HttpRequest,
    notification_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(HttpResponse::Unauthorized()
            .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
    };

    match storage.mark_notification_read(notification_id, user_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("已标记为已读"))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotFound,
            "通知不存在",
        ))),
        Err(e) => {
            tracing::error!(
                "Failed to mark notification {} read for user {}: {}",
                notification_id,
                user_id,
                e
            );
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "标记已读失败",
                )),
            )
        }
    }
}

pub async fn mark_all_read(
    service: &NotificationService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(HttpResponse::Unauthorized()
            .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
    };

    match storage.mark_all_notifications_read(user_id).await {
        Ok(count) => {
            tracing::info!("Marked {} notifications read for user {}", count, user_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                serde_json::json!({ "marked": count }),
                "已全部标记为已读",
            )))
        }
        Err(e) => {
            tracing::error!(
                "Failed to mark all notifications read for user {}: {}",
                user_id,
                e
            );
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "标记已读失败",
                )),
            )
        }
    }
}
