use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::NotificationService;
use crate::middlewares::RequireJWT;
use crate::models::notifications::responses::NotificationListResponse;
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_notifications(
    service: &NotificationService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(HttpResponse::Unauthorized()
            .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
    };

    match storage.list_notifications_for_user(user_id).await {
        Ok((items, unread)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            NotificationListResponse { items, unread },
            "获取成功",
        ))),
        Err(e) => {
            tracing::error!("Failed to list notifications for user {}: {}", user_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "获取通知失败",
                )),
            )
        }
    }
}

/// 仅返回未读数，供前端角标轮询
pub async fn unread_count(
    service: &NotificationService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(HttpResponse::Unauthorized()
            .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
    };

    match storage.list_notifications_for_user(user_id).await {
        Ok((_, unread)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            serde_json::json!({ "unread": unread }),
            "获取成功",
        ))),
        Err(e) => {
            tracing::error!("Failed to count notifications for user {}: {}", user_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "获取通知失败",
                )),
            )
        }
    }
}
