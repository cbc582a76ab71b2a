use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::jwt;

use super::AuthService;

/// 注销当前会话：access token 进吊销黑名单直到自然过期，
/// 同时清掉用户缓存与 refresh token cookie。
pub async fn handle_logout(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|s| s.to_string());

    let Some(token) = token else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Missing or invalid Authorization header",
        )));
    };

    // 黑名单 TTL 取令牌剩余有效期，过期行由调度器清理
    let expires_at = match jwt::JwtUtils::verify_access_token(&token) {
        Ok(claims) => claims.exp,
        Err(_) => chrono::Utc::now().timestamp(),
    };

    if let Err(e) = storage.revoke_token(&token, expires_at).await {
        tracing::error!("Failed to revoke token: {}", e);
        return Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                "Logout failed",
            )),
        );
    }

    // 清理用户信息缓存，避免黑名单生效前缓存命中
    if let Some(cache) = request.app_data::<actix_web::web::Data<Arc<dyn ObjectCache>>>() {
        cache.get_ref().remove(&format!("user:{token}")).await;
    }

    let empty_cookie = jwt::JwtUtils::create_empty_refresh_token_cookie();
    Ok(HttpResponse::Ok()
        .cookie(empty_cookie)
        .json(ApiResponse::success_empty("Logout successful")))
}
