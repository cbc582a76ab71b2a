use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ClassroomService, check_classroom_manage_permission};
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};

/// 教室统计面板，归属教师或管理员可见
pub async fn get_classroom_analytics(
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

    match storage.get_classroom_analytics(classroom_id).await {
        Ok(analytics) => Ok(HttpResponse::Ok().json(ApiResponse::success(analytics, "获取成功"))),
        Err(e) => {
            tracing::error!(
                "Failed to load analytics for classroom {}: {}",
                classroom_id,
                e
            );
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "获取教室统计失败",
                )),
            )
        }
    }
}
