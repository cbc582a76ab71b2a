use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ActivityService;
use crate::middlewares::RequireJWT;
use crate::models::activities::requests::ActivityListQuery;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::classrooms::check_classroom_manage_permission;

/// 跨教室的活动流。教师只能看到自己教室的活动，
/// 指定了不属于自己的 classroom_id 时直接拒绝。
pub async fn list_activities(
    service: &ActivityService,
    request: &HttpRequest,
    mut query: ActivityListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(current_user) = RequireJWT::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized()
            .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
    };

    if current_user.role != UserRole::Admin {
        let owned = match storage.list_classroom_ids_for_teacher(current_user.id).await {
            Ok(ids) => ids,
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("查询教室失败: {e}"),
                    )),
                );
            }
        };

        match query.classroom_id {
            Some(classroom_id) if !owned.contains(&classroom_id) => {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::ClassroomPermissionDenied,
                    "您无权查看该教室的动态",
                )));
            }
            Some(_) => {}
            None => {
                query.classroom_ids = Some(owned);
            }
        }
    }

    match storage.list_activities_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "获取成功"))),
        Err(e) => {
            tracing::error!("Failed to list activities: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "获取动态失败",
                )),
            )
        }
    }
}

/// 单个教室的动态流，归属教师或管理员可见
pub async fn list_classroom_activities(
    service: &ActivityService,
    request: &HttpRequest,
    classroom_id: i64,
    mut query: ActivityListQuery,
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

    query.classroom_id = Some(classroom_id);

    match storage.list_activities_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "获取成功"))),
        Err(e) => {
            tracing::error!(
                "Failed to list activities for classroom {}: {}",
                classroom_id,
                e
            );
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "获取动态失败",
                )),
            )
        }
    }
}
