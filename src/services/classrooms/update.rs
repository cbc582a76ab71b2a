use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ClassroomService, check_classroom_manage_permission};
use crate::middlewares::RequireJWT;
use crate::models::classrooms::requests::{ArchiveClassroomRequest, UpdateClassroomRequest};
use crate::models::{ApiResponse, ErrorCode};

pub async fn update_classroom(
    service: &ClassroomService,
    request: &HttpRequest,
    classroom_id: i64,
    update_request: UpdateClassroomRequest,
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

    match storage.update_classroom(classroom_id, update_request).await {
        Ok(Some(classroom)) => {
            tracing::info!("Classroom {} updated by user {}", classroom_id, current_user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(classroom, "教室更新成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ClassroomNotFound,
            "教室不存在",
        ))),
        Err(e) => {
            let msg = e.to_string();
            if msg.contains("UNIQUE constraint failed") {
                Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::ClassroomCodeConflict,
                    "加入码已被占用",
                )))
            } else {
                tracing::error!("Failed to update classroom {}: {}", classroom_id, e);
                Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        "教室更新失败",
                    )),
                )
            }
        }
    }
}

pub async fn archive_classroom(
    service: &ClassroomService,
    request: &HttpRequest,
    classroom_id: i64,
    archive_request: ArchiveClassroomRequest,
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

    match storage
        .set_classroom_archived(classroom_id, archive_request.archived)
        .await
    {
        Ok(Some(classroom)) => {
            tracing::info!(
                "Classroom {} archived={} by user {}",
                classroom_id,
                archive_request.archived,
                current_user.id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(classroom, "教室状态已更新")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ClassroomNotFound,
            "教室不存在",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("更新教室状态失败: {e}"),
            )),
        ),
    }
}
