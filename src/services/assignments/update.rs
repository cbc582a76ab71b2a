use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AssignmentService, check_assignment_manage_permission};
use crate::middlewares::RequireJWT;
use crate::models::assignments::requests::UpdateAssignmentRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn update_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
    update_request: UpdateAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(current_user) = RequireJWT::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized()
            .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
    };

    if let Err(resp) =
        check_assignment_manage_permission(&storage, &current_user, assignment_id).await
    {
        return Ok(resp);
    }

    match storage.update_assignment(assignment_id, update_request).await {
        Ok(Some(assignment)) => {
            tracing::info!(
                "Assignment {} updated by user {}",
                assignment_id,
                current_user.id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(assignment, "作业更新成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AssignmentNotFound,
            "作业不存在",
        ))),
        Err(e) => {
            tracing::error!("Failed to update assignment {}: {}", assignment_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "作业更新失败",
                )),
            )
        }
    }
}

pub async fn archive_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(current_user) = RequireJWT::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized()
            .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
    };

    if let Err(resp) =
        check_assignment_manage_permission(&storage, &current_user, assignment_id).await
    {
        return Ok(resp);
    }

    match storage.set_assignment_archived(assignment_id, true).await {
        Ok(true) => {
            tracing::info!(
                "Assignment {} archived by user {}",
                assignment_id,
                current_user.id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("作业已归档")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AssignmentNotFound,
            "作业不存在",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("归档作业失败: {e}"),
            )),
        ),
    }
}
