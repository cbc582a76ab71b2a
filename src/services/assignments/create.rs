use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::middlewares::RequireJWT;
use crate::models::activities::entities::ActivityKind;
use crate::models::assignments::requests::CreateAssignmentRequest;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::classrooms::check_classroom_manage_permission;

pub async fn create_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    create_request: CreateAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(current_user) = RequireJWT::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized()
            .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
    };

    if create_request.title.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "作业标题不能为空",
        )));
    }

    // 指定了教室时校验归属权
    if let Some(classroom_id) = create_request.classroom_id
        && current_user.role != UserRole::Admin
        && let Err(resp) =
            check_classroom_manage_permission(&storage, &current_user, classroom_id).await
    {
        return Ok(resp);
    }

    // 没有解锁时间或解锁时间已过的作业直接可见，其余交给调度器
    let now = chrono::Utc::now();
    let unlocked = match create_request.unlock_at {
        None => true,
        Some(unlock_at) => unlock_at <= now,
    };

    let classroom_id = create_request.classroom_id;
    match storage
        .create_assignment(current_user.id, create_request, unlocked)
        .await
    {
        Ok(assignment) => {
            tracing::info!(
                "Assignment {} created by user {} (unlocked: {})",
                assignment.id,
                current_user.id,
                unlocked
            );

            if let Err(e) = storage
                .log_activity(
                    ActivityKind::AssignmentCreated,
                    format!("Assignment \"{}\" was created", assignment.title),
                    classroom_id,
                    Some(current_user.id),
                    Some(serde_json::json!({ "assignment_id": assignment.id })),
                )
                .await
            {
                tracing::warn!("Failed to log assignment activity: {}", e);
            }

            Ok(HttpResponse::Ok().json(ApiResponse::success(assignment, "作业创建成功")))
        }
        Err(e) => {
            let msg = e.to_string();
            if msg.contains("FOREIGN KEY constraint failed") {
                Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::ClassroomNotFound,
                    "指定的教室不存在",
                )))
            } else {
                tracing::error!("Failed to create assignment: {}", e);
                Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::AssignmentCreationFailed,
                        "作业创建失败",
                    )),
                )
            }
        }
    }
}
