use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassroomService;
use crate::middlewares::RequireJWT;
use crate::models::activities::entities::ActivityKind;
use crate::models::classrooms::requests::JoinClassroomRequest;
use crate::models::{ApiResponse, ErrorCode};

/// 学生通过加入码加入教室。重复加入是幂等的：
/// 名册行已存在时直接返回成功，不报错也不重复记录。
pub async fn join_classroom(
    service: &ClassroomService,
    request: &HttpRequest,
    join_request: JoinClassroomRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(current_user) = RequireJWT::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized()
            .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
    };

    let code = join_request.code.trim().to_uppercase();
    if code.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ClassroomCodeInvalid,
            "加入码不能为空",
        )));
    }

    let classroom = match storage.get_classroom_by_code(&code).await {
        Ok(Some(classroom)) => classroom,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ClassroomNotFound,
                "加入码无效",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询教室失败: {e}"),
                )),
            );
        }
    };

    if classroom.archived {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "教室已归档，无法加入",
        )));
    }

    match storage.join_classroom(classroom.id, current_user.id).await {
        Ok(true) => {
            tracing::info!(
                "Student {} joined classroom {}",
                current_user.id,
                classroom.id
            );

            // 活动记录尽力而为，失败不影响加入结果
            if let Err(e) = storage
                .log_activity(
                    ActivityKind::StudentJoined,
                    format!("{} joined the classroom", current_user.username),
                    Some(classroom.id),
                    Some(current_user.id),
                    None,
                )
                .await
            {
                tracing::warn!("Failed to log join activity: {}", e);
            }

            Ok(HttpResponse::Ok().json(ApiResponse::success(classroom, "加入教室成功")))
        }
        Ok(false) => {
            // 已在名册中
            Ok(HttpResponse::Ok().json(ApiResponse::success(classroom, "已在该教室中")))
        }
        Err(e) => {
            tracing::error!("Failed to join classroom: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::ClassroomJoinFailed,
                    "加入教室失败",
                )),
            )
        }
    }
}
