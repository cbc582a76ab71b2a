use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassroomService;
use crate::middlewares::RequireJWT;
use crate::models::classrooms::requests::CreateClassroomRequest;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

pub async fn create_classroom(
    service: &ClassroomService,
    request: &HttpRequest,
    mut create_request: CreateClassroomRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(current_user) = RequireJWT::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized()
            .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
    };

    if create_request.name.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "教室名称不能为空",
        )));
    }

    // 教师创建的教室归属自己；teacher_id 和显式加入码只有管理员能指定
    if current_user.role != UserRole::Admin {
        create_request.teacher_id = Some(current_user.id);
        create_request.code = None;
    } else if create_request.teacher_id.is_none() {
        create_request.teacher_id = Some(current_user.id);
    }

    match storage.create_classroom(create_request).await {
        Ok(classroom) => {
            tracing::info!(
                "Classroom {} created with code {} by user {}",
                classroom.id,
                classroom.code,
                current_user.id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(classroom, "教室创建成功")))
        }
        Err(e) => {
            let msg = e.to_string();
            if msg.contains("UNIQUE constraint failed") {
                Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::ClassroomCodeConflict,
                    "加入码已被占用",
                )))
            } else if msg.contains("FOREIGN KEY constraint failed") {
                Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::BadRequest,
                    "指定的教师不存在",
                )))
            } else {
                tracing::error!("Failed to create classroom: {}", e);
                Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::ClassroomCreationFailed,
                        "教室创建失败",
                    )),
                )
            }
        }
    }
}
