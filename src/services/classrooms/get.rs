use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassroomService;
use crate::middlewares::RequireJWT;
use crate::models::classrooms::responses::ClassroomDetailResponse;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

/// 最近公告条数
const ANNOUNCEMENT_LIMIT: u64 = 10;

pub async fn get_classroom(
    service: &ClassroomService,
    request: &HttpRequest,
    classroom_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(current_user) = RequireJWT::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized()
            .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
    };

    let classroom = match storage.get_classroom_by_id(classroom_id).await {
        Ok(Some(classroom)) => classroom,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ClassroomNotFound,
                "教室不存在",
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

    // 成员、归属教师或管理员可见
    let allowed = match current_user.role {
        UserRole::Admin => true,
        UserRole::Teacher => classroom.teacher_id == Some(current_user.id),
        UserRole::Student => match storage
            .is_student_in_classroom(classroom_id, current_user.id)
            .await
        {
            Ok(member) => member,
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("查询名册失败: {e}"),
                    )),
                );
            }
        },
    };
    if !allowed {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::ClassroomPermissionDenied,
            "您不是该教室成员",
        )));
    }

    let announcements = match storage
        .list_announcements(classroom_id, ANNOUNCEMENT_LIMIT)
        .await
    {
        Ok(list) => list,
        Err(e) => {
            tracing::warn!("Failed to load announcements for classroom {}: {}", classroom_id, e);
            Vec::new()
        }
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        ClassroomDetailResponse {
            classroom,
            announcements,
        },
        "查询成功",
    )))
}
