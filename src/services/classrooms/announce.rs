use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ClassroomService, check_classroom_manage_permission};
use crate::middlewares::RequireJWT;
use crate::models::activities::entities::ActivityKind;
use crate::models::classrooms::requests::CreateAnnouncementRequest;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

const ANNOUNCEMENT_LIMIT: u64 = 50;

pub async fn create_announcement(
    service: &ClassroomService,
    request: &HttpRequest,
    classroom_id: i64,
    announce_request: CreateAnnouncementRequest,
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

    let message = announce_request.message.trim().to_string();
    if message.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "公告内容不能为空",
        )));
    }

    // 公告就是活动流里的一条 announcement 记录
    match storage
        .log_activity(
            ActivityKind::Announcement,
            message,
            Some(classroom_id),
            Some(current_user.id),
            None,
        )
        .await
    {
        Ok(activity) => {
            tracing::info!(
                "Announcement posted in classroom {} by user {}",
                classroom_id,
                current_user.id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(activity, "公告发布成功")))
        }
        Err(e) => {
            tracing::error!("Failed to post announcement: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "公告发布失败",
                )),
            )
        }
    }
}

pub async fn list_announcements(
    service: &ClassroomService,
    request: &HttpRequest,
    classroom_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(current_user) = RequireJWT::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized()
            .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
    };

    // 成员、归属教师或管理员可见
    let allowed = match current_user.role {
        UserRole::Admin => true,
        UserRole::Teacher => match storage.get_classroom_by_id(classroom_id).await {
            Ok(Some(classroom)) => classroom.teacher_id == Some(current_user.id),
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
        },
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

    match storage
        .list_announcements(classroom_id, ANNOUNCEMENT_LIMIT)
        .await
    {
        Ok(announcements) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(announcements, "查询成功")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询公告失败: {e}"),
            )),
        ),
    }
}
