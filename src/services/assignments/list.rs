use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::middlewares::RequireJWT;
use crate::models::assignments::requests::AssignmentListQuery;
use crate::models::assignments::responses::AssignmentListResponse;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode, PaginationInfo};

/// 按角色列出作业：
/// 管理员看全部，教师看自己教室的，学生只看已解锁的
pub async fn list_assignments(
    service: &AssignmentService,
    request: &HttpRequest,
    mut query: AssignmentListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(current_user) = RequireJWT::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized()
            .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
    };

    match current_user.role {
        UserRole::Admin => {}
        UserRole::Teacher => {
            let classroom_ids = match storage.list_classroom_ids_for_teacher(current_user.id).await
            {
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
            if let Some(classroom_id) = query.classroom_id
                && !classroom_ids.contains(&classroom_id)
            {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::ClassroomPermissionDenied,
                    "您不是该教室的归属教师",
                )));
            }
            query.classroom_ids = Some(classroom_ids);
        }
        UserRole::Student => {
            return list_for_student(service, request, current_user.id, query.classroom_id).await;
        }
    }

    match storage.list_assignments_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询作业列表失败: {e}"),
            )),
        ),
    }
}

async fn list_for_student(
    service: &AssignmentService,
    request: &HttpRequest,
    student_id: i64,
    classroom_id: Option<i64>,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_unlocked_assignments_for_student(student_id).await {
        Ok(assignments) => {
            let items: Vec<_> = match classroom_id {
                Some(id) => assignments
                    .into_iter()
                    .filter(|a| a.classroom_id == Some(id))
                    .collect(),
                None => assignments,
            };
            let total = items.len() as i64;
            let response = AssignmentListResponse {
                items,
                pagination: PaginationInfo {
                    page: 1,
                    page_size: total.max(1),
                    total,
                    total_pages: 1,
                },
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询作业列表失败: {e}"),
            )),
        ),
    }
}
