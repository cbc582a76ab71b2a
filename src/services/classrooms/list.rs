use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassroomService;
use crate::middlewares::RequireJWT;
use crate::models::classrooms::requests::ClassroomListQuery;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_classrooms(
    service: &ClassroomService,
    request: &HttpRequest,
    mut query: ClassroomListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(current_user) = RequireJWT::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized()
            .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
    };

    // 教师只能看到自己的教室；学生走 /mine
    match current_user.role {
        UserRole::Admin => {}
        UserRole::Teacher => {
            query.teacher_id = Some(current_user.id);
        }
        UserRole::Student => {
            return list_my_classrooms(service, request).await;
        }
    }

    match storage.list_classrooms_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询教室列表失败: {e}"),
            )),
        ),
    }
}

pub async fn list_my_classrooms(
    service: &ClassroomService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(HttpResponse::Unauthorized()
            .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
    };

    match storage
        .list_classrooms_for_student(user_id, ClassroomListQuery::default())
        .await
    {
        Ok(classrooms) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(classrooms, "查询成功")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询教室列表失败: {e}"),
            )),
        ),
    }
}
