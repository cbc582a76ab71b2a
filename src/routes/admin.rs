use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::classrooms::requests::UpdateClassroomRequest;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::{CreateUserRequest, UpdateUserRequest, UserListQuery};
use crate::services::{AdminService, AssignmentService, ClassroomService, UserService};
use crate::utils::SafeIDI64;

static ADMIN_SERVICE: Lazy<AdminService> = Lazy::new(AdminService::new_lazy);
static USER_SERVICE: Lazy<UserService> = Lazy::new(UserService::new_lazy);
static CLASSROOM_SERVICE: Lazy<ClassroomService> = Lazy::new(ClassroomService::new_lazy);
static ASSIGNMENT_SERVICE: Lazy<AssignmentService> = Lazy::new(AssignmentService::new_lazy);

pub async fn get_platform_stats(req: HttpRequest) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE.get_platform_stats(&req).await
}

pub async fn create_user(
    req: HttpRequest,
    body: web::Json<CreateUserRequest>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE.create_user(body.into_inner(), &req).await
}

pub async fn list_users(
    req: HttpRequest,
    query: web::Query<UserListQuery>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE.list_users(query.into_inner(), &req).await
}

pub async fn get_user(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    USER_SERVICE.get_user(&req, path.0).await
}

pub async fn update_user(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<UpdateUserRequest>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE
        .update_user(&req, path.0, body.into_inner())
        .await
}

pub async fn delete_user(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    USER_SERVICE.delete_user(&req, path.0).await
}

pub async fn update_classroom(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<UpdateClassroomRequest>,
) -> ActixResult<HttpResponse> {
    CLASSROOM_SERVICE
        .update_classroom(&req, path.0, body.into_inner())
        .await
}

/// 删除即归档，名册与历史数据保留
pub async fn delete_classroom(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    CLASSROOM_SERVICE.delete_classroom(&req, path.0).await
}

/// 删除即归档，提交记录保留
pub async fn delete_assignment(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.delete_assignment(&req, path.0).await
}

// 配置路由
pub fn configure_admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/admin")
            .wrap(middlewares::RequireRole::new(&UserRole::Admin))
            .wrap(middlewares::RequireJWT)
            .route("/stats", web::get().to(get_platform_stats))
            .service(
                web::resource("/users")
                    .route(web::get().to(list_users))
                    .route(web::post().to(create_user)),
            )
            .service(
                web::resource("/users/{id}")
                    .route(web::get().to(get_user))
                    .route(web::put().to(update_user))
                    .route(web::delete().to(delete_user)),
            )
            .service(
                web::resource("/classrooms/{id}")
                    .route(web::put().to(update_classroom))
                    .route(web::delete().to(delete_classroom)),
            )
            .route("/assignments/{id}", web::delete().to(delete_assignment)),
    );
}
