use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RateLimit};
use crate::models::classrooms::requests::{
    ClassroomListQuery, CreateClassroomRequest, JoinClassroomRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::ClassroomService;
use crate::utils::SafeIDI64;

// 懒加载的全局 ClassroomService 实例
static CLASSROOM_SERVICE: Lazy<ClassroomService> = Lazy::new(ClassroomService::new_lazy);

pub async fn create_classroom(
    req: HttpRequest,
    body: web::Json<CreateClassroomRequest>,
) -> ActixResult<HttpResponse> {
    CLASSROOM_SERVICE
        .create_classroom(&req, body.into_inner())
        .await
}

pub async fn list_classrooms(
    req: HttpRequest,
    query: web::Query<ClassroomListQuery>,
) -> ActixResult<HttpResponse> {
    CLASSROOM_SERVICE
        .list_classrooms(&req, query.into_inner())
        .await
}

pub async fn list_my_classrooms(req: HttpRequest) -> ActixResult<HttpResponse> {
    CLASSROOM_SERVICE.list_my_classrooms(&req).await
}

pub async fn get_classroom(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    CLASSROOM_SERVICE.get_classroom(&req, path.0).await
}

pub async fn join_classroom(
    req: HttpRequest,
    body: web::Json<JoinClassroomRequest>,
) -> ActixResult<HttpResponse> {
    CLASSROOM_SERVICE
        .join_classroom(&req, body.into_inner())
        .await
}

pub async fn create_announcement(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<crate::models::classrooms::requests::CreateAnnouncementRequest>,
) -> ActixResult<HttpResponse> {
    CLASSROOM_SERVICE
        .create_announcement(&req, path.0, body.into_inner())
        .await
}

pub async fn list_announcements(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    CLASSROOM_SERVICE.list_announcements(&req, path.0).await
}

// 配置路由
pub fn configure_classroom_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/classrooms")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_classrooms))
                    .route(
                        web::post()
                            .to(create_classroom)
                            // 教师建自己的教室，管理员可以指定归属教师
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                    ),
            )
            .route("/mine", web::get().to(list_my_classrooms))
            .service(
                web::resource("/join")
                    .route(
                        web::post()
                            .to(join_classroom)
                            .wrap(middlewares::RequireRole::new(&UserRole::Student)),
                    )
                    .wrap(RateLimit::join_code()),
            )
            .route("/{id}", web::get().to(get_classroom))
            .service(
                web::resource("/{id}/announcements")
                    .route(web::get().to(list_announcements))
                    .route(
                        web::post()
                            .to(create_announcement)
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                    ),
            ),
    );
}
