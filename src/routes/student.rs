use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, OwnedResource, RateLimit, RequireRoleOrOwner};
use crate::models::study_plans::requests::{
    GenerateStudentPlanRequest, GenerateWeightedPlanRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::{NotificationService, StudyPlanService};
use crate::utils::SafeIDI64;

static STUDY_PLAN_SERVICE: Lazy<StudyPlanService> = Lazy::new(StudyPlanService::new_lazy);
static NOTIFICATION_SERVICE: Lazy<NotificationService> = Lazy::new(NotificationService::new_lazy);

pub async fn generate_student_plan(
    req: HttpRequest,
    body: web::Json<GenerateStudentPlanRequest>,
) -> ActixResult<HttpResponse> {
    STUDY_PLAN_SERVICE
        .generate_student_plan(&req, body.into_inner())
        .await
}

pub async fn generate_weighted_plan(
    req: HttpRequest,
    body: web::Json<GenerateWeightedPlanRequest>,
) -> ActixResult<HttpResponse> {
    STUDY_PLAN_SERVICE
        .generate_weighted_plan(&req, body.into_inner())
        .await
}

pub async fn list_study_plans(req: HttpRequest) -> ActixResult<HttpResponse> {
    STUDY_PLAN_SERVICE.list_study_plans(&req).await
}

pub async fn get_study_plan(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    STUDY_PLAN_SERVICE.get_study_plan(&req, path.0).await
}

pub async fn delete_study_plan(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    STUDY_PLAN_SERVICE.delete_study_plan(&req, path.0).await
}

pub async fn list_notifications(req: HttpRequest) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE.list_notifications(&req).await
}

pub async fn unread_count(req: HttpRequest) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE.unread_count(&req).await
}

pub async fn mark_notification_read(
    req: HttpRequest,
    path: SafeIDI64,
) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE.mark_read(&req, path.0).await
}

pub async fn mark_all_notifications_read(req: HttpRequest) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE.mark_all_read(&req).await
}

// 配置路由
pub fn configure_student_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/student")
            .wrap(middlewares::RequireRole::new(&UserRole::Student))
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/studyplan/generate")
                    .route(web::post().to(generate_student_plan))
                    .wrap(RateLimit::plan_generation()),
            )
            .service(
                web::resource("/studyplan/generate-weighted")
                    .route(web::post().to(generate_weighted_plan))
                    .wrap(RateLimit::plan_generation()),
            )
            .route("/studyplans", web::get().to(list_study_plans))
            .service(
                web::resource("/studyplans/{id}")
                    .route(web::get().to(get_study_plan))
                    .route(web::delete().to(delete_study_plan))
                    // 只能操作自己的计划，管理员例外
                    .wrap(RequireRoleOrOwner::new(
                        UserRole::admin_roles(),
                        OwnedResource::StudyPlan,
                        "id",
                    )),
            )
            .route("/notifications", web::get().to(list_notifications))
            .route("/notifications/count", web::get().to(unread_count))
            .route(
                "/notifications/{id}/read",
                web::post().to(mark_notification_read),
            )
            .route(
                "/notifications/read-all",
                web::post().to(mark_all_notifications_read),
            ),
    );
}
