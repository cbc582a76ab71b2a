use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RateLimit};
use crate::models::activities::requests::ActivityListQuery;
use crate::models::assignments::requests::GradeSubmissionRequest;
use crate::models::classrooms::requests::{
    AddStudentRequest, ArchiveClassroomRequest, UpdateStudentRequest,
};
use crate::models::study_plans::requests::GenerateClassPlanRequest;
use crate::models::users::entities::UserRole;
use crate::services::{ActivityService, AssignmentService, ClassroomService, StudyPlanService};
use crate::utils::SafeIDI64;

// 教师端复用各业务服务的懒加载实例
static CLASSROOM_SERVICE: Lazy<ClassroomService> = Lazy::new(ClassroomService::new_lazy);
static ASSIGNMENT_SERVICE: Lazy<AssignmentService> = Lazy::new(AssignmentService::new_lazy);
static ACTIVITY_SERVICE: Lazy<ActivityService> = Lazy::new(ActivityService::new_lazy);
static STUDY_PLAN_SERVICE: Lazy<StudyPlanService> = Lazy::new(StudyPlanService::new_lazy);

pub async fn archive_classroom(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<ArchiveClassroomRequest>,
) -> ActixResult<HttpResponse> {
    CLASSROOM_SERVICE
        .archive_classroom(&req, path.0, body.into_inner())
        .await
}

pub async fn list_roster(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    CLASSROOM_SERVICE.list_roster(&req, path.0).await
}

pub async fn add_student(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<AddStudentRequest>,
) -> ActixResult<HttpResponse> {
    CLASSROOM_SERVICE
        .add_student(&req, path.0, body.into_inner())
        .await
}

pub async fn update_student(
    req: HttpRequest,
    path: web::Path<(i64, i64)>,
    body: web::Json<UpdateStudentRequest>,
) -> ActixResult<HttpResponse> {
    let (classroom_id, student_id) = path.into_inner();
    CLASSROOM_SERVICE
        .update_student(&req, classroom_id, student_id, body.into_inner())
        .await
}

pub async fn remove_student(
    req: HttpRequest,
    path: web::Path<(i64, i64)>,
) -> ActixResult<HttpResponse> {
    let (classroom_id, student_id) = path.into_inner();
    CLASSROOM_SERVICE
        .remove_student(&req, classroom_id, student_id)
        .await
}

pub async fn import_roster(
    req: HttpRequest,
    path: SafeIDI64,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    CLASSROOM_SERVICE.import_roster(&req, path.0, payload).await
}

pub async fn export_roster(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    CLASSROOM_SERVICE.export_roster(&req, path.0).await
}

pub async fn classroom_analytics(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    CLASSROOM_SERVICE.get_classroom_analytics(&req, path.0).await
}

pub async fn classroom_activity(
    req: HttpRequest,
    path: SafeIDI64,
    query: web::Query<ActivityListQuery>,
) -> ActixResult<HttpResponse> {
    ACTIVITY_SERVICE
        .list_classroom_activities(&req, path.0, query.into_inner())
        .await
}

pub async fn activity_feed(
    req: HttpRequest,
    query: web::Query<ActivityListQuery>,
) -> ActixResult<HttpResponse> {
    ACTIVITY_SERVICE
        .list_activities(&req, query.into_inner())
        .await
}

pub async fn auto_evaluate(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.auto_grade(&req, path.0).await
}

pub async fn grade_submission(
    req: HttpRequest,
    path: web::Path<(i64, i64)>,
    body: web::Json<GradeSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    let (assignment_id, submission_id) = path.into_inner();
    ASSIGNMENT_SERVICE
        .grade_submission(&req, assignment_id, submission_id, body.into_inner())
        .await
}

pub async fn generate_class_plan(
    req: HttpRequest,
    body: web::Json<GenerateClassPlanRequest>,
) -> ActixResult<HttpResponse> {
    STUDY_PLAN_SERVICE
        .generate_class_plan(&req, body.into_inner())
        .await
}

// 配置路由
pub fn configure_teacher_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/teacher")
            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
            .wrap(middlewares::RequireJWT)
            .route(
                "/classrooms/{id}/archive",
                web::patch().to(archive_classroom),
            )
            .service(
                web::resource("/classrooms/{id}/students")
                    .route(web::get().to(list_roster))
                    .route(web::post().to(add_student)),
            )
            .service(
                web::resource("/classrooms/{id}/students/{student_id}")
                    .route(web::put().to(update_student))
                    .route(web::delete().to(remove_student)),
            )
            .route(
                "/classrooms/{id}/students/import",
                web::post().to(import_roster),
            )
            .route(
                "/classrooms/{id}/students/export",
                web::get().to(export_roster),
            )
            .route(
                "/classrooms/{id}/analytics",
                web::get().to(classroom_analytics),
            )
            .route(
                "/classrooms/{id}/activity",
                web::get().to(classroom_activity),
            )
            .route("/activity", web::get().to(activity_feed))
            .route(
                "/assignments/{id}/auto-evaluate",
                web::post().to(auto_evaluate),
            )
            .route(
                "/assignments/{id}/submissions/{submission_id}/grade",
                web::post().to(grade_submission),
            )
            .service(
                web::resource("/studyplans/generate")
                    .route(web::post().to(generate_class_plan))
                    .wrap(RateLimit::plan_generation()),
            ),
    );
}
