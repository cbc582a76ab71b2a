use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;

use super::StudyPlanService;
use crate::middlewares::RequireJWT;
use crate::models::activities::entities::ActivityKind;
use crate::models::exams::entities::Exam;
use crate::models::study_plans::entities::StudyPlanMetadata;
use crate::models::study_plans::requests::{
    GenerateClassPlanRequest, GenerateStudentPlanRequest, GenerateWeightedPlanRequest,
};
use crate::models::users::entities::User;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::classrooms::check_classroom_manage_permission;
use crate::services::planner::{self, PlanOptions};
use crate::storage::Storage;

/// 目标考试：指定了 exam_id 就按 ID 取，否则取该学生
/// 所有教室中最近的一场未来考试。
async fn resolve_target_exam(
    storage: &Arc<dyn Storage>,
    student_id: i64,
    exam_id: Option<i64>,
) -> Result<Exam, HttpResponse> {
    match exam_id {
        Some(exam_id) => match storage.get_exam_by_id(exam_id).await {
            Ok(Some(exam)) => Ok(exam),
            Ok(None) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ExamNotFound,
                "考试不存在",
            ))),
            Err(e) => Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询考试失败: {e}"),
                )),
            ),
        },
        None => {
            let classroom_ids = match storage.list_classroom_ids_for_student(student_id).await {
                Ok(ids) => ids,
                Err(e) => {
                    return Err(HttpResponse::InternalServerError().json(
                        ApiResponse::error_empty(
                            ErrorCode::InternalServerError,
                            format!("查询教室失败: {e}"),
                        ),
                    ));
                }
            };

            match storage
                .get_next_exam_for_classrooms(&classroom_ids, Utc::now().timestamp())
                .await
            {
                Ok(Some(exam)) => Ok(exam),
                Ok(None) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::NoUpcomingExam,
                    "没有即将到来的考试",
                ))),
                Err(e) => Err(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("查询考试失败: {e}"),
                    )),
                ),
            }
        }
    }
}

/// 距考试的整天数，当天及以前按 1 天处理
fn days_until(exam: &Exam) -> i64 {
    (exam.date.date_naive() - Utc::now().date_naive())
        .num_days()
        .max(1)
}

/// 每日学习时长：取请求里的偏好值，0 或缺省回退到 60 分钟
fn daily_minutes(preferred: Option<u32>) -> u32 {
    preferred.filter(|m| *m > 0).unwrap_or(60)
}

async fn log_plan_generated(
    storage: &Arc<dyn Storage>,
    classroom_id: Option<i64>,
    user: &User,
    exam_id: i64,
    plan_id: i64,
) {
    if let Err(e) = storage
        .log_activity(
            ActivityKind::PlanGenerated,
            format!("Study plan {plan_id} generated"),
            classroom_id,
            Some(user.id),
            Some(serde_json::json!({ "exam_id": exam_id, "plan_id": plan_id })),
        )
        .await
    {
        tracing::warn!("Failed to log plan activity: {}", e);
    }
}

/// 教师为全班生成话题轮换计划
pub async fn generate_class_plan(
    service: &StudyPlanService,
    request: &HttpRequest,
    generate_request: GenerateClassPlanRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(current_user) = RequireJWT::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized()
            .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
    };

    let exam = match storage.get_exam_by_id(generate_request.exam_id).await {
        Ok(Some(exam)) => exam,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ExamNotFound,
                "考试不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询考试失败: {e}"),
                )),
            );
        }
    };

    // 班级级计划必须挂在教室上
    let Some(classroom_id) = exam.classroom_id else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "该考试未关联教室，无法生成班级计划",
        )));
    };

    if let Err(resp) =
        check_classroom_manage_permission(&storage, &current_user, classroom_id).await
    {
        return Ok(resp);
    }

    let options = PlanOptions {
        sessions_per_day: generate_request.sessions_per_day.max(1),
        ..PlanOptions::default()
    };
    let topics = planner::topic_pool(&exam.title, exam.subject.as_deref(), &exam.syllabus_files);
    let schedule = planner::build_topic_plan(&topics, exam.date.date_naive(), &options);

    match storage
        .create_study_plan(
            Some(classroom_id),
            None,
            format!("Study plan for {}", exam.title),
            schedule,
            StudyPlanMetadata {
                exam_id: Some(exam.id),
                days_until_exam: Some(days_until(&exam)),
                sessions_per_day: Some(options.sessions_per_day),
                difficulty: None,
            },
        )
        .await
    {
        Ok(plan) => {
            tracing::info!(
                "Class study plan {} generated for exam {} by user {}",
                plan.id,
                exam.id,
                current_user.id
            );
            log_plan_generated(&storage, Some(classroom_id), &current_user, exam.id, plan.id)
                .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(plan, "学习计划生成成功")))
        }
        Err(e) => {
            tracing::error!("Failed to save class study plan: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "学习计划保存失败",
                )),
            )
        }
    }
}

/// 学生生成个人冲刺计划：从今天起每天一场，直到考试日
pub async fn generate_student_plan(
    service: &StudyPlanService,
    request: &HttpRequest,
    generate_request: GenerateStudentPlanRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(current_user) = RequireJWT::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized()
            .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
    };

    let exam =
        match resolve_target_exam(&storage, current_user.id, generate_request.exam_id).await {
            Ok(exam) => exam,
            Err(resp) => return Ok(resp),
        };

    let days = days_until(&exam);
    let topics = planner::student_topic_rotation(days);
    let schedule = planner::build_student_plan(
        &topics,
        Utc::now().date_naive(),
        days,
        daily_minutes(generate_request.preferred_daily_minutes),
    );

    match storage
        .create_study_plan(
            exam.classroom_id,
            Some(current_user.id),
            format!("Personal plan for {}", exam.title),
            schedule,
            StudyPlanMetadata {
                exam_id: Some(exam.id),
                days_until_exam: Some(days),
                sessions_per_day: Some(1),
                difficulty: None,
            },
        )
        .await
    {
        Ok(plan) => {
            tracing::info!(
                "Student plan {} generated for exam {} by student {}",
                plan.id,
                exam.id,
                current_user.id
            );
            log_plan_generated(&storage, exam.classroom_id, &current_user, exam.id, plan.id)
                .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(plan, "学习计划生成成功")))
        }
        Err(e) => {
            tracing::error!("Failed to save student study plan: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "学习计划保存失败",
                )),
            )
        }
    }
}

/// 学生按科目难度生成加权计划，难度高的科目占更多天数
pub async fn generate_weighted_plan(
    service: &StudyPlanService,
    request: &HttpRequest,
    generate_request: GenerateWeightedPlanRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(current_user) = RequireJWT::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized()
            .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
    };

    if generate_request.subjects.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "科目列表不能为空",
        )));
    }

    let exam =
        match resolve_target_exam(&storage, current_user.id, generate_request.exam_id).await {
            Ok(exam) => exam,
            Err(resp) => return Ok(resp),
        };

    // 计划最长 14 天，考试更近时压缩到剩余天数
    let days = days_until(&exam).min(14);
    let options = PlanOptions {
        days,
        ..PlanOptions::default()
    };
    let schedule =
        planner::build_weighted_plan(&generate_request.subjects, exam.date.date_naive(), &options);

    let difficulty_summary = generate_request
        .subjects
        .iter()
        .map(|s| format!("{}={}", s.name, s.difficulty.to_lowercase()))
        .collect::<Vec<_>>()
        .join(",");

    match storage
        .create_study_plan(
            exam.classroom_id,
            Some(current_user.id),
            format!("Weighted plan for {}", exam.title),
            schedule,
            StudyPlanMetadata {
                exam_id: Some(exam.id),
                days_until_exam: Some(days_until(&exam)),
                sessions_per_day: Some(1),
                difficulty: Some(difficulty_summary),
            },
        )
        .await
    {
        Ok(plan) => {
            tracing::info!(
                "Weighted plan {} generated for exam {} by student {}",
                plan.id,
                exam.id,
                current_user.id
            );
            log_plan_generated(&storage, exam.classroom_id, &current_user, exam.id, plan.id)
                .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(plan, "学习计划生成成功")))
        }
        Err(e) => {
            tracing::error!("Failed to save weighted study plan: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "学习计划保存失败",
                )),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daily_minutes_prefers_request_value() {
        assert_eq!(daily_minutes(Some(90)), 90);
        assert_eq!(daily_minutes(Some(25)), 25);
    }

    #[test]
    fn test_daily_minutes_defaults_on_missing_or_zero() {
        assert_eq!(daily_minutes(None), 60);
        assert_eq!(daily_minutes(Some(0)), 60);
    }

    #[test]
    fn test_student_plan_request_carries_preferred_daily_minutes() {
        let req: GenerateStudentPlanRequest =
            serde_json::from_str(r#"{"exam_id": 7, "preferred_daily_minutes": 45}"#).unwrap();
        assert_eq!(req.exam_id, Some(7));
        assert_eq!(req.preferred_daily_minutes, Some(45));

        let req: GenerateStudentPlanRequest = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(req.preferred_daily_minutes, None);
    }
}
