use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;

use super::ExamService;
use crate::config::AppConfig;
use crate::middlewares::RequireJWT;
use crate::models::activities::entities::ActivityKind;
use crate::models::exams::requests::CreateExamRequest;
use crate::models::files::entities::FileRef;
use crate::models::study_plans::entities::StudyPlanMetadata;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::planner::{self, PlanOptions};

/// 单个大纲文件参与日期提取的读取上限
const SYLLABUS_SCAN_LIMIT: usize = 64 * 1024;

/// 收集大纲附件里纯文本类文件的内容，供日期提取扫描。
/// 读不到的文件跳过，不影响创建流程。
async fn collect_syllabus_text(files: &[FileRef]) -> String {
    let upload_dir = &AppConfig::get().upload.dir;
    let mut text = String::new();

    for file in files {
        let lower = file.file_name.to_lowercase();
        if !(lower.ends_with(".txt") || lower.ends_with(".md") || lower.ends_with(".csv")) {
            continue;
        }
        let Some(token) = file
            .url
            .strip_prefix("/api/files/")
            .and_then(|rest| rest.strip_suffix("/download"))
        else {
            continue;
        };

        let path = format!("{upload_dir}/{token}.bin");
        match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let slice = &bytes[..bytes.len().min(SYLLABUS_SCAN_LIMIT)];
                text.push(' ');
                text.push_str(&String::from_utf8_lossy(slice));
            }
            Err(e) => {
                tracing::warn!("Failed to read syllabus file {}: {}", file.file_name, e);
            }
        }
    }

    text
}

/// 创建考试。date 缺省时从标题、描述和纯文本大纲附件中提取
/// 日期，提取不到则报 400。带教室的考试创建成功后顺带生成
/// 一份 14 天的班级级学习计划，生成失败不影响创建结果。
pub async fn create_exam(
    service: &ExamService,
    request: &HttpRequest,
    create_request: CreateExamRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(current_user) = RequireJWT::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized()
            .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
    };

    if create_request.title.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "考试标题不能为空",
        )));
    }

    // 非管理员只能在自己的教室下建考试
    if let Some(classroom_id) = create_request.classroom_id
        && current_user.role != UserRole::Admin
    {
        match storage.get_classroom_by_id(classroom_id).await {
            Ok(Some(classroom)) if classroom.teacher_id == Some(current_user.id) => {}
            Ok(Some(_)) => {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::ClassroomPermissionDenied,
                    "您不是该教室的归属教师",
                )));
            }
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
        }
    }

    let now = Utc::now();
    let date = match create_request.date {
        Some(date) => date,
        None => {
            let mut text = format!(
                "{} {}",
                create_request.title,
                create_request.description.as_deref().unwrap_or("")
            );
            text.push_str(&collect_syllabus_text(&create_request.syllabus_files).await);
            match planner::extract_exam_date(&text, now) {
                Some(date) => date,
                None => {
                    return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                        ErrorCode::ExamDateMissing,
                        "未指定考试日期，且无法从标题、描述或大纲附件中提取",
                    )));
                }
            }
        }
    };

    let exam = match storage
        .create_exam(
            current_user.id,
            create_request.classroom_id,
            create_request.title.trim().to_string(),
            create_request.subject,
            date.timestamp(),
            create_request.description,
            create_request.syllabus_files,
        )
        .await
    {
        Ok(exam) => exam,
        Err(e) => {
            let error_string = e.to_string();
            if error_string.contains("FOREIGN KEY constraint failed") {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::ClassroomNotFound,
                    "教室不存在",
                )));
            }
            tracing::error!("Failed to create exam: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "创建考试失败",
                )),
            );
        }
    };

    tracing::info!(
        "Exam {} \"{}\" scheduled at {} by user {}",
        exam.id,
        exam.title,
        exam.date,
        current_user.id
    );

    if let Err(e) = storage
        .log_activity(
            ActivityKind::ExamScheduled,
            format!("Exam \"{}\" scheduled for {}", exam.title, exam.date.format("%Y-%m-%d")),
            exam.classroom_id,
            Some(current_user.id),
            Some(serde_json::json!({ "exam_id": exam.id })),
        )
        .await
    {
        tracing::warn!("Failed to log exam activity: {}", e);
    }

    // 班级级学习计划，失败只记日志
    if let Some(classroom_id) = exam.classroom_id {
        let options = PlanOptions::default();
        let topics = planner::topic_pool(
            &exam.title,
            exam.subject.as_deref(),
            &exam.syllabus_files,
        );
        let schedule = planner::build_topic_plan(&topics, exam.date.date_naive(), &options);
        let days_until_exam = (exam.date.date_naive() - now.date_naive()).num_days();

        let result = storage
            .create_study_plan(
                Some(classroom_id),
                None,
                format!("Study plan for {}", exam.title),
                schedule,
                StudyPlanMetadata {
                    exam_id: Some(exam.id),
                    days_until_exam: Some(days_until_exam),
                    sessions_per_day: Some(options.sessions_per_day),
                    difficulty: None,
                },
            )
            .await;

        match result {
            Ok(plan) => {
                if let Err(e) = storage
                    .log_activity(
                        ActivityKind::PlanGenerated,
                        format!("Class study plan generated for \"{}\"", exam.title),
                        Some(classroom_id),
                        Some(current_user.id),
                        Some(serde_json::json!({ "exam_id": exam.id, "plan_id": plan.id })),
                    )
                    .await
                {
                    tracing::warn!("Failed to log plan activity: {}", e);
                }
            }
            Err(e) => {
                tracing::warn!("Failed to generate class study plan for exam {}: {}", exam.id, e);
            }
        }
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(exam, "考试创建成功")))
}
