use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AssignmentService, check_assignment_manage_permission};
use crate::middlewares::RequireJWT;
use crate::models::activities::entities::ActivityKind;
use crate::models::assignments::requests::GradeSubmissionRequest;
use crate::models::{ApiResponse, ErrorCode};

/// 人工评分。grade 传 null 表示撤销成绩；
/// 教师评分有意覆盖自动评分的结果。
pub async fn grade_submission(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
    submission_id: i64,
    grade_request: GradeSubmissionRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(current_user) = RequireJWT::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized()
            .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
    };

    let assignment =
        match check_assignment_manage_permission(&storage, &current_user, assignment_id).await {
            Ok(assignment) => assignment,
            Err(resp) => return Ok(resp),
        };

    if let Some(grade) = grade_request.grade
        && !(0..=100).contains(&grade)
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::GradeInvalid,
            "成绩必须在 0 到 100 之间",
        )));
    }

    // 提交必须属于该作业
    match storage.get_submission_by_id(submission_id).await {
        Ok(Some(submission)) if submission.assignment_id == assignment_id => {}
        Ok(_) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SubmissionNotFound,
                "提交不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询提交失败: {e}"),
                )),
            );
        }
    }

    match storage
        .grade_submission(submission_id, grade_request.grade, grade_request.feedback)
        .await
    {
        Ok(Some(submission)) => {
            tracing::info!(
                "Submission {} graded {:?} by user {}",
                submission_id,
                submission.grade,
                current_user.id
            );

            if let Err(e) = storage
                .log_activity(
                    ActivityKind::SubmissionGraded,
                    format!("A submission for \"{}\" was graded", assignment.title),
                    assignment.classroom_id,
                    Some(current_user.id),
                    Some(serde_json::json!({
                        "assignment_id": assignment_id,
                        "submission_id": submission_id,
                    })),
                )
                .await
            {
                tracing::warn!("Failed to log grading activity: {}", e);
            }

            // 学生收到成绩通知，失败不影响评分结果
            if let Err(e) = storage
                .create_notification(
                    submission.student_id,
                    format!("Your submission for \"{}\" has been graded", assignment.title),
                    Some(format!("/assignments/{assignment_id}")),
                )
                .await
            {
                tracing::warn!("Failed to notify student of grade: {}", e);
            }

            Ok(HttpResponse::Ok().json(ApiResponse::success(submission, "评分成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SubmissionNotFound,
            "提交不存在",
        ))),
        Err(e) => {
            tracing::error!("Failed to grade submission {}: {}", submission_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "评分失败",
                )),
            )
        }
    }
}
