use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::middlewares::RequireJWT;
use crate::models::activities::entities::ActivityKind;
use crate::models::assignments::requests::SubmitAssignmentRequest;
use crate::models::{ApiResponse, ErrorCode};

/// 学生提交作业。重复提交覆盖旧提交并清空已有评分，
/// 截止时间过后仍可提交（迟交由教师酌情处理）。
pub async fn submit_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
    submit_request: SubmitAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(current_user) = RequireJWT::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized()
            .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
    };

    let assignment = match storage.get_assignment_by_id(assignment_id).await {
        Ok(Some(assignment)) => assignment,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AssignmentNotFound,
                "作业不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询作业失败: {e}"),
                )),
            );
        }
    };

    // 未解锁或已归档的作业对学生不可见
    if !assignment.unlocked || assignment.archived {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AssignmentNotFound,
            "作业不存在",
        )));
    }

    if let Some(classroom_id) = assignment.classroom_id {
        match storage
            .is_student_in_classroom(classroom_id, current_user.id)
            .await
        {
            Ok(true) => {}
            Ok(false) => {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::ClassroomPermissionDenied,
                    "您不是该教室成员",
                )));
            }
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("查询名册失败: {e}"),
                    )),
                );
            }
        }
    }

    match storage
        .upsert_submission(
            assignment_id,
            current_user.id,
            submit_request.files,
            submit_request.comment,
        )
        .await
    {
        Ok(submission) => {
            tracing::info!(
                "Submission {} received for assignment {} from student {}",
                submission.id,
                assignment_id,
                current_user.id
            );

            if let Err(e) = storage
                .log_activity(
                    ActivityKind::SubmissionReceived,
                    format!(
                        "{} submitted \"{}\"",
                        current_user.username, assignment.title
                    ),
                    assignment.classroom_id,
                    Some(current_user.id),
                    Some(serde_json::json!({ "assignment_id": assignment_id })),
                )
                .await
            {
                tracing::warn!("Failed to log submission activity: {}", e);
            }

            Ok(HttpResponse::Ok().json(ApiResponse::success(submission, "提交成功")))
        }
        Err(e) => {
            tracing::error!("Failed to submit assignment: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "提交失败",
                )),
            )
        }
    }
}
