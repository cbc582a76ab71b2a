/*!
 * 自动评分
 *
 * 对某作业下所有未评分的提交按固定规则写入成绩：
 *
 * 1. 备注中出现 `auto:score=<n>`（大小写不敏感，n 为 1-3 位数字）
 *    时取 n 并夹取到 [0, 100]；负号不在模式内，`auto:score=-5` 不命中
 * 2. 否则带附件的提交记 100
 * 3. 否则记 0
 *
 * 已评分的提交不会被触碰：写入条件在 UPDATE 语句里带 grade IS NULL，
 * 与教师并发评分时教师的成绩不会被覆盖。重复执行是幂等的。
 */

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use once_cell::sync::Lazy;
use regex::Regex;

use super::{AssignmentService, check_assignment_manage_permission};
use crate::middlewares::RequireJWT;
use crate::models::activities::entities::ActivityKind;
use crate::models::assignments::responses::AutoGradeResponse;
use crate::models::{ApiResponse, ErrorCode};

static AUTO_SCORE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)auto:score=(\d{1,3})").unwrap());

/// 单条提交的启发式评分
pub(crate) fn heuristic_score(comment: Option<&str>, file_count: usize) -> i32 {
    if let Some(comment) = comment
        && let Some(caps) = AUTO_SCORE_RE.captures(comment)
        && let Ok(score) = caps[1].parse::<i32>()
    {
        return score.clamp(0, 100);
    }
    if file_count > 0 { 100 } else { 0 }
}

pub async fn auto_grade(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
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

    let submissions = match storage.list_submissions_for_assignment(assignment_id).await {
        Ok(submissions) => submissions,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询提交失败: {e}"),
                )),
            );
        }
    };

    let mut updated: i64 = 0;
    for submission in submissions.iter().filter(|s| s.grade.is_none()) {
        let score = heuristic_score(submission.comment.as_deref(), submission.files.len());
        match storage.set_grade_if_ungraded(submission.id, score).await {
            // false 表示期间已被人工评分，跳过
            Ok(true) => updated += 1,
            Ok(false) => {}
            Err(e) => {
                tracing::warn!(
                    "Auto-grade failed for submission {}: {}",
                    submission.id,
                    e
                );
            }
        }
    }

    tracing::info!(
        "Auto-grade for assignment {} updated {} submissions",
        assignment_id,
        updated
    );

    if let Err(e) = storage
        .log_activity(
            ActivityKind::AutoGraded,
            format!(
                "Auto-grade updated {} submissions for \"{}\"",
                updated, assignment.title
            ),
            assignment.classroom_id,
            Some(current_user.id),
            Some(serde_json::json!({
                "assignment_id": assignment_id,
                "updated": updated,
            })),
        )
        .await
    {
        tracing::warn!("Failed to log auto-grade activity: {}", e);
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        AutoGradeResponse { updated },
        "自动评分完成",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_directive_parsed() {
        assert_eq!(heuristic_score(Some("auto:score=85"), 0), 85);
    }

    #[test]
    fn test_score_directive_case_insensitive() {
        assert_eq!(heuristic_score(Some("AUTO:SCORE=42 done"), 0), 42);
    }

    #[test]
    fn test_score_above_hundred_clamped() {
        assert_eq!(heuristic_score(Some("auto:score=150"), 0), 100);
        assert_eq!(heuristic_score(Some("auto:score=999"), 3), 100);
    }

    #[test]
    fn test_negative_score_not_matched() {
        // 负号不在模式内，按附件规则兜底
        assert_eq!(heuristic_score(Some("auto:score=-5"), 2), 100);
        assert_eq!(heuristic_score(Some("auto:score=-5"), 0), 0);
    }

    #[test]
    fn test_files_without_directive_score_hundred() {
        assert_eq!(heuristic_score(Some("see attached"), 1), 100);
        assert_eq!(heuristic_score(None, 4), 100);
    }

    #[test]
    fn test_empty_submission_scores_zero() {
        assert_eq!(heuristic_score(None, 0), 0);
        assert_eq!(heuristic_score(Some(""), 0), 0);
    }

    #[test]
    fn test_directive_embedded_in_text() {
        assert_eq!(
            heuristic_score(Some("finished early, auto:score=77, please check"), 0),
            77
        );
    }
}
