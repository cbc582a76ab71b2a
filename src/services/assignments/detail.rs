use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::middlewares::RequireJWT;
use crate::models::assignments::responses::AssignmentDetailResponse;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

/// 作业详情。教师/管理员附带全部提交；
/// 学生要求作业已解锁且自己在教室中，附带自己的提交。
pub async fn get_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
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

    let submissions = match current_user.role {
        UserRole::Student => {
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
                        return Ok(HttpResponse::InternalServerError().json(
                            ApiResponse::error_empty(
                                ErrorCode::InternalServerError,
                                format!("查询名册失败: {e}"),
                            ),
                        ));
                    }
                }
            }
            match storage.get_submission(assignment_id, current_user.id).await {
                Ok(submission) => submission.into_iter().collect(),
                Err(e) => {
                    return Ok(
                        HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                            ErrorCode::InternalServerError,
                            format!("查询提交失败: {e}"),
                        )),
                    );
                }
            }
        }
        UserRole::Teacher | UserRole::Admin => {
            match storage.list_submissions_for_assignment(assignment_id).await {
                Ok(submissions) => submissions,
                Err(e) => {
                    return Ok(
                        HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                            ErrorCode::InternalServerError,
                            format!("查询提交失败: {e}"),
                        )),
                    );
                }
            }
        }
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        AssignmentDetailResponse {
            assignment,
            submissions,
        },
        "查询成功",
    )))
}
