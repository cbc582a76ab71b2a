use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudyPlanService;
use crate::middlewares::RequireJWT;
use crate::models::study_plans::responses::StudyPlanListResponse;
use crate::models::{ApiResponse, ErrorCode};

/// 学生的计划列表：个人计划加上所加入教室的班级级计划，
/// 按生成时间倒序。
pub async fn list_study_plans(
    service: &StudyPlanService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(current_user) = RequireJWT::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized()
            .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
    };

    let mut plans = match storage.list_study_plans_for_student(current_user.id).await {
        Ok(plans) => plans,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询学习计划失败: {e}"),
                )),
            );
        }
    };

    let classroom_ids = match storage.list_classroom_ids_for_student(current_user.id).await {
        Ok(ids) => ids,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询教室失败: {e}"),
                )),
            );
        }
    };

    for classroom_id in classroom_ids {
        match storage.list_study_plans_for_classroom(classroom_id).await {
            Ok(class_plans) => plans.extend(class_plans),
            Err(e) => {
                // 单个教室查询失败不拖垮整个列表
                tracing::warn!(
                    "Failed to load class plans for classroom {}: {}",
                    classroom_id,
                    e
                );
            }
        }
    }

    plans.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        StudyPlanListResponse { items: plans },
        "获取成功",
    )))
}
