use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudyPlanService;
use crate::models::{ApiResponse, ErrorCode};

/// 归属校验由路由上的 RequireRoleOrOwner 完成
pub async fn get_study_plan(
    service: &StudyPlanService,
    request: &HttpRequest,
    plan_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_study_plan_by_id(plan_id).await {
        Ok(Some(plan)) => Ok(HttpResponse::Ok().json(ApiResponse::success(plan, "获取成功"))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StudyPlanNotFound,
            "学习计划不存在",
        ))),
        Err(e) => {
            tracing::error!("Failed to get study plan {}: {}", plan_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "查询学习计划失败",
                )),
            )
        }
    }
}
