use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudyPlanService;
use crate::models::{ApiResponse, ErrorCode};

/// 归属校验由路由上的 RequireRoleOrOwner 完成
pub async fn delete_study_plan(
    service: &StudyPlanService,
    request: &HttpRequest,
    plan_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_study_plan(plan_id).await {
        Ok(true) => {
            tracing::info!("Study plan {} deleted", plan_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("学习计划删除成功")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StudyPlanNotFound,
            "学习计划不存在",
        ))),
        Err(e) => {
            tracing::error!("Failed to delete study plan {}: {}", plan_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "学习计划删除失败",
                )),
            )
        }
    }
}
