use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::models::activities::requests::ActivityListQuery;
use crate::storage::Storage;

pub mod list;

/// 班级动态流的读取端。写入分散在各业务服务里，
/// 统一走 Storage::log_activity，失败只记日志。
pub struct ActivityService {
    storage: Option<Arc<dyn Storage>>,
}

impl ActivityService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => request
                .app_data::<web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone(),
        }
    }

    pub async fn list_activities(
        &self,
        request: &HttpRequest,
        query: ActivityListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_activities(self, request, query).await
    }

    pub async fn list_classroom_activities(
        &self,
        request: &HttpRequest,
        classroom_id: i64,
        query: ActivityListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_classroom_activities(self, request, classroom_id, query).await
    }
}
