use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::storage::Storage;

pub mod stats;

/// 管理端聚合。用户/教室/作业的 CRUD 复用各自服务，
/// 这里只承载跨实体的统计。
pub struct AdminService {
    storage: Option<Arc<dyn Storage>>,
}

impl AdminService {
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

    pub async fn get_platform_stats(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        stats::get_platform_stats(self, request).await
    }
}
