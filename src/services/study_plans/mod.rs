/*!
 * 学习计划服务
 *
 * 三种生成入口：教师为全班生成话题轮换计划，学生为自己生成
 * 考前冲刺计划，学生按科目难度生成加权计划。生成本身是纯函数，
 * 见 services::planner。
 */

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::models::study_plans::requests::{
    GenerateClassPlanRequest, GenerateStudentPlanRequest, GenerateWeightedPlanRequest,
};
use crate::storage::Storage;

pub mod delete;
pub mod generate;
pub mod get;
pub mod list;

pub struct StudyPlanService {
    storage: Option<Arc<dyn Storage>>,
}

impl StudyPlanService {
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

    pub async fn generate_class_plan(
        &self,
        request: &HttpRequest,
        generate_request: GenerateClassPlanRequest,
    ) -> ActixResult<HttpResponse> {
        generate::generate_class_plan(self, request, generate_request).await
    }

    pub async fn generate_student_plan(
        &self,
        request: &HttpRequest,
        generate_request: GenerateStudentPlanRequest,
    ) -> ActixResult<HttpResponse> {
        generate::generate_student_plan(self, request, generate_request).await
    }

    pub async fn generate_weighted_plan(
        &self,
        request: &HttpRequest,
        generate_request: GenerateWeightedPlanRequest,
    ) -> ActixResult<HttpResponse> {
        generate::generate_weighted_plan(self, request, generate_request).await
    }

    pub async fn list_study_plans(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_study_plans(self, request).await
    }

    pub async fn get_study_plan(
        &self,
        request: &HttpRequest,
        plan_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_study_plan(self, request, plan_id).await
    }

    pub async fn delete_study_plan(
        &self,
        request: &HttpRequest,
        plan_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_study_plan(self, request, plan_id).await
    }
}
