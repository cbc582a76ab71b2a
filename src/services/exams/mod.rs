/*!
 * 考试服务
 *
 * 考试日期可以显式给出，也可以从标题和描述的文本中提取。
 * 创建带教室的考试时会顺带生成一份班级级学习计划。
 */

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::models::exams::requests::{CreateExamRequest, ExamListQuery, UpdateExamRequest};
use crate::models::users::entities::{User, UserRole};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

pub struct ExamService {
    storage: Option<Arc<dyn Storage>>,
}

impl ExamService {
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

    pub async fn create_exam(
        &self,
        request: &HttpRequest,
        create_request: CreateExamRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_exam(self, request, create_request).await
    }

    pub async fn list_exams(
        &self,
        request: &HttpRequest,
        query: ExamListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_exams(self, request, query).await
    }

    pub async fn get_exam(&self, request: &HttpRequest, exam_id: i64) -> ActixResult<HttpResponse> {
        get::get_exam(self, request, exam_id).await
    }

    pub async fn update_exam(
        &self,
        request: &HttpRequest,
        exam_id: i64,
        update_request: UpdateExamRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_exam(self, request, exam_id, update_request).await
    }

    pub async fn delete_exam(
        &self,
        request: &HttpRequest,
        exam_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_exam(self, request, exam_id).await
    }
}

/// 校验当前用户可管理指定考试，通过则返回考试实体。
/// 管理员直通；带教室的考试检查教室归属教师；
/// 无教室的考试检查创建者本人。
pub(crate) async fn check_exam_manage_permission(
    storage: &Arc<dyn Storage>,
    current_user: &User,
    exam_id: i64,
) -> Result<crate::models::exams::entities::Exam, HttpResponse> {
    let exam = match storage.get_exam_by_id(exam_id).await {
        Ok(Some(exam)) => exam,
        Ok(None) => {
            return Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ExamNotFound,
                "考试不存在",
            )));
        }
        Err(e) => {
            return Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询考试失败: {e}"),
                )),
            );
        }
    };

    if current_user.role == UserRole::Admin {
        return Ok(exam);
    }

    match exam.classroom_id {
        Some(classroom_id) => match storage.get_classroom_by_id(classroom_id).await {
            Ok(Some(classroom)) if classroom.teacher_id == Some(current_user.id) => Ok(exam),
            Ok(_) => Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::ClassroomPermissionDenied,
                "您不是该教室的归属教师",
            ))),
            Err(e) => Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询教室失败: {e}"),
                )),
            ),
        },
        None => {
            if exam.created_by == current_user.id {
                Ok(exam)
            } else {
                Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::Forbidden,
                    "只能管理自己创建的考试",
                )))
            }
        }
    }
}
