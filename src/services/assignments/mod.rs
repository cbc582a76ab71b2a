pub mod auto_grade;
pub mod create;
pub mod delete;
pub mod detail;
pub mod grade;
pub mod list;
pub mod submit;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::assignments::entities::Assignment;
use crate::models::users::entities::{User, UserRole};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct AssignmentService {
    storage: Option<Arc<dyn Storage>>,
}

/// 作业管理权限：管理员放行；教师须为作业所属教室的归属教师。
/// 无教室归属的作业只有创建者和管理员能管理。
pub(crate) async fn check_assignment_manage_permission(
    storage: &Arc<dyn Storage>,
    current_user: &User,
    assignment_id: i64,
) -> Result<Assignment, HttpResponse> {
    let assignment = match storage.get_assignment_by_id(assignment_id).await {
        Ok(Some(assignment)) => assignment,
        Ok(None) => {
            return Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AssignmentNotFound,
                "作业不存在",
            )));
        }
        Err(e) => {
            return Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询作业失败: {e}"),
                )),
            );
        }
    };

    if current_user.role == UserRole::Admin {
        return Ok(assignment);
    }

    match assignment.classroom_id {
        Some(classroom_id) => match storage.get_classroom_by_id(classroom_id).await {
            Ok(Some(classroom)) if classroom.teacher_id == Some(current_user.id) => Ok(assignment),
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
            if assignment.created_by == current_user.id {
                Ok(assignment)
            } else {
                Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::Forbidden,
                    "没有管理该作业的权限",
                )))
            }
        }
    }
}

impl AssignmentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 创建作业
    pub async fn create_assignment(
        &self,
        request: &HttpRequest,
        create_request: crate::models::assignments::requests::CreateAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_assignment(self, request, create_request).await
    }

    // 按角色列出作业
    pub async fn list_assignments(
        &self,
        request: &HttpRequest,
        query: crate::models::assignments::requests::AssignmentListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_assignments(self, request, query).await
    }

    // 作业详情（教师/管理员含全部提交，学生含自己的提交）
    pub async fn get_assignment(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_assignment(self, request, assignment_id).await
    }

    // 更新作业
    pub async fn update_assignment(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
        update_request: crate::models::assignments::requests::UpdateAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_assignment(self, request, assignment_id, update_request).await
    }

    // 归档作业
    pub async fn archive_assignment(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        update::archive_assignment(self, request, assignment_id).await
    }

    // 删除作业（管理员）
    pub async fn delete_assignment(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_assignment(self, request, assignment_id).await
    }

    // 学生提交作业
    pub async fn submit_assignment(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
        submit_request: crate::models::assignments::requests::SubmitAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        submit::submit_assignment(self, request, assignment_id, submit_request).await
    }

    // 人工评分
    pub async fn grade_submission(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
        submission_id: i64,
        grade_request: crate::models::assignments::requests::GradeSubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        grade::grade_submission(self, request, assignment_id, submission_id, grade_request).await
    }

    // 自动评分
    pub async fn auto_grade(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        auto_grade::auto_grade(self, request, assignment_id).await
    }
}
