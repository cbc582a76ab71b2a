pub mod analytics;
pub mod announce;
pub mod create;
pub mod delete;
pub mod export;
pub mod get;
pub mod import;
pub mod join;
pub mod list;
pub mod roster;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::classrooms::entities::Classroom;
use crate::models::users::entities::{User, UserRole};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct ClassroomService {
    storage: Option<Arc<dyn Storage>>,
}

/// 教室管理权限：管理员放行，教师须为该教室的归属教师。
/// 返回教室实体避免调用方二次查询。
pub(crate) async fn check_classroom_manage_permission(
    storage: &Arc<dyn Storage>,
    current_user: &User,
    classroom_id: i64,
) -> Result<Classroom, HttpResponse> {
    let classroom = match storage.get_classroom_by_id(classroom_id).await {
        Ok(Some(classroom)) => classroom,
        Ok(None) => {
            return Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ClassroomNotFound,
                "教室不存在",
            )));
        }
        Err(e) => {
            return Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询教室失败: {e}"),
                )),
            );
        }
    };

    if current_user.role == UserRole::Admin {
        return Ok(classroom);
    }

    if classroom.teacher_id == Some(current_user.id) {
        return Ok(classroom);
    }

    Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
        ErrorCode::ClassroomPermissionDenied,
        "您不是该教室的归属教师",
    )))
}

impl ClassroomService {
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

    // 创建教室
    pub async fn create_classroom(
        &self,
        request: &HttpRequest,
        create_request: crate::models::classrooms::requests::CreateClassroomRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_classroom(self, request, create_request).await
    }

    // 分页列出教室（按角色过滤）
    pub async fn list_classrooms(
        &self,
        request: &HttpRequest,
        query: crate::models::classrooms::requests::ClassroomListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_classrooms(self, request, query).await
    }

    // 当前学生加入的教室
    pub async fn list_my_classrooms(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_my_classrooms(self, request).await
    }

    // 教室详情（含最近公告）
    pub async fn get_classroom(
        &self,
        request: &HttpRequest,
        classroom_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_classroom(self, request, classroom_id).await
    }

    // 更新教室（管理员）
    pub async fn update_classroom(
        &self,
        request: &HttpRequest,
        classroom_id: i64,
        update_request: crate::models::classrooms::requests::UpdateClassroomRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_classroom(self, request, classroom_id, update_request).await
    }

    // 归档/恢复教室
    pub async fn archive_classroom(
        &self,
        request: &HttpRequest,
        classroom_id: i64,
        archive_request: crate::models::classrooms::requests::ArchiveClassroomRequest,
    ) -> ActixResult<HttpResponse> {
        update::archive_classroom(self, request, classroom_id, archive_request).await
    }

    // 删除教室（管理员路由，实际为归档）
    pub async fn delete_classroom(
        &self,
        request: &HttpRequest,
        classroom_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_classroom(self, request, classroom_id).await
    }

    // 通过加入码加入教室（学生，幂等）
    pub async fn join_classroom(
        &self,
        request: &HttpRequest,
        join_request: crate::models::classrooms::requests::JoinClassroomRequest,
    ) -> ActixResult<HttpResponse> {
        join::join_classroom(self, request, join_request).await
    }

    // 名册
    pub async fn list_roster(
        &self,
        request: &HttpRequest,
        classroom_id: i64,
    ) -> ActixResult<HttpResponse> {
        roster::list_roster(self, request, classroom_id).await
    }

    pub async fn add_student(
        &self,
        request: &HttpRequest,
        classroom_id: i64,
        add_request: crate::models::classrooms::requests::AddStudentRequest,
    ) -> ActixResult<HttpResponse> {
        roster::add_student(self, request, classroom_id, add_request).await
    }

    pub async fn update_student(
        &self,
        request: &HttpRequest,
        classroom_id: i64,
        student_id: i64,
        update_request: crate::models::classrooms::requests::UpdateStudentRequest,
    ) -> ActixResult<HttpResponse> {
        roster::update_student(self, request, classroom_id, student_id, update_request).await
    }

    pub async fn remove_student(
        &self,
        request: &HttpRequest,
        classroom_id: i64,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        roster::remove_student(self, request, classroom_id, student_id).await
    }

    // 公告
    pub async fn create_announcement(
        &self,
        request: &HttpRequest,
        classroom_id: i64,
        announce_request: crate::models::classrooms::requests::CreateAnnouncementRequest,
    ) -> ActixResult<HttpResponse> {
        announce::create_announcement(self, request, classroom_id, announce_request).await
    }

    pub async fn list_announcements(
        &self,
        request: &HttpRequest,
        classroom_id: i64,
    ) -> ActixResult<HttpResponse> {
        announce::list_announcements(self, request, classroom_id).await
    }

    // 名册 CSV 导入/导出
    pub async fn import_roster(
        &self,
        request: &HttpRequest,
        classroom_id: i64,
        payload: actix_multipart::Multipart,
    ) -> ActixResult<HttpResponse> {
        import::import_roster(self, request, classroom_id, payload).await
    }

    pub async fn export_roster(
        &self,
        request: &HttpRequest,
        classroom_id: i64,
    ) -> ActixResult<HttpResponse> {
        export::export_roster(self, request, classroom_id).await
    }

    // 教室统计面板
    pub async fn get_classroom_analytics(
        &self,
        request: &HttpRequest,
        classroom_id: i64,
    ) -> ActixResult<HttpResponse> {
        analytics::get_classroom_analytics(self, request, classroom_id).await
    }
}
