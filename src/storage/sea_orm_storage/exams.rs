use super::SeaOrmStorage;
use crate::entity::exams::{ActiveModel, Column, Entity as Exams};
use crate::errors::{PortalError, Result};
use crate::models::{
    PaginationInfo,
    exams::{
        entities::Exam,
        requests::{ExamListQuery, UpdateExamRequest},
        responses::ExamListResponse,
    },
    files::entities::FileRef,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建考试
    #[allow(clippy::too_many_arguments)]
    pub async fn create_exam_impl(
        &self,
        created_by: i64,
        classroom_id: Option<i64>,
        title: String,
        subject: Option<String>,
        date: i64,
        description: Option<String>,
        syllabus_files: Vec<FileRef>,
    ) -> Result<Exam> {
        let now = chrono::Utc::now().timestamp();
        let syllabus_json = serde_json::to_string(&syllabus_files)?;

        let model = ActiveModel {
            classroom_id: Set(classroom_id),
            created_by: Set(created_by),
            title: Set(title),
            subject: Set(subject),
            date: Set(date),
            description: Set(description),
            syllabus_files: Set(Some(syllabus_json)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("创建考试失败: {e}")))?;

        Ok(result.into_exam())
    }

    /// 通过 ID 获取考试
    pub async fn get_exam_by_id_impl(&self, id: i64) -> Result<Option<Exam>> {
        let result = Exams::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询考试失败: {e}")))?;

        Ok(result.map(|m| m.into_exam()))
    }

    /// 分页列出考试
    pub async fn list_exams_with_pagination_impl(
        &self,
        query: ExamListQuery,
    ) -> Result<ExamListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Exams::find();

        if let Some(classroom_id) = query.classroom_id {
            select = select.filter(Column::ClassroomId.eq(classroom_id));
        }

        if query.upcoming.unwrap_or(false) {
            select = select.filter(Column::Date.gt(chrono::Utc::now().timestamp()));
        }

        select = select.order_by_asc(Column::Date);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| PortalError::database_operation(format!("查询考试总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| PortalError::database_operation(format!("查询考试页数失败: {e}")))?;
        let exams = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询考试列表失败: {e}")))?;

        Ok(ExamListResponse {
            items: exams.into_iter().map(|m| m.into_exam()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新考试
    pub async fn update_exam_impl(
        &self,
        id: i64,
        update: UpdateExamRequest,
    ) -> Result<Option<Exam>> {
        let existing = self.get_exam_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }

        if let Some(subject) = update.subject {
            model.subject = Set(Some(subject));
        }

        if let Some(date) = update.date {
            model.date = Set(date.timestamp());
        }

        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("更新考试失败: {e}")))?;

        self.get_exam_by_id_impl(id).await
    }

    /// 删除考试
    pub async fn delete_exam_impl(&self, id: i64) -> Result<bool> {
        let result = Exams::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("删除考试失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 指定教室集合中最近的一场未来考试
    pub async fn get_next_exam_for_classrooms_impl(
        &self,
        classroom_ids: &[i64],
        now: i64,
    ) -> Result<Option<Exam>> {
        if classroom_ids.is_empty() {
            return Ok(None);
        }

        let result = Exams::find()
            .filter(Column::ClassroomId.is_in(classroom_ids.to_vec()))
            .filter(Column::Date.gt(now))
            .order_by_asc(Column::Date)
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询下一场考试失败: {e}")))?;

        Ok(result.map(|m| m.into_exam()))
    }
}
