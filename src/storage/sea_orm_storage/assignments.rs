use super::SeaOrmStorage;
use crate::entity::assignments::{ActiveModel, Column, Entity as Assignments};
use crate::errors::{PortalError, Result};
use crate::models::{
    PaginationInfo,
    assignments::{
        entities::Assignment,
        requests::{AssignmentListQuery, CreateAssignmentRequest, UpdateAssignmentRequest},
        responses::AssignmentListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建作业
    pub async fn create_assignment_impl(
        &self,
        created_by: i64,
        req: CreateAssignmentRequest,
        unlocked: bool,
    ) -> Result<Assignment> {
        let now = chrono::Utc::now().timestamp();
        let files_json = serde_json::to_string(&req.files)?;

        let model = ActiveModel {
            classroom_id: Set(req.classroom_id),
            created_by: Set(created_by),
            title: Set(req.title),
            description: Set(req.description),
            files: Set(Some(files_json)),
            unlock_at: Set(req.unlock_at.map(|t| t.timestamp())),
            due_at: Set(req.due_at.map(|t| t.timestamp())),
            unlocked: Set(unlocked),
            reminder_sent: Set(false),
            archived: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("创建作业失败: {e}")))?;

        Ok(result.into_assignment())
    }

    /// 通过 ID 获取作业
    pub async fn get_assignment_by_id_impl(&self, id: i64) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询作业失败: {e}")))?;

        Ok(result.map(|m| m.into_assignment()))
    }

    /// 分页列出作业
    pub async fn list_assignments_with_pagination_impl(
        &self,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Assignments::find();

        if let Some(classroom_id) = query.classroom_id {
            select = select.filter(Column::ClassroomId.eq(classroom_id));
        }

        if let Some(ref classroom_ids) = query.classroom_ids {
            select = select.filter(Column::ClassroomId.is_in(classroom_ids.clone()));
        }

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(Column::Title.contains(&escaped));
        }

        select = select
            .filter(Column::Archived.eq(false))
            .order_by_desc(Column::CreatedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| PortalError::database_operation(format!("查询作业总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| PortalError::database_operation(format!("查询作业页数失败: {e}")))?;
        let assignments = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询作业列表失败: {e}")))?;

        Ok(AssignmentListResponse {
            items: assignments
                .into_iter()
                .map(|m| m.into_assignment())
                .collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 学生可见的作业：所在教室内、已解锁、未归档
    pub async fn list_unlocked_assignments_for_student_impl(
        &self,
        student_id: i64,
    ) -> Result<Vec<Assignment>> {
        let classroom_ids = self.list_classroom_ids_for_student_impl(student_id).await?;
        if classroom_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = Assignments::find()
            .filter(Column::ClassroomId.is_in(classroom_ids))
            .filter(Column::Unlocked.eq(true))
            .filter(Column::Archived.eq(false))
            .order_by_asc(Column::DueAt)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询学生作业失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_assignment()).collect())
    }

    /// 更新作业
    pub async fn update_assignment_impl(
        &self,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        let existing = self.get_assignment_by_id_impl(id).await?;
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

        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }

        if let Some(classroom_id) = update.classroom_id {
            model.classroom_id = Set(Some(classroom_id));
        }

        if let Some(unlock_at) = update.unlock_at {
            // 解锁时间被推后时，重新进入待解锁状态
            model.unlock_at = Set(Some(unlock_at.timestamp()));
            if unlock_at > chrono::Utc::now() {
                model.unlocked = Set(false);
            }
        }

        if let Some(due_at) = update.due_at {
            model.due_at = Set(Some(due_at.timestamp()));
            model.reminder_sent = Set(false);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("更新作业失败: {e}")))?;

        self.get_assignment_by_id_impl(id).await
    }

    /// 归档/恢复作业
    pub async fn set_assignment_archived_impl(&self, id: i64, archived: bool) -> Result<bool> {
        let result = Assignments::update_many()
            .col_expr(Column::Archived, Expr::value(archived))
            .col_expr(
                Column::UpdatedAt,
                Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("归档作业失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 解锁所有到期作业并返回被解锁的作业
    pub async fn unlock_due_assignments_impl(&self, now: i64) -> Result<Vec<Assignment>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| PortalError::database_operation(format!("开启事务失败: {e}")))?;

        let due = Assignments::find()
            .filter(Column::UnlockAt.lte(now))
            .filter(Column::Unlocked.eq(false))
            .filter(Column::Archived.eq(false))
            .all(&txn)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询待解锁作业失败: {e}")))?;

        if due.is_empty() {
            txn.commit()
                .await
                .map_err(|e| PortalError::database_operation(format!("提交事务失败: {e}")))?;
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = due.iter().map(|m| m.id).collect();

        Assignments::update_many()
            .col_expr(Column::Unlocked, Expr::value(true))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.is_in(ids))
            .exec(&txn)
            .await
            .map_err(|e| PortalError::database_operation(format!("解锁作业失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| PortalError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(due
            .into_iter()
            .map(|mut m| {
                m.unlocked = true;
                m.into_assignment()
            })
            .collect())
    }

    /// 截止时间落在 (now, now + window] 内且未发提醒的作业
    pub async fn list_assignments_due_soon_impl(
        &self,
        now: i64,
        window: i64,
    ) -> Result<Vec<Assignment>> {
        let rows = Assignments::find()
            .filter(Column::DueAt.gt(now))
            .filter(Column::DueAt.lte(now + window))
            .filter(Column::ReminderSent.eq(false))
            .filter(Column::Archived.eq(false))
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询临期作业失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_assignment()).collect())
    }

    /// 标记截止提醒已发送
    pub async fn mark_reminders_sent_impl(&self, assignment_ids: &[i64]) -> Result<u64> {
        if assignment_ids.is_empty() {
            return Ok(0);
        }

        let result = Assignments::update_many()
            .col_expr(Column::ReminderSent, Expr::value(true))
            .filter(Column::Id.is_in(assignment_ids.to_vec()))
            .exec(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("标记提醒状态失败: {e}")))?;

        Ok(result.rows_affected)
    }
}
