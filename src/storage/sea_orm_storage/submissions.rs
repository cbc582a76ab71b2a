use super::SeaOrmStorage;
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions};
use crate::errors::{PortalError, Result};
use crate::models::{assignments::entities::Submission, files::entities::FileRef};
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 提交作业；重复提交时覆盖文件与备注并清空已有成绩
    pub async fn upsert_submission_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
        files: Vec<FileRef>,
        comment: Option<String>,
    ) -> Result<Submission> {
        let now = chrono::Utc::now().timestamp();
        let files_json = serde_json::to_string(&files)?;

        let existing = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询提交失败: {e}")))?;

        let result = match existing {
            Some(model) => {
                let update = ActiveModel {
                    id: Set(model.id),
                    files: Set(Some(files_json)),
                    comment: Set(comment),
                    grade: Set(None),
                    feedback: Set(None),
                    submitted_at: Set(now),
                    ..Default::default()
                };
                update
                    .update(&self.db)
                    .await
                    .map_err(|e| PortalError::database_operation(format!("更新提交失败: {e}")))?
            }
            None => {
                let insert = ActiveModel {
                    assignment_id: Set(assignment_id),
                    student_id: Set(student_id),
                    files: Set(Some(files_json)),
                    comment: Set(comment),
                    grade: Set(None),
                    feedback: Set(None),
                    submitted_at: Set(now),
                    ..Default::default()
                };
                insert
                    .insert(&self.db)
                    .await
                    .map_err(|e| PortalError::database_operation(format!("创建提交失败: {e}")))?
            }
        };

        Ok(result.into_submission())
    }

    /// 通过 ID 获取提交
    pub async fn get_submission_by_id_impl(&self, id: i64) -> Result<Option<Submission>> {
        let result = Submissions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 获取某学生对某作业的提交
    pub async fn get_submission_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 某作业的全部提交
    pub async fn list_submissions_for_assignment_impl(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<Submission>> {
        let rows = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .order_by_asc(Column::SubmittedAt)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询提交列表失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_submission()).collect())
    }

    /// 某学生的全部提交
    pub async fn list_submissions_for_student_impl(
        &self,
        student_id: i64,
    ) -> Result<Vec<Submission>> {
        let rows = Submissions::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_desc(Column::SubmittedAt)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询提交列表失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_submission()).collect())
    }

    /// 人工评分
    pub async fn grade_submission_impl(
        &self,
        id: i64,
        grade: Option<i32>,
        feedback: Option<String>,
    ) -> Result<Option<Submission>> {
        let existing = self.get_submission_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(id),
            grade: Set(grade),
            feedback: Set(feedback),
            ..Default::default()
        };

        model
            .update(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("评分失败: {e}")))?;

        self.get_submission_by_id_impl(id).await
    }

    /// 自动评分写入；WHERE grade IS NULL 保证不会覆盖人工成绩
    pub async fn set_grade_if_ungraded_impl(&self, id: i64, grade: i32) -> Result<bool> {
        let result = Submissions::update_many()
            .col_expr(Column::Grade, Expr::value(grade))
            .filter(Column::Id.eq(id))
            .filter(Column::Grade.is_null())
            .exec(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("自动评分失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
