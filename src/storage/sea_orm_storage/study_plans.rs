use super::SeaOrmStorage;
use crate::entity::study_plans::{ActiveModel, Column, Entity as StudyPlans};
use crate::errors::{PortalError, Result};
use crate::models::study_plans::entities::{StudyPlan, StudyPlanMetadata, StudySession};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 保存学习计划
    pub async fn create_study_plan_impl(
        &self,
        classroom_id: Option<i64>,
        student_id: Option<i64>,
        title: String,
        schedule: Vec<StudySession>,
        metadata: StudyPlanMetadata,
    ) -> Result<StudyPlan> {
        let schedule_json = serde_json::to_string(&schedule)?;
        let metadata_json = serde_json::to_string(&metadata)?;

        let model = ActiveModel {
            classroom_id: Set(classroom_id),
            student_id: Set(student_id),
            title: Set(title),
            schedule: Set(schedule_json),
            metadata: Set(Some(metadata_json)),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("保存学习计划失败: {e}")))?;

        Ok(result.into_study_plan())
    }

    /// 通过 ID 获取学习计划
    pub async fn get_study_plan_by_id_impl(&self, id: i64) -> Result<Option<StudyPlan>> {
        let result = StudyPlans::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询学习计划失败: {e}")))?;

        Ok(result.map(|m| m.into_study_plan()))
    }

    /// 某学生的个人计划
    pub async fn list_study_plans_for_student_impl(
        &self,
        student_id: i64,
    ) -> Result<Vec<StudyPlan>> {
        let rows = StudyPlans::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询学习计划失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_study_plan()).collect())
    }

    /// 某教室的班级级计划（student_id 为 NULL）
    pub async fn list_study_plans_for_classroom_impl(
        &self,
        classroom_id: i64,
    ) -> Result<Vec<StudyPlan>> {
        let rows = StudyPlans::find()
            .filter(Column::ClassroomId.eq(classroom_id))
            .filter(Column::StudentId.is_null())
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询学习计划失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_study_plan()).collect())
    }

    /// 删除学习计划
    pub async fn delete_study_plan_impl(&self, id: i64) -> Result<bool> {
        let result = StudyPlans::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("删除学习计划失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
