use super::SeaOrmStorage;
use crate::entity::assignments::{Column as AsgColumn, Entity as Assignments};
use crate::entity::classroom_students::{Column as CsColumn, Entity as ClassroomStudents};
use crate::entity::classrooms::Entity as Classrooms;
use crate::entity::exams::{Column as ExamColumn, Entity as Exams};
use crate::entity::submissions::{Column as SubColumn, Entity as Submissions};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{PortalError, Result};
use crate::models::{
    admin::responses::PlatformStats, classrooms::responses::ClassroomAnalytics,
    users::entities::UserRole,
};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect};

impl SeaOrmStorage {
    /// 平台级聚合统计
    pub async fn get_platform_stats_impl(&self) -> Result<PlatformStats> {
        let db = &self.db;
        let count_err =
            |e: sea_orm::DbErr| PortalError::database_operation(format!("统计查询失败: {e}"));

        let total_users = Users::find().count(db).await.map_err(count_err)?;
        let total_students = Users::find()
            .filter(UserColumn::Role.eq(UserRole::Student.to_string()))
            .count(db)
            .await
            .map_err(count_err)?;
        let total_teachers = Users::find()
            .filter(UserColumn::Role.eq(UserRole::Teacher.to_string()))
            .count(db)
            .await
            .map_err(count_err)?;
        let total_classrooms = Classrooms::find().count(db).await.map_err(count_err)?;
        let total_assignments = Assignments::find().count(db).await.map_err(count_err)?;
        let total_submissions = Submissions::find().count(db).await.map_err(count_err)?;
        let graded_submissions = Submissions::find()
            .filter(SubColumn::Grade.is_not_null())
            .count(db)
            .await
            .map_err(count_err)?;
        let total_exams = Exams::find().count(db).await.map_err(count_err)?;
        let upcoming_exams = Exams::find()
            .filter(ExamColumn::Date.gt(chrono::Utc::now().timestamp()))
            .count(db)
            .await
            .map_err(count_err)?;

        Ok(PlatformStats {
            total_users: total_users as i64,
            total_students: total_students as i64,
            total_teachers: total_teachers as i64,
            total_classrooms: total_classrooms as i64,
            total_assignments: total_assignments as i64,
            total_submissions: total_submissions as i64,
            graded_submissions: graded_submissions as i64,
            total_exams: total_exams as i64,
            upcoming_exams: upcoming_exams as i64,
        })
    }

    /// 单个教室的聚合统计，供教师端分析面板使用
    pub async fn get_classroom_analytics_impl(
        &self,
        classroom_id: i64,
    ) -> Result<ClassroomAnalytics> {
        let db = &self.db;
        let count_err =
            |e: sea_orm::DbErr| PortalError::database_operation(format!("统计查询失败: {e}"));

        let student_count = ClassroomStudents::find()
            .filter(CsColumn::ClassroomId.eq(classroom_id))
            .count(db)
            .await
            .map_err(count_err)?;

        let assignment_ids: Vec<i64> = Assignments::find()
            .select_only()
            .column(AsgColumn::Id)
            .filter(AsgColumn::ClassroomId.eq(classroom_id))
            .into_tuple()
            .all(db)
            .await
            .map_err(count_err)?;

        let (submission_count, graded_count, average_grade) = if assignment_ids.is_empty() {
            (0, 0, None)
        } else {
            let submission_count = Submissions::find()
                .filter(SubColumn::AssignmentId.is_in(assignment_ids.clone()))
                .count(db)
                .await
                .map_err(count_err)?;

            let grades: Vec<i32> = Submissions::find()
                .select_only()
                .column(SubColumn::Grade)
                .filter(SubColumn::AssignmentId.is_in(assignment_ids.clone()))
                .filter(SubColumn::Grade.is_not_null())
                .into_tuple()
                .all(db)
                .await
                .map_err(count_err)?;

            let average = if grades.is_empty() {
                None
            } else {
                Some(grades.iter().map(|g| *g as f64).sum::<f64>() / grades.len() as f64)
            };
            (submission_count as i64, grades.len() as i64, average)
        };

        Ok(ClassroomAnalytics {
            classroom_id,
            student_count: student_count as i64,
            assignment_count: assignment_ids.len() as i64,
            submission_count,
            graded_count,
            average_grade,
        })
    }
}
