use super::SeaOrmStorage;
use crate::entity::classroom_students::{
    ActiveModel, Column, Entity as ClassroomStudents,
};
use crate::entity::classrooms::{Column as ClassroomColumn, Entity as Classrooms};
use crate::entity::users::Entity as Users;
use crate::errors::{PortalError, Result};
use crate::models::{
    PaginationInfo,
    classrooms::{
        entities::RosterStudent, requests::ClassroomListQuery, responses::ClassroomListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

/// SQLite/MySQL/PostgreSQL 的唯一约束冲突报错
fn is_unique_violation(msg: &str) -> bool {
    msg.contains("UNIQUE constraint failed")
        || msg.contains("Duplicate entry")
        || msg.contains("duplicate key")
}

impl SeaOrmStorage {
    /// 学生加入教室；已在名册中时返回 false
    pub async fn join_classroom_impl(&self, classroom_id: i64, student_id: i64) -> Result<bool> {
        if self
            .is_student_in_classroom_impl(classroom_id, student_id)
            .await?
        {
            return Ok(false);
        }

        let model = ActiveModel {
            classroom_id: Set(classroom_id),
            student_id: Set(student_id),
            joined_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Err(e) = model.insert(&self.db).await {
            let msg = e.to_string();
            // 并发加入时可能撞唯一索引，按已在名册处理
            if is_unique_violation(&msg) {
                return Ok(false);
            }
            return Err(PortalError::database_operation(format!("加入教室失败: {e}")));
        }

        Ok(true)
    }

    /// 学生退出/移出教室
    pub async fn leave_classroom_impl(&self, classroom_id: i64, student_id: i64) -> Result<bool> {
        let result = ClassroomStudents::delete_many()
            .filter(Column::ClassroomId.eq(classroom_id))
            .filter(Column::StudentId.eq(student_id))
            .exec(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("移出教室失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 查询学生是否在教室名册中
    pub async fn is_student_in_classroom_impl(
        &self,
        classroom_id: i64,
        student_id: i64,
    ) -> Result<bool> {
        let count = ClassroomStudents::find()
            .filter(Column::ClassroomId.eq(classroom_id))
            .filter(Column::StudentId.eq(student_id))
            .count(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询名册失败: {e}")))?;

        Ok(count > 0)
    }

    /// 教室名册（含学生信息）
    pub async fn list_roster_impl(&self, classroom_id: i64) -> Result<Vec<RosterStudent>> {
        let rows = ClassroomStudents::find()
            .filter(Column::ClassroomId.eq(classroom_id))
            .order_by_asc(Column::JoinedAt)
            .find_also_related(Users)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询名册失败: {e}")))?;

        let roster = rows
            .into_iter()
            .filter_map(|(link, user)| {
                user.map(|u| RosterStudent {
                    id: u.id,
                    username: u.username,
                    email: u.email,
                    display_name: u.display_name,
                    joined_at: chrono::DateTime::from_timestamp(link.joined_at, 0)
                        .unwrap_or_default(),
                })
            })
            .collect();

        Ok(roster)
    }

    /// 分页列出学生所在的教室
    pub async fn list_classrooms_for_student_impl(
        &self,
        student_id: i64,
        query: ClassroomListQuery,
    ) -> Result<ClassroomListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let classroom_ids = self.list_classroom_ids_for_student_impl(student_id).await?;

        let mut select = Classrooms::find().filter(ClassroomColumn::Id.is_in(classroom_ids));

        if !query.include_archived.unwrap_or(false) {
            select = select.filter(ClassroomColumn::Archived.eq(false));
        }

        select = select.order_by_desc(ClassroomColumn::CreatedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| PortalError::database_operation(format!("查询教室总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| PortalError::database_operation(format!("查询教室页数失败: {e}")))?;
        let classrooms = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询教室列表失败: {e}")))?;

        Ok(ClassroomListResponse {
            items: classrooms.into_iter().map(|m| m.into_classroom()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 学生所在教室的 ID 集合
    pub async fn list_classroom_ids_for_student_impl(&self, student_id: i64) -> Result<Vec<i64>> {
        let ids: Vec<i64> = ClassroomStudents::find()
            .select_only()
            .column(Column::ClassroomId)
            .filter(Column::StudentId.eq(student_id))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询选课记录失败: {e}")))?;

        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{classrooms, users};
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    async fn test_storage() -> SeaOrmStorage {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1);
        let db = Database::connect(opt).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        SeaOrmStorage { db }
    }

    async fn seed_student_and_classroom(storage: &SeaOrmStorage) -> (i64, i64) {
        let now = chrono::Utc::now().timestamp();

        let student = users::ActiveModel {
            username: Set("stu01".to_string()),
            email: Set("stu01@example.com".to_string()),
            password_hash: Set("hash".to_string()),
            role: Set("student".to_string()),
            status: Set("active".to_string()),
            display_name: Set(None),
            last_login: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&storage.db)
        .await
        .unwrap();

        let classroom = classrooms::ActiveModel {
            name: Set("物理一班".to_string()),
            code: Set("ABC123".to_string()),
            teacher_id: Set(None),
            archived: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&storage.db)
        .await
        .unwrap();

        (classroom.id, student.id)
    }

    // 重复加入返回 false，名册只保留一条记录
    #[tokio::test]
    async fn test_join_classroom_twice_is_idempotent() {
        let storage = test_storage().await;
        let (classroom_id, student_id) = seed_student_and_classroom(&storage).await;

        let first = storage
            .join_classroom_impl(classroom_id, student_id)
            .await
            .unwrap();
        assert!(first);

        let second = storage
            .join_classroom_impl(classroom_id, student_id)
            .await
            .unwrap();
        assert!(!second);

        let roster = storage.list_roster_impl(classroom_id).await.unwrap();
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].id, student_id);
    }

    // 三种后端的唯一约束报错都识别为重复加入，而不是数据库错误
    #[test]
    fn test_unique_violation_detection_across_backends() {
        assert!(is_unique_violation(
            "UNIQUE constraint failed: classroom_students.classroom_id, classroom_students.student_id"
        ));
        assert!(is_unique_violation(
            "Duplicate entry '1-2' for key 'idx_classroom_students_unique'"
        ));
        assert!(is_unique_violation(
            "duplicate key value violates unique constraint \"idx_classroom_students_unique\""
        ));
        assert!(!is_unique_violation("FOREIGN KEY constraint failed"));
    }
}
