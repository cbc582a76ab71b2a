//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod activities;
mod admin;
mod assignments;
mod auth_tokens;
mod classrooms;
mod exams;
mod files;
mod notifications;
mod roster;
mod study_plans;
mod submissions;
mod users;

use crate::config::AppConfig;
use crate::errors::{PortalError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| PortalError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| PortalError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| PortalError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| PortalError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(PortalError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    activities::{
        entities::{Activity, ActivityKind},
        requests::ActivityListQuery,
        responses::ActivityListResponse,
    },
    admin::responses::PlatformStats,
    assignments::{
        entities::{Assignment, Submission},
        requests::{AssignmentListQuery, CreateAssignmentRequest, UpdateAssignmentRequest},
        responses::AssignmentListResponse,
    },
    classrooms::{
        entities::{Classroom, RosterStudent},
        requests::{ClassroomListQuery, CreateClassroomRequest, UpdateClassroomRequest},
        responses::{ClassroomAnalytics, ClassroomListResponse},
    },
    exams::{
        entities::Exam,
        requests::{ExamListQuery, UpdateExamRequest},
        responses::ExamListResponse,
    },
    files::entities::{File, FileRef},
    notifications::entities::Notification,
    study_plans::entities::{StudyPlan, StudyPlanMetadata, StudySession},
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    // 教室模块
    async fn create_classroom(&self, classroom: CreateClassroomRequest) -> Result<Classroom> {
        self.create_classroom_impl(classroom).await
    }

    async fn get_classroom_by_id(&self, id: i64) -> Result<Option<Classroom>> {
        self.get_classroom_by_id_impl(id).await
    }

    async fn get_classroom_by_code(&self, code: &str) -> Result<Option<Classroom>> {
        self.get_classroom_by_code_impl(code).await
    }

    async fn list_classrooms_with_pagination(
        &self,
        query: ClassroomListQuery,
    ) -> Result<ClassroomListResponse> {
        self.list_classrooms_with_pagination_impl(query).await
    }

    async fn update_classroom(
        &self,
        id: i64,
        update: UpdateClassroomRequest,
    ) -> Result<Option<Classroom>> {
        self.update_classroom_impl(id, update).await
    }

    async fn set_classroom_archived(&self, id: i64, archived: bool) -> Result<Option<Classroom>> {
        self.set_classroom_archived_impl(id, archived).await
    }

    // 名册模块
    async fn join_classroom(&self, classroom_id: i64, student_id: i64) -> Result<bool> {
        self.join_classroom_impl(classroom_id, student_id).await
    }

    async fn leave_classroom(&self, classroom_id: i64, student_id: i64) -> Result<bool> {
        self.leave_classroom_impl(classroom_id, student_id).await
    }

    async fn is_student_in_classroom(&self, classroom_id: i64, student_id: i64) -> Result<bool> {
        self.is_student_in_classroom_impl(classroom_id, student_id)
            .await
    }

    async fn list_roster(&self, classroom_id: i64) -> Result<Vec<RosterStudent>> {
        self.list_roster_impl(classroom_id).await
    }

    async fn list_classrooms_for_student(
        &self,
        student_id: i64,
        query: ClassroomListQuery,
    ) -> Result<ClassroomListResponse> {
        self.list_classrooms_for_student_impl(student_id, query)
            .await
    }

    async fn list_classroom_ids_for_student(&self, student_id: i64) -> Result<Vec<i64>> {
        self.list_classroom_ids_for_student_impl(student_id).await
    }

    async fn list_classroom_ids_for_teacher(&self, teacher_id: i64) -> Result<Vec<i64>> {
        self.list_classroom_ids_for_teacher_impl(teacher_id).await
    }

    // 作业模块
    async fn create_assignment(
        &self,
        created_by: i64,
        req: CreateAssignmentRequest,
        unlocked: bool,
    ) -> Result<Assignment> {
        self.create_assignment_impl(created_by, req, unlocked).await
    }

    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_by_id_impl(id).await
    }

    async fn list_assignments_with_pagination(
        &self,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse> {
        self.list_assignments_with_pagination_impl(query).await
    }

    async fn list_unlocked_assignments_for_student(
        &self,
        student_id: i64,
    ) -> Result<Vec<Assignment>> {
        self.list_unlocked_assignments_for_student_impl(student_id)
            .await
    }

    async fn update_assignment(
        &self,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        self.update_assignment_impl(id, update).await
    }

    async fn set_assignment_archived(&self, id: i64, archived: bool) -> Result<bool> {
        self.set_assignment_archived_impl(id, archived).await
    }

    async fn unlock_due_assignments(&self, now: i64) -> Result<Vec<Assignment>> {
        self.unlock_due_assignments_impl(now).await
    }

    async fn list_assignments_due_soon(&self, now: i64, window: i64) -> Result<Vec<Assignment>> {
        self.list_assignments_due_soon_impl(now, window).await
    }

    async fn mark_reminders_sent(&self, assignment_ids: &[i64]) -> Result<u64> {
        self.mark_reminders_sent_impl(assignment_ids).await
    }

    // 提交模块
    async fn upsert_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
        files: Vec<FileRef>,
        comment: Option<String>,
    ) -> Result<Submission> {
        self.upsert_submission_impl(assignment_id, student_id, files, comment)
            .await
    }

    async fn get_submission_by_id(&self, id: i64) -> Result<Option<Submission>> {
        self.get_submission_by_id_impl(id).await
    }

    async fn get_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        self.get_submission_impl(assignment_id, student_id).await
    }

    async fn list_submissions_for_assignment(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<Submission>> {
        self.list_submissions_for_assignment_impl(assignment_id)
            .await
    }

    async fn list_submissions_for_student(&self, student_id: i64) -> Result<Vec<Submission>> {
        self.list_submissions_for_student_impl(student_id).await
    }

    async fn grade_submission(
        &self,
        id: i64,
        grade: Option<i32>,
        feedback: Option<String>,
    ) -> Result<Option<Submission>> {
        self.grade_submission_impl(id, grade, feedback).await
    }

    async fn set_grade_if_ungraded(&self, id: i64, grade: i32) -> Result<bool> {
        self.set_grade_if_ungraded_impl(id, grade).await
    }

    // 考试模块
    #[allow(clippy::too_many_arguments)]
    async fn create_exam(
        &self,
        created_by: i64,
        classroom_id: Option<i64>,
        title: String,
        subject: Option<String>,
        date: i64,
        description: Option<String>,
        syllabus_files: Vec<FileRef>,
    ) -> Result<Exam> {
        self.create_exam_impl(
            created_by,
            classroom_id,
            title,
            subject,
            date,
            description,
            syllabus_files,
        )
        .await
    }

    async fn get_exam_by_id(&self, id: i64) -> Result<Option<Exam>> {
        self.get_exam_by_id_impl(id).await
    }

    async fn list_exams_with_pagination(&self, query: ExamListQuery) -> Result<ExamListResponse> {
        self.list_exams_with_pagination_impl(query).await
    }

    async fn update_exam(&self, id: i64, update: UpdateExamRequest) -> Result<Option<Exam>> {
        self.update_exam_impl(id, update).await
    }

    async fn delete_exam(&self, id: i64) -> Result<bool> {
        self.delete_exam_impl(id).await
    }

    async fn get_next_exam_for_classrooms(
        &self,
        classroom_ids: &[i64],
        now: i64,
    ) -> Result<Option<Exam>> {
        self.get_next_exam_for_classrooms_impl(classroom_ids, now)
            .await
    }

    // 学习计划模块
    async fn create_study_plan(
        &self,
        classroom_id: Option<i64>,
        student_id: Option<i64>,
        title: String,
        schedule: Vec<StudySession>,
        metadata: StudyPlanMetadata,
    ) -> Result<StudyPlan> {
        self.create_study_plan_impl(classroom_id, student_id, title, schedule, metadata)
            .await
    }

    async fn get_study_plan_by_id(&self, id: i64) -> Result<Option<StudyPlan>> {
        self.get_study_plan_by_id_impl(id).await
    }

    async fn list_study_plans_for_student(&self, student_id: i64) -> Result<Vec<StudyPlan>> {
        self.list_study_plans_for_student_impl(student_id).await
    }

    async fn list_study_plans_for_classroom(&self, classroom_id: i64) -> Result<Vec<StudyPlan>> {
        self.list_study_plans_for_classroom_impl(classroom_id).await
    }

    async fn delete_study_plan(&self, id: i64) -> Result<bool> {
        self.delete_study_plan_impl(id).await
    }

    // 活动流模块
    async fn log_activity(
        &self,
        kind: ActivityKind,
        message: String,
        classroom_id: Option<i64>,
        user_id: Option<i64>,
        meta: Option<serde_json::Value>,
    ) -> Result<Activity> {
        self.log_activity_impl(kind, message, classroom_id, user_id, meta)
            .await
    }

    async fn list_activities_with_pagination(
        &self,
        query: ActivityListQuery,
    ) -> Result<ActivityListResponse> {
        self.list_activities_with_pagination_impl(query).await
    }

    async fn list_announcements(&self, classroom_id: i64, limit: u64) -> Result<Vec<Activity>> {
        self.list_announcements_impl(classroom_id, limit).await
    }

    // 通知模块
    async fn create_notification(
        &self,
        user_id: i64,
        message: String,
        link: Option<String>,
    ) -> Result<Notification> {
        self.create_notification_impl(user_id, message, link).await
    }

    async fn create_notifications(
        &self,
        user_ids: &[i64],
        message: &str,
        link: Option<&str>,
    ) -> Result<u64> {
        self.create_notifications_impl(user_ids, message, link)
            .await
    }

    async fn list_notifications_for_user(
        &self,
        user_id: i64,
    ) -> Result<(Vec<Notification>, i64)> {
        self.list_notifications_for_user_impl(user_id).await
    }

    async fn mark_notification_read(&self, id: i64, user_id: i64) -> Result<bool> {
        self.mark_notification_read_impl(id, user_id).await
    }

    async fn mark_all_notifications_read(&self, user_id: i64) -> Result<u64> {
        self.mark_all_notifications_read_impl(user_id).await
    }

    // 令牌吊销模块
    async fn revoke_token(&self, token: &str, expires_at: i64) -> Result<()> {
        self.revoke_token_impl(token, expires_at).await
    }

    async fn is_token_revoked(&self, token: &str) -> Result<bool> {
        self.is_token_revoked_impl(token).await
    }

    async fn purge_expired_revoked_tokens(&self, now: i64) -> Result<u64> {
        self.purge_expired_revoked_tokens_impl(now).await
    }

    // 文件模块
    async fn upload_file(
        &self,
        token: &str,
        file_name: &str,
        size: i64,
        mime_type: &str,
        user_id: i64,
    ) -> Result<File> {
        self.upload_file_impl(token, file_name, size, mime_type, user_id)
            .await
    }

    async fn get_file_by_token(&self, token: &str) -> Result<Option<File>> {
        self.get_file_by_token_impl(token).await
    }

    // 统计模块
    async fn get_platform_stats(&self) -> Result<PlatformStats> {
        self.get_platform_stats_impl().await
    }

    async fn get_classroom_analytics(&self, classroom_id: i64) -> Result<ClassroomAnalytics> {
        self.get_classroom_analytics_impl(classroom_id).await
    }
}
