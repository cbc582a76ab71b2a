use std::sync::Arc;

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
    study_plans::entities::{StudyPlan, StudySession, StudyPlanMetadata},
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 用户总数
    async fn count_users(&self) -> Result<u64>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    // 列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 更新用户信息
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    // 删除用户（级联删除其提交、计划、通知与选课记录）
    async fn delete_user(&self, id: i64) -> Result<bool>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;

    /// 教室管理方法
    // 创建教室，code 为空时自动生成
    async fn create_classroom(&self, classroom: CreateClassroomRequest) -> Result<Classroom>;
    // 通过ID获取教室
    async fn get_classroom_by_id(&self, id: i64) -> Result<Option<Classroom>>;
    // 通过加入码获取教室
    async fn get_classroom_by_code(&self, code: &str) -> Result<Option<Classroom>>;
    // 列出教室
    async fn list_classrooms_with_pagination(
        &self,
        query: ClassroomListQuery,
    ) -> Result<ClassroomListResponse>;
    // 更新教室信息
    async fn update_classroom(
        &self,
        id: i64,
        update: UpdateClassroomRequest,
    ) -> Result<Option<Classroom>>;
    // 归档/取消归档教室，管理员删除也走归档
    async fn set_classroom_archived(&self, id: i64, archived: bool) -> Result<Option<Classroom>>;

    /// 名册管理方法
    // 学生加入教室，已加入时返回 false（幂等）
    async fn join_classroom(&self, classroom_id: i64, student_id: i64) -> Result<bool>;
    // 学生退出/移出教室
    async fn leave_classroom(&self, classroom_id: i64, student_id: i64) -> Result<bool>;
    // 查询学生是否在教室中
    async fn is_student_in_classroom(&self, classroom_id: i64, student_id: i64) -> Result<bool>;
    // 教室名册
    async fn list_roster(&self, classroom_id: i64) -> Result<Vec<RosterStudent>>;
    // 学生所在的教室
    async fn list_classrooms_for_student(
        &self,
        student_id: i64,
        query: ClassroomListQuery,
    ) -> Result<ClassroomListResponse>;
    // 学生所在教室的 ID 集合
    async fn list_classroom_ids_for_student(&self, student_id: i64) -> Result<Vec<i64>>;
    // 教师名下教室的 ID 集合
    async fn list_classroom_ids_for_teacher(&self, teacher_id: i64) -> Result<Vec<i64>>;

    /// 作业管理方法
    // 创建作业
    async fn create_assignment(
        &self,
        created_by: i64,
        req: CreateAssignmentRequest,
        unlocked: bool,
    ) -> Result<Assignment>;
    // 通过ID获取作业
    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>>;
    // 列出作业
    async fn list_assignments_with_pagination(
        &self,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse>;
    // 学生可见的作业：所在教室内、已解锁、未归档
    async fn list_unlocked_assignments_for_student(
        &self,
        student_id: i64,
    ) -> Result<Vec<Assignment>>;
    // 更新作业
    async fn update_assignment(
        &self,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>>;
    // 归档作业，管理员删除也走归档
    async fn set_assignment_archived(&self, id: i64, archived: bool) -> Result<bool>;
    // 解锁所有到期作业并返回被解锁的作业（调度器扫描）
    async fn unlock_due_assignments(&self, now: i64) -> Result<Vec<Assignment>>;
    // 截止前窗口内、未发提醒的作业（调度器扫描）
    async fn list_assignments_due_soon(&self, now: i64, window: i64) -> Result<Vec<Assignment>>;
    // 标记已发送截止提醒
    async fn mark_reminders_sent(&self, assignment_ids: &[i64]) -> Result<u64>;

    /// 提交管理方法
    // 提交/重新提交作业
    async fn upsert_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
        files: Vec<FileRef>,
        comment: Option<String>,
    ) -> Result<Submission>;
    // 通过ID获取提交
    async fn get_submission_by_id(&self, id: i64) -> Result<Option<Submission>>;
    // 获取某学生对某作业的提交
    async fn get_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>>;
    // 某作业的全部提交
    async fn list_submissions_for_assignment(&self, assignment_id: i64)
    -> Result<Vec<Submission>>;
    // 某学生的全部提交
    async fn list_submissions_for_student(&self, student_id: i64) -> Result<Vec<Submission>>;
    // 人工评分
    async fn grade_submission(
        &self,
        id: i64,
        grade: Option<i32>,
        feedback: Option<String>,
    ) -> Result<Option<Submission>>;
    // 自动评分写入，仅当尚未评分时生效
    async fn set_grade_if_ungraded(&self, id: i64, grade: i32) -> Result<bool>;

    /// 考试管理方法
    // 创建考试，date 已由业务层解析完成
    async fn create_exam(
        &self,
        created_by: i64,
        classroom_id: Option<i64>,
        title: String,
        subject: Option<String>,
        date: i64,
        description: Option<String>,
        syllabus_files: Vec<FileRef>,
    ) -> Result<Exam>;
    // 通过ID获取考试
    async fn get_exam_by_id(&self, id: i64) -> Result<Option<Exam>>;
    // 列出考试
    async fn list_exams_with_pagination(&self, query: ExamListQuery) -> Result<ExamListResponse>;
    // 更新考试
    async fn update_exam(&self, id: i64, update: UpdateExamRequest) -> Result<Option<Exam>>;
    // 删除考试
    async fn delete_exam(&self, id: i64) -> Result<bool>;
    // 指定教室集合中最近的一场未来考试
    async fn get_next_exam_for_classrooms(
        &self,
        classroom_ids: &[i64],
        now: i64,
    ) -> Result<Option<Exam>>;

    /// 学习计划管理方法
    // 保存学习计划，student_id 为 None 表示班级级计划
    async fn create_study_plan(
        &self,
        classroom_id: Option<i64>,
        student_id: Option<i64>,
        title: String,
        schedule: Vec<StudySession>,
        metadata: StudyPlanMetadata,
    ) -> Result<StudyPlan>;
    // 通过ID获取学习计划
    async fn get_study_plan_by_id(&self, id: i64) -> Result<Option<StudyPlan>>;
    // 某学生的个人计划
    async fn list_study_plans_for_student(&self, student_id: i64) -> Result<Vec<StudyPlan>>;
    // 某教室的班级级计划
    async fn list_study_plans_for_classroom(&self, classroom_id: i64) -> Result<Vec<StudyPlan>>;
    // 删除学习计划
    async fn delete_study_plan(&self, id: i64) -> Result<bool>;

    /// 活动流方法
    // 记录一条活动
    async fn log_activity(
        &self,
        kind: ActivityKind,
        message: String,
        classroom_id: Option<i64>,
        user_id: Option<i64>,
        meta: Option<serde_json::Value>,
    ) -> Result<Activity>;
    // 列出活动
    async fn list_activities_with_pagination(
        &self,
        query: ActivityListQuery,
    ) -> Result<ActivityListResponse>;
    // 某教室最近的公告
    async fn list_announcements(&self, classroom_id: i64, limit: u64) -> Result<Vec<Activity>>;

    /// 通知方法
    // 发送单条通知
    async fn create_notification(
        &self,
        user_id: i64,
        message: String,
        link: Option<String>,
    ) -> Result<Notification>;
    // 批量发送通知（截止提醒）
    async fn create_notifications(
        &self,
        user_ids: &[i64],
        message: &str,
        link: Option<&str>,
    ) -> Result<u64>;
    // 某用户的通知及未读数
    async fn list_notifications_for_user(&self, user_id: i64)
    -> Result<(Vec<Notification>, i64)>;
    // 标记单条已读
    async fn mark_notification_read(&self, id: i64, user_id: i64) -> Result<bool>;
    // 全部标记已读
    async fn mark_all_notifications_read(&self, user_id: i64) -> Result<u64>;

    /// 令牌吊销方法
    // 吊销令牌
    async fn revoke_token(&self, token: &str, expires_at: i64) -> Result<()>;
    // 查询令牌是否已吊销
    async fn is_token_revoked(&self, token: &str) -> Result<bool>;
    // 清理已过期的吊销记录
    async fn purge_expired_revoked_tokens(&self, now: i64) -> Result<u64>;

    /// 文件管理方法
    // 登记上传文件
    async fn upload_file(
        &self,
        token: &str,
        file_name: &str,
        size: i64,
        mime_type: &str,
        user_id: i64,
    ) -> Result<File>;
    // 通过唯一 token 获取文件信息
    async fn get_file_by_token(&self, token: &str) -> Result<Option<File>>;

    /// 平台统计
    async fn get_platform_stats(&self) -> Result<PlatformStats>;
    // 单个教室的聚合统计
    async fn get_classroom_analytics(&self, classroom_id: i64) -> Result<ClassroomAnalytics>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
