//! 业务数据模型
//!
//! 与 entity 模块的数据库实体分离：storage 层负责二者之间的转换。

pub mod common;

pub mod activities;
pub mod admin;
pub mod assignments;
pub mod auth;
pub mod classrooms;
pub mod exams;
pub mod files;
pub mod notifications;
pub mod study_plans;
pub mod users;

pub use common::pagination::{PaginatedResponse, PaginationInfo, PaginationQuery};
pub use common::response::ApiResponse;

/// 程序启动时间，用于运行时长统计
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 业务错误码
///
/// 与 HTTP 状态码正交：HTTP 状态码描述传输层结果，
/// 业务错误码让前端精确区分失败原因。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用
    BadRequest = 40000,
    Unauthorized = 40100,
    AuthFailed = 40101,
    TokenRevoked = 40102,
    Forbidden = 40300,
    NotFound = 40400,
    RateLimitExceeded = 42900,
    InternalServerError = 50000,

    // 用户
    UserNameInvalid = 40010,
    UserEmailInvalid = 40011,
    UserPasswordInvalid = 40012,
    CanNotDeleteCurrentUser = 40013,
    RegisterFailed = 40110,
    UserNotFound = 40410,
    UserAlreadyExists = 40910,
    UserEmailAlreadyExists = 40911,
    UserCreationFailed = 50010,
    UserUpdateFailed = 50011,
    UserDeleteFailed = 50012,

    // 教室
    ClassroomPermissionDenied = 40320,
    ClassroomNotFound = 40420,
    ClassroomCodeInvalid = 40421,
    ClassroomAlreadyJoined = 40920,
    ClassroomCodeConflict = 40921,
    ClassroomCreationFailed = 50020,
    ClassroomJoinFailed = 50021,

    // 作业与提交
    GradeInvalid = 40030,
    AssignmentNotFound = 40430,
    SubmissionNotFound = 40431,
    AssignmentCreationFailed = 50030,

    // 考试与学习计划
    ExamDateMissing = 40040,
    NoUpcomingExam = 40041,
    ExamNotFound = 40440,
    StudyPlanNotFound = 40441,

    // 文件
    FileTypeNotAllowed = 40050,
    FileSizeExceeded = 40051,
    MultifileUploadNotAllowed = 40052,
    FileNotFound = 40450,
    FileUploadFailed = 50050,

    // 导入导出
    ImportFileParseFailed = 40060,
    ImportFileMissingColumn = 40061,
    ImportFileDataInvalid = 40062,
}
