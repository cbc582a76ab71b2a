use serde::Deserialize;
use ts_rs::TS;

// 创建教室请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/classroom.ts")]
pub struct CreateClassroomRequest {
    pub name: String,
    /// 仅管理员可指定；教师创建时忽略，归属自己
    pub teacher_id: Option<i64>,
    /// 仅管理员可显式指定加入码，否则随机生成
    pub code: Option<String>,
}

// 更新教室请求（管理员）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/classroom.ts")]
pub struct UpdateClassroomRequest {
    pub name: Option<String>,
    pub code: Option<String>,
    pub teacher_id: Option<i64>,
}

// 通过加入码加入教室
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/classroom.ts")]
pub struct JoinClassroomRequest {
    pub code: String,
}

// 归档/恢复教室
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/classroom.ts")]
pub struct ArchiveClassroomRequest {
    pub archived: bool,
}

// 教室列表查询
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/classroom.ts")]
pub struct ClassroomListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub search: Option<String>,
    pub teacher_id: Option<i64>,
    /// 是否包含已归档教室（默认不包含）
    pub include_archived: Option<bool>,
}

// 发布公告
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/classroom.ts")]
pub struct CreateAnnouncementRequest {
    pub message: String,
}

// 名册：添加学生
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/classroom.ts")]
pub struct AddStudentRequest {
    pub name: String,
    pub email: String,
    /// 为新邮箱创建账号（返回一次性临时密码）
    #[serde(default)]
    pub create_account: bool,
}

// 名册：更新学生
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/classroom.ts")]
pub struct UpdateStudentRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}
