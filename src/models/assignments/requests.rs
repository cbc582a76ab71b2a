use serde::Deserialize;
use ts_rs::TS;

use crate::models::files::entities::FileRef;

// 创建作业请求（multipart 的文本字段部分）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct CreateAssignmentRequest {
    pub title: String,
    pub description: Option<String>,
    pub classroom_id: Option<i64>,
    pub unlock_at: Option<chrono::DateTime<chrono::Utc>>,
    pub due_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    #[ts(skip)]
    pub files: Vec<FileRef>,
}

// 更新作业请求（管理员）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct UpdateAssignmentRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub classroom_id: Option<i64>,
    pub unlock_at: Option<chrono::DateTime<chrono::Utc>>,
    pub due_at: Option<chrono::DateTime<chrono::Utc>>,
}

// 作业列表查询
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignmentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub classroom_id: Option<i64>,
    pub search: Option<String>,
    /// 业务层按角色注入的教室过滤，不走查询串
    #[serde(skip)]
    #[ts(skip)]
    pub classroom_ids: Option<Vec<i64>>,
}

// 提交作业请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct SubmitAssignmentRequest {
    pub comment: Option<String>,
    #[serde(default)]
    #[ts(skip)]
    pub files: Vec<FileRef>,
}

// 评分请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct GradeSubmissionRequest {
    pub grade: Option<i32>,
    pub feedback: Option<String>,
}
