use serde::Deserialize;
use ts_rs::TS;

use crate::models::files::entities::FileRef;

// 创建考试请求，date 缺省时从 title/description 中提取
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct CreateExamRequest {
    pub title: String,
    pub subject: Option<String>,
    pub classroom_id: Option<i64>,
    pub date: Option<chrono::DateTime<chrono::Utc>>,
    pub description: Option<String>,
    #[serde(default)]
    #[ts(skip)]
    pub syllabus_files: Vec<FileRef>,
}

// 更新考试请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct UpdateExamRequest {
    pub title: Option<String>,
    pub subject: Option<String>,
    pub date: Option<chrono::DateTime<chrono::Utc>>,
    pub description: Option<String>,
}

// 考试列表查询
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct ExamListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub classroom_id: Option<i64>,
    /// 仅返回日期在未来的考试
    pub upcoming: Option<bool>,
}
