use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::files::entities::FileRef;

// 考试实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct Exam {
    pub id: i64,
    pub classroom_id: Option<i64>,
    pub created_by: i64,
    pub title: String,
    pub subject: Option<String>,
    /// 考试日期，可由标题/描述中的日期串提取
    pub date: chrono::DateTime<chrono::Utc>,
    pub description: Option<String>,
    pub syllabus_files: Vec<FileRef>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
