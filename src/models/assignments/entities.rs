use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::files::entities::FileRef;

// 作业实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct Assignment {
    pub id: i64,
    pub classroom_id: Option<i64>,
    pub created_by: i64,
    pub title: String,
    pub description: Option<String>,
    pub files: Vec<FileRef>,
    /// 到达该时刻后由调度器置 unlocked
    pub unlock_at: Option<chrono::DateTime<chrono::Utc>>,
    pub due_at: Option<chrono::DateTime<chrono::Utc>>,
    pub unlocked: bool,
    pub reminder_sent: bool,
    pub archived: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 提交实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct Submission {
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    pub files: Vec<FileRef>,
    pub comment: Option<String>,
    /// 0..=100，NULL 表示未评分
    pub grade: Option<i32>,
    pub feedback: Option<String>,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}

impl Submission {
    pub fn is_graded(&self) -> bool {
        self.grade.is_some()
    }
}
