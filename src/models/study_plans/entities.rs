use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 单次学习安排
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/study_plan.ts")]
pub struct StudySession {
    /// "YYYY-MM-DD"
    pub date: String,
    /// "HH:MM"，24 小时制
    pub time: String,
    pub topic: String,
    pub duration_minutes: u32,
}

// 学习计划元信息
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/study_plan.ts")]
pub struct StudyPlanMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exam_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_until_exam: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sessions_per_day: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
}

// 学习计划实体，student_id 为 NULL 表示班级级计划
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/study_plan.ts")]
pub struct StudyPlan {
    pub id: i64,
    pub classroom_id: Option<i64>,
    pub student_id: Option<i64>,
    pub title: String,
    pub schedule: Vec<StudySession>,
    pub metadata: StudyPlanMetadata,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
