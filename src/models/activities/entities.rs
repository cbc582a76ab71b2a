use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 活动类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/activity.ts")]
pub enum ActivityKind {
    Announcement,
    AssignmentCreated,
    AssignmentUnlocked,
    SubmissionReceived,
    SubmissionGraded,
    AutoGraded,
    ExamScheduled,
    StudentJoined,
    PlanGenerated,
}

impl std::fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ActivityKind::Announcement => "announcement",
            ActivityKind::AssignmentCreated => "assignment_created",
            ActivityKind::AssignmentUnlocked => "assignment_unlocked",
            ActivityKind::SubmissionReceived => "submission_received",
            ActivityKind::SubmissionGraded => "submission_graded",
            ActivityKind::AutoGraded => "auto_graded",
            ActivityKind::ExamScheduled => "exam_scheduled",
            ActivityKind::StudentJoined => "student_joined",
            ActivityKind::PlanGenerated => "plan_generated",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for ActivityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "announcement" => Ok(ActivityKind::Announcement),
            "assignment_created" => Ok(ActivityKind::AssignmentCreated),
            "assignment_unlocked" => Ok(ActivityKind::AssignmentUnlocked),
            "submission_received" => Ok(ActivityKind::SubmissionReceived),
            "submission_graded" => Ok(ActivityKind::SubmissionGraded),
            "auto_graded" => Ok(ActivityKind::AutoGraded),
            "exam_scheduled" => Ok(ActivityKind::ExamScheduled),
            "student_joined" => Ok(ActivityKind::StudentJoined),
            "plan_generated" => Ok(ActivityKind::PlanGenerated),
            _ => Err(format!("未知的活动类型: {s}")),
        }
    }
}

// 活动记录（班级动态流）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/activity.ts")]
pub struct Activity {
    pub id: i64,
    pub kind: ActivityKind,
    pub message: String,
    pub classroom_id: Option<i64>,
    pub user_id: Option<i64>,
    /// 附加信息，结构随 kind 而异
    #[ts(type = "Record<string, unknown> | null")]
    pub meta: Option<serde_json::Value>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
