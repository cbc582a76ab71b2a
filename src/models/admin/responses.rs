use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 平台级统计
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/admin.ts")]
pub struct PlatformStats {
    pub total_users: i64,
    pub total_students: i64,
    pub total_teachers: i64,
    pub total_classrooms: i64,
    pub total_assignments: i64,
    pub total_submissions: i64,
    pub graded_submissions: i64,
    pub total_exams: i64,
    pub upcoming_exams: i64,
}
