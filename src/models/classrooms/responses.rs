use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::{Classroom, RosterStudent};
use crate::models::PaginationInfo;
use crate::models::activities::entities::Activity;

// 教室列表响应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/classroom.ts")]
pub struct ClassroomListResponse {
    pub items: Vec<Classroom>,
    pub pagination: PaginationInfo,
}

// 教室详情响应（含最近公告）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/classroom.ts")]
pub struct ClassroomDetailResponse {
    pub classroom: Classroom,
    pub announcements: Vec<Activity>,
}

// 名册响应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/classroom.ts")]
pub struct RosterResponse {
    pub students: Vec<RosterStudent>,
}

// 名册添加学生响应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/classroom.ts")]
pub struct AddStudentResponse {
    pub student: RosterStudent,
    /// 仅在新建账号时返回一次
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temp_password: Option<String>,
}

// 教室统计（教师端分析面板）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/classroom.ts")]
pub struct ClassroomAnalytics {
    pub classroom_id: i64,
    pub student_count: i64,
    pub assignment_count: i64,
    pub submission_count: i64,
    pub graded_count: i64,
    /// 已评分提交的平均分，无评分时为 None
    pub average_grade: Option<f64>,
}

// CSV 导入响应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/classroom.ts")]
pub struct RosterImportResponse {
    pub added: Vec<RosterStudent>,
    pub skipped: i64,
}
