use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::{Assignment, Submission};
use crate::models::PaginationInfo;

// 作业列表响应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignmentListResponse {
    pub items: Vec<Assignment>,
    pub pagination: PaginationInfo,
}

// 作业详情（含提交）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignmentDetailResponse {
    pub assignment: Assignment,
    pub submissions: Vec<Submission>,
}

// 自动评分结果
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AutoGradeResponse {
    /// 本次被写入成绩的提交数
    pub updated: i64,
}
