use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::Exam;
use crate::models::PaginationInfo;

// 考试列表响应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct ExamListResponse {
    pub items: Vec<Exam>,
    pub pagination: PaginationInfo,
}
