use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::StudyPlan;

// 学习计划列表响应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/study_plan.ts")]
pub struct StudyPlanListResponse {
    pub items: Vec<StudyPlan>,
}
