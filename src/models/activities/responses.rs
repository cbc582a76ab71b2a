use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::Activity;
use crate::models::PaginationInfo;

// 活动流响应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/activity.ts")]
pub struct ActivityListResponse {
    pub items: Vec<Activity>,
    pub pagination: PaginationInfo,
}
