use serde::Deserialize;
use ts_rs::TS;

// 活动流查询
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/activity.ts")]
pub struct ActivityListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub classroom_id: Option<i64>,
    pub kind: Option<String>,
    /// 业务层按角色注入的教室过滤，不走查询串
    #[serde(skip)]
    #[ts(skip)]
    pub classroom_ids: Option<Vec<i64>>,
}
