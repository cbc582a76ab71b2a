use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::Notification;

// 通知列表响应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub struct NotificationListResponse {
    pub items: Vec<Notification>,
    pub unread: i64,
}
