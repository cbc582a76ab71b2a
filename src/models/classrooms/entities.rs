use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 教室实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/classroom.ts")]
pub struct Classroom {
    pub id: i64,
    pub name: String,
    /// 加入码，全局唯一
    pub code: String,
    /// 管理员创建的教室可以暂不指派教师
    pub teacher_id: Option<i64>,
    pub archived: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 名册中的学生（User 的公开子集 + 加入时间）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/classroom.ts")]
pub struct RosterStudent {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub display_name: Option<String>,
    pub joined_at: chrono::DateTime<chrono::Utc>,
}
