//! 活动记录实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "activities")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub kind: String,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    pub classroom_id: Option<i64>,
    pub user_id: Option<i64>,
    /// 附加信息的 JSON 串
    #[sea_orm(column_type = "Text", nullable)]
    pub meta: Option<String>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::classrooms::Entity",
        from = "Column::ClassroomId",
        to = "super::classrooms::Column::Id"
    )]
    Classroom,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
}

impl Related<super::classrooms::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Classroom.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_activity(self) -> crate::models::activities::entities::Activity {
        use crate::models::activities::entities::{Activity, ActivityKind};
        use chrono::{DateTime, Utc};

        Activity {
            id: self.id,
            kind: self
                .kind
                .parse::<ActivityKind>()
                .unwrap_or(ActivityKind::Announcement),
            message: self.message,
            classroom_id: self.classroom_id,
            user_id: self.user_id,
            meta: self.meta.as_deref().and_then(|s| serde_json::from_str(s).ok()),
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
