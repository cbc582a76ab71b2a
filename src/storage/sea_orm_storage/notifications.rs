use super::SeaOrmStorage;
use crate::entity::notifications::{ActiveModel, Column, Entity as Notifications};
use crate::errors::{PortalError, Result};
use crate::models::notifications::entities::Notification;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 发送单条通知
    pub async fn create_notification_impl(
        &self,
        user_id: i64,
        message: String,
        link: Option<String>,
    ) -> Result<Notification> {
        let model = ActiveModel {
            user_id: Set(user_id),
            message: Set(message),
            link: Set(link),
            read: Set(false),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("创建通知失败: {e}")))?;

        Ok(result.into_notification())
    }

    /// 批量发送通知
    pub async fn create_notifications_impl(
        &self,
        user_ids: &[i64],
        message: &str,
        link: Option<&str>,
    ) -> Result<u64> {
        if user_ids.is_empty() {
            return Ok(0);
        }

        let now = chrono::Utc::now().timestamp();
        let models: Vec<ActiveModel> = user_ids
            .iter()
            .map(|&user_id| ActiveModel {
                user_id: Set(user_id),
                message: Set(message.to_string()),
                link: Set(link.map(|s| s.to_string())),
                read: Set(false),
                created_at: Set(now),
                ..Default::default()
            })
            .collect();

        let count = models.len() as u64;
        Notifications::insert_many(models)
            .exec(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("批量创建通知失败: {e}")))?;

        Ok(count)
    }

    /// 某用户的通知及未读数
    pub async fn list_notifications_for_user_impl(
        &self,
        user_id: i64,
    ) -> Result<(Vec<Notification>, i64)> {
        let rows = Notifications::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询通知失败: {e}")))?;

        let unread = Notifications::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::Read.eq(false))
            .count(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("统计未读通知失败: {e}")))?;

        Ok((
            rows.into_iter().map(|m| m.into_notification()).collect(),
            unread as i64,
        ))
    }

    /// 标记单条通知已读，仅限本人
    pub async fn mark_notification_read_impl(&self, id: i64, user_id: i64) -> Result<bool> {
        let result = Notifications::update_many()
            .col_expr(Column::Read, Expr::value(true))
            .filter(Column::Id.eq(id))
            .filter(Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("标记通知已读失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 全部标记已读
    pub async fn mark_all_notifications_read_impl(&self, user_id: i64) -> Result<u64> {
        let result = Notifications::update_many()
            .col_expr(Column::Read, Expr::value(true))
            .filter(Column::UserId.eq(user_id))
            .filter(Column::Read.eq(false))
            .exec(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("标记全部已读失败: {e}")))?;

        Ok(result.rows_affected)
    }
}
