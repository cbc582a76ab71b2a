use super::SeaOrmStorage;
use crate::entity::revoked_tokens::{ActiveModel, Column, Entity as RevokedTokens};
use crate::errors::{PortalError, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};

impl SeaOrmStorage {
    /// 吊销令牌（注销后进入黑名单，直到其自身过期）
    pub async fn revoke_token_impl(&self, token: &str, expires_at: i64) -> Result<()> {
        let model = ActiveModel {
            token: Set(token.to_string()),
            expires_at: Set(expires_at),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        // 重复注销同一令牌时唯一索引会拒绝插入，视为已吊销
        match model.insert(&self.db).await {
            Ok(_) => Ok(()),
            Err(e) if e.to_string().contains("UNIQUE") => Ok(()),
            Err(e) => Err(PortalError::database_operation(format!(
                "吊销令牌失败: {e}"
            ))),
        }
    }

    /// 查询令牌是否已吊销
    pub async fn is_token_revoked_impl(&self, token: &str) -> Result<bool> {
        let count = RevokedTokens::find()
            .filter(Column::Token.eq(token))
            .count(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询吊销记录失败: {e}")))?;

        Ok(count > 0)
    }

    /// 清理已过期的吊销记录
    pub async fn purge_expired_revoked_tokens_impl(&self, now: i64) -> Result<u64> {
        let result = RevokedTokens::delete_many()
            .filter(Column::ExpiresAt.lte(now))
            .exec(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("清理吊销记录失败: {e}")))?;

        Ok(result.rows_affected)
    }
}
