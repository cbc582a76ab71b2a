use super::SeaOrmStorage;
use crate::entity::files::{ActiveModel, Column, Entity as Files};
use crate::errors::{PortalError, Result};
use crate::models::files::entities::File;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

impl SeaOrmStorage {
    /// 登记上传文件
    pub async fn upload_file_impl(
        &self,
        token: &str,
        file_name: &str,
        size: i64,
        mime_type: &str,
        user_id: i64,
    ) -> Result<File> {
        let model = ActiveModel {
            token: Set(token.to_string()),
            file_name: Set(file_name.to_string()),
            size: Set(size),
            mime_type: Set(mime_type.to_string()),
            uploaded_by: Set(user_id),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("登记上传文件失败: {e}")))?;

        Ok(result.into_file())
    }

    /// 通过唯一 token 获取文件信息
    pub async fn get_file_by_token_impl(&self, token: &str) -> Result<Option<File>> {
        let result = Files::find()
            .filter(Column::Token.eq(token))
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询文件失败: {e}")))?;

        Ok(result.map(|m| m.into_file()))
    }
}
