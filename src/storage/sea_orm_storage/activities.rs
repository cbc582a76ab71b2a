use super::SeaOrmStorage;
use crate::entity::activities::{ActiveModel, Column, Entity as Activities};
use crate::errors::{PortalError, Result};
use crate::models::{
    PaginationInfo,
    activities::{
        entities::{Activity, ActivityKind},
        requests::ActivityListQuery,
        responses::ActivityListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

impl SeaOrmStorage {
    /// 记录一条活动
    pub async fn log_activity_impl(
        &self,
        kind: ActivityKind,
        message: String,
        classroom_id: Option<i64>,
        user_id: Option<i64>,
        meta: Option<serde_json::Value>,
    ) -> Result<Activity> {
        let meta_json = meta.map(|v| v.to_string());

        let model = ActiveModel {
            kind: Set(kind.to_string()),
            message: Set(message),
            classroom_id: Set(classroom_id),
            user_id: Set(user_id),
            meta: Set(meta_json),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("记录活动失败: {e}")))?;

        Ok(result.into_activity())
    }

    /// 分页列出活动
    pub async fn list_activities_with_pagination_impl(
        &self,
        query: ActivityListQuery,
    ) -> Result<ActivityListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(20).clamp(1, 100) as u64;

        let mut select = Activities::find();

        if let Some(classroom_id) = query.classroom_id {
            select = select.filter(Column::ClassroomId.eq(classroom_id));
        }

        if let Some(ref classroom_ids) = query.classroom_ids {
            select = select.filter(Column::ClassroomId.is_in(classroom_ids.clone()));
        }

        if let Some(ref kind) = query.kind {
            select = select.filter(Column::Kind.eq(kind.as_str()));
        }

        select = select.order_by_desc(Column::CreatedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| PortalError::database_operation(format!("查询活动总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| PortalError::database_operation(format!("查询活动页数失败: {e}")))?;
        let activities = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询活动列表失败: {e}")))?;

        Ok(ActivityListResponse {
            items: activities.into_iter().map(|m| m.into_activity()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 某教室最近的公告
    pub async fn list_announcements_impl(
        &self,
        classroom_id: i64,
        limit: u64,
    ) -> Result<Vec<Activity>> {
        let rows = Activities::find()
            .filter(Column::ClassroomId.eq(classroom_id))
            .filter(Column::Kind.eq(ActivityKind::Announcement.to_string()))
            .order_by_desc(Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询公告失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_activity()).collect())
    }
}
