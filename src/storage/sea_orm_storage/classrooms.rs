use super::SeaOrmStorage;
use crate::entity::classrooms::{ActiveModel, Column, Entity as Classrooms};
use crate::errors::{PortalError, Result};
use crate::models::{
    PaginationInfo,
    classrooms::{
        entities::Classroom,
        requests::{ClassroomListQuery, CreateClassroomRequest, UpdateClassroomRequest},
        responses::ClassroomListResponse,
    },
};
use crate::utils::{escape_like_pattern, random_code::generate_random_code};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

impl SeaOrmStorage {
    /// 创建教室，code 缺省时自动生成 6 位加入码
    pub async fn create_classroom_impl(&self, req: CreateClassroomRequest) -> Result<Classroom> {
        let now = chrono::Utc::now().timestamp();
        let code = req
            .code
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| generate_random_code(6));

        let model = ActiveModel {
            name: Set(req.name),
            code: Set(code),
            teacher_id: Set(req.teacher_id),
            archived: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("创建教室失败: {e}")))?;

        Ok(result.into_classroom())
    }

    /// 通过 ID 获取教室
    pub async fn get_classroom_by_id_impl(&self, id: i64) -> Result<Option<Classroom>> {
        let result = Classrooms::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询教室失败: {e}")))?;

        Ok(result.map(|m| m.into_classroom()))
    }

    /// 通过加入码获取教室
    pub async fn get_classroom_by_code_impl(&self, code: &str) -> Result<Option<Classroom>> {
        let result = Classrooms::find()
            .filter(Column::Code.eq(code))
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询教室失败: {e}")))?;

        Ok(result.map(|m| m.into_classroom()))
    }

    /// 分页列出教室
    pub async fn list_classrooms_with_pagination_impl(
        &self,
        query: ClassroomListQuery,
    ) -> Result<ClassroomListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Classrooms::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Name.contains(&escaped))
                    .add(Column::Code.contains(&escaped)),
            );
        }

        if let Some(teacher_id) = query.teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }

        // 默认隐藏已归档教室
        if !query.include_archived.unwrap_or(false) {
            select = select.filter(Column::Archived.eq(false));
        }

        select = select.order_by_desc(Column::CreatedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| PortalError::database_operation(format!("查询教室总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| PortalError::database_operation(format!("查询教室页数失败: {e}")))?;
        let classrooms = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询教室列表失败: {e}")))?;

        Ok(ClassroomListResponse {
            items: classrooms.into_iter().map(|m| m.into_classroom()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新教室信息
    /// 教师名下教室的 ID 集合
    pub async fn list_classroom_ids_for_teacher_impl(&self, teacher_id: i64) -> Result<Vec<i64>> {
        let ids: Vec<i64> = Classrooms::find()
            .select_only()
            .column(Column::Id)
            .filter(Column::TeacherId.eq(teacher_id))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询教室失败: {e}")))?;

        Ok(ids)
    }

    pub async fn update_classroom_impl(
        &self,
        id: i64,
        update: UpdateClassroomRequest,
    ) -> Result<Option<Classroom>> {
        let existing = self.get_classroom_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name);
        }

        if let Some(teacher_id) = update.teacher_id {
            model.teacher_id = Set(Some(teacher_id));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("更新教室失败: {e}")))?;

        self.get_classroom_by_id_impl(id).await
    }

    /// 归档/取消归档教室
    pub async fn set_classroom_archived_impl(
        &self,
        id: i64,
        archived: bool,
    ) -> Result<Option<Classroom>> {
        let existing = self.get_classroom_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(id),
            archived: Set(archived),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        model
            .update(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("归档教室失败: {e}")))?;

        self.get_classroom_by_id_impl(id).await
    }
}
