use super::{SeaOrmStorage, map_db_err};
use crate::entity::library_resources::{ActiveModel, Column, Entity as LibraryResources};
use crate::errors::Result;
use crate::models::{
    PaginatedResponse,
    library::{
        entities::LibraryResource,
        requests::{
            CreateLibraryResourceRequest, LibraryResourceListQuery, UpdateLibraryResourceRequest,
        },
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    pub async fn create_library_resource_impl(
        &self,
        created_by: i64,
        req: CreateLibraryResourceRequest,
    ) -> Result<LibraryResource> {
        let now = chrono::Utc::now().timestamp();
        let total = req.total_copies.unwrap_or(1);

        let model = ActiveModel {
            title: Set(req.title),
            author: Set(req.author),
            resource_type: Set(req.resource_type.to_string()),
            url: Set(req.url),
            isbn: Set(req.isbn),
            course_id: Set(req.course_id),
            total_copies: Set(total),
            available_copies: Set(req.available_copies.unwrap_or(total)),
            created_by: Set(Some(created_by)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| map_db_err("创建图书馆资源失败", e))?;

        Ok(result.into_library_resource())
    }

    pub async fn get_library_resource_by_id_impl(
        &self,
        id: i64,
    ) -> Result<Option<LibraryResource>> {
        let result = LibraryResources::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| map_db_err("查询图书馆资源失败", e))?;

        Ok(result.map(|m| m.into_library_resource()))
    }

    pub async fn list_library_resources_with_pagination_impl(
        &self,
        query: LibraryResourceListQuery,
    ) -> Result<PaginatedResponse<LibraryResource>> {
        let mut select = LibraryResources::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Title.contains(&escaped))
                    .add(Column::Author.contains(&escaped))
                    .add(Column::Isbn.contains(&escaped)),
            );
        }

        if let Some(course_id) = query.course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }

        if let Some(resource_type) = query.resource_type {
            select = select.filter(Column::ResourceType.eq(resource_type.to_string()));
        }

        select = select.order_by_asc(Column::Title);

        self.paginate(select, query.page, query.size, "图书馆资源", |m| {
            m.into_library_resource()
        })
        .await
    }

    pub async fn update_library_resource_impl(
        &self,
        id: i64,
        update: UpdateLibraryResourceRequest,
    ) -> Result<Option<LibraryResource>> {
        let Some(existing) = LibraryResources::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| map_db_err("查询图书馆资源失败", e))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(author) = update.author {
            model.author = Set(Some(author));
        }
        if let Some(resource_type) = update.resource_type {
            model.resource_type = Set(resource_type.to_string());
        }
        if let Some(url) = update.url {
            model.url = Set(Some(url));
        }
        if let Some(isbn) = update.isbn {
            model.isbn = Set(Some(isbn));
        }
        if let Some(course_id) = update.course_id {
            model.course_id = Set(Some(course_id));
        }
        if let Some(total) = update.total_copies {
            model.total_copies = Set(total);
        }
        if let Some(available) = update.available_copies {
            model.available_copies = Set(available);
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| map_db_err("更新图书馆资源失败", e))?;

        Ok(Some(updated.into_library_resource()))
    }

    pub async fn delete_library_resource_impl(&self, id: i64) -> Result<bool> {
        let result = LibraryResources::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| map_db_err("删除图书馆资源失败", e))?;

        Ok(result.rows_affected > 0)
    }
}
