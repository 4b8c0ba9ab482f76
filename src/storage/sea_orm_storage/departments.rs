use super::{SeaOrmStorage, map_db_err};
use crate::entity::departments::{ActiveModel, Column, Entity as Departments};
use crate::errors::Result;
use crate::models::{
    PaginatedResponse,
    departments::{
        entities::Department,
        requests::{CreateDepartmentRequest, DepartmentListQuery, UpdateDepartmentRequest},
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    pub async fn create_department_impl(&self, req: CreateDepartmentRequest) -> Result<Department> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(req.name),
            code: Set(req.code),
            description: Set(req.description),
            head_id: Set(req.head_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| map_db_err("创建院系失败", e))?;

        Ok(result.into_department())
    }

    pub async fn get_department_by_id_impl(&self, id: i64) -> Result<Option<Department>> {
        let result = Departments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| map_db_err("查询院系失败", e))?;

        Ok(result.map(|m| m.into_department()))
    }

    pub async fn list_departments_with_pagination_impl(
        &self,
        query: DepartmentListQuery,
    ) -> Result<PaginatedResponse<Department>> {
        let mut select = Departments::find();

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

        select = select.order_by_asc(Column::Name);

        self.paginate(select, query.page, query.size, "院系", |m| {
            m.into_department()
        })
        .await
    }

    pub async fn list_all_departments_impl(&self) -> Result<Vec<Department>> {
        let departments = Departments::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| map_db_err("查询院系列表失败", e))?;

        Ok(departments.into_iter().map(|m| m.into_department()).collect())
    }

    pub async fn update_department_impl(
        &self,
        id: i64,
        update: UpdateDepartmentRequest,
    ) -> Result<Option<Department>> {
        let Some(existing) = Departments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| map_db_err("查询院系失败", e))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(code) = update.code {
            model.code = Set(code);
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(head_id) = update.head_id {
            model.head_id = Set(Some(head_id));
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| map_db_err("更新院系失败", e))?;

        Ok(Some(updated.into_department()))
    }

    /// 删除院系，课程级联删除，用户的 department_id 置空
    pub async fn delete_department_impl(&self, id: i64) -> Result<bool> {
        let result = Departments::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| map_db_err("删除院系失败", e))?;

        Ok(result.rows_affected > 0)
    }
}
