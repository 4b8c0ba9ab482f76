use super::{SeaOrmStorage, map_db_err};
use crate::entity::group_members::{
    self, ActiveModel as MemberActiveModel, Entity as GroupMembers,
};
use crate::entity::groups::{ActiveModel, Column, Entity as Groups};
use crate::entity::users::Entity as Users;
use crate::errors::Result;
use crate::models::{
    PaginatedResponse,
    groups::{
        entities::{Group, GroupMember, GroupMemberDetail},
        requests::{CreateGroupRequest, GroupListQuery, UpdateGroupRequest},
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    pub async fn create_group_impl(&self, req: CreateGroupRequest) -> Result<Group> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(req.name),
            course_id: Set(req.course_id),
            department_id: Set(req.department_id),
            description: Set(req.description),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| map_db_err("创建分组失败", e))?;

        Ok(result.into_group())
    }

    pub async fn get_group_by_id_impl(&self, id: i64) -> Result<Option<Group>> {
        let result = Groups::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| map_db_err("查询分组失败", e))?;

        Ok(result.map(|m| m.into_group()))
    }

    pub async fn list_groups_with_pagination_impl(
        &self,
        query: GroupListQuery,
    ) -> Result<PaginatedResponse<Group>> {
        let mut select = Groups::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(Column::Name.contains(&escaped));
        }

        if let Some(course_id) = query.course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }

        if let Some(department_id) = query.department_id {
            select = select.filter(Column::DepartmentId.eq(department_id));
        }

        select = select.order_by_asc(Column::Name);

        self.paginate(select, query.page, query.size, "分组", |m| m.into_group())
            .await
    }

    pub async fn list_all_groups_impl(&self) -> Result<Vec<Group>> {
        let groups = Groups::find()
            .all(&self.db)
            .await
            .map_err(|e| map_db_err("查询分组列表失败", e))?;

        Ok(groups.into_iter().map(|m| m.into_group()).collect())
    }

    pub async fn update_group_impl(
        &self,
        id: i64,
        update: UpdateGroupRequest,
    ) -> Result<Option<Group>> {
        let Some(existing) = Groups::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| map_db_err("查询分组失败", e))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(course_id) = update.course_id {
            model.course_id = Set(Some(course_id));
        }
        if let Some(department_id) = update.department_id {
            model.department_id = Set(Some(department_id));
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| map_db_err("更新分组失败", e))?;

        Ok(Some(updated.into_group()))
    }

    pub async fn delete_group_impl(&self, id: i64) -> Result<bool> {
        let result = Groups::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| map_db_err("删除分组失败", e))?;

        Ok(result.rows_affected > 0)
    }

    /// 添加成员，重复添加由唯一索引拒绝
    pub async fn add_group_member_impl(&self, group_id: i64, user_id: i64) -> Result<GroupMember> {
        let model = MemberActiveModel {
            group_id: Set(group_id),
            user_id: Set(user_id),
            joined_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| map_db_err("添加分组成员失败", e))?;

        Ok(result.into_group_member())
    }

    pub async fn remove_group_member_impl(&self, group_id: i64, user_id: i64) -> Result<bool> {
        let result = GroupMembers::delete_many()
            .filter(group_members::Column::GroupId.eq(group_id))
            .filter(group_members::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(|e| map_db_err("移除分组成员失败", e))?;

        Ok(result.rows_affected > 0)
    }

    /// 成员列表，附带用户信息
    pub async fn list_group_members_impl(&self, group_id: i64) -> Result<Vec<GroupMemberDetail>> {
        let rows = GroupMembers::find()
            .filter(group_members::Column::GroupId.eq(group_id))
            .find_also_related(Users)
            .order_by_asc(group_members::Column::JoinedAt)
            .all(&self.db)
            .await
            .map_err(|e| map_db_err("查询分组成员失败", e))?;

        Ok(rows
            .into_iter()
            .filter_map(|(member, user)| {
                let user = user?.into_user();
                Some(GroupMemberDetail {
                    id: member.id,
                    group_id: member.group_id,
                    user_id: member.user_id,
                    username: user.username,
                    display_name: user.display_name,
                    role: user.role,
                    joined_at: crate::entity::ts_to_datetime(member.joined_at),
                })
            })
            .collect())
    }

    pub async fn list_all_group_members_impl(&self) -> Result<Vec<GroupMember>> {
        let members = GroupMembers::find()
            .all(&self.db)
            .await
            .map_err(|e| map_db_err("查询分组成员失败", e))?;

        Ok(members.into_iter().map(|m| m.into_group_member()).collect())
    }
}
