use super::{SeaOrmStorage, map_db_err};
use crate::entity::courses::{ActiveModel, Column, Entity as Courses};
use crate::entity::{group_members, groups, users};
use crate::errors::Result;
use crate::models::{
    PaginatedResponse,
    courses::{
        entities::Course,
        requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest},
    },
    users::entities::{User, UserRole},
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    Set,
};

/// 课程默认学分
const DEFAULT_CREDITS: i32 = 3;

impl SeaOrmStorage {
    pub async fn create_course_impl(&self, req: CreateCourseRequest) -> Result<Course> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            department_id: Set(req.department_id),
            teacher_id: Set(req.teacher_id),
            code: Set(req.code),
            name: Set(req.name),
            description: Set(req.description),
            credits: Set(req.credits.unwrap_or(DEFAULT_CREDITS)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| map_db_err("创建课程失败", e))?;

        Ok(result.into_course())
    }

    pub async fn get_course_by_id_impl(&self, id: i64) -> Result<Option<Course>> {
        let result = Courses::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| map_db_err("查询课程失败", e))?;

        Ok(result.map(|m| m.into_course()))
    }

    pub async fn list_courses_with_pagination_impl(
        &self,
        query: CourseListQuery,
    ) -> Result<PaginatedResponse<Course>> {
        let mut select = Courses::find();

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

        if let Some(department_id) = query.department_id {
            select = select.filter(Column::DepartmentId.eq(department_id));
        }

        if let Some(teacher_id) = query.teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }

        select = select.order_by_asc(Column::Code);

        self.paginate(select, query.page, query.size, "课程", |m| m.into_course())
            .await
    }

    pub async fn list_all_courses_impl(&self) -> Result<Vec<Course>> {
        let courses = Courses::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| map_db_err("查询课程列表失败", e))?;

        Ok(courses.into_iter().map(|m| m.into_course()).collect())
    }

    pub async fn update_course_impl(
        &self,
        id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        let Some(existing) = Courses::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| map_db_err("查询课程失败", e))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        if let Some(department_id) = update.department_id {
            model.department_id = Set(department_id);
        }
        if let Some(code) = update.code {
            model.code = Set(code);
        }
        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(credits) = update.credits {
            model.credits = Set(credits);
        }
        if let Some(teacher_id) = update.teacher_id {
            model.teacher_id = Set(Some(teacher_id));
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| map_db_err("更新课程失败", e))?;

        Ok(Some(updated.into_course()))
    }

    pub async fn delete_course_impl(&self, id: i64) -> Result<bool> {
        let result = Courses::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| map_db_err("删除课程失败", e))?;

        Ok(result.rows_affected > 0)
    }

    /// 课程花名册
    pub async fn list_course_roster_impl(&self, course_id: i64) -> Result<Vec<User>> {
        let group_ids: Vec<i64> = groups::Entity::find()
            .select_only()
            .column(groups::Column::Id)
            .filter(groups::Column::CourseId.eq(course_id))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| map_db_err("查询课程分组失败", e))?;

        if group_ids.is_empty() {
            return Ok(Vec::new());
        }

        let member_ids: Vec<i64> = group_members::Entity::find()
            .select_only()
            .column(group_members::Column::UserId)
            .filter(group_members::Column::GroupId.is_in(group_ids))
            .distinct()
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| map_db_err("查询分组成员失败", e))?;

        if member_ids.is_empty() {
            return Ok(Vec::new());
        }

        let students = users::Entity::find()
            .filter(users::Column::Id.is_in(member_ids))
            .filter(users::Column::RoleId.eq(UserRole::Student.id()))
            .order_by_asc(users::Column::Username)
            .all(&self.db)
            .await
            .map_err(|e| map_db_err("查询花名册失败", e))?;

        Ok(students.into_iter().map(|m| m.into_user()).collect())
    }
}
