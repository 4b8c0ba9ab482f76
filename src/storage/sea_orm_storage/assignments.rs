use super::{SeaOrmStorage, map_db_err};
use crate::entity::assignments::{ActiveModel, Column, Entity as Assignments};
use crate::entity::student_assignments::{
    self, ActiveModel as SubmissionActiveModel, Entity as StudentAssignments,
};
use crate::errors::Result;
use crate::models::{
    PaginatedResponse,
    assignments::{
        entities::{Assignment, StudentAssignment, SubmissionStatus},
        requests::{
            AssignmentListQuery, CreateAssignmentRequest, StudentAssignmentListQuery,
            UpdateAssignmentRequest,
        },
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use std::collections::HashMap;

/// 作业默认满分
const DEFAULT_MAX_SCORE: f64 = 100.0;

impl SeaOrmStorage {
    pub async fn create_assignment_impl(
        &self,
        created_by: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            course_id: Set(req.course_id),
            created_by: Set(created_by),
            title: Set(req.title),
            description: Set(req.description),
            max_score: Set(req.max_score.unwrap_or(DEFAULT_MAX_SCORE)),
            due_at: Set(req.due_at.map(|d| d.timestamp())),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| map_db_err("创建作业失败", e))?;

        Ok(result.into_assignment())
    }

    pub async fn get_assignment_by_id_impl(&self, id: i64) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| map_db_err("查询作业失败", e))?;

        Ok(result.map(|m| m.into_assignment()))
    }

    pub async fn list_assignments_with_pagination_impl(
        &self,
        query: AssignmentListQuery,
    ) -> Result<PaginatedResponse<Assignment>> {
        let mut select = Assignments::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(Column::Title.contains(&escaped));
        }

        if let Some(course_id) = query.course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }

        select = select.order_by_desc(Column::CreatedAt).order_by_desc(Column::Id);

        self.paginate(select, query.page, query.size, "作业", |m| {
            m.into_assignment()
        })
        .await
    }

    pub async fn list_all_assignments_impl(&self) -> Result<Vec<Assignment>> {
        let assignments = Assignments::find()
            .all(&self.db)
            .await
            .map_err(|e| map_db_err("查询作业列表失败", e))?;

        Ok(assignments.into_iter().map(|m| m.into_assignment()).collect())
    }

    pub async fn update_assignment_impl(
        &self,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        let Some(existing) = Assignments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| map_db_err("查询作业失败", e))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(max_score) = update.max_score {
            model.max_score = Set(max_score);
        }
        if let Some(due_at) = update.due_at {
            model.due_at = Set(Some(due_at.timestamp()));
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| map_db_err("更新作业失败", e))?;

        Ok(Some(updated.into_assignment()))
    }

    pub async fn delete_assignment_impl(&self, id: i64) -> Result<bool> {
        let result = Assignments::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| map_db_err("删除作业失败", e))?;

        Ok(result.rows_affected > 0)
    }

    // 查询提交所属作业的截止时间
    async fn due_at_of(&self, assignment_id: i64) -> Result<Option<i64>> {
        let assignment = Assignments::find_by_id(assignment_id)
            .one(&self.db)
            .await
            .map_err(|e| map_db_err("查询作业失败", e))?;

        Ok(assignment.and_then(|a| a.due_at))
    }

    // 批量查询截止时间，用于列表
    async fn due_at_map(&self) -> Result<HashMap<i64, Option<i64>>> {
        let assignments = Assignments::find()
            .all(&self.db)
            .await
            .map_err(|e| map_db_err("查询作业失败", e))?;

        Ok(assignments.into_iter().map(|a| (a.id, a.due_at)).collect())
    }

    pub async fn get_student_assignment_by_id_impl(
        &self,
        id: i64,
    ) -> Result<Option<StudentAssignment>> {
        let Some(model) = StudentAssignments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| map_db_err("查询作业提交失败", e))?
        else {
            return Ok(None);
        };

        let due_at = self.due_at_of(model.assignment_id).await?;
        Ok(Some(model.into_student_assignment(due_at)))
    }

    pub async fn get_student_assignment_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<StudentAssignment>> {
        let Some(model) = StudentAssignments::find()
            .filter(student_assignments::Column::AssignmentId.eq(assignment_id))
            .filter(student_assignments::Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| map_db_err("查询作业提交失败", e))?
        else {
            return Ok(None);
        };

        let due_at = self.due_at_of(assignment_id).await?;
        Ok(Some(model.into_student_assignment(due_at)))
    }

    /// 首次提交插入新记录，未批改前再次提交覆盖内容与提交时间
    pub async fn upsert_student_assignment_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
        content: Option<String>,
    ) -> Result<StudentAssignment> {
        let now = chrono::Utc::now().timestamp();

        let existing = StudentAssignments::find()
            .filter(student_assignments::Column::AssignmentId.eq(assignment_id))
            .filter(student_assignments::Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| map_db_err("查询作业提交失败", e))?;

        let saved = match existing {
            Some(existing) => {
                let mut model: SubmissionActiveModel = existing.into();
                model.content = Set(content);
                model.submitted_at = Set(now);
                model
                    .update(&self.db)
                    .await
                    .map_err(|e| map_db_err("更新作业提交失败", e))?
            }
            None => SubmissionActiveModel {
                assignment_id: Set(assignment_id),
                student_id: Set(student_id),
                content: Set(content),
                status: Set(SubmissionStatus::Submitted.to_string()),
                submitted_at: Set(now),
                ..Default::default()
            }
            .insert(&self.db)
            .await
            .map_err(|e| map_db_err("提交作业失败", e))?,
        };

        let due_at = self.due_at_of(assignment_id).await?;
        Ok(saved.into_student_assignment(due_at))
    }

    pub async fn grade_student_assignment_impl(
        &self,
        id: i64,
        grader_id: i64,
        score: f64,
        feedback: Option<String>,
    ) -> Result<Option<StudentAssignment>> {
        let Some(existing) = StudentAssignments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| map_db_err("查询作业提交失败", e))?
        else {
            return Ok(None);
        };

        let assignment_id = existing.assignment_id;
        let mut model: SubmissionActiveModel = existing.into();
        model.score = Set(Some(score));
        model.feedback = Set(feedback);
        model.status = Set(SubmissionStatus::Graded.to_string());
        model.graded_at = Set(Some(chrono::Utc::now().timestamp()));
        model.graded_by = Set(Some(grader_id));

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| map_db_err("批改作业失败", e))?;

        let due_at = self.due_at_of(assignment_id).await?;
        Ok(Some(updated.into_student_assignment(due_at)))
    }

    pub async fn list_student_assignments_with_pagination_impl(
        &self,
        query: StudentAssignmentListQuery,
    ) -> Result<PaginatedResponse<StudentAssignment>> {
        let mut select = StudentAssignments::find();

        if let Some(assignment_id) = query.assignment_id {
            select = select.filter(student_assignments::Column::AssignmentId.eq(assignment_id));
        }
        if let Some(student_id) = query.student_id {
            select = select.filter(student_assignments::Column::StudentId.eq(student_id));
        }
        if let Some(ref status) = query.status {
            select = select.filter(student_assignments::Column::Status.eq(status.to_string()));
        }

        select = select
            .order_by_desc(student_assignments::Column::SubmittedAt)
            .order_by_desc(student_assignments::Column::Id);

        let due_at = self.due_at_map().await?;
        self.paginate(select, query.page, query.size, "作业提交", |m| {
            let due = due_at.get(&m.assignment_id).copied().flatten();
            m.into_student_assignment(due)
        })
        .await
    }

    pub async fn list_all_student_assignments_impl(&self) -> Result<Vec<StudentAssignment>> {
        let due_at = self.due_at_map().await?;
        let submissions = StudentAssignments::find()
            .all(&self.db)
            .await
            .map_err(|e| map_db_err("查询作业提交失败", e))?;

        Ok(submissions
            .into_iter()
            .map(|m| {
                let due = due_at.get(&m.assignment_id).copied().flatten();
                m.into_student_assignment(due)
            })
            .collect())
    }
}
