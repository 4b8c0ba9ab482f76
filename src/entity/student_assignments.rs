//! 学生作业提交实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "student_assignments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    pub content: Option<String>,
    pub status: String,
    #[sea_orm(column_type = "Double", nullable)]
    pub score: Option<f64>,
    pub feedback: Option<String>,
    pub submitted_at: i64,
    pub graded_at: Option<i64>,
    pub graded_by: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assignments::Entity",
        from = "Column::AssignmentId",
        to = "super::assignments::Column::Id"
    )]
    Assignment,
}

impl Related<super::assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// `due_at` 来自所属作业，用于计算是否迟交
    pub fn into_student_assignment(
        self,
        due_at: Option<i64>,
    ) -> crate::models::assignments::entities::StudentAssignment {
        use super::{parse_column, ts_to_datetime};
        use crate::models::assignments::entities::{
            StudentAssignment, SubmissionStatus, is_late_submission,
        };

        let submitted_at = ts_to_datetime(self.submitted_at);
        StudentAssignment {
            id: self.id,
            assignment_id: self.assignment_id,
            student_id: self.student_id,
            content: self.content,
            status: parse_column(
                "student_assignments.status",
                &self.status,
                SubmissionStatus::Submitted,
            ),
            score: self.score,
            feedback: self.feedback,
            is_late: is_late_submission(submitted_at, due_at.map(ts_to_datetime)),
            submitted_at,
            graded_at: self.graded_at.map(ts_to_datetime),
            graded_by: self.graded_by,
        }
    }
}
