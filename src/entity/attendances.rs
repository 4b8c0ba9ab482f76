//! 考勤记录实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "attendances")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub session_id: Option<i64>,
    // YYYY-MM-DD，按字符串比较即按日期比较
    pub attendance_date: String,
    pub status: String,
    pub method: String,
    pub recorded_by: Option<i64>,
    pub checked_in_at: Option<i64>,
    pub note: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::StudentId",
        to = "super::users::Column::Id"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::qr_code_sessions::Entity",
        from = "Column::SessionId",
        to = "super::qr_code_sessions::Column::Id"
    )]
    Session,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::qr_code_sessions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Session.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_attendance(self) -> crate::models::attendances::entities::Attendance {
        use super::{parse_column, ts_to_datetime};
        use crate::models::attendances::entities::{
            Attendance, AttendanceMethod, AttendanceStatus,
        };

        Attendance {
            id: self.id,
            student_id: self.student_id,
            course_id: self.course_id,
            session_id: self.session_id,
            attendance_date: parse_column(
                "attendances.attendance_date",
                &self.attendance_date,
                chrono::NaiveDate::default(),
            ),
            status: parse_column("attendances.status", &self.status, AttendanceStatus::Absent),
            method: parse_column("attendances.method", &self.method, AttendanceMethod::Manual),
            recorded_by: self.recorded_by,
            checked_in_at: self.checked_in_at.map(ts_to_datetime),
            note: self.note,
            created_at: ts_to_datetime(self.created_at),
            updated_at: ts_to_datetime(self.updated_at),
        }
    }
}
