//! 扫码签到会话实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "qr_code_sessions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    pub created_by: i64,
    #[sea_orm(unique)]
    pub code: String,
    pub expires_at: i64,
    pub closed_at: Option<i64>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id"
    )]
    Course,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_qr_session(self) -> crate::models::qr_sessions::entities::QrCodeSession {
        use super::ts_to_datetime;
        use crate::models::qr_sessions::entities::QrCodeSession;

        QrCodeSession {
            id: self.id,
            course_id: self.course_id,
            created_by: self.created_by,
            code: self.code,
            expires_at: ts_to_datetime(self.expires_at),
            closed_at: self.closed_at.map(ts_to_datetime),
            created_at: ts_to_datetime(self.created_at),
        }
    }
}
