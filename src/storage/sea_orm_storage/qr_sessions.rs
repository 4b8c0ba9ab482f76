use super::{SeaOrmStorage, map_db_err};
use crate::entity::attendances;
use crate::entity::qr_code_sessions::{ActiveModel, Column, Entity as QrCodeSessions};
use crate::errors::Result;
use crate::models::{
    PaginatedResponse,
    qr_sessions::{entities::QrCodeSession, requests::QrSessionListQuery},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
    sea_query::Expr,
};

impl SeaOrmStorage {
    pub async fn create_qr_session_impl(
        &self,
        course_id: i64,
        created_by: i64,
        code: &str,
        expires_at: chrono::DateTime<chrono::Utc>,
    ) -> Result<QrCodeSession> {
        let model = ActiveModel {
            course_id: Set(course_id),
            created_by: Set(created_by),
            code: Set(code.to_string()),
            expires_at: Set(expires_at.timestamp()),
            closed_at: Set(None),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| map_db_err("创建签到会话失败", e))?;

        Ok(result.into_qr_session())
    }

    pub async fn get_qr_session_by_id_impl(&self, id: i64) -> Result<Option<QrCodeSession>> {
        let result = QrCodeSessions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| map_db_err("查询签到会话失败", e))?;

        Ok(result.map(|m| m.into_qr_session()))
    }

    pub async fn get_qr_session_by_code_impl(&self, code: &str) -> Result<Option<QrCodeSession>> {
        let result = QrCodeSessions::find()
            .filter(Column::Code.eq(code))
            .one(&self.db)
            .await
            .map_err(|e| map_db_err("查询签到会话失败", e))?;

        Ok(result.map(|m| m.into_qr_session()))
    }

    pub async fn list_qr_sessions_with_pagination_impl(
        &self,
        query: QrSessionListQuery,
    ) -> Result<PaginatedResponse<QrCodeSession>> {
        let mut select = QrCodeSessions::find();

        if let Some(course_id) = query.course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }

        select = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);

        self.paginate(select, query.page, query.size, "签到会话", |m| {
            m.into_qr_session()
        })
        .await
    }

    pub async fn list_all_qr_sessions_impl(&self) -> Result<Vec<QrCodeSession>> {
        let sessions = QrCodeSessions::find()
            .all(&self.db)
            .await
            .map_err(|e| map_db_err("查询签到会话失败", e))?;

        Ok(sessions.into_iter().map(|m| m.into_qr_session()).collect())
    }

    /// 关闭会话，已关闭的保留原关闭时间
    pub async fn close_qr_session_impl(&self, id: i64) -> Result<Option<QrCodeSession>> {
        let Some(existing) = QrCodeSessions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| map_db_err("查询签到会话失败", e))?
        else {
            return Ok(None);
        };

        if existing.closed_at.is_some() {
            return Ok(Some(existing.into_qr_session()));
        }

        let mut model: ActiveModel = existing.into();
        model.closed_at = Set(Some(chrono::Utc::now().timestamp()));

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| map_db_err("关闭签到会话失败", e))?;

        Ok(Some(updated.into_qr_session()))
    }

    /// 删除会话，签到记录保留并解除关联
    pub async fn delete_qr_session_impl(&self, id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| map_db_err("开启事务失败", e))?;

        attendances::Entity::update_many()
            .col_expr(
                attendances::Column::SessionId,
                Expr::value(Option::<i64>::None),
            )
            .filter(attendances::Column::SessionId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| map_db_err("解除签到记录关联失败", e))?;

        let result = QrCodeSessions::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| map_db_err("删除签到会话失败", e))?;

        txn.commit()
            .await
            .map_err(|e| map_db_err("提交事务失败", e))?;

        Ok(result.rows_affected > 0)
    }
}
