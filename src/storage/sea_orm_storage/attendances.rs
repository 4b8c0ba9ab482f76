use super::{SeaOrmStorage, map_db_err};
use crate::entity::attendances::{ActiveModel, Column, Entity as Attendances};
use crate::errors::Result;
use crate::models::{
    PaginatedResponse,
    attendances::{
        entities::Attendance,
        requests::{AttendanceListQuery, NewAttendance, UpdateAttendanceRequest},
    },
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

// 考勤日期按 ISO 格式存储
fn date_key(date: chrono::NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

impl SeaOrmStorage {
    pub async fn create_attendance_impl(&self, record: NewAttendance) -> Result<Attendance> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            student_id: Set(record.student_id),
            course_id: Set(record.course_id),
            session_id: Set(record.session_id),
            attendance_date: Set(date_key(record.attendance_date)),
            status: Set(record.status.to_string()),
            method: Set(record.method.to_string()),
            recorded_by: Set(record.recorded_by),
            checked_in_at: Set(record.checked_in_at.map(|t| t.timestamp())),
            note: Set(record.note),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| map_db_err("创建考勤记录失败", e))?;

        Ok(result.into_attendance())
    }

    pub async fn get_attendance_by_id_impl(&self, id: i64) -> Result<Option<Attendance>> {
        let result = Attendances::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| map_db_err("查询考勤记录失败", e))?;

        Ok(result.map(|m| m.into_attendance()))
    }

    pub async fn list_attendances_with_pagination_impl(
        &self,
        query: AttendanceListQuery,
    ) -> Result<PaginatedResponse<Attendance>> {
        let mut select = Attendances::find();

        if let Some(course_id) = query.course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }
        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(session_id) = query.session_id {
            select = select.filter(Column::SessionId.eq(session_id));
        }
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }
        if let Some(from) = query.date_from {
            select = select.filter(Column::AttendanceDate.gte(date_key(from)));
        }
        if let Some(to) = query.date_to {
            select = select.filter(Column::AttendanceDate.lte(date_key(to)));
        }

        select = select
            .order_by_desc(Column::AttendanceDate)
            .order_by_desc(Column::Id);

        self.paginate(select, query.page, query.size, "考勤记录", |m| {
            m.into_attendance()
        })
        .await
    }

    pub async fn list_all_attendances_impl(&self) -> Result<Vec<Attendance>> {
        let records = Attendances::find()
            .all(&self.db)
            .await
            .map_err(|e| map_db_err("查询考勤记录失败", e))?;

        Ok(records.into_iter().map(|m| m.into_attendance()).collect())
    }

    pub async fn list_session_attendances_impl(&self, session_id: i64) -> Result<Vec<Attendance>> {
        let records = Attendances::find()
            .filter(Column::SessionId.eq(session_id))
            .order_by_asc(Column::CheckedInAt)
            .all(&self.db)
            .await
            .map_err(|e| map_db_err("查询签到记录失败", e))?;

        Ok(records.into_iter().map(|m| m.into_attendance()).collect())
    }

    pub async fn update_attendance_impl(
        &self,
        id: i64,
        update: UpdateAttendanceRequest,
    ) -> Result<Option<Attendance>> {
        let Some(existing) = Attendances::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| map_db_err("查询考勤记录失败", e))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }
        if let Some(date) = update.attendance_date {
            model.attendance_date = Set(date_key(date));
        }
        if let Some(note) = update.note {
            model.note = Set(Some(note));
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| map_db_err("更新考勤记录失败", e))?;

        Ok(Some(updated.into_attendance()))
    }

    pub async fn delete_attendance_impl(&self, id: i64) -> Result<bool> {
        let result = Attendances::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| map_db_err("删除考勤记录失败", e))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_key_sorts_lexicographically() {
        let a = chrono::NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        let b = chrono::NaiveDate::from_ymd_opt(2025, 10, 1).unwrap();
        assert_eq!(date_key(a), "2025-03-09");
        assert!(date_key(a) < date_key(b));
    }
}
