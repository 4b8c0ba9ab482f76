//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。

pub mod prelude;

pub mod assignments;
pub mod attendances;
pub mod courses;
pub mod departments;
pub mod group_members;
pub mod groups;
pub mod library_resources;
pub mod qr_code_sessions;
pub mod roles;
pub mod student_assignments;
pub mod users;

use chrono::{DateTime, Utc};
use std::fmt::Display;
use std::str::FromStr;
use tracing::warn;

// 数据库中时间统一存 Unix 秒
pub(crate) fn ts_to_datetime(ts: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()
}

/// 解析字符串列，无法识别时记录警告并使用回退值
pub(crate) fn parse_column<T>(column: &str, raw: &str, fallback: T) -> T
where
    T: FromStr + std::fmt::Debug,
    T::Err: Display,
{
    match raw.parse::<T>() {
        Ok(value) => value,
        Err(e) => {
            warn!(
                "Unrecognized value {:?} in column {}: {}, using {:?}",
                raw, column, e, fallback
            );
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::attendances::entities::AttendanceStatus;
    use chrono::NaiveDate;

    #[test]
    fn test_parse_column_known_value() {
        assert_eq!(
            parse_column("attendances.status", "late", AttendanceStatus::Absent),
            AttendanceStatus::Late
        );
        assert_eq!(
            parse_column("attendances.attendance_date", "2025-03-01", NaiveDate::default()),
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
        );
    }

    #[test]
    fn test_parse_column_falls_back_on_garbage() {
        assert_eq!(
            parse_column("attendances.status", "teleported", AttendanceStatus::Absent),
            AttendanceStatus::Absent
        );
        assert_eq!(
            parse_column("attendances.attendance_date", "03/01/2025", NaiveDate::default()),
            NaiveDate::default()
        );
    }
}
