use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 出勤状态
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub enum AttendanceStatus {
    Present, // 出勤
    Late,    // 迟到
    Absent,  // 缺勤
    Excused, // 请假
}

impl<'de> Deserialize<'de> for AttendanceStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<AttendanceStatus>().map_err(|_| {
            serde::de::Error::custom(format!(
                "Invalid attendance status: '{s}'. Supported statuses: present, late, absent, excused"
            ))
        })
    }
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttendanceStatus::Present => write!(f, "present"),
            AttendanceStatus::Late => write!(f, "late"),
            AttendanceStatus::Absent => write!(f, "absent"),
            AttendanceStatus::Excused => write!(f, "excused"),
        }
    }
}

impl std::str::FromStr for AttendanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "present" => Ok(AttendanceStatus::Present),
            "late" => Ok(AttendanceStatus::Late),
            "absent" => Ok(AttendanceStatus::Absent),
            "excused" => Ok(AttendanceStatus::Excused),
            _ => Err(format!("Invalid attendance status: {s}")),
        }
    }
}

// 记录方式
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub enum AttendanceMethod {
    Manual, // 教师录入
    Qr,     // 扫码签到
}

impl std::fmt::Display for AttendanceMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttendanceMethod::Manual => write!(f, "manual"),
            AttendanceMethod::Qr => write!(f, "qr"),
        }
    }
}

impl std::str::FromStr for AttendanceMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manual" => Ok(AttendanceMethod::Manual),
            "qr" => Ok(AttendanceMethod::Qr),
            _ => Err(format!("Invalid attendance method: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct Attendance {
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    // 会话删除后置空
    pub session_id: Option<i64>,
    pub attendance_date: chrono::NaiveDate,
    pub status: AttendanceStatus,
    pub method: AttendanceMethod,
    pub recorded_by: Option<i64>,
    pub checked_in_at: Option<chrono::DateTime<chrono::Utc>>,
    pub note: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse() {
        assert_eq!(
            "excused".parse::<AttendanceStatus>(),
            Ok(AttendanceStatus::Excused)
        );
        assert!(serde_json::from_str::<AttendanceStatus>("\"missing\"").is_err());
    }

    #[test]
    fn test_method_serialize() {
        assert_eq!(
            serde_json::to_string(&AttendanceMethod::Qr).unwrap(),
            "\"qr\""
        );
        assert_eq!("manual".parse(), Ok(AttendanceMethod::Manual));
    }
}
