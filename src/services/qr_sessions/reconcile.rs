use std::collections::{HashMap, HashSet};

use crate::models::attendances::entities::Attendance;
use crate::models::qr_sessions::responses::{CheckedInStudent, PendingStudent};
use crate::models::users::entities::User;

/// 将会话的签到记录与花名册对账
///
/// `directory` 提供签到记录中学生的用户信息（花名册以外的学生也可能已签到，
/// 例如签到后被移出分组）。已签到按签到时间排序，未签到保持花名册顺序。
pub fn reconcile(
    roster: &[User],
    attendances: &[Attendance],
    directory: &HashMap<i64, User>,
) -> (Vec<CheckedInStudent>, Vec<PendingStudent>) {
    let mut checked_in: Vec<CheckedInStudent> = attendances
        .iter()
        .map(|attendance| {
            let student = directory.get(&attendance.student_id);
            CheckedInStudent {
                attendance_id: attendance.id,
                student_id: attendance.student_id,
                username: student.map(|u| u.username.clone()).unwrap_or_default(),
                display_name: student.and_then(|u| u.display_name.clone()),
                status: attendance.status,
                checked_in_at: attendance.checked_in_at,
            }
        })
        .collect();
    checked_in.sort_by_key(|s| (s.checked_in_at, s.attendance_id));

    let seen: HashSet<i64> = attendances.iter().map(|a| a.student_id).collect();
    let pending = roster
        .iter()
        .filter(|student| !seen.contains(&student.id))
        .map(|student| PendingStudent {
            student_id: student.id,
            username: student.username.clone(),
            display_name: student.display_name.clone(),
        })
        .collect();

    (checked_in, pending)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::attendances::entities::{AttendanceMethod, AttendanceStatus};
    use crate::models::users::entities::{UserRole, UserStatus};
    use chrono::{Duration, NaiveDate, Utc};

    fn student(id: i64, name: &str) -> User {
        let now = Utc::now();
        User {
            id,
            username: name.into(),
            email: format!("{name}@campus.edu"),
            password_hash: String::new(),
            role: UserRole::Student,
            status: UserStatus::Active,
            display_name: Some(name.to_uppercase()),
            phone: None,
            department_id: None,
            last_login: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn check_in(id: i64, student_id: i64, offset_secs: i64) -> Attendance {
        let now = Utc::now();
        Attendance {
            id,
            student_id,
            course_id: 1,
            session_id: Some(9),
            attendance_date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            status: AttendanceStatus::Present,
            method: AttendanceMethod::Qr,
            recorded_by: None,
            checked_in_at: Some(now + Duration::seconds(offset_secs)),
            note: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn directory(users: &[User]) -> HashMap<i64, User> {
        users.iter().map(|u| (u.id, u.clone())).collect()
    }

    #[test]
    fn test_reconcile_splits_roster() {
        let roster = vec![student(1, "ann"), student(2, "ben"), student(3, "cat")];
        let attendances = vec![check_in(20, 3, 5), check_in(21, 1, 1)];

        let (checked_in, pending) = reconcile(&roster, &attendances, &directory(&roster));

        let ids: Vec<i64> = checked_in.iter().map(|s| s.student_id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(checked_in[0].username, "ann");
        assert_eq!(checked_in[0].display_name.as_deref(), Some("ANN"));
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].student_id, 2);
    }

    #[test]
    fn test_reconcile_empty_session() {
        let roster = vec![student(1, "ann"), student(2, "ben")];
        let (checked_in, pending) = reconcile(&roster, &[], &directory(&roster));
        assert!(checked_in.is_empty());
        let ids: Vec<i64> = pending.iter().map(|s| s.student_id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_reconcile_keeps_off_roster_checkins() {
        let roster = vec![student(1, "ann")];
        let former = student(5, "eve");
        let mut users = roster.clone();
        users.push(former);
        let attendances = vec![check_in(30, 5, 0)];

        let (checked_in, pending) = reconcile(&roster, &attendances, &directory(&users));
        assert_eq!(checked_in.len(), 1);
        assert_eq!(checked_in[0].username, "eve");
        assert_eq!(pending.len(), 1);
    }
}
