//! 仪表盘统计：在已加载的列表上做过滤和归约

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};

use crate::models::assignments::entities::{Assignment, StudentAssignment, SubmissionStatus};
use crate::models::attendances::entities::{Attendance, AttendanceStatus};
use crate::models::courses::entities::Course;
use crate::models::dashboard::responses::{
    AdminStats, AttendanceSummary, DepartmentCourseCount, FacultyStats, HrStats, RoleCount,
    StudentStats, TeacherStats,
};
use crate::models::departments::entities::Department;
use crate::models::groups::entities::{Group, GroupMember};
use crate::models::qr_sessions::entities::QrCodeSession;
use crate::models::users::entities::{User, UserRole};

/// 已加载的数据快照，各角色只填充需要的部分
#[derive(Debug, Default)]
pub struct Snapshot {
    pub users: Vec<User>,
    pub departments: Vec<Department>,
    pub courses: Vec<Course>,
    pub groups: Vec<Group>,
    pub members: Vec<GroupMember>,
    pub assignments: Vec<Assignment>,
    pub submissions: Vec<StudentAssignment>,
    pub attendances: Vec<Attendance>,
    pub sessions: Vec<QrCodeSession>,
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

pub fn summarize_attendance<'a>(records: impl IntoIterator<Item = &'a Attendance>) -> AttendanceSummary {
    let mut summary = records
        .into_iter()
        .fold(AttendanceSummary::default(), |mut acc, record| {
            acc.total += 1;
            match record.status {
                AttendanceStatus::Present => acc.present += 1,
                AttendanceStatus::Late => acc.late += 1,
                AttendanceStatus::Absent => acc.absent += 1,
                AttendanceStatus::Excused => acc.excused += 1,
            }
            acc
        });
    if summary.total > 0 {
        summary.attendance_rate =
            round4((summary.present + summary.late) as f64 / summary.total as f64);
    }
    summary
}

pub fn count_by_role(users: &[User], roles: &[&UserRole]) -> Vec<RoleCount> {
    roles
        .iter()
        .map(|role| RoleCount {
            role: (*role).clone(),
            count: users.iter().filter(|u| &u.role == *role).count() as i64,
        })
        .collect()
}

fn active_sessions<'a>(
    sessions: impl IntoIterator<Item = &'a QrCodeSession>,
    now: DateTime<Utc>,
) -> i64 {
    sessions
        .into_iter()
        .filter(|s| !s.is_expired(now))
        .count() as i64
}

pub fn admin_stats(data: &Snapshot, now: DateTime<Utc>) -> AdminStats {
    AdminStats {
        total_users: data.users.len() as i64,
        users_by_role: count_by_role(&data.users, UserRole::all_roles()),
        departments: data.departments.len() as i64,
        courses: data.courses.len() as i64,
        groups: data.groups.len() as i64,
        active_qr_sessions: active_sessions(&data.sessions, now),
        attendance: summarize_attendance(&data.attendances),
    }
}

pub fn faculty_stats(data: &Snapshot) -> FacultyStats {
    let courses_per_department = data
        .departments
        .iter()
        .map(|department| DepartmentCourseCount {
            department_id: department.id,
            department_name: department.name.clone(),
            course_count: data
                .courses
                .iter()
                .filter(|c| c.department_id == department.id)
                .count() as i64,
        })
        .collect();

    FacultyStats {
        departments: data.departments.len() as i64,
        courses: data.courses.len() as i64,
        courses_per_department,
        teachers: data.users.iter().filter(|u| u.role == UserRole::Teacher).count() as i64,
        students: data.users.iter().filter(|u| u.role == UserRole::Student).count() as i64,
        attendance: summarize_attendance(&data.attendances),
    }
}

pub fn hr_stats(data: &Snapshot, now: DateTime<Utc>, recent_days: i64) -> HrStats {
    let staff: Vec<User> = data
        .users
        .iter()
        .filter(|u| u.role.is_staff())
        .cloned()
        .collect();
    let since = now - Duration::days(recent_days);
    let active_users = data.users.iter().filter(|u| u.is_active()).count() as i64;

    HrStats {
        total_staff: staff.len() as i64,
        staff_by_role: count_by_role(&staff, UserRole::staff_roles()),
        active_users,
        inactive_users: data.users.len() as i64 - active_users,
        recent_users: data.users.iter().filter(|u| u.created_at >= since).count() as i64,
        recent_days,
    }
}

pub fn teacher_stats(data: &Snapshot, teacher_id: i64, now: DateTime<Utc>) -> TeacherStats {
    let course_ids: HashSet<i64> = data
        .courses
        .iter()
        .filter(|c| c.teacher_id == Some(teacher_id))
        .map(|c| c.id)
        .collect();
    let group_ids: HashSet<i64> = data
        .groups
        .iter()
        .filter(|g| g.course_id.is_some_and(|id| course_ids.contains(&id)))
        .map(|g| g.id)
        .collect();
    let student_ids: HashSet<i64> = data
        .users
        .iter()
        .filter(|u| u.role == UserRole::Student)
        .map(|u| u.id)
        .collect();
    let students: HashSet<i64> = data
        .members
        .iter()
        .filter(|m| group_ids.contains(&m.group_id) && student_ids.contains(&m.user_id))
        .map(|m| m.user_id)
        .collect();
    let assignment_ids: HashSet<i64> = data
        .assignments
        .iter()
        .filter(|a| course_ids.contains(&a.course_id))
        .map(|a| a.id)
        .collect();

    TeacherStats {
        courses: course_ids.len() as i64,
        groups: group_ids.len() as i64,
        students: students.len() as i64,
        pending_grading: data
            .submissions
            .iter()
            .filter(|s| {
                s.status == SubmissionStatus::Submitted && assignment_ids.contains(&s.assignment_id)
            })
            .count() as i64,
        active_qr_sessions: active_sessions(
            data.sessions
                .iter()
                .filter(|s| course_ids.contains(&s.course_id)),
            now,
        ),
        attendance: summarize_attendance(
            data.attendances
                .iter()
                .filter(|a| course_ids.contains(&a.course_id)),
        ),
    }
}

pub fn student_stats(data: &Snapshot, student_id: i64) -> StudentStats {
    let group_ids: HashSet<i64> = data
        .members
        .iter()
        .filter(|m| m.user_id == student_id)
        .map(|m| m.group_id)
        .collect();
    let course_ids: HashSet<i64> = data
        .groups
        .iter()
        .filter(|g| group_ids.contains(&g.id))
        .filter_map(|g| g.course_id)
        .collect();
    let own: Vec<&StudentAssignment> = data
        .submissions
        .iter()
        .filter(|s| s.student_id == student_id)
        .collect();
    let submitted: HashSet<i64> = own.iter().map(|s| s.assignment_id).collect();

    let pending_assignments = data
        .assignments
        .iter()
        .filter(|a| course_ids.contains(&a.course_id) && !submitted.contains(&a.id))
        .count() as i64;

    let percents: Vec<f64> = own
        .iter()
        .filter(|s| s.status == SubmissionStatus::Graded)
        .filter_map(|s| {
            let score = s.score?;
            let max = data
                .assignments
                .iter()
                .find(|a| a.id == s.assignment_id)?
                .max_score;
            (max > 0.0).then(|| score / max * 100.0)
        })
        .collect();
    let average_score_percent = (!percents.is_empty())
        .then(|| round4(percents.iter().sum::<f64>() / percents.len() as f64));

    StudentStats {
        enrolled_courses: course_ids.len() as i64,
        pending_assignments,
        graded_submissions: own
            .iter()
            .filter(|s| s.status == SubmissionStatus::Graded)
            .count() as i64,
        average_score_percent,
        attendance: summarize_attendance(
            data.attendances
                .iter()
                .filter(|a| a.student_id == student_id),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::attendances::entities::AttendanceMethod;
    use crate::models::users::entities::UserStatus;
    use chrono::NaiveDate;

    fn user(id: i64, role: UserRole, status: UserStatus, age_days: i64) -> User {
        let now = Utc::now();
        User {
            id,
            username: format!("u{id}"),
            email: format!("u{id}@campus.edu"),
            password_hash: String::new(),
            role,
            status,
            display_name: None,
            phone: None,
            department_id: None,
            last_login: None,
            created_at: now - Duration::days(age_days),
            updated_at: now,
        }
    }

    fn attendance(id: i64, student_id: i64, course_id: i64, status: AttendanceStatus) -> Attendance {
        let now = Utc::now();
        Attendance {
            id,
            student_id,
            course_id,
            session_id: None,
            attendance_date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            status,
            method: AttendanceMethod::Manual,
            recorded_by: None,
            checked_in_at: None,
            note: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn course(id: i64, department_id: i64, teacher_id: Option<i64>) -> Course {
        let now = Utc::now();
        Course {
            id,
            department_id,
            teacher_id,
            code: format!("C{id}"),
            name: format!("Course {id}"),
            description: None,
            credits: 3,
            created_at: now,
            updated_at: now,
        }
    }

    fn group(id: i64, course_id: Option<i64>) -> Group {
        let now = Utc::now();
        Group {
            id,
            name: format!("G{id}"),
            course_id,
            department_id: None,
            description: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn member(id: i64, group_id: i64, user_id: i64) -> GroupMember {
        GroupMember {
            id,
            group_id,
            user_id,
            joined_at: Utc::now(),
        }
    }

    fn assignment(id: i64, course_id: i64, max_score: f64) -> Assignment {
        let now = Utc::now();
        Assignment {
            id,
            course_id,
            created_by: 1,
            title: format!("A{id}"),
            description: None,
            max_score,
            due_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn submission(
        id: i64,
        assignment_id: i64,
        student_id: i64,
        score: Option<f64>,
    ) -> StudentAssignment {
        StudentAssignment {
            id,
            assignment_id,
            student_id,
            content: None,
            status: if score.is_some() {
                SubmissionStatus::Graded
            } else {
                SubmissionStatus::Submitted
            },
            score,
            feedback: None,
            is_late: false,
            submitted_at: Utc::now(),
            graded_at: None,
            graded_by: None,
        }
    }

    #[test]
    fn test_attendance_summary_rate() {
        let records = vec![
            attendance(1, 10, 1, AttendanceStatus::Present),
            attendance(2, 10, 1, AttendanceStatus::Late),
            attendance(3, 11, 1, AttendanceStatus::Absent),
        ];
        let summary = summarize_attendance(&records);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.present, 1);
        assert_eq!(summary.late, 1);
        assert_eq!(summary.absent, 1);
        assert_eq!(summary.attendance_rate, 0.6667);
    }

    #[test]
    fn test_attendance_summary_empty() {
        assert_eq!(summarize_attendance(&[]), AttendanceSummary::default());
    }

    #[test]
    fn test_hr_stats() {
        let data = Snapshot {
            users: vec![
                user(1, UserRole::Admin, UserStatus::Active, 400),
                user(2, UserRole::Teacher, UserStatus::Active, 3),
                user(3, UserRole::Teacher, UserStatus::Suspended, 100),
                user(4, UserRole::Student, UserStatus::Inactive, 1),
            ],
            ..Default::default()
        };
        let stats = hr_stats(&data, Utc::now(), 30);
        assert_eq!(stats.total_staff, 3);
        assert_eq!(stats.active_users, 2);
        assert_eq!(stats.inactive_users, 2);
        assert_eq!(stats.recent_users, 2);
        let teachers = stats
            .staff_by_role
            .iter()
            .find(|c| c.role == UserRole::Teacher)
            .unwrap();
        assert_eq!(teachers.count, 2);
        assert!(stats.staff_by_role.iter().all(|c| c.role != UserRole::Student));
    }

    #[test]
    fn test_faculty_courses_per_department() {
        let now = Utc::now();
        let department = |id: i64, name: &str| Department {
            id,
            name: name.into(),
            code: name.to_uppercase(),
            description: None,
            head_id: None,
            created_at: now,
            updated_at: now,
        };
        let data = Snapshot {
            departments: vec![department(1, "cs"), department(2, "math")],
            courses: vec![course(1, 1, None), course(2, 1, None), course(3, 2, None)],
            users: vec![
                user(5, UserRole::Teacher, UserStatus::Active, 0),
                user(6, UserRole::Student, UserStatus::Active, 0),
                user(7, UserRole::Student, UserStatus::Active, 0),
            ],
            ..Default::default()
        };
        let stats = faculty_stats(&data);
        assert_eq!(stats.courses, 3);
        assert_eq!(stats.teachers, 1);
        assert_eq!(stats.students, 2);
        assert_eq!(stats.courses_per_department[0].course_count, 2);
        assert_eq!(stats.courses_per_department[1].course_count, 1);
    }

    #[test]
    fn test_teacher_stats_scope() {
        let now = Utc::now();
        let data = Snapshot {
            users: vec![
                user(2, UserRole::Teacher, UserStatus::Active, 0),
                user(10, UserRole::Student, UserStatus::Active, 0),
                user(11, UserRole::Student, UserStatus::Active, 0),
            ],
            courses: vec![course(1, 1, Some(2)), course(2, 1, Some(99))],
            groups: vec![group(1, Some(1)), group(2, Some(2))],
            // 教师本人也在组里，不计入学生
            members: vec![member(1, 1, 10), member(2, 1, 2), member(3, 2, 11)],
            assignments: vec![assignment(1, 1, 100.0), assignment(2, 2, 100.0)],
            submissions: vec![
                submission(1, 1, 10, None),
                submission(2, 2, 11, None),
            ],
            attendances: vec![
                attendance(1, 10, 1, AttendanceStatus::Present),
                attendance(2, 11, 2, AttendanceStatus::Absent),
            ],
            sessions: vec![QrCodeSession {
                id: 1,
                course_id: 1,
                created_by: 2,
                code: "abc".into(),
                expires_at: now + Duration::seconds(60),
                closed_at: None,
                created_at: now,
            }],
            ..Default::default()
        };
        let stats = teacher_stats(&data, 2, now);
        assert_eq!(stats.courses, 1);
        assert_eq!(stats.groups, 1);
        assert_eq!(stats.students, 1);
        assert_eq!(stats.pending_grading, 1);
        assert_eq!(stats.active_qr_sessions, 1);
        assert_eq!(stats.attendance.total, 1);
        assert_eq!(stats.attendance.attendance_rate, 1.0);
    }

    #[test]
    fn test_student_stats() {
        let data = Snapshot {
            groups: vec![group(1, Some(1)), group(2, Some(2))],
            members: vec![member(1, 1, 10)],
            assignments: vec![
                assignment(1, 1, 50.0),
                assignment(2, 1, 100.0),
                assignment(3, 1, 10.0),
                assignment(4, 2, 100.0),
            ],
            submissions: vec![
                submission(1, 1, 10, Some(40.0)),
                submission(2, 2, 10, Some(60.0)),
                submission(3, 4, 11, Some(100.0)),
            ],
            attendances: vec![
                attendance(1, 10, 1, AttendanceStatus::Late),
                attendance(2, 10, 1, AttendanceStatus::Excused),
            ],
            ..Default::default()
        };
        let stats = student_stats(&data, 10);
        assert_eq!(stats.enrolled_courses, 1);
        assert_eq!(stats.pending_assignments, 1);
        assert_eq!(stats.graded_submissions, 2);
        assert_eq!(stats.average_score_percent, Some(70.0));
        assert_eq!(stats.attendance.total, 2);
        assert_eq!(stats.attendance.attendance_rate, 0.5);
    }

    #[test]
    fn test_student_without_grades() {
        let stats = student_stats(&Snapshot::default(), 1);
        assert_eq!(stats.average_score_percent, None);
        assert_eq!(stats.enrolled_courses, 0);
    }

    #[test]
    fn test_admin_stats_counts_roles() {
        let data = Snapshot {
            users: vec![
                user(1, UserRole::Admin, UserStatus::Active, 0),
                user(2, UserRole::Student, UserStatus::Active, 0),
                user(3, UserRole::Student, UserStatus::Active, 0),
            ],
            ..Default::default()
        };
        let stats = admin_stats(&data, Utc::now());
        assert_eq!(stats.total_users, 3);
        assert_eq!(stats.users_by_role.len(), 5);
        let students = stats
            .users_by_role
            .iter()
            .find(|c| c.role == UserRole::Student)
            .unwrap();
        assert_eq!(students.count, 2);
    }
}
