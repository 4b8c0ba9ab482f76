use std::sync::Arc;

use crate::models::{
    PaginatedResponse,
    assignments::{
        entities::{Assignment, StudentAssignment},
        requests::{
            AssignmentListQuery, CreateAssignmentRequest, StudentAssignmentListQuery,
            UpdateAssignmentRequest,
        },
    },
    attendances::{
        entities::Attendance,
        requests::{AttendanceListQuery, NewAttendance, UpdateAttendanceRequest},
    },
    courses::{
        entities::Course,
        requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest},
    },
    departments::{
        entities::Department,
        requests::{CreateDepartmentRequest, DepartmentListQuery, UpdateDepartmentRequest},
    },
    groups::{
        entities::{Group, GroupMember, GroupMemberDetail},
        requests::{CreateGroupRequest, GroupListQuery, UpdateGroupRequest},
    },
    library::{
        entities::LibraryResource,
        requests::{
            CreateLibraryResourceRequest, LibraryResourceListQuery, UpdateLibraryResourceRequest,
        },
    },
    qr_sessions::{entities::QrCodeSession, requests::QrSessionListQuery},
    users::{
        entities::{Role, User},
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 角色
    // 写入固定角色（幂等）
    async fn ensure_roles(&self) -> Result<()>;
    async fn list_roles(&self) -> Result<Vec<Role>>;

    /// 用户管理方法
    // 创建用户，password 字段为已哈希的密码
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    async fn list_users_with_pagination(
        &self,
        query: UserListQuery,
    ) -> Result<PaginatedResponse<User>>;
    async fn list_all_users(&self) -> Result<Vec<User>>;
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    async fn delete_user(&self, id: i64) -> Result<bool>;
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    async fn count_users(&self) -> Result<u64>;

    /// 院系
    async fn create_department(&self, req: CreateDepartmentRequest) -> Result<Department>;
    async fn get_department_by_id(&self, id: i64) -> Result<Option<Department>>;
    async fn list_departments_with_pagination(
        &self,
        query: DepartmentListQuery,
    ) -> Result<PaginatedResponse<Department>>;
    async fn list_all_departments(&self) -> Result<Vec<Department>>;
    async fn update_department(
        &self,
        id: i64,
        update: UpdateDepartmentRequest,
    ) -> Result<Option<Department>>;
    async fn delete_department(&self, id: i64) -> Result<bool>;

    /// 课程
    async fn create_course(&self, req: CreateCourseRequest) -> Result<Course>;
    async fn get_course_by_id(&self, id: i64) -> Result<Option<Course>>;
    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<PaginatedResponse<Course>>;
    async fn list_all_courses(&self) -> Result<Vec<Course>>;
    async fn update_course(&self, id: i64, update: UpdateCourseRequest)
    -> Result<Option<Course>>;
    async fn delete_course(&self, id: i64) -> Result<bool>;
    // 课程花名册：挂在该课程下的分组中的学生
    async fn list_course_roster(&self, course_id: i64) -> Result<Vec<User>>;

    /// 分组与成员
    async fn create_group(&self, req: CreateGroupRequest) -> Result<Group>;
    async fn get_group_by_id(&self, id: i64) -> Result<Option<Group>>;
    async fn list_groups_with_pagination(
        &self,
        query: GroupListQuery,
    ) -> Result<PaginatedResponse<Group>>;
    async fn list_all_groups(&self) -> Result<Vec<Group>>;
    async fn update_group(&self, id: i64, update: UpdateGroupRequest) -> Result<Option<Group>>;
    async fn delete_group(&self, id: i64) -> Result<bool>;
    async fn add_group_member(&self, group_id: i64, user_id: i64) -> Result<GroupMember>;
    async fn remove_group_member(&self, group_id: i64, user_id: i64) -> Result<bool>;
    async fn list_group_members(&self, group_id: i64) -> Result<Vec<GroupMemberDetail>>;
    async fn list_all_group_members(&self) -> Result<Vec<GroupMember>>;

    /// 作业
    async fn create_assignment(
        &self,
        created_by: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment>;
    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>>;
    async fn list_assignments_with_pagination(
        &self,
        query: AssignmentListQuery,
    ) -> Result<PaginatedResponse<Assignment>>;
    async fn list_all_assignments(&self) -> Result<Vec<Assignment>>;
    async fn update_assignment(
        &self,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>>;
    async fn delete_assignment(&self, id: i64) -> Result<bool>;

    /// 学生作业提交
    async fn get_student_assignment_by_id(&self, id: i64) -> Result<Option<StudentAssignment>>;
    async fn get_student_assignment(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<StudentAssignment>>;
    // 提交或覆盖未批改的提交
    async fn upsert_student_assignment(
        &self,
        assignment_id: i64,
        student_id: i64,
        content: Option<String>,
    ) -> Result<StudentAssignment>;
    async fn grade_student_assignment(
        &self,
        id: i64,
        grader_id: i64,
        score: f64,
        feedback: Option<String>,
    ) -> Result<Option<StudentAssignment>>;
    async fn list_student_assignments_with_pagination(
        &self,
        query: StudentAssignmentListQuery,
    ) -> Result<PaginatedResponse<StudentAssignment>>;
    async fn list_all_student_assignments(&self) -> Result<Vec<StudentAssignment>>;

    /// 考勤
    async fn create_attendance(&self, record: NewAttendance) -> Result<Attendance>;
    async fn get_attendance_by_id(&self, id: i64) -> Result<Option<Attendance>>;
    async fn list_attendances_with_pagination(
        &self,
        query: AttendanceListQuery,
    ) -> Result<PaginatedResponse<Attendance>>;
    async fn list_all_attendances(&self) -> Result<Vec<Attendance>>;
    async fn list_session_attendances(&self, session_id: i64) -> Result<Vec<Attendance>>;
    async fn update_attendance(
        &self,
        id: i64,
        update: UpdateAttendanceRequest,
    ) -> Result<Option<Attendance>>;
    async fn delete_attendance(&self, id: i64) -> Result<bool>;

    /// 扫码签到会话
    async fn create_qr_session(
        &self,
        course_id: i64,
        created_by: i64,
        code: &str,
        expires_at: chrono::DateTime<chrono::Utc>,
    ) -> Result<QrCodeSession>;
    async fn get_qr_session_by_id(&self, id: i64) -> Result<Option<QrCodeSession>>;
    async fn get_qr_session_by_code(&self, code: &str) -> Result<Option<QrCodeSession>>;
    async fn list_qr_sessions_with_pagination(
        &self,
        query: QrSessionListQuery,
    ) -> Result<PaginatedResponse<QrCodeSession>>;
    async fn list_all_qr_sessions(&self) -> Result<Vec<QrCodeSession>>;
    async fn close_qr_session(&self, id: i64) -> Result<Option<QrCodeSession>>;
    async fn delete_qr_session(&self, id: i64) -> Result<bool>;

    /// 图书馆资源
    async fn create_library_resource(
        &self,
        created_by: i64,
        req: CreateLibraryResourceRequest,
    ) -> Result<LibraryResource>;
    async fn get_library_resource_by_id(&self, id: i64) -> Result<Option<LibraryResource>>;
    async fn list_library_resources_with_pagination(
        &self,
        query: LibraryResourceListQuery,
    ) -> Result<PaginatedResponse<LibraryResource>>;
    async fn update_library_resource(
        &self,
        id: i64,
        update: UpdateLibraryResourceRequest,
    ) -> Result<Option<LibraryResource>>;
    async fn delete_library_resource(&self, id: i64) -> Result<bool>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
