//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod assignments;
mod attendances;
mod courses;
mod departments;
mod groups;
mod library;
mod qr_sessions;
mod roles;
mod users;

use crate::config::AppConfig;
use crate::errors::{PortalError, Result};
use crate::models::{PaginatedResponse, PaginationInfo, PaginationQuery};
use migration::{Migrator, MigratorTrait};
use sea_orm::{
    ConnectOptions, Database, DatabaseConnection, DbErr, EntityTrait,
    FromQueryResult, PaginatorTrait, Select, SqlErr,
};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 使用全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Self::connect(&config.database.url).await
    }

    /// 连接指定数据库并运行迁移
    pub async fn connect(url: &str) -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| PortalError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| PortalError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| PortalError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(2)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .sqlx_logging(false);

        Database::connect(opt)
            .await
            .map_err(|e| PortalError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") || url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(PortalError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }

    /// 分页取出一页并转换为业务实体
    pub(crate) async fn paginate<E, T, F>(
        &self,
        select: Select<E>,
        page: Option<i64>,
        size: Option<i64>,
        what: &str,
        convert: F,
    ) -> Result<PaginatedResponse<T>>
    where
        E: EntityTrait,
        E::Model: FromQueryResult + Sized + Send + Sync + 'static,
        T: ts_rs::TS,
        F: Fn(E::Model) -> T,
    {
        let (page, size) = PaginationQuery::normalized(page, size);

        let paginator = select.paginate(&self.db, size);
        let totals = paginator
            .num_items_and_pages()
            .await
            .map_err(|e| map_db_err(&format!("查询{what}总数失败"), e))?;

        let models = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| map_db_err(&format!("查询{what}列表失败"), e))?;

        Ok(PaginatedResponse {
            items: models.into_iter().map(convert).collect(),
            pagination: PaginationInfo::new(
                page,
                size,
                totals.number_of_items,
                totals.number_of_pages,
            ),
        })
    }
}

/// 将数据库错误映射为业务错误：唯一约束冲突 → Conflict，外键约束 → Validation
pub(crate) fn map_db_err(context: &str, err: DbErr) -> PortalError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => {
            PortalError::conflict(format!("{context}: 记录已存在 ({msg})"))
        }
        Some(SqlErr::ForeignKeyConstraintViolation(msg)) => {
            PortalError::validation(format!("{context}: 关联记录不存在 ({msg})"))
        }
        _ => PortalError::database_operation(format!("{context}: {err}")),
    }
}

// Storage trait 实现
use crate::models::{
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 角色模块
    async fn ensure_roles(&self) -> Result<()> {
        self.ensure_roles_impl().await
    }

    async fn list_roles(&self) -> Result<Vec<Role>> {
        self.list_roles_impl().await
    }

    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn list_users_with_pagination(
        &self,
        query: UserListQuery,
    ) -> Result<PaginatedResponse<User>> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn list_all_users(&self) -> Result<Vec<User>> {
        self.list_all_users_impl().await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // 院系模块
    async fn create_department(&self, req: CreateDepartmentRequest) -> Result<Department> {
        self.create_department_impl(req).await
    }

    async fn get_department_by_id(&self, id: i64) -> Result<Option<Department>> {
        self.get_department_by_id_impl(id).await
    }

    async fn list_departments_with_pagination(
        &self,
        query: DepartmentListQuery,
    ) -> Result<PaginatedResponse<Department>> {
        self.list_departments_with_pagination_impl(query).await
    }

    async fn list_all_departments(&self) -> Result<Vec<Department>> {
        self.list_all_departments_impl().await
    }

    async fn update_department(
        &self,
        id: i64,
        update: UpdateDepartmentRequest,
    ) -> Result<Option<Department>> {
        self.update_department_impl(id, update).await
    }

    async fn delete_department(&self, id: i64) -> Result<bool> {
        self.delete_department_impl(id).await
    }

    // 课程模块
    async fn create_course(&self, req: CreateCourseRequest) -> Result<Course> {
        self.create_course_impl(req).await
    }

    async fn get_course_by_id(&self, id: i64) -> Result<Option<Course>> {
        self.get_course_by_id_impl(id).await
    }

    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<PaginatedResponse<Course>> {
        self.list_courses_with_pagination_impl(query).await
    }

    async fn list_all_courses(&self) -> Result<Vec<Course>> {
        self.list_all_courses_impl().await
    }

    async fn update_course(
        &self,
        id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        self.update_course_impl(id, update).await
    }

    async fn delete_course(&self, id: i64) -> Result<bool> {
        self.delete_course_impl(id).await
    }

    async fn list_course_roster(&self, course_id: i64) -> Result<Vec<User>> {
        self.list_course_roster_impl(course_id).await
    }

    // 分组模块
    async fn create_group(&self, req: CreateGroupRequest) -> Result<Group> {
        self.create_group_impl(req).await
    }

    async fn get_group_by_id(&self, id: i64) -> Result<Option<Group>> {
        self.get_group_by_id_impl(id).await
    }

    async fn list_groups_with_pagination(
        &self,
        query: GroupListQuery,
    ) -> Result<PaginatedResponse<Group>> {
        self.list_groups_with_pagination_impl(query).await
    }

    async fn list_all_groups(&self) -> Result<Vec<Group>> {
        self.list_all_groups_impl().await
    }

    async fn update_group(&self, id: i64, update: UpdateGroupRequest) -> Result<Option<Group>> {
        self.update_group_impl(id, update).await
    }

    async fn delete_group(&self, id: i64) -> Result<bool> {
        self.delete_group_impl(id).await
    }

    async fn add_group_member(&self, group_id: i64, user_id: i64) -> Result<GroupMember> {
        self.add_group_member_impl(group_id, user_id).await
    }

    async fn remove_group_member(&self, group_id: i64, user_id: i64) -> Result<bool> {
        self.remove_group_member_impl(group_id, user_id).await
    }

    async fn list_group_members(&self, group_id: i64) -> Result<Vec<GroupMemberDetail>> {
        self.list_group_members_impl(group_id).await
    }

    async fn list_all_group_members(&self) -> Result<Vec<GroupMember>> {
        self.list_all_group_members_impl().await
    }

    // 作业模块
    async fn create_assignment(
        &self,
        created_by: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        self.create_assignment_impl(created_by, req).await
    }

    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_by_id_impl(id).await
    }

    async fn list_assignments_with_pagination(
        &self,
        query: AssignmentListQuery,
    ) -> Result<PaginatedResponse<Assignment>> {
        self.list_assignments_with_pagination_impl(query).await
    }

    async fn list_all_assignments(&self) -> Result<Vec<Assignment>> {
        self.list_all_assignments_impl().await
    }

    async fn update_assignment(
        &self,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        self.update_assignment_impl(id, update).await
    }

    async fn delete_assignment(&self, id: i64) -> Result<bool> {
        self.delete_assignment_impl(id).await
    }

    // 学生作业模块
    async fn get_student_assignment_by_id(&self, id: i64) -> Result<Option<StudentAssignment>> {
        self.get_student_assignment_by_id_impl(id).await
    }

    async fn get_student_assignment(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<StudentAssignment>> {
        self.get_student_assignment_impl(assignment_id, student_id)
            .await
    }

    async fn upsert_student_assignment(
        &self,
        assignment_id: i64,
        student_id: i64,
        content: Option<String>,
    ) -> Result<StudentAssignment> {
        self.upsert_student_assignment_impl(assignment_id, student_id, content)
            .await
    }

    async fn grade_student_assignment(
        &self,
        id: i64,
        grader_id: i64,
        score: f64,
        feedback: Option<String>,
    ) -> Result<Option<StudentAssignment>> {
        self.grade_student_assignment_impl(id, grader_id, score, feedback)
            .await
    }

    async fn list_student_assignments_with_pagination(
        &self,
        query: StudentAssignmentListQuery,
    ) -> Result<PaginatedResponse<StudentAssignment>> {
        self.list_student_assignments_with_pagination_impl(query)
            .await
    }

    async fn list_all_student_assignments(&self) -> Result<Vec<StudentAssignment>> {
        self.list_all_student_assignments_impl().await
    }

    // 考勤模块
    async fn create_attendance(&self, record: NewAttendance) -> Result<Attendance> {
        self.create_attendance_impl(record).await
    }

    async fn get_attendance_by_id(&self, id: i64) -> Result<Option<Attendance>> {
        self.get_attendance_by_id_impl(id).await
    }

    async fn list_attendances_with_pagination(
        &self,
        query: AttendanceListQuery,
    ) -> Result<PaginatedResponse<Attendance>> {
        self.list_attendances_with_pagination_impl(query).await
    }

    async fn list_all_attendances(&self) -> Result<Vec<Attendance>> {
        self.list_all_attendances_impl().await
    }

    async fn list_session_attendances(&self, session_id: i64) -> Result<Vec<Attendance>> {
        self.list_session_attendances_impl(session_id).await
    }

    async fn update_attendance(
        &self,
        id: i64,
        update: UpdateAttendanceRequest,
    ) -> Result<Option<Attendance>> {
        self.update_attendance_impl(id, update).await
    }

    async fn delete_attendance(&self, id: i64) -> Result<bool> {
        self.delete_attendance_impl(id).await
    }

    // 扫码签到模块
    async fn create_qr_session(
        &self,
        course_id: i64,
        created_by: i64,
        code: &str,
        expires_at: chrono::DateTime<chrono::Utc>,
    ) -> Result<QrCodeSession> {
        self.create_qr_session_impl(course_id, created_by, code, expires_at)
            .await
    }

    async fn get_qr_session_by_id(&self, id: i64) -> Result<Option<QrCodeSession>> {
        self.get_qr_session_by_id_impl(id).await
    }

    async fn get_qr_session_by_code(&self, code: &str) -> Result<Option<QrCodeSession>> {
        self.get_qr_session_by_code_impl(code).await
    }

    async fn list_qr_sessions_with_pagination(
        &self,
        query: QrSessionListQuery,
    ) -> Result<PaginatedResponse<QrCodeSession>> {
        self.list_qr_sessions_with_pagination_impl(query).await
    }

    async fn list_all_qr_sessions(&self) -> Result<Vec<QrCodeSession>> {
        self.list_all_qr_sessions_impl().await
    }

    async fn close_qr_session(&self, id: i64) -> Result<Option<QrCodeSession>> {
        self.close_qr_session_impl(id).await
    }

    async fn delete_qr_session(&self, id: i64) -> Result<bool> {
        self.delete_qr_session_impl(id).await
    }

    // 图书馆模块
    async fn create_library_resource(
        &self,
        created_by: i64,
        req: CreateLibraryResourceRequest,
    ) -> Result<LibraryResource> {
        self.create_library_resource_impl(created_by, req).await
    }

    async fn get_library_resource_by_id(&self, id: i64) -> Result<Option<LibraryResource>> {
        self.get_library_resource_by_id_impl(id).await
    }

    async fn list_library_resources_with_pagination(
        &self,
        query: LibraryResourceListQuery,
    ) -> Result<PaginatedResponse<LibraryResource>> {
        self.list_library_resources_with_pagination_impl(query)
            .await
    }

    async fn update_library_resource(
        &self,
        id: i64,
        update: UpdateLibraryResourceRequest,
    ) -> Result<Option<LibraryResource>> {
        self.update_library_resource_impl(id, update).await
    }

    async fn delete_library_resource(&self, id: i64) -> Result<bool> {
        self.delete_library_resource_impl(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url("campus.db").unwrap(),
            "sqlite://campus.db?mode=rwc"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("postgres://u:p@localhost/campus").unwrap(),
            "postgres://u:p@localhost/campus"
        );
        assert!(SeaOrmStorage::build_database_url("ftp://nowhere").is_err());
    }

    #[test]
    fn test_map_db_err_fallback() {
        let err = map_db_err("查询失败", DbErr::Custom("boom".into()));
        assert_eq!(err.code(), "E005");
        assert!(err.message().contains("boom"));
    }
}
