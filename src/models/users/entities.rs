use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 用户角色
//
// 与 roles 表一一对应，id 固定，启动时写入
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub enum UserRole {
    Admin,   // 管理员
    Faculty, // 院系管理
    Hr,      // 人事
    Teacher, // 教师
    Student, // 学生
}

impl UserRole {
    pub const ADMIN: &'static str = "admin";
    pub const FACULTY: &'static str = "faculty";
    pub const HR: &'static str = "hr";
    pub const TEACHER: &'static str = "teacher";
    pub const STUDENT: &'static str = "student";

    /// 用户管理：管理员、人事
    pub fn management_roles() -> &'static [&'static UserRole] {
        &[&Self::Admin, &Self::Hr]
    }
    /// 教务管理：管理员、院系
    pub fn academic_admin_roles() -> &'static [&'static UserRole] {
        &[&Self::Admin, &Self::Faculty]
    }
    /// 授课相关：管理员、院系、教师
    pub fn instructor_roles() -> &'static [&'static UserRole] {
        &[&Self::Admin, &Self::Faculty, &Self::Teacher]
    }
    /// 全体教职工
    pub fn staff_roles() -> &'static [&'static UserRole] {
        &[&Self::Admin, &Self::Faculty, &Self::Hr, &Self::Teacher]
    }
    pub fn all_roles() -> &'static [&'static UserRole] {
        &[
            &Self::Admin,
            &Self::Faculty,
            &Self::Hr,
            &Self::Teacher,
            &Self::Student,
        ]
    }

    /// roles 表中的主键
    pub fn id(&self) -> i64 {
        match self {
            UserRole::Admin => 1,
            UserRole::Faculty => 2,
            UserRole::Hr => 3,
            UserRole::Teacher => 4,
            UserRole::Student => 5,
        }
    }

    pub fn from_id(id: i64) -> Option<Self> {
        match id {
            1 => Some(UserRole::Admin),
            2 => Some(UserRole::Faculty),
            3 => Some(UserRole::Hr),
            4 => Some(UserRole::Teacher),
            5 => Some(UserRole::Student),
            _ => None,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            UserRole::Admin => "System administrator",
            UserRole::Faculty => "Faculty / department administration",
            UserRole::Hr => "Human resources",
            UserRole::Teacher => "Teaching staff",
            UserRole::Student => "Enrolled student",
        }
    }

    pub fn is_staff(&self) -> bool {
        !matches!(self, UserRole::Student)
    }
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<UserRole>().map_err(|_| {
            serde::de::Error::custom(format!(
                "Invalid user role: '{s}'. Supported roles: admin, faculty, hr, teacher, student"
            ))
        })
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Admin => write!(f, "{}", UserRole::ADMIN),
            UserRole::Faculty => write!(f, "{}", UserRole::FACULTY),
            UserRole::Hr => write!(f, "{}", UserRole::HR),
            UserRole::Teacher => write!(f, "{}", UserRole::TEACHER),
            UserRole::Student => write!(f, "{}", UserRole::STUDENT),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            UserRole::ADMIN => Ok(UserRole::Admin),
            UserRole::FACULTY => Ok(UserRole::Faculty),
            UserRole::HR => Ok(UserRole::Hr),
            UserRole::TEACHER => Ok(UserRole::Teacher),
            UserRole::STUDENT => Ok(UserRole::Student),
            _ => Err(format!("Invalid user role: {s}")),
        }
    }
}

// 用户状态
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub enum UserStatus {
    Active,    // 活跃
    Inactive,  // 非活跃
    Suspended, // 暂停
}

impl<'de> Deserialize<'de> for UserStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<UserStatus>().map_err(|_| {
            serde::de::Error::custom(format!(
                "Invalid user status: '{s}'. Supported statuses: active, inactive, suspended"
            ))
        })
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserStatus::Active => write!(f, "active"),
            UserStatus::Inactive => write!(f, "inactive"),
            UserStatus::Suspended => write!(f, "suspended"),
        }
    }
}

impl std::str::FromStr for UserStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(UserStatus::Active),
            "inactive" => Ok(UserStatus::Inactive),
            "suspended" => Ok(UserStatus::Suspended),
            _ => Err(format!("Invalid user status: {s}")),
        }
    }
}

// 角色
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct Role {
    pub id: i64,
    pub name: UserRole,
    pub description: Option<String>,
}

// 用户实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    #[ts(skip)]
    pub password_hash: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub display_name: Option<String>,
    pub phone: Option<String>,
    pub department_id: Option<i64>,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }

    // 生成 token 对（access + refresh）
    pub fn generate_token_pair(
        &self,
        refresh_token_expiry: Option<chrono::TimeDelta>,
    ) -> Result<crate::utils::jwt::TokenPair, String> {
        crate::utils::jwt::JwtUtils::generate_token_pair(
            self.id,
            &self.role.to_string(),
            refresh_token_expiry,
        )
        .map_err(|e| format!("Failed to generate token pair: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_id_roundtrip() {
        for role in UserRole::all_roles() {
            assert_eq!(UserRole::from_id(role.id()).as_ref(), Some(*role));
        }
        assert_eq!(UserRole::from_id(99), None);
    }

    #[test]
    fn test_role_parse() {
        assert_eq!("hr".parse::<UserRole>(), Ok(UserRole::Hr));
        assert!("root".parse::<UserRole>().is_err());
        let role: UserRole = serde_json::from_str("\"faculty\"").unwrap();
        assert_eq!(role, UserRole::Faculty);
        assert!(serde_json::from_str::<UserRole>("\"superuser\"").is_err());
    }

    #[test]
    fn test_role_groups() {
        assert!(UserRole::instructor_roles().contains(&&UserRole::Teacher));
        assert!(!UserRole::management_roles().contains(&&UserRole::Teacher));
        assert!(!UserRole::Student.is_staff());
        assert!(UserRole::Hr.is_staff());
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let now = chrono::Utc::now();
        let user = User {
            id: 7,
            username: "alice".into(),
            email: "alice@example.com".into(),
            password_hash: "secret-hash".into(),
            role: UserRole::Student,
            status: UserStatus::Active,
            display_name: None,
            phone: None,
            department_id: None,
            last_login: None,
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret-hash"));
        assert!(json.contains("\"role\":\"student\""));
    }
}
