pub mod assignments;
pub mod attendances;
pub mod auth;
pub mod common;
pub mod courses;
pub mod dashboard;
pub mod departments;
pub mod groups;
pub mod library;
pub mod qr_sessions;
pub mod users;

pub use common::{ApiResponse, ErrorCode, PaginatedResponse, PaginationInfo, PaginationQuery};

