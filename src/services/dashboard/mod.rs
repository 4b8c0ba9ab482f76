pub mod aggregate;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::debug;

use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::ApiResponse;
use crate::models::dashboard::responses::DashboardResponse;
use crate::models::users::entities::{User, UserRole};
use crate::storage::Storage;

use aggregate::Snapshot;

pub struct DashboardService {
    storage: Option<Arc<dyn Storage>>,
}

impl DashboardService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 当前用户角色对应的仪表盘
    pub async fn get_dashboard(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let user = super::current_user(request)?;

        match build_dashboard(storage.as_ref(), &user).await {
            Ok(dashboard) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                dashboard,
                "Dashboard retrieved successfully",
            ))),
            Err(e) => Ok(super::error_response("Failed to build dashboard", e)),
        }
    }
}

async fn build_dashboard(storage: &dyn Storage, user: &User) -> Result<DashboardResponse> {
    let now = chrono::Utc::now();
    debug!("Building {} dashboard for user {}", user.role, user.id);

    let dashboard = match user.role {
        UserRole::Admin => {
            let data = Snapshot {
                users: storage.list_all_users().await?,
                departments: storage.list_all_departments().await?,
                courses: storage.list_all_courses().await?,
                groups: storage.list_all_groups().await?,
                sessions: storage.list_all_qr_sessions().await?,
                attendances: storage.list_all_attendances().await?,
                ..Default::default()
            };
            DashboardResponse::Admin(aggregate::admin_stats(&data, now))
        }
        UserRole::Faculty => {
            let data = Snapshot {
                users: storage.list_all_users().await?,
                departments: storage.list_all_departments().await?,
                courses: storage.list_all_courses().await?,
                attendances: storage.list_all_attendances().await?,
                ..Default::default()
            };
            DashboardResponse::Faculty(aggregate::faculty_stats(&data))
        }
        UserRole::Hr => {
            let data = Snapshot {
                users: storage.list_all_users().await?,
                ..Default::default()
            };
            DashboardResponse::Hr(aggregate::hr_stats(
                &data,
                now,
                AppConfig::get().dashboard.recent_days,
            ))
        }
        UserRole::Teacher => {
            let data = Snapshot {
                users: storage.list_all_users().await?,
                courses: storage.list_all_courses().await?,
                groups: storage.list_all_groups().await?,
                members: storage.list_all_group_members().await?,
                assignments: storage.list_all_assignments().await?,
                submissions: storage.list_all_student_assignments().await?,
                sessions: storage.list_all_qr_sessions().await?,
                attendances: storage.list_all_attendances().await?,
                ..Default::default()
            };
            DashboardResponse::Teacher(aggregate::teacher_stats(&data, user.id, now))
        }
        UserRole::Student => {
            let data = Snapshot {
                groups: storage.list_all_groups().await?,
                members: storage.list_all_group_members().await?,
                assignments: storage.list_all_assignments().await?,
                submissions: storage.list_all_student_assignments().await?,
                attendances: storage.list_all_attendances().await?,
                ..Default::default()
            };
            DashboardResponse::Student(aggregate::student_stats(&data, user.id))
        }
    };

    Ok(dashboard)
}
