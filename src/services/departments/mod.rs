pub mod create;
pub mod delete;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::departments::requests::{
    CreateDepartmentRequest, DepartmentListParams, UpdateDepartmentRequest,
};
use crate::storage::Storage;

pub struct DepartmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl DepartmentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_departments(
        &self,
        query: DepartmentListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        match query.id {
            Some(id) => list::get_department(self, id, request).await,
            None => list::list_departments(self, query, request).await,
        }
    }

    pub async fn create_department(
        &self,
        req: CreateDepartmentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_department(self, req, request).await
    }

    pub async fn update_department(
        &self,
        id: i64,
        req: UpdateDepartmentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_department(self, id, req, request).await
    }

    pub async fn delete_department(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_department(self, id, request).await
    }
}

// 院系负责人必须是已存在的用户
pub(crate) async fn check_head_exists(
    storage: &Arc<dyn Storage>,
    head_id: Option<i64>,
) -> Result<(), HttpResponse> {
    let Some(head_id) = head_id else {
        return Ok(());
    };
    match storage.get_user_by_id(head_id).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(super::bad_request(
            crate::models::ErrorCode::UserNotFound,
            format!("Department head {head_id} does not exist"),
        )),
        Err(e) => Err(super::error_response("Failed to check department head", e)),
    }
}
