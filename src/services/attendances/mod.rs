pub mod crud;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::attendances::requests::{
    AttendanceListParams, CreateAttendanceRequest, UpdateAttendanceRequest,
};
use crate::storage::Storage;

pub struct AttendanceService {
    storage: Option<Arc<dyn Storage>>,
}

impl AttendanceService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_attendances(
        &self,
        query: AttendanceListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        match query.id {
            Some(id) => crud::get_attendance(self, id, request).await,
            None => crud::list_attendances(self, query, request).await,
        }
    }

    pub async fn create_attendance(
        &self,
        req: CreateAttendanceRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        crud::create_attendance(self, req, request).await
    }

    pub async fn update_attendance(
        &self,
        id: i64,
        req: UpdateAttendanceRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        crud::update_attendance(self, id, req, request).await
    }

    pub async fn delete_attendance(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        crud::delete_attendance(self, id, request).await
    }
}
