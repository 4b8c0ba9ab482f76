pub mod crud;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::ErrorCode;
use crate::models::assignments::requests::{
    AssignmentListParams, CreateAssignmentRequest, UpdateAssignmentRequest,
};
use crate::storage::Storage;

pub struct AssignmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl AssignmentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_assignments(
        &self,
        query: AssignmentListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        match query.id {
            Some(id) => crud::get_assignment(self, id, request).await,
            None => crud::list_assignments(self, query, request).await,
        }
    }

    pub async fn create_assignment(
        &self,
        req: CreateAssignmentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        crud::create_assignment(self, req, request).await
    }

    pub async fn update_assignment(
        &self,
        id: i64,
        req: UpdateAssignmentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        crud::update_assignment(self, id, req, request).await
    }

    pub async fn delete_assignment(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        crud::delete_assignment(self, id, request).await
    }
}

// 满分必须为正的有限数
pub(crate) fn check_max_score(max_score: Option<f64>) -> Result<(), HttpResponse> {
    match max_score {
        Some(value) if !(value.is_finite() && value > 0.0) => Err(super::bad_request(
            ErrorCode::ScoreOutOfRange,
            "max_score must be greater than 0",
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_score_check() {
        assert!(check_max_score(None).is_ok());
        assert!(check_max_score(Some(100.0)).is_ok());
        assert!(check_max_score(Some(0.5)).is_ok());
        assert!(check_max_score(Some(0.0)).is_err());
        assert!(check_max_score(Some(-5.0)).is_err());
        assert!(check_max_score(Some(f64::NAN)).is_err());
    }
}
