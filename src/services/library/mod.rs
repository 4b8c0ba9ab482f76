pub mod crud;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::library::requests::{
    CreateLibraryResourceRequest, LibraryResourceListParams, UpdateLibraryResourceRequest,
};
use crate::storage::Storage;

pub struct LibraryService {
    storage: Option<Arc<dyn Storage>>,
}

impl LibraryService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_resources(
        &self,
        query: LibraryResourceListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        match query.id {
            Some(id) => crud::get_resource(self, id, request).await,
            None => crud::list_resources(self, query, request).await,
        }
    }

    pub async fn create_resource(
        &self,
        req: CreateLibraryResourceRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        crud::create_resource(self, req, request).await
    }

    pub async fn update_resource(
        &self,
        id: i64,
        req: UpdateLibraryResourceRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        crud::update_resource(self, id, req, request).await
    }

    pub async fn delete_resource(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        crud::delete_resource(self, id, request).await
    }
}

/// 0 <= available <= total
pub(crate) fn copies_valid(total: i32, available: i32) -> bool {
    total >= 0 && (0..=total).contains(&available)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copies_invariant() {
        assert!(copies_valid(1, 1));
        assert!(copies_valid(5, 0));
        assert!(copies_valid(0, 0));
        assert!(!copies_valid(3, 4));
        assert!(!copies_valid(3, -1));
        assert!(!copies_valid(-1, 0));
    }
}
