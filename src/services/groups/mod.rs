pub mod crud;
pub mod members;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::groups::requests::{
    AddGroupMemberRequest, CreateGroupRequest, GroupListParams, GroupMemberParams,
    UpdateGroupRequest,
};
use crate::storage::Storage;

pub struct GroupService {
    storage: Option<Arc<dyn Storage>>,
}

impl GroupService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_groups(
        &self,
        query: GroupListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        match query.id {
            Some(id) => crud::get_group(self, id, request).await,
            None => crud::list_groups(self, query, request).await,
        }
    }

    pub async fn create_group(
        &self,
        req: CreateGroupRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        crud::create_group(self, req, request).await
    }

    pub async fn update_group(
        &self,
        id: i64,
        req: UpdateGroupRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        crud::update_group(self, id, req, request).await
    }

    pub async fn delete_group(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        crud::delete_group(self, id, request).await
    }

    // 成员列表
    pub async fn list_members(
        &self,
        params: GroupMemberParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        members::list_members(self, params, request).await
    }

    pub async fn add_member(
        &self,
        req: AddGroupMemberRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        members::add_member(self, req, request).await
    }

    pub async fn remove_member(
        &self,
        params: GroupMemberParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        members::remove_member(self, params, request).await
    }
}
