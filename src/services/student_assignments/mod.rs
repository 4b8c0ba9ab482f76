pub mod grade;
pub mod list;
pub mod submit;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::assignments::requests::{
    GradeAssignmentRequest, StudentAssignmentListParams, SubmitAssignmentRequest,
};
use crate::storage::Storage;

pub struct StudentAssignmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl StudentAssignmentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_submissions(
        &self,
        query: StudentAssignmentListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_submissions(self, query, request).await
    }

    // 学生提交
    pub async fn submit(
        &self,
        req: SubmitAssignmentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        submit::submit_assignment(self, req, request).await
    }

    // 教师批改
    pub async fn grade(
        &self,
        id: i64,
        req: GradeAssignmentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        grade::grade_submission(self, id, req, request).await
    }
}
