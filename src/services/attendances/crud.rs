use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AttendanceService;
use crate::models::{
    ApiResponse, ErrorCode,
    attendances::{
        entities::AttendanceMethod,
        requests::{
            AttendanceListParams, AttendanceListQuery, CreateAttendanceRequest, NewAttendance,
            UpdateAttendanceRequest,
        },
    },
    users::entities::UserRole,
};
use crate::services::{bad_request, current_user, error_response, not_found};

pub async fn list_attendances(
    service: &AttendanceService,
    query: AttendanceListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let (Some(from), Some(to)) = (query.date_from, query.date_to)
        && from > to
    {
        return Ok(bad_request(
            ErrorCode::BadRequest,
            "date_from must not be after date_to",
        ));
    }

    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    // 学生只能查看自己的考勤
    let student_id = if user.role == UserRole::Student {
        Some(user.id)
    } else {
        query.student_id
    };

    let list_query = AttendanceListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        course_id: query.course_id,
        student_id,
        session_id: query.session_id,
        status: query.status,
        date_from: query.date_from,
        date_to: query.date_to,
    };

    match storage.list_attendances_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Attendance list retrieved successfully",
        ))),
        Err(e) => Ok(error_response("Failed to retrieve attendance list", e)),
    }
}

pub async fn get_attendance(
    service: &AttendanceService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    match storage.get_attendance_by_id(id).await {
        // 学生查看他人记录时按不存在处理
        Ok(Some(attendance))
            if user.role != UserRole::Student || attendance.student_id == user.id =>
        {
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                attendance,
                "Attendance retrieved successfully",
            )))
        }
        Ok(_) => Ok(not_found(
            ErrorCode::AttendanceNotFound,
            "Attendance record not found",
        )),
        Err(e) => Ok(error_response("Failed to get attendance", e)),
    }
}

pub async fn create_attendance(
    service: &AttendanceService,
    req: CreateAttendanceRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let recorder = current_user(request)?;

    match storage.get_user_by_id(req.student_id).await {
        Ok(Some(student)) if student.role == UserRole::Student => {}
        Ok(Some(_)) => {
            return Ok(bad_request(
                ErrorCode::BadRequest,
                format!("User {} is not a student", req.student_id),
            ));
        }
        Ok(None) => return Ok(not_found(ErrorCode::UserNotFound, "Student not found")),
        Err(e) => return Ok(error_response("Failed to get student", e)),
    }

    match storage.get_course_by_id(req.course_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found(ErrorCode::CourseNotFound, "Course not found")),
        Err(e) => return Ok(error_response("Failed to get course", e)),
    }

    let record = NewAttendance {
        student_id: req.student_id,
        course_id: req.course_id,
        session_id: None,
        attendance_date: req.attendance_date,
        status: req.status,
        method: AttendanceMethod::Manual,
        recorded_by: Some(recorder.id),
        checked_in_at: None,
        note: req.note,
    };

    match storage.create_attendance(record).await {
        Ok(attendance) => {
            info!(
                "Attendance {} recorded for student {} by {}",
                attendance.id, attendance.student_id, recorder.username
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                attendance,
                "Attendance recorded successfully",
            )))
        }
        Err(e) => Ok(error_response("Failed to record attendance", e)),
    }
}

pub async fn update_attendance(
    service: &AttendanceService,
    id: i64,
    req: UpdateAttendanceRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.update_attendance(id, req).await {
        Ok(Some(attendance)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            attendance,
            "Attendance updated successfully",
        ))),
        Ok(None) => Ok(not_found(
            ErrorCode::AttendanceNotFound,
            "Attendance record not found",
        )),
        Err(e) => Ok(error_response("Failed to update attendance", e)),
    }
}

pub async fn delete_attendance(
    service: &AttendanceService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.delete_attendance(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Attendance deleted successfully",
        ))),
        Ok(false) => Ok(not_found(
            ErrorCode::AttendanceNotFound,
            "Attendance record not found",
        )),
        Err(e) => Ok(error_response("Failed to delete attendance", e)),
    }
}
