/// 业务错误码
///
/// 数值直接写入响应体的 `code` 字段，前端据此区分错误类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用 1xxx
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1009,
    RateLimitExceeded = 1029,
    InternalServerError = 1500,

    // 认证 2xxx
    AuthFailed = 2000,
    RegisterFailed = 2001,
    UserInactive = 2002,

    // 用户 3xxx
    UserNotFound = 3000,
    UserNameInvalid = 3001,
    UserEmailInvalid = 3002,
    UserPasswordInvalid = 3003,
    UserNameAlreadyExists = 3004,
    UserEmailAlreadyExists = 3005,
    UserAlreadyExists = 3006,
    UserCreationFailed = 3007,
    UserUpdateFailed = 3008,
    UserDeleteFailed = 3009,
    CanNotDeleteCurrentUser = 3010,

    // 院系 / 课程 / 分组 4xxx
    DepartmentNotFound = 4000,
    CourseNotFound = 4100,
    CoursePermissionDenied = 4101,
    GroupNotFound = 4200,
    GroupMemberExists = 4201,
    GroupMemberNotFound = 4202,

    // 作业 5xxx
    AssignmentNotFound = 5000,
    SubmissionNotFound = 5001,
    SubmissionAlreadyGraded = 5002,
    ScoreOutOfRange = 5003,

    // 考勤 / 二维码 6xxx
    AttendanceNotFound = 6000,
    QrSessionNotFound = 6100,
    QrSessionExpired = 6101,
    QrAlreadyCheckedIn = 6102,
    QrNotOnRoster = 6103,
    QrRenderFailed = 6104,

    // 图书资源 7xxx
    LibraryResourceNotFound = 7000,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success as i32, 0);
        assert_eq!(ErrorCode::Unauthorized as i32, 1001);
        assert_eq!(ErrorCode::QrSessionExpired as i32, 6101);
    }
}
