//! 端到端接口测试：真实路由 + 临时 SQLite 数据库

use actix_web::{App, http::StatusCode, test, web};
use once_cell::sync::Lazy;
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use campus_portal::cache::{ObjectCache, object_cache::moka::MokaCacheWrapper};
use campus_portal::models::courses::requests::CreateCourseRequest;
use campus_portal::models::departments::requests::CreateDepartmentRequest;
use campus_portal::models::groups::requests::CreateGroupRequest;
use campus_portal::models::users::entities::UserRole;
use campus_portal::models::users::requests::CreateUserRequest;
use campus_portal::routes;
use campus_portal::storage::{Storage, sea_orm_storage::SeaOrmStorage};
use campus_portal::utils::jwt::JwtUtils;
use campus_portal::utils::password::hash_password;
use campus_portal::utils::{json_error_handler, query_error_handler};

const PASSWORD: &str = "Campus2024ok";

static PASSWORD_HASH: Lazy<String> = Lazy::new(|| hash_password(PASSWORD).unwrap());
static NEXT_DB: AtomicU32 = AtomicU32::new(0);
static NEXT_PEER: AtomicU32 = AtomicU32::new(1);

// 限流按 IP 计数，每个请求使用不同的来源地址
fn peer() -> SocketAddr {
    let n = NEXT_PEER.fetch_add(1, Ordering::SeqCst);
    SocketAddr::from(([10, (n >> 16) as u8, (n >> 8) as u8, n as u8], 40000))
}

struct Fixture {
    storage: Arc<dyn Storage>,
    cache: Arc<dyn ObjectCache>,
    admin: i64,
    hr: i64,
    teacher: i64,
    other_teacher: i64,
    student: i64,
    classmate: i64,
    outsider: i64,
    course: i64,
}

impl Fixture {
    fn token(&self, user_id: i64, role: UserRole) -> String {
        JwtUtils::generate_access_token(user_id, &role.to_string()).unwrap()
    }
    fn admin_token(&self) -> String {
        self.token(self.admin, UserRole::Admin)
    }
    fn teacher_token(&self) -> String {
        self.token(self.teacher, UserRole::Teacher)
    }
    fn student_token(&self) -> String {
        self.token(self.student, UserRole::Student)
    }
}

async fn add_user(storage: &Arc<dyn Storage>, username: &str, role: UserRole) -> i64 {
    storage
        .create_user(CreateUserRequest {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password: PASSWORD_HASH.clone(),
            role,
            display_name: None,
            phone: None,
            department_id: None,
        })
        .await
        .unwrap()
        .id
}

async fn fixture() -> Fixture {
    let path = std::env::temp_dir().join(format!(
        "campus-portal-test-{}-{}.db",
        std::process::id(),
        NEXT_DB.fetch_add(1, Ordering::SeqCst)
    ));
    let _ = std::fs::remove_file(&path);
    let url = format!("sqlite://{}?mode=rwc", path.display());
    let storage: Arc<dyn Storage> = Arc::new(SeaOrmStorage::connect(&url).await.unwrap());
    storage.ensure_roles().await.unwrap();

    let admin = add_user(&storage, "admin", UserRole::Admin).await;
    let hr = add_user(&storage, "hr_clerk", UserRole::Hr).await;
    let teacher = add_user(&storage, "teacher_a", UserRole::Teacher).await;
    let other_teacher = add_user(&storage, "teacher_b", UserRole::Teacher).await;
    let student = add_user(&storage, "student_a", UserRole::Student).await;
    let classmate = add_user(&storage, "student_b", UserRole::Student).await;
    let outsider = add_user(&storage, "student_c", UserRole::Student).await;

    let department = storage
        .create_department(CreateDepartmentRequest {
            name: "Computer Science".to_string(),
            code: "CS".to_string(),
            description: None,
            head_id: None,
        })
        .await
        .unwrap();
    let course = storage
        .create_course(CreateCourseRequest {
            department_id: department.id,
            code: "CS101".to_string(),
            name: "Intro to Programming".to_string(),
            description: None,
            credits: Some(4),
            teacher_id: Some(teacher),
        })
        .await
        .unwrap();
    let group = storage
        .create_group(CreateGroupRequest {
            name: "CS101 Section A".to_string(),
            course_id: Some(course.id),
            department_id: None,
            description: None,
        })
        .await
        .unwrap();
    storage.add_group_member(group.id, student).await.unwrap();
    storage.add_group_member(group.id, classmate).await.unwrap();

    Fixture {
        storage,
        cache: Arc::new(MokaCacheWrapper::with_settings(1000, 60)),
        admin,
        hr,
        teacher,
        other_teacher,
        student,
        classmate,
        outsider,
        course: course.id,
    }
}

macro_rules! init_app {
    ($fx:expr) => {
        test::init_service(
            App::new()
                .app_data(web::QueryConfig::default().error_handler(query_error_handler))
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .app_data(web::Data::new($fx.storage.clone()))
                .app_data(web::Data::new($fx.cache.clone()))
                .configure(routes::configure_api_routes),
        )
        .await
    };
}

// 发送请求并解析 JSON 信封，非 JSON 响应体解析为 Null
macro_rules! send {
    ($app:expr, $req:expr) => {{
        let resp = test::call_service(&$app, $req.peer_addr(peer()).to_request()).await;
        let status = resp.status();
        let bytes = test::read_body(resp).await;
        let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }};
}

fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}

#[actix_web::test]
async fn test_register_login_and_me() {
    let fx = fixture().await;
    let app = init_app!(fx);

    let payload = json!({
        "username": "fresh_user",
        "email": "fresh@example.com",
        "password": "Fresh2024pass"
    });
    let (status, body) = send!(app, test::TestRequest::post().uri("/api/register").set_json(&payload));
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"]["user"]["role"], "student");
    assert!(body["data"]["user"].get("password_hash").is_none());

    let (status, body) = send!(app, test::TestRequest::post().uri("/api/register").set_json(&payload));
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].is_string());

    let weak = json!({"username": "weak_user", "email": "weak@example.com", "password": "short"});
    let (status, _) = send!(app, test::TestRequest::post().uri("/api/register").set_json(&weak));
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/login")
            .set_json(json!({"username": "fresh_user", "password": "Wrong2024pass"}))
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/login")
            .peer_addr(peer())
            .set_json(json!({"username": "fresh@example.com", "password": "Fresh2024pass"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.response().cookies().any(|c| c.name() == "refresh_token"));
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["dashboard"], "student");
    assert!(body["data"]["user"]["last_login"].is_string());
    let token = body["data"]["access_token"].as_str().unwrap().to_string();

    let (status, body) = send!(app, test::TestRequest::get().uri("/api/me").insert_header(bearer(&token)));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["username"], "fresh_user");

    let (status, body) = send!(app, test::TestRequest::get().uri("/api/me"));
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1001);

    let (status, body) = send!(app, test::TestRequest::get().uri("/api/roles").insert_header(bearer(&token)));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 5);
}

#[actix_web::test]
async fn test_profile_update_cannot_escalate() {
    let fx = fixture().await;
    let app = init_app!(fx);
    let token = fx.student_token();

    let (status, body) = send!(
        app,
        test::TestRequest::put()
            .uri("/api/me")
            .insert_header(bearer(&token))
            .set_json(json!({"display_name": "Alice", "role": "admin"}))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["display_name"], "Alice");
    assert_eq!(body["data"]["user"]["role"], "student");

    let (status, _) = send!(
        app,
        test::TestRequest::put()
            .uri("/api/me")
            .insert_header(bearer(&token))
            .set_json(json!({"email": "teacher_a@example.com"}))
    );
    assert_eq!(status, StatusCode::CONFLICT);
}

#[actix_web::test]
async fn test_user_management_access_and_validation() {
    let fx = fixture().await;
    let app = init_app!(fx);
    let admin = fx.admin_token();

    let (status, _) = send!(app, test::TestRequest::get().uri("/api/users").insert_header(bearer(&fx.student_token())));
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send!(app, test::TestRequest::get().uri("/api/users?size=2").insert_header(bearer(&admin)));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"]["pagination"]["total"], 7);

    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/users?role=student")
            .insert_header(bearer(&fx.token(fx.hr, UserRole::Hr)))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["pagination"]["total"], 3);

    // 教师可以查看但不能修改用户
    let (status, _) = send!(
        app,
        test::TestRequest::delete()
            .uri(&format!("/api/users?id={}", fx.outsider))
            .insert_header(bearer(&fx.teacher_token()))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send!(
        app,
        test::TestRequest::put()
            .uri(&format!("/api/users?id={}", fx.outsider))
            .insert_header(bearer(&admin))
            .set_json(json!({"status": "suspended", "display_name": "Carol"}))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["status"], "suspended");
    assert_eq!(body["data"]["user"]["display_name"], "Carol");
    assert_eq!(body["data"]["user"]["email"], "student_c@example.com");

    // 被暂停的用户令牌立即失效
    let (status, _) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/me")
            .insert_header(bearer(&fx.token(fx.outsider, UserRole::Student)))
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/users")
            .insert_header(bearer(&admin))
            .set_json(json!({"username": "x", "email": "x@example.com", "password": PASSWORD, "role": "teacher"}))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/users")
            .insert_header(bearer(&admin))
            .set_json(json!({"username": "new_teacher", "email": "nt@example.com", "password": PASSWORD, "role": "wizard"}))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send!(app, test::TestRequest::delete().uri("/api/users?id=abc").insert_header(bearer(&admin)));
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send!(app, test::TestRequest::delete().uri("/api/users?id=1").insert_header(bearer(&fx.token(fx.hr, UserRole::Hr))));
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send!(app, test::TestRequest::delete().uri("/api/users?id=9999").insert_header(bearer(&admin)));
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send!(
        app,
        test::TestRequest::delete()
            .uri(&format!("/api/users?id={}", fx.outsider))
            .insert_header(bearer(&admin))
    );
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/users?id={}", fx.outsider))
            .insert_header(bearer(&admin))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_departments_and_courses() {
    let fx = fixture().await;
    let app = init_app!(fx);
    let admin = fx.admin_token();

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/departments")
            .insert_header(bearer(&admin))
            .set_json(json!({"name": "Mathematics", "code": "MATH"}))
    );
    assert_eq!(status, StatusCode::CREATED);
    let math = body["data"]["id"].as_i64().unwrap();

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/departments")
            .insert_header(bearer(&admin))
            .set_json(json!({"name": "Maths Again", "code": "MATH"}))
    );
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/departments")
            .insert_header(bearer(&fx.teacher_token()))
            .set_json(json!({"name": "Physics", "code": "PHY"}))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/courses")
            .insert_header(bearer(&admin))
            .set_json(json!({"department_id": math, "code": "MA201", "name": "Linear Algebra"}))
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["credits"], 3);
    let algebra = body["data"]["id"].as_i64().unwrap();

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/courses")
            .insert_header(bearer(&admin))
            .set_json(json!({"department_id": math, "code": "MA301", "name": "Topology", "credits": 31}))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/courses")
            .insert_header(bearer(&admin))
            .set_json(json!({"department_id": math, "code": "MA302", "name": "Analysis", "teacher_id": fx.student}))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send!(
        app,
        test::TestRequest::put()
            .uri(&format!("/api/courses?id={algebra}"))
            .insert_header(bearer(&admin))
            .set_json(json!({"teacher_id": fx.other_teacher}))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["teacher_id"], fx.other_teacher);
    assert_eq!(body["data"]["name"], "Linear Algebra");

    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/courses?department_id={math}"))
            .insert_header(bearer(&fx.student_token()))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["pagination"]["total"], 1);

    let (status, _) = send!(app, test::TestRequest::get().uri("/api/courses?id=9999").insert_header(bearer(&admin)));
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send!(
        app,
        test::TestRequest::put()
            .uri(&format!("/api/users?id={}", fx.classmate))
            .insert_header(bearer(&admin))
            .set_json(json!({"department_id": math}))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["department_id"], math);

    // 删除院系时课程一并删除，成员的院系置空
    let (status, _) = send!(
        app,
        test::TestRequest::delete()
            .uri(&format!("/api/departments?id={math}"))
            .insert_header(bearer(&admin))
    );
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/courses?id={algebra}"))
            .insert_header(bearer(&admin))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
    let classmate = fx.storage.get_user_by_id(fx.classmate).await.unwrap().unwrap();
    assert_eq!(classmate.department_id, None);
}

#[actix_web::test]
async fn test_deleting_referenced_users_keeps_rows_consistent() {
    let fx = fixture().await;
    let app = init_app!(fx);
    let admin = fx.admin_token();
    let teacher = fx.teacher_token();

    // 院系负责人被删除后负责人置空
    let physics = fx
        .storage
        .create_department(CreateDepartmentRequest {
            name: "Physics".to_string(),
            code: "PHY".to_string(),
            description: None,
            head_id: Some(fx.other_teacher),
        })
        .await
        .unwrap();
    let (status, _) = send!(
        app,
        test::TestRequest::delete()
            .uri(&format!("/api/users?id={}", fx.other_teacher))
            .insert_header(bearer(&admin))
    );
    assert_eq!(status, StatusCode::OK);
    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/departments?id={}", physics.id))
            .insert_header(bearer(&admin))
    );
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["head_id"].is_null());

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/assignments")
            .insert_header(bearer(&teacher))
            .set_json(json!({"course_id": fx.course, "title": "Essay", "max_score": 20}))
    );
    assert_eq!(status, StatusCode::CREATED);
    let assignment = body["data"]["id"].as_i64().unwrap();
    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/student-assignments")
            .insert_header(bearer(&fx.student_token()))
            .set_json(json!({"assignment_id": assignment, "content": "done"}))
    );
    assert_eq!(status, StatusCode::CREATED);
    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/qr-codesession")
            .insert_header(bearer(&teacher))
            .set_json(json!({"course_id": fx.course}))
    );
    assert_eq!(status, StatusCode::CREATED);
    let session = body["data"]["session"]["id"].as_i64().unwrap();

    // 作者仍有作业时拒绝删除，学生提交保持不变
    let delete_teacher = || {
        test::TestRequest::delete()
            .uri(&format!("/api/users?id={}", fx.teacher))
            .insert_header(bearer(&admin))
    };
    let (status, body) = send!(app, delete_teacher());
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 1009);
    assert!(fx.storage.get_user_by_id(fx.teacher).await.unwrap().is_some());
    assert!(fx.storage.get_assignment_by_id(assignment).await.unwrap().is_some());
    assert_eq!(fx.storage.list_all_student_assignments().await.unwrap().len(), 1);

    let (status, _) = send!(
        app,
        test::TestRequest::delete()
            .uri(&format!("/api/assignments?id={assignment}"))
            .insert_header(bearer(&admin))
    );
    assert_eq!(status, StatusCode::OK);

    // 签到会话同样阻止删除
    let (status, _) = send!(app, delete_teacher());
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(fx.storage.get_qr_session_by_id(session).await.unwrap().is_some());

    let (status, _) = send!(
        app,
        test::TestRequest::delete()
            .uri(&format!("/api/qr-codesession?id={session}"))
            .insert_header(bearer(&admin))
    );
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send!(app, delete_teacher());
    assert_eq!(status, StatusCode::OK);
    let course = fx.storage.get_course_by_id(fx.course).await.unwrap().unwrap();
    assert_eq!(course.teacher_id, None);
}

#[actix_web::test]
async fn test_group_membership() {
    let fx = fixture().await;
    let app = init_app!(fx);
    let teacher = fx.teacher_token();

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/groups")
            .insert_header(bearer(&teacher))
            .set_json(json!({"name": "Study Circle", "course_id": fx.course}))
    );
    assert_eq!(status, StatusCode::CREATED);
    let group = body["data"]["id"].as_i64().unwrap();

    let member = json!({"group_id": group, "user_id": fx.outsider});
    let (status, _) = send!(
        app,
        test::TestRequest::post().uri("/api/groups/members").insert_header(bearer(&teacher)).set_json(&member)
    );
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = send!(
        app,
        test::TestRequest::post().uri("/api/groups/members").insert_header(bearer(&teacher)).set_json(&member)
    );
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/groups/members")
            .insert_header(bearer(&teacher))
            .set_json(json!({"group_id": group, "user_id": 9999}))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/groups/members")
            .insert_header(bearer(&fx.student_token()))
            .set_json(json!({"group_id": group, "user_id": fx.student}))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/groups/members?group_id={group}"))
            .insert_header(bearer(&fx.student_token()))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, _) = send!(
        app,
        test::TestRequest::delete()
            .uri(&format!("/api/groups/members?group_id={group}&user_id={}", fx.outsider))
            .insert_header(bearer(&teacher))
    );
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send!(
        app,
        test::TestRequest::delete()
            .uri(&format!("/api/groups/members?group_id={group}&user_id={}", fx.outsider))
            .insert_header(bearer(&teacher))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_assignment_submission_and_grading() {
    let fx = fixture().await;
    let app = init_app!(fx);
    let teacher = fx.teacher_token();
    let student = fx.student_token();

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/assignments")
            .insert_header(bearer(&teacher))
            .set_json(json!({"course_id": fx.course, "title": "Lab 1", "max_score": 0}))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/assignments")
            .insert_header(bearer(&teacher))
            .set_json(json!({"course_id": fx.course, "title": "Lab 1", "max_score": 50}))
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["created_by"], fx.teacher);
    let assignment = body["data"]["id"].as_i64().unwrap();

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/student-assignments")
            .insert_header(bearer(&teacher))
            .set_json(json!({"assignment_id": assignment, "content": "not a student"}))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    let submit = |content: &str| {
        test::TestRequest::post()
            .uri("/api/student-assignments")
            .insert_header(bearer(&student))
            .set_json(json!({"assignment_id": assignment, "content": content}))
    };
    let (status, first) = send!(app, submit("draft"));
    assert_eq!(status, StatusCode::CREATED);
    let (status, second) = send!(app, submit("final"));
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["data"]["id"], second["data"]["id"]);
    assert_eq!(second["data"]["content"], "final");
    assert_eq!(second["data"]["status"], "submitted");
    assert_eq!(second["data"]["is_late"], false);
    let submission = second["data"]["id"].as_i64().unwrap();

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/student-assignments")
            .insert_header(bearer(&fx.token(fx.classmate, UserRole::Student)))
            .set_json(json!({"assignment_id": assignment, "content": "mine"}))
    );
    assert_eq!(status, StatusCode::CREATED);

    // 学生只能看到自己的提交
    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/student-assignments?assignment_id={assignment}"))
            .insert_header(bearer(&student))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["pagination"]["total"], 1);
    assert_eq!(body["data"]["items"][0]["student_id"], fx.student);

    let grade = |score: f64| {
        test::TestRequest::put()
            .uri(&format!("/api/student-assignments?id={submission}"))
            .insert_header(bearer(&teacher))
            .set_json(json!({"score": score, "feedback": "good"}))
    };
    let (status, body) = send!(app, grade(51.0));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 5003);

    let (status, body) = send!(app, grade(45.0));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "graded");
    assert_eq!(body["data"]["graded_by"], fx.teacher);

    let (status, _) = send!(app, submit("too late"));
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send!(app, test::TestRequest::get().uri("/api/dashboard").insert_header(bearer(&student)));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["role"], "student");
    assert_eq!(body["data"]["stats"]["enrolled_courses"], 1);
    assert_eq!(body["data"]["stats"]["graded_submissions"], 1);
    assert_eq!(body["data"]["stats"]["average_score_percent"], 90.0);

    let (status, body) = send!(app, test::TestRequest::get().uri("/api/dashboard").insert_header(bearer(&teacher)));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["role"], "teacher");
    assert_eq!(body["data"]["stats"]["students"], 2);
    assert_eq!(body["data"]["stats"]["pending_grading"], 1);
}

#[actix_web::test]
async fn test_manual_attendance_visibility() {
    let fx = fixture().await;
    let app = init_app!(fx);
    let teacher = fx.teacher_token();

    let record = |student_id: i64, status: &str| {
        test::TestRequest::post()
            .uri("/api/attendances")
            .insert_header(bearer(&teacher))
            .set_json(json!({
                "student_id": student_id,
                "course_id": fx.course,
                "attendance_date": "2026-09-01",
                "status": status
            }))
    };
    let (status, mine) = send!(app, record(fx.student, "present"));
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(mine["data"]["method"], "manual");
    assert_eq!(mine["data"]["recorded_by"], fx.teacher);
    let (status, theirs) = send!(app, record(fx.classmate, "absent"));
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send!(app, record(fx.teacher, "present"));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = send!(app, record(fx.student, "asleep"));
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let student = fx.student_token();
    let (status, body) = send!(app, test::TestRequest::get().uri("/api/attendances").insert_header(bearer(&student)));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["pagination"]["total"], 1);

    let theirs_id = theirs["data"]["id"].as_i64().unwrap();
    let (status, _) = send!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/attendances?id={theirs_id}"))
            .insert_header(bearer(&student))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/attendances?date_from=2026-09-02&date_to=2026-09-01")
            .insert_header(bearer(&teacher))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send!(
        app,
        test::TestRequest::put()
            .uri(&format!("/api/attendances?id={theirs_id}"))
            .insert_header(bearer(&teacher))
            .set_json(json!({"status": "excused", "note": "medical"}))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "excused");
    assert_eq!(body["data"]["attendance_date"], "2026-09-01");
}

#[actix_web::test]
async fn test_qr_session_lifecycle() {
    let fx = fixture().await;
    let app = init_app!(fx);
    let teacher = fx.teacher_token();

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/qr-codesession")
            .insert_header(bearer(&fx.token(fx.other_teacher, UserRole::Teacher)))
            .set_json(json!({"course_id": fx.course}))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/qr-codesession")
            .insert_header(bearer(&teacher))
            .set_json(json!({"course_id": fx.course, "duration_seconds": 5}))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/qr-codesession")
            .insert_header(bearer(&fx.student_token()))
            .set_json(json!({"course_id": fx.course}))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/qr-codesession")
            .insert_header(bearer(&teacher))
            .set_json(json!({"course_id": fx.course, "duration_seconds": 120}))
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["expired"], false);
    let remaining = body["data"]["remaining_seconds"].as_i64().unwrap();
    assert!(remaining > 100 && remaining <= 120);
    let session = body["data"]["session"]["id"].as_i64().unwrap();
    let code = body["data"]["session"]["code"].as_str().unwrap().to_string();
    assert!(body["data"]["checkin_url"].as_str().unwrap().ends_with(&code));

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/qr-codesession/qr?id={session}"))
            .insert_header(bearer(&teacher))
            .peer_addr(peer())
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("content-type").unwrap().to_str().unwrap(),
        "image/svg+xml"
    );
    let svg = test::read_body(resp).await;
    assert!(String::from_utf8_lossy(&svg).contains("<svg"));

    let checkin = |token: String, code: &str| {
        test::TestRequest::post()
            .uri("/api/qr-codesession/checkin")
            .insert_header(bearer(&token))
            .set_json(json!({"code": code}))
    };

    let (status, body) = send!(app, checkin(fx.student_token(), &code));
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["method"], "qr");
    assert_eq!(body["data"]["status"], "present");
    assert_eq!(body["data"]["session_id"], session);

    let (status, _) = send!(app, checkin(fx.student_token(), &code));
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send!(app, checkin(fx.token(fx.outsider, UserRole::Student), &code));
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send!(app, checkin(fx.student_token(), "no-such-code"));
    assert_eq!(status, StatusCode::NOT_FOUND);

    // 轮询是纯读取，重复调用结果一致
    for _ in 0..2 {
        let (status, body) = send!(
            app,
            test::TestRequest::get()
                .uri(&format!("/api/qr-codesession/checkins?id={session}"))
                .insert_header(bearer(&teacher))
        );
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["roster_size"], 2);
        assert_eq!(body["data"]["checked_in_count"], 1);
        assert_eq!(body["data"]["checked_in"][0]["student_id"], fx.student);
        assert_eq!(body["data"]["pending"][0]["student_id"], fx.classmate);
    }

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/qr-codesession/close?id={session}"))
            .insert_header(bearer(&teacher))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["expired"], true);

    let (status, body) = send!(app, checkin(fx.token(fx.classmate, UserRole::Student), &code));
    assert_eq!(status, StatusCode::GONE);
    assert_eq!(body["code"], 6101);

    let (status, _) = send!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/qr-codesession/qr?id={session}"))
            .insert_header(bearer(&teacher))
    );
    assert_eq!(status, StatusCode::GONE);

    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/attendances?session_id={session}"))
            .insert_header(bearer(&teacher))
    );
    assert_eq!(status, StatusCode::OK);
    let attendance = body["data"]["items"][0]["id"].as_i64().unwrap();

    // 删除会话后考勤记录保留，session_id 置空
    let (status, _) = send!(
        app,
        test::TestRequest::delete()
            .uri(&format!("/api/qr-codesession?id={session}"))
            .insert_header(bearer(&teacher))
    );
    assert_eq!(status, StatusCode::OK);
    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/attendances?id={attendance}"))
            .insert_header(bearer(&teacher))
    );
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["session_id"].is_null());

    let (status, _) = send!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/qr-codesession?id={session}"))
            .insert_header(bearer(&teacher))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_expired_session_rejects_checkin() {
    let fx = fixture().await;
    let app = init_app!(fx);

    let session = fx
        .storage
        .create_qr_session(
            fx.course,
            fx.teacher,
            "expired-code-0001",
            chrono::Utc::now() - chrono::Duration::seconds(1),
        )
        .await
        .unwrap();

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/qr-codesession/checkin")
            .insert_header(bearer(&fx.student_token()))
            .set_json(json!({"code": session.code}))
    );
    assert_eq!(status, StatusCode::GONE);

    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/qr-codesession?course_id={}", fx.course))
            .insert_header(bearer(&fx.teacher_token()))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"][0]["expired"], true);
    assert_eq!(body["data"]["items"][0]["remaining_seconds"], 0);
}

#[actix_web::test]
async fn test_library_copies_invariant() {
    let fx = fixture().await;
    let app = init_app!(fx);
    let teacher = fx.teacher_token();

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/library-resources")
            .insert_header(bearer(&teacher))
            .set_json(json!({"title": "SICP", "resource_type": "book", "total_copies": 2, "available_copies": 3}))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/library-resources")
            .insert_header(bearer(&teacher))
            .set_json(json!({"title": "SICP", "resource_type": "book", "total_copies": 2}))
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["available_copies"], 2);
    let id = body["data"]["id"].as_i64().unwrap();

    let (status, _) = send!(
        app,
        test::TestRequest::put()
            .uri(&format!("/api/library-resources?id={id}"))
            .insert_header(bearer(&teacher))
            .set_json(json!({"total_copies": 1}))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send!(
        app,
        test::TestRequest::delete()
            .uri(&format!("/api/library-resources?id={id}"))
            .insert_header(bearer(&fx.student_token()))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/library-resources?resource_type=book")
            .insert_header(bearer(&fx.student_token()))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["pagination"]["total"], 1);
}

#[actix_web::test]
async fn test_malformed_requests_and_unknown_endpoints() {
    let fx = fixture().await;
    let app = init_app!(fx);
    let admin = fx.admin_token();

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/departments")
            .insert_header(bearer(&admin))
            .insert_header(("Content-Type", "application/json"))
            .set_payload("{\"name\": ")
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 1000);

    let (status, _) = send!(app, test::TestRequest::get().uri("/api/users?page=abc").insert_header(bearer(&admin)));
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send!(app, test::TestRequest::get().uri("/api/nothing-here").insert_header(bearer(&admin)));
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 1004);

    let (status, _) = send!(app, test::TestRequest::get().uri("/api/courses").insert_header(bearer("not-a-jwt")));
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
