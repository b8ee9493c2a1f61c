mod support;

use axum::http::StatusCode;
use serde_json::json;
use staffdesk_api::{
    models::{LeaveStatus, Role},
    repositories::{EmployeeRepository, LeaveRepository, TaskRepository},
};
use support::TestApp;
use uuid::Uuid;

#[tokio::test]
async fn employee_directory_lists_and_updates() {
    let app = TestApp::new();
    let (_, admin) = app.admin().await;
    let (ada, _) = app.employee("Ada", None).await;

    let (status, body) = app.get("/api/admin/employees", &admin).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], json!(1));

    let (status, body) = app
        .put(
            &format!("/api/admin/employees/{}", ada.id),
            &admin,
            json!({"salary": "4200.50", "department": "Finance", "role": "admin"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["salary"], json!(4200.5));
    assert_eq!(body["data"]["department"], json!("Finance"));

    let stored = app.store.find_user(ada.id).await.unwrap().unwrap();
    assert_eq!(stored.role, Role::Employee);

    let (status, body) = app
        .put(
            &format!("/api/admin/employees/{}", ada.id),
            &admin,
            json!({"salary": "plenty"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("Invalid salary value provided."));
}

#[tokio::test]
async fn taken_email_is_a_bad_request() {
    let app = TestApp::new();
    let (_, admin) = app.admin().await;
    let (ada, _) = app.employee("Ada", None).await;
    let (bob, _) = app.employee("Bob", None).await;

    let (status, body) = app
        .put(
            &format!("/api/admin/employees/{}", bob.id),
            &admin,
            json!({"email": ada.email}),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("Email already in use"));
    let stored = app.store.find_user(bob.id).await.unwrap().unwrap();
    assert_eq!(stored.email, bob.email);
}

#[tokio::test]
async fn unknown_employee_is_not_found() {
    let app = TestApp::new();
    let (root, admin) = app.admin().await;

    for id in [Uuid::new_v4(), root.id] {
        let (status, body) = app.get(&format!("/api/admin/employees/{}", id), &admin).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], json!("Employee not found"));
    }
}

#[tokio::test]
async fn leave_decision_accepts_only_terminal_statuses() {
    let app = TestApp::new();
    let (_, admin) = app.admin().await;
    let (_, ada) = app.employee("Ada", None).await;
    let (status, body) = app
        .post(
            "/api/employees/leaves",
            &ada,
            json!({"startDate": "2024-07-01", "endDate": "2024-07-03", "reason": "Family"}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let id: Uuid = serde_json::from_value(body["data"]["id"].clone()).unwrap();

    let (status, body) = app
        .put(&format!("/api/admin/leaves/{}", id), &admin, json!({"status": "cancelled"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("Invalid status"));
    let stored = app.store.find_leave(id).await.unwrap().unwrap();
    assert_eq!(stored.status, LeaveStatus::Pending);

    let (status, body) = app
        .put(&format!("/api/admin/leaves/{}", id), &admin, json!({"status": "approved"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], json!("approved"));

    let (status, _) = app
        .put(
            &format!("/api/admin/leaves/{}", Uuid::new_v4()),
            &admin,
            json!({"status": "rejected"}),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = app.get("/api/admin/leaves", &admin).await;
    assert_eq!(body["count"], json!(1));
}

#[tokio::test]
async fn projects_tasks_progress_and_dashboard() {
    let app = TestApp::new();
    let (_, admin) = app.admin().await;
    let (ada, ada_token) = app.employee("Ada", None).await;

    let (status, body) = app
        .post(
            "/api/admin/projects",
            &admin,
            json!({"name": "Intranet", "description": "Rebuild the intranet"}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let project = body["data"]["id"].clone();

    let (status, _) = app
        .post("/api/admin/projects", &admin, json!({"name": "No description"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = app
        .get(&format!("/api/admin/employees/{}/progress", ada.id), &admin)
        .await;
    assert_eq!(
        body["data"],
        json!({"message": "No tasks assigned to this employee.", "progress": 0})
    );

    for (title, status) in [("a", "completed"), ("b", "completed"), ("c", "todo")] {
        let (code, _) = app
            .post(
                "/api/admin/tasks",
                &admin,
                json!({"project": project, "employee": ada.id, "title": title, "status": status}),
            )
            .await;
        assert_eq!(code, StatusCode::CREATED);
    }

    let (status, _) = app
        .post(
            "/api/admin/tasks",
            &admin,
            json!({"project": Uuid::new_v4(), "employee": ada.id, "title": "orphan"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.store.list_tasks().await.unwrap().len(), 3);

    let (_, body) = app
        .get(&format!("/api/admin/employees/{}/progress", ada.id), &admin)
        .await;
    assert_eq!(body["data"]["totalTasks"], json!(3));
    assert_eq!(body["data"]["completedTasks"], json!(2));
    assert_eq!(body["data"]["progress"], json!("66.67%"));

    let (_, own) = app.get("/api/employees/progress", &ada_token).await;
    assert_eq!(own["data"]["progress"], json!("66.67%"));

    app.post(
        "/api/employees/leaves",
        &ada_token,
        json!({"startDate": "2024-01-02", "endDate": "2024-01-02", "reason": "Dentist"}),
    )
    .await;

    let (status, body) = app.get("/api/admin/dashboard", &admin).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"],
        json!({
            "totalEmployees": 1,
            "pendingLeaves": 1,
            "totalProjects": 1,
            "completedTasks": 2
        })
    );
    assert_eq!(app.store.count_leaves_with_status(LeaveStatus::Pending).await.unwrap(), 1);
}
