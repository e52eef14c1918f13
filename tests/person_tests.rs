mod common;

use axum::http::StatusCode;
use common::{bearer, spawn_app};
use serde_json::{json, Value};

#[tokio::test]
async fn search_covers_company_and_position() {
    let app = spawn_app().await;

    let body: Value = app.server.get("/api/people?search=cto").await.json();
    let mut names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|person| person["name"].as_str().unwrap())
        .collect();
    names.sort();
    assert_eq!(names, ["David Kim", "Sarah Williams"]);

    let body: Value = app.server.get("/api/people?search=ecosync").await.json();
    assert_eq!(body["data"][0]["name"], "Michael Chen");
    assert_eq!(body["pagination"]["total"], 1);
}

#[tokio::test]
async fn limit_is_clamped() {
    let app = spawn_app().await;

    let body: Value = app.server.get("/api/people?limit=1000&page=0").await.json();
    assert_eq!(body["pagination"]["limit"], 100);
    assert_eq!(body["pagination"]["currentPage"], 1);
    assert_eq!(body["data"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn malformed_query_is_a_bad_request() {
    let app = spawn_app().await;

    let response = app.server.get("/api/people?page=first").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn person_lifecycle() {
    let app = spawn_app().await;
    let token = app.admin_token();

    let (name, value) = bearer(&token);
    let response = app
        .server
        .post("/api/people")
        .add_header(name, value)
        .json(&json!({
            "name": "Grace Hopper",
            "category": "Computing",
            "location": "Arlington, USA",
            "description": "Compiler pioneer",
            "email": "grace@navy.example.com",
            "linkedin": "https://linkedin.com/in/gracehopper",
            "skills": "COBOL"
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let created: Value = response.json();
    let id = created["data"]["id"].as_i64().unwrap();

    let (name, value) = bearer(&token);
    let updated: Value = app
        .server
        .put(&format!("/api/people/{}", id))
        .add_header(name, value)
        .json(&json!({ "position": "Rear Admiral", "skills": null }))
        .await
        .json();
    assert_eq!(updated["data"]["position"], "Rear Admiral");
    assert_eq!(updated["data"]["skills"], Value::Null);
    assert_eq!(updated["data"]["email"], "grace@navy.example.com");

    let (name, value) = bearer(&token);
    app.server
        .delete(&format!("/api/people/{}", id))
        .add_header(name, value)
        .await
        .assert_status_ok();

    app.server
        .get(&format!("/api/people/{}", id))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_rejects_malformed_email() {
    let app = spawn_app().await;
    let (name, value) = bearer(&app.admin_token());

    let response = app
        .server
        .post("/api/people")
        .add_header(name, value)
        .json(&json!({
            "name": "Nobody",
            "category": "Unknown",
            "location": "Nowhere",
            "description": "Nothing",
            "email": "nobody-at-nowhere"
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}
