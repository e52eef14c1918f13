mod common;

use axum::http::StatusCode;
use common::{bearer, spawn_app};
use serde_json::{json, Value};

fn new_company() -> Value {
    json!({
        "name": "Acme Rockets",
        "category": "Aerospace",
        "location": "Mojave, USA",
        "description": "Reusable launch vehicles",
        "website": "https://acme.example.com",
        "founded_year": 2021,
        "notes": "Met at demo day"
    })
}

#[tokio::test]
async fn list_paginates_seeded_companies() {
    let app = spawn_app().await;

    let response = app.server.get("/api/companies?page=1&limit=10").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"].as_array().unwrap().len(), 5);
    assert_eq!(
        body["pagination"],
        json!({ "total": 5, "totalPages": 1, "currentPage": 1, "limit": 10 })
    );

    let response = app.server.get("/api/companies?page=3&limit=2").await;
    let body: Value = response.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["pagination"]["totalPages"], 3);
    assert_eq!(body["pagination"]["currentPage"], 3);
}

#[tokio::test]
async fn list_is_ordered_by_name() {
    let app = spawn_app().await;

    let body: Value = app.server.get("/api/companies").await.json();
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|company| company["name"].as_str().unwrap())
        .collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
}

#[tokio::test]
async fn search_is_case_insensitive() {
    let app = spawn_app().await;

    let body: Value = app.server.get("/api/companies?search=ROBOT").await.json();
    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "NextGen Robotics");
    assert_eq!(body["pagination"]["total"], 1);

    let body: Value = app
        .server
        .get("/api/companies?search=no-such-company")
        .await
        .json();
    assert!(body["data"].as_array().unwrap().is_empty());
    assert_eq!(body["pagination"]["totalPages"], 0);
}

#[tokio::test]
async fn missing_company_is_not_found() {
    let app = spawn_app().await;

    let response = app.server.get("/api/companies/9999").await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["message"], "Company not found");
}

#[tokio::test]
async fn mutations_require_an_admin() {
    let app = spawn_app().await;

    let response = app.server.post("/api/companies").json(&new_company()).await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    let (name, value) = bearer(&app.user_token().await);
    let response = app
        .server
        .post("/api/companies")
        .add_header(name, value)
        .json(&new_company())
        .await;
    response.assert_status(StatusCode::FORBIDDEN);
    let body: Value = response.json();
    assert_eq!(body["message"], "Admin access required");
}

#[tokio::test]
async fn admin_creates_a_company() {
    let app = spawn_app().await;
    let (name, value) = bearer(&app.admin_token());

    let response = app
        .server
        .post("/api/companies")
        .add_header(name, value)
        .json(&new_company())
        .await;
    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["data"]["name"], "Acme Rockets");
    assert_eq!(body["data"]["verified"], false);

    let id = body["data"]["id"].as_i64().unwrap();
    let body: Value = app
        .server
        .get(&format!("/api/companies/{}", id))
        .await
        .json();
    assert_eq!(body["data"]["website"], "https://acme.example.com");
}

#[tokio::test]
async fn create_validates_input() {
    let app = spawn_app().await;
    let (name, value) = bearer(&app.admin_token());

    let mut company = new_company();
    company["name"] = json!("");
    company["website"] = json!("not a url");
    let response = app
        .server
        .post("/api/companies")
        .add_header(name, value)
        .json(&company)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Input validation error"));
}

#[tokio::test]
async fn partial_update_leaves_other_fields_alone() {
    let app = spawn_app().await;
    let token = app.admin_token();

    let (name, value) = bearer(&token);
    let created: Value = app
        .server
        .post("/api/companies")
        .add_header(name, value)
        .json(&new_company())
        .await
        .json();
    let id = created["data"]["id"].as_i64().unwrap();

    let (name, value) = bearer(&token);
    let response = app
        .server
        .put(&format!("/api/companies/{}", id))
        .add_header(name, value)
        .json(&json!({ "name": "Acme Orbital", "notes": null }))
        .await;
    response.assert_status_ok();
    let updated: Value = response.json();

    assert_eq!(updated["data"]["name"], "Acme Orbital");
    assert_eq!(updated["data"]["notes"], Value::Null);
    for field in ["category", "location", "description", "website", "founded_year"] {
        assert_eq!(updated["data"][field], created["data"][field], "{}", field);
    }
}

#[tokio::test]
async fn update_of_missing_company_is_not_found() {
    let app = spawn_app().await;
    let (name, value) = bearer(&app.admin_token());

    let response = app
        .server
        .put("/api/companies/9999")
        .add_header(name, value)
        .json(&json!({ "name": "Ghost" }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_removes_the_company() {
    let app = spawn_app().await;
    let token = app.admin_token();

    let (name, value) = bearer(&token);
    let response = app
        .server
        .delete("/api/companies/9999")
        .add_header(name, value)
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    let body: Value = app.server.get("/api/companies?limit=1").await.json();
    let id = body["data"][0]["id"].as_i64().unwrap();

    let (name, value) = bearer(&token);
    let response = app
        .server
        .delete(&format!("/api/companies/{}", id))
        .add_header(name, value)
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);

    let response = app.server.get(&format!("/api/companies/{}", id)).await;
    response.assert_status(StatusCode::NOT_FOUND);

    let body: Value = app.server.get("/api/companies").await.json();
    assert_eq!(body["pagination"]["total"], 4);
}

#[tokio::test]
async fn page_far_past_the_end_is_empty() {
    let app = spawn_app().await;

    for query in [
        "page=18446744073709551615&limit=10",
        "page=100000000000000000&limit=100",
    ] {
        let response = app.server.get(&format!("/api/companies?{}", query)).await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert!(body["data"].as_array().unwrap().is_empty());
        assert_eq!(body["pagination"]["total"], 5);
    }
}
