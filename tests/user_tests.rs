mod common;

use axum::http::StatusCode;
use common::{bearer, spawn_app, ADMIN_EMAIL};
use serde_json::{json, Value};

#[tokio::test]
async fn me_returns_own_profile() {
    let app = spawn_app().await;
    let (name, value) = bearer(&app.admin_token());

    let response = app.server.get("/api/users/me").add_header(name, value).await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["email"], ADMIN_EMAIL);
    assert!(body["data"].get("password").is_none());
}

#[tokio::test]
async fn listing_users_is_admin_only() {
    let app = spawn_app().await;
    let user_token = app.user_token().await;

    let (name, value) = bearer(&user_token);
    app.server
        .get("/api/users/all")
        .add_header(name, value)
        .await
        .assert_status(StatusCode::FORBIDDEN);

    let (name, value) = bearer(&app.admin_token());
    let body: Value = app
        .server
        .get("/api/users/all?search=REGULAR")
        .add_header(name, value)
        .await
        .json();
    assert_eq!(body["pagination"]["total"], 1);
    assert_eq!(body["data"][0]["email"], "regular@gmail.com");
    assert!(body["data"][0].get("password").is_none());
}

#[tokio::test]
async fn admin_status_must_be_boolean() {
    let app = spawn_app().await;
    let body = app.register("Ada", "ada@gmail.com", "analytical1").await;
    let id = body["user"]["id"].as_i64().unwrap();
    let token = app.admin_token();

    let (name, value) = bearer(&token);
    let response = app
        .server
        .put(&format!("/api/users/{}/admin-status", id))
        .add_header(name, value)
        .json(&json!({ "is_admin": "yes" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], "is_admin must be a boolean value");

    let (name, value) = bearer(&token);
    let response = app
        .server
        .put(&format!("/api/users/{}/admin-status", id))
        .add_header(name, value)
        .json(&json!({ "is_admin": true }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["is_admin"], true);

    let (name, value) = bearer(&token);
    app.server
        .put("/api/users/9999/admin-status")
        .add_header(name, value)
        .json(&json!({ "is_admin": true }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn promoted_user_gains_admin_access() {
    let app = spawn_app().await;
    let body = app.register("Ada", "ada@gmail.com", "analytical1").await;
    let id = body["user"]["id"].as_i64().unwrap();
    let ada_token = body["token"].as_str().unwrap().to_owned();

    let (name, value) = bearer(&app.admin_token());
    app.server
        .put(&format!("/api/users/{}/admin-status", id))
        .add_header(name, value)
        .json(&json!({ "is_admin": true }))
        .await
        .assert_status_ok();

    let (name, value) = bearer(&ada_token);
    app.server
        .get("/api/users/all")
        .add_header(name, value)
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn cadenza_status_toggles() {
    let app = spawn_app().await;
    let body = app.register("Ada", "ada@gmail.com", "analytical1").await;
    let id = body["user"]["id"].as_i64().unwrap();
    let token = app.admin_token();

    let (name, value) = bearer(&token);
    app.server
        .put(&format!("/api/users/{}/cadenza-status", id))
        .add_header(name, value)
        .json(&json!({}))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let (name, value) = bearer(&token);
    let body: Value = app
        .server
        .put(&format!("/api/users/{}/cadenza-status", id))
        .add_header(name, value)
        .json(&json!({ "is_cadenza": true }))
        .await
        .json();
    assert_eq!(body["data"]["is_cadenza"], true);

    let (name, value) = bearer(&token);
    let body: Value = app
        .server
        .get(&format!("/api/users/{}", id))
        .add_header(name, value)
        .await
        .json();
    assert_eq!(body["data"]["is_cadenza"], true);
    assert_eq!(body["data"]["is_admin"], false);
}

#[tokio::test]
async fn admin_cannot_delete_themself() {
    let app = spawn_app().await;
    let (name, value) = bearer(&app.admin_token());

    let response = app
        .server
        .delete(&format!("/api/users/{}", app.admin.id))
        .add_header(name, value)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn deleting_a_user_removes_their_posts() {
    let app = spawn_app().await;
    let body = app.register("Ada", "ada@gmail.com", "analytical1").await;
    let id = body["user"]["id"].as_i64().unwrap();
    let token = app.admin_token();

    // make Ada an admin so she can write a post
    let (name, value) = bearer(&token);
    app.server
        .put(&format!("/api/users/{}/admin-status", id))
        .add_header(name, value)
        .json(&json!({ "is_admin": true }))
        .await
        .assert_status_ok();

    let (name, value) = bearer(body["token"].as_str().unwrap());
    let post: Value = app
        .server
        .post("/api/blogs")
        .add_header(name, value)
        .json(&json!({
            "title": "Ada's notes",
            "content": "On the engine",
            "summary": "Notes",
            "published": true
        }))
        .await
        .json();
    let post_id = post["data"]["id"].as_i64().unwrap();

    let (name, value) = bearer(&token);
    app.server
        .delete(&format!("/api/users/{}", id))
        .add_header(name, value)
        .await
        .assert_status_ok();

    let (name, value) = bearer(&token);
    app.server
        .get(&format!("/api/users/{}", id))
        .add_header(name, value)
        .await
        .assert_status(StatusCode::NOT_FOUND);
    app.server
        .get(&format!("/api/blogs/{}", post_id))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
