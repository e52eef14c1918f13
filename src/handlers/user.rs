use axum::{
    extract::Extension,
    routing::{get, put},
    Json, Router,
};
use entity::{
    blog,
    prelude::{Blog, User},
    user,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use serde_json::Value;
use std::sync::Arc;

use crate::auth::{AdminUser, AuthUser};
use crate::error::CadenzaError;
use crate::handlers::{Path, Query};
use crate::models::{
    user::{AdminStatusInput, CadenzaStatusInput, UserResponse},
    Envelope, Message,
};
use crate::pagination::{fetch_page, search_condition, ListQuery};
use crate::server::State;

const SEARCH_COLUMNS: [user::Column; 2] = [user::Column::FullName, user::Column::Email];

pub(crate) fn routes() -> Router {
    Router::new()
        .route("/me", get(get_me))
        .route("/all", get(list_users))
        .route("/{id}", get(get_user).delete(delete_user))
        .route("/{id}/admin-status", put(update_admin_status))
        .route("/{id}/cadenza-status", put(update_cadenza_status))
}

/// Handler for `GET /api/users/me`
pub(crate) async fn get_me(
    AuthUser(user): AuthUser,
) -> Result<Json<Envelope<UserResponse>>, CadenzaError> {
    Ok(Envelope::data(user.into()))
}

/// Handler for `GET /api/users/all`
pub(crate) async fn list_users(
    Extension(state): Extension<Arc<State>>,
    AdminUser(_): AdminUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<Envelope<Vec<UserResponse>>>, CadenzaError> {
    let mut select = User::find().order_by_desc(user::Column::CreatedAt);
    if let Some(term) = query.search() {
        select = select.filter(search_condition(&SEARCH_COLUMNS, term));
    }

    let page = fetch_page(&state.db, select, &query).await?;
    Ok(Envelope::page(page.map(UserResponse::from)))
}

/// Handler for `GET /api/users/{id}`
pub(crate) async fn get_user(
    Extension(state): Extension<Arc<State>>,
    AdminUser(_): AdminUser,
    Path(id): Path<i32>,
) -> Result<Json<Envelope<UserResponse>>, CadenzaError> {
    let user = find_user(&state, id).await?;
    Ok(Envelope::data(user.into()))
}

/// Handler for `PUT /api/users/{id}/admin-status`
pub(crate) async fn update_admin_status(
    Extension(state): Extension<Arc<State>>,
    AdminUser(admin): AdminUser,
    Path(id): Path<i32>,
    Json(input): Json<AdminStatusInput>,
) -> Result<Json<Envelope<UserResponse>>, CadenzaError> {
    let is_admin = require_bool(&input.is_admin, "is_admin")?;
    let mut user: user::ActiveModel = find_user(&state, id).await?.into();
    user.is_admin = Set(is_admin);
    let user = user.update(&state.db).await?;
    tracing::info!("Admin {} set is_admin={} on user {}", admin.id, is_admin, id);
    Ok(Envelope::data(user.into()))
}

/// Handler for `PUT /api/users/{id}/cadenza-status`
pub(crate) async fn update_cadenza_status(
    Extension(state): Extension<Arc<State>>,
    AdminUser(admin): AdminUser,
    Path(id): Path<i32>,
    Json(input): Json<CadenzaStatusInput>,
) -> Result<Json<Envelope<UserResponse>>, CadenzaError> {
    let is_cadenza = require_bool(&input.is_cadenza, "is_cadenza")?;
    let mut user: user::ActiveModel = find_user(&state, id).await?.into();
    user.is_cadenza = Set(is_cadenza);
    let user = user.update(&state.db).await?;
    tracing::info!(
        "Admin {} set is_cadenza={} on user {}",
        admin.id,
        is_cadenza,
        id
    );
    Ok(Envelope::data(user.into()))
}

/// Handler for `DELETE /api/users/{id}`
///
/// Posts written by the user go with it.
pub(crate) async fn delete_user(
    Extension(state): Extension<Arc<State>>,
    AdminUser(admin): AdminUser,
    Path(id): Path<i32>,
) -> Result<Json<Message>, CadenzaError> {
    if admin.id == id {
        return Err(CadenzaError::BadRequest(
            "You cannot delete your own account".into(),
        ));
    }
    let user = find_user(&state, id).await?;

    let txn = state.db.begin().await?;
    let posts = Blog::delete_many()
        .filter(blog::Column::AuthorId.eq(id))
        .exec(&txn)
        .await?;
    user.delete(&txn).await?;
    txn.commit().await?;

    tracing::info!(
        "Admin {} deleted user {} and {} of their posts",
        admin.id,
        id,
        posts.rows_affected
    );
    Ok(Message::ok("User deleted successfully"))
}

async fn find_user(state: &State, id: i32) -> Result<user::Model, CadenzaError> {
    User::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(CadenzaError::NotFound("User"))
}

fn require_bool(value: &Value, field: &str) -> Result<bool, CadenzaError> {
    value
        .as_bool()
        .ok_or_else(|| CadenzaError::BadRequest(format!("{} must be a boolean value", field)))
}
