use axum::{extract::Extension, response::Redirect, routing::get, Router};
use entity::prelude::{Blog, Company, Person};
use sea_orm::EntityTrait;
use std::sync::Arc;

use crate::constants::{
    PLACEHOLDER_BLOG_IMAGE, PLACEHOLDER_COMPANY_IMAGE, PLACEHOLDER_PERSON_IMAGE,
};
use crate::error::CadenzaError;
use crate::handlers::Path;
use crate::server::State;

pub(crate) fn routes() -> Router {
    Router::new()
        .route("/blog/{id}", get(blog_image))
        .route("/person/{id}", get(person_image))
        .route("/company/{id}", get(company_image))
}

fn redirect(url: Option<String>, placeholder: &str) -> Redirect {
    match url.filter(|url| !url.is_empty()) {
        Some(url) => Redirect::temporary(&url),
        None => Redirect::temporary(placeholder),
    }
}

/// Handler for `GET /api/images/blog/{id}`
pub(crate) async fn blog_image(
    Extension(state): Extension<Arc<State>>,
    Path(id): Path<i32>,
) -> Result<Redirect, CadenzaError> {
    let url = Blog::find_by_id(id)
        .one(&state.db)
        .await?
        .and_then(|post| post.image_url);
    Ok(redirect(url, PLACEHOLDER_BLOG_IMAGE))
}

/// Handler for `GET /api/images/person/{id}`
pub(crate) async fn person_image(
    Extension(state): Extension<Arc<State>>,
    Path(id): Path<i32>,
) -> Result<Redirect, CadenzaError> {
    let url = Person::find_by_id(id)
        .one(&state.db)
        .await?
        .and_then(|person| person.avatar_url);
    Ok(redirect(url, PLACEHOLDER_PERSON_IMAGE))
}

/// Handler for `GET /api/images/company/{id}`
pub(crate) async fn company_image(
    Extension(state): Extension<Arc<State>>,
    Path(id): Path<i32>,
) -> Result<Redirect, CadenzaError> {
    let url = Company::find_by_id(id)
        .one(&state.db)
        .await?
        .and_then(|company| company.logo_url);
    Ok(redirect(url, PLACEHOLDER_COMPANY_IMAGE))
}
