use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use entity::{company, prelude::Company};
use sea_orm::{ActiveModelTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder};
use std::sync::Arc;

use crate::auth::AdminUser;
use crate::error::CadenzaError;
use crate::handlers::{Path, Query, ValidatedJson};
use crate::models::{
    company::{NewCompany, UpdateCompany},
    Envelope, Message,
};
use crate::pagination::{fetch_page, search_condition, ListQuery};
use crate::server::State;

const SEARCH_COLUMNS: [company::Column; 4] = [
    company::Column::Name,
    company::Column::Description,
    company::Column::Category,
    company::Column::Location,
];

pub(crate) fn routes() -> Router {
    Router::new()
        .route("/", get(list_companies).post(create_company))
        .route(
            "/{id}",
            get(get_company).put(update_company).delete(delete_company),
        )
}

/// Handler for `GET /api/companies`
pub(crate) async fn list_companies(
    Extension(state): Extension<Arc<State>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Envelope<Vec<company::Model>>>, CadenzaError> {
    let mut select = Company::find().order_by_asc(company::Column::Name);
    if let Some(term) = query.search() {
        select = select.filter(search_condition(&SEARCH_COLUMNS, term));
    }

    let page = fetch_page(&state.db, select, &query).await?;
    Ok(Envelope::page(page))
}

/// Handler for `GET /api/companies/{id}`
pub(crate) async fn get_company(
    Extension(state): Extension<Arc<State>>,
    Path(id): Path<i32>,
) -> Result<Json<Envelope<company::Model>>, CadenzaError> {
    let company = find_company(&state, id).await?;
    Ok(Envelope::data(company))
}

/// Handler for `POST /api/companies`
pub(crate) async fn create_company(
    Extension(state): Extension<Arc<State>>,
    AdminUser(admin): AdminUser,
    ValidatedJson(input): ValidatedJson<NewCompany>,
) -> Result<impl IntoResponse, CadenzaError> {
    let company = input.into_active_model().insert(&state.db).await?;
    tracing::info!("Admin {} created company {}", admin.id, company.id);
    Ok((StatusCode::CREATED, Envelope::data(company)))
}

/// Handler for `PUT /api/companies/{id}`
pub(crate) async fn update_company(
    Extension(state): Extension<Arc<State>>,
    AdminUser(_): AdminUser,
    Path(id): Path<i32>,
    ValidatedJson(changes): ValidatedJson<UpdateCompany>,
) -> Result<Json<Envelope<company::Model>>, CadenzaError> {
    let mut company: company::ActiveModel = find_company(&state, id).await?.into();
    changes.apply(&mut company);
    let company = company.update(&state.db).await?;
    Ok(Envelope::data(company))
}

/// Handler for `DELETE /api/companies/{id}`
pub(crate) async fn delete_company(
    Extension(state): Extension<Arc<State>>,
    AdminUser(admin): AdminUser,
    Path(id): Path<i32>,
) -> Result<Json<Message>, CadenzaError> {
    let company = find_company(&state, id).await?;
    company.delete(&state.db).await?;
    tracing::info!("Admin {} deleted company {}", admin.id, id);
    Ok(Message::ok("Company deleted successfully"))
}

async fn find_company(state: &State, id: i32) -> Result<company::Model, CadenzaError> {
    Company::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(CadenzaError::NotFound("Company"))
}
