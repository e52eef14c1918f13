use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use entity::{person, prelude::Person};
use sea_orm::{ActiveModelTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder};
use std::sync::Arc;

use crate::auth::AdminUser;
use crate::error::CadenzaError;
use crate::handlers::{Path, Query, ValidatedJson};
use crate::models::{
    person::{NewPerson, UpdatePerson},
    Envelope, Message,
};
use crate::pagination::{fetch_page, search_condition, ListQuery};
use crate::server::State;

const SEARCH_COLUMNS: [person::Column; 6] = [
    person::Column::Name,
    person::Column::Description,
    person::Column::Category,
    person::Column::Location,
    person::Column::Company,
    person::Column::Position,
];

pub(crate) fn routes() -> Router {
    Router::new()
        .route("/", get(list_people).post(create_person))
        .route(
            "/{id}",
            get(get_person).put(update_person).delete(delete_person),
        )
}

/// Handler for `GET /api/people`
pub(crate) async fn list_people(
    Extension(state): Extension<Arc<State>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Envelope<Vec<person::Model>>>, CadenzaError> {
    let mut select = Person::find().order_by_asc(person::Column::Name);
    if let Some(term) = query.search() {
        select = select.filter(search_condition(&SEARCH_COLUMNS, term));
    }

    let page = fetch_page(&state.db, select, &query).await?;
    Ok(Envelope::page(page))
}

/// Handler for `GET /api/people/{id}`
pub(crate) async fn get_person(
    Extension(state): Extension<Arc<State>>,
    Path(id): Path<i32>,
) -> Result<Json<Envelope<person::Model>>, CadenzaError> {
    let person = find_person(&state, id).await?;
    Ok(Envelope::data(person))
}

/// Handler for `POST /api/people`
pub(crate) async fn create_person(
    Extension(state): Extension<Arc<State>>,
    AdminUser(admin): AdminUser,
    ValidatedJson(input): ValidatedJson<NewPerson>,
) -> Result<impl IntoResponse, CadenzaError> {
    let person = input.into_active_model().insert(&state.db).await?;
    tracing::info!("Admin {} created person {}", admin.id, person.id);
    Ok((StatusCode::CREATED, Envelope::data(person)))
}

/// Handler for `PUT /api/people/{id}`
pub(crate) async fn update_person(
    Extension(state): Extension<Arc<State>>,
    AdminUser(_): AdminUser,
    Path(id): Path<i32>,
    ValidatedJson(changes): ValidatedJson<UpdatePerson>,
) -> Result<Json<Envelope<person::Model>>, CadenzaError> {
    let mut person: person::ActiveModel = find_person(&state, id).await?.into();
    changes.apply(&mut person);
    let person = person.update(&state.db).await?;
    Ok(Envelope::data(person))
}

/// Handler for `DELETE /api/people/{id}`
pub(crate) async fn delete_person(
    Extension(state): Extension<Arc<State>>,
    AdminUser(admin): AdminUser,
    Path(id): Path<i32>,
) -> Result<Json<Message>, CadenzaError> {
    let person = find_person(&state, id).await?;
    person.delete(&state.db).await?;
    tracing::info!("Admin {} deleted person {}", admin.id, id);
    Ok(Message::ok("Person deleted successfully"))
}

async fn find_person(state: &State, id: i32) -> Result<person::Model, CadenzaError> {
    Person::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(CadenzaError::NotFound("Person"))
}
