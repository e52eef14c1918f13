use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};
use entity::{
    blog,
    prelude::{Blog, User},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Select, Set,
};
use std::sync::Arc;

use crate::auth::AdminUser;
use crate::error::CadenzaError;
use crate::handlers::{Path, Query, ValidatedJson};
use crate::models::{
    blog::{BlogResponse, NewBlog, UpdateBlog},
    Envelope, Message,
};
use crate::pagination::{fetch_page, search_condition, ListQuery};
use crate::server::State;

const SEARCH_COLUMNS: [blog::Column; 5] = [
    blog::Column::Title,
    blog::Column::Summary,
    blog::Column::Content,
    blog::Column::Category,
    blog::Column::Tags,
];

pub(crate) fn routes() -> Router {
    Router::new()
        .route("/", get(list_blogs).post(create_blog))
        .route("/pinned", get(list_pinned_blogs))
        .route("/category/{category}", get(list_blogs_by_category))
        .route("/admin/all", get(list_all_blogs))
        .route("/{id}", get(get_blog).put(update_blog).delete(delete_blog))
        .route("/{id}/pin", put(toggle_pin))
}

/// Published posts, newest first.
fn published() -> Select<Blog> {
    Blog::find()
        .filter(blog::Column::Published.eq(true))
        .order_by_desc(blog::Column::PublishDate)
        .order_by_desc(blog::Column::CreatedAt)
}

fn searched(select: Select<Blog>, query: &ListQuery) -> Select<Blog> {
    match query.search() {
        Some(term) => select.filter(search_condition(&SEARCH_COLUMNS, term)),
        None => select,
    }
}

async fn paginated(
    state: &State,
    select: Select<Blog>,
    query: &ListQuery,
) -> Result<Json<Envelope<Vec<BlogResponse>>>, CadenzaError> {
    let page = fetch_page(&state.db, select.find_also_related(User), query).await?;
    Ok(Envelope::page(page.map(BlogResponse::from)))
}

/// Handler for `GET /api/blogs`
pub(crate) async fn list_blogs(
    Extension(state): Extension<Arc<State>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Envelope<Vec<BlogResponse>>>, CadenzaError> {
    paginated(&state, searched(published(), &query), &query).await
}

/// Handler for `GET /api/blogs/pinned`
pub(crate) async fn list_pinned_blogs(
    Extension(state): Extension<Arc<State>>,
) -> Result<Json<Envelope<Vec<BlogResponse>>>, CadenzaError> {
    let posts = published()
        .filter(blog::Column::Pinned.eq(true))
        .find_also_related(User)
        .all(&state.db)
        .await?;
    Ok(Envelope::data(
        posts.into_iter().map(BlogResponse::from).collect(),
    ))
}

/// Handler for `GET /api/blogs/category/{category}`
pub(crate) async fn list_blogs_by_category(
    Extension(state): Extension<Arc<State>>,
    Path(category): Path<String>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Envelope<Vec<BlogResponse>>>, CadenzaError> {
    let select = published().filter(blog::Column::Category.eq(category));
    paginated(&state, select, &query).await
}

/// Handler for `GET /api/blogs/admin/all`
///
/// Includes drafts.
pub(crate) async fn list_all_blogs(
    Extension(state): Extension<Arc<State>>,
    AdminUser(_): AdminUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<Envelope<Vec<BlogResponse>>>, CadenzaError> {
    let select = Blog::find().order_by_desc(blog::Column::CreatedAt);
    paginated(&state, searched(select, &query), &query).await
}

/// Handler for `GET /api/blogs/{id}`
pub(crate) async fn get_blog(
    Extension(state): Extension<Arc<State>>,
    Path(id): Path<i32>,
) -> Result<Json<Envelope<BlogResponse>>, CadenzaError> {
    let post = Blog::find_by_id(id)
        .find_also_related(User)
        .one(&state.db)
        .await?
        .ok_or(CadenzaError::NotFound("Blog post"))?;
    Ok(Envelope::data(post.into()))
}

/// Handler for `POST /api/blogs`
pub(crate) async fn create_blog(
    Extension(state): Extension<Arc<State>>,
    AdminUser(author): AdminUser,
    ValidatedJson(input): ValidatedJson<NewBlog>,
) -> Result<impl IntoResponse, CadenzaError> {
    let post = input
        .into_active_model(author.id)
        .insert(&state.db)
        .await?;
    tracing::info!("User {} created blog post {}", author.id, post.id);
    Ok((
        StatusCode::CREATED,
        Envelope::data(BlogResponse::from((post, Some(author)))),
    ))
}

/// Handler for `PUT /api/blogs/{id}`
pub(crate) async fn update_blog(
    Extension(state): Extension<Arc<State>>,
    AdminUser(_): AdminUser,
    Path(id): Path<i32>,
    ValidatedJson(changes): ValidatedJson<UpdateBlog>,
) -> Result<Json<Envelope<BlogResponse>>, CadenzaError> {
    let post = find_blog(&state, id).await?;
    let post = changes.apply(post).update(&state.db).await?;
    with_author(&state, post).await
}

/// Handler for `PUT /api/blogs/{id}/pin`
pub(crate) async fn toggle_pin(
    Extension(state): Extension<Arc<State>>,
    AdminUser(_): AdminUser,
    Path(id): Path<i32>,
) -> Result<Json<Envelope<BlogResponse>>, CadenzaError> {
    let post = find_blog(&state, id).await?;
    let pinned = !post.pinned;
    let mut post: blog::ActiveModel = post.into();
    post.pinned = Set(pinned);
    let post = post.update(&state.db).await?;
    with_author(&state, post).await
}

/// Handler for `DELETE /api/blogs/{id}`
pub(crate) async fn delete_blog(
    Extension(state): Extension<Arc<State>>,
    AdminUser(admin): AdminUser,
    Path(id): Path<i32>,
) -> Result<Json<Message>, CadenzaError> {
    let post = find_blog(&state, id).await?;
    post.delete(&state.db).await?;
    tracing::info!("User {} deleted blog post {}", admin.id, id);
    Ok(Message::ok("Blog post deleted successfully"))
}

async fn find_blog(state: &State, id: i32) -> Result<blog::Model, CadenzaError> {
    Blog::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(CadenzaError::NotFound("Blog post"))
}

async fn with_author(
    state: &State,
    post: blog::Model,
) -> Result<Json<Envelope<BlogResponse>>, CadenzaError> {
    let author = post.find_related(User).one(&state.db).await?;
    Ok(Envelope::data(BlogResponse::from((post, author))))
}
