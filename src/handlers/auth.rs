use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Redirect},
    routing::{get, post},
    Json, Router,
};
use entity::{prelude::User, user};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

use crate::auth::{email_allowed, normalize_email};
use crate::constants::LOCAL_PROVIDER;
use crate::error::CadenzaError;
use crate::handlers::{Path, Query};
use crate::models::user::{AuthResponse, LoginInput, RegisterInput, TokenQuery};
use crate::oauth::{sign_in, OAuthError, Provider};
use crate::server::State;
use crate::utils::pass::{check_password, hash_password, PasswordCheck};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

pub(crate) fn routes() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/login-success", get(login_success))
        .route("/{provider}", get(begin_oauth))
        .route("/{provider}/callback", get(oauth_callback))
}

/// Handler for `POST /api/auth/register`
pub(crate) async fn register(
    Extension(state): Extension<Arc<State>>,
    Json(input): Json<RegisterInput>,
) -> Result<impl IntoResponse, CadenzaError> {
    if !input.is_complete() {
        return Err(CadenzaError::BadRequest("All fields are required".into()));
    }
    input.validate()?;

    let email = normalize_email(&input.email);
    let domain = &state.config.allowed_email_domain;
    if !email_allowed(&email, domain) {
        return Err(CadenzaError::BadRequest(format!(
            "Only {} addresses are allowed",
            domain
        )));
    }

    let conflict = User::find()
        .filter(user::Column::Email.eq(email.as_str()))
        .one(&state.db)
        .await?;
    if conflict.is_some() {
        return Err(CadenzaError::BadRequest("User already exists".into()));
    }

    let user = user::ActiveModel {
        full_name: Set(input.full_name.trim().to_owned()),
        email: Set(email),
        password: Set(Some(hash_password(&input.password)?)),
        is_cadenza: Set(false),
        is_admin: Set(false),
        auth_provider: Set(Some(LOCAL_PROVIDER.to_owned())),
        auth_provider_id: Set(None),
        profile_picture: Set(None),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;
    tracing::info!("Registered user {}", user.id);

    let token = state.tokens.issue(user.id)?;
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: user.into(),
        }),
    ))
}

/// Handler for `POST /api/auth/login`
pub(crate) async fn login(
    Extension(state): Extension<Arc<State>>,
    Json(input): Json<LoginInput>,
) -> Result<Json<AuthResponse>, CadenzaError> {
    let email = normalize_email(&input.email);
    if email.is_empty() || input.password.is_empty() {
        return Err(CadenzaError::BadRequest(
            "Email and password are required".into(),
        ));
    }

    let user = User::find()
        .filter(user::Column::Email.eq(email.as_str()))
        .one(&state.db)
        .await?
        .ok_or(CadenzaError::Unauthenticated(INVALID_CREDENTIALS))?;

    // accounts created through an OAuth provider have no password
    let stored = user
        .password
        .as_deref()
        .ok_or(CadenzaError::Unauthenticated(INVALID_CREDENTIALS))?;

    let user = match check_password(stored, &input.password) {
        PasswordCheck::Invalid => {
            return Err(CadenzaError::Unauthenticated(INVALID_CREDENTIALS));
        }
        PasswordCheck::Valid => user,
        PasswordCheck::ValidOutdated => {
            tracing::debug!("Re-hashing outdated password of user {}", user.id);
            let mut outdated: user::ActiveModel = user.into();
            outdated.password = Set(Some(hash_password(&input.password)?));
            outdated.update(&state.db).await?
        }
    };

    let token = state.tokens.issue(user.id)?;
    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

/// Handler for `GET /api/auth/login-success`
///
/// Trades the token handed to the frontend after an OAuth sign-in for the full session payload.
pub(crate) async fn login_success(
    Extension(state): Extension<Arc<State>>,
    Query(query): Query<TokenQuery>,
) -> Result<Json<AuthResponse>, CadenzaError> {
    let token = query
        .token
        .filter(|token| !token.is_empty())
        .ok_or_else(|| CadenzaError::BadRequest("No token provided".into()))?;

    let claims = state
        .tokens
        .verify(&token)
        .map_err(|_| CadenzaError::Unauthenticated("Invalid token"))?;

    let user = User::find_by_id(claims.user_id)
        .one(&state.db)
        .await?
        .ok_or(CadenzaError::NotFound("User"))?;

    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

/// Query parameters a provider redirects back with.
#[derive(Debug, Deserialize)]
pub(crate) struct OAuthCallbackQuery {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
}

/// Handler for `GET /api/auth/{provider}`
pub(crate) async fn begin_oauth(
    Extension(state): Extension<Arc<State>>,
    Path(provider): Path<Provider>,
) -> Redirect {
    let url = match state.provider(provider) {
        Some(client) => {
            let key = state.oauth_states.issue(provider).await;
            client.authorization_url(&key)
        }
        None => Err(OAuthError::NotConfigured),
    };

    match url {
        Ok(url) => Redirect::to(&url),
        Err(e) => {
            tracing::warn!("Could not start {} sign-in: {}", provider, e);
            Redirect::to(&failure_url(&state, provider))
        }
    }
}

/// Handler for `GET /api/auth/{provider}/callback`
pub(crate) async fn oauth_callback(
    Extension(state): Extension<Arc<State>>,
    Path(provider): Path<Provider>,
    Query(query): Query<OAuthCallbackQuery>,
) -> Redirect {
    match complete_oauth(&state, provider, query).await {
        Ok(token) => Redirect::to(&format!(
            "{}/login-success?token={}",
            state.config.frontend_url, token
        )),
        Err(e) => {
            tracing::warn!("{} sign-in failed: {}", provider, e);
            Redirect::to(&failure_url(&state, provider))
        }
    }
}

async fn complete_oauth(
    state: &State,
    provider: Provider,
    query: OAuthCallbackQuery,
) -> Result<String, OAuthError> {
    let client = state.provider(provider).ok_or(OAuthError::NotConfigured)?;

    let key = query.state.ok_or(OAuthError::InvalidState)?;
    if !state.oauth_states.consume(&key, provider).await {
        return Err(OAuthError::InvalidState);
    }
    if let Some(error) = query.error {
        return Err(OAuthError::Denied(error));
    }
    let code = query.code.ok_or(OAuthError::MissingCode)?;

    let profile = client.fetch_profile(&code).await?;
    let user = sign_in(
        &state.db,
        provider,
        profile,
        &state.config.allowed_email_domain,
    )
    .await?;

    Ok(state.tokens.issue(user.id)?)
}

fn failure_url(state: &State, provider: Provider) -> String {
    format!(
        "{}/login?error={}_auth_failed",
        state.config.frontend_url, provider
    )
}
