use anyhow::{Context, Result};
use axum::{
    http::{header, HeaderValue, Method},
    Extension, Router,
};
use sea_orm::DatabaseConnection;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::auth::TokenKeys;
use crate::config::Config;
use crate::error::CadenzaError;
use crate::handlers;
use crate::oauth::{OAuthProvider, OAuthStates, OidcProvider, Provider};
use crate::{db, seed};

/// Shared application state, reachable from every handler through `Extension<Arc<State>>`.
#[derive(Clone)]
pub struct State {
    pub config: Config,
    pub db: DatabaseConnection,
    pub tokens: TokenKeys,
    pub oauth_states: Arc<OAuthStates>,
    providers: HashMap<Provider, Arc<dyn OAuthProvider>>,
}

impl State {
    /// Build the state, enabling every OAuth provider that has credentials configured.
    pub fn new(config: Config, db: DatabaseConnection) -> State {
        let tokens = TokenKeys::new(&config.jwt_secret, config.token_ttl_hours);
        let mut state = State {
            tokens,
            db,
            oauth_states: Arc::new(OAuthStates::default()),
            providers: HashMap::new(),
            config,
        };

        if let Some(credentials) = state.config.google.clone() {
            state = state.with_provider(Arc::new(OidcProvider::google(credentials)));
        }
        if let Some(credentials) = state.config.linkedin.clone() {
            state = state.with_provider(Arc::new(OidcProvider::linkedin(credentials)));
        }
        state
    }

    /// Register (or replace) the client used for one provider.
    pub fn with_provider(mut self, client: Arc<dyn OAuthProvider>) -> State {
        self.providers.insert(client.provider(), client);
        self
    }

    pub fn provider(&self, provider: Provider) -> Option<Arc<dyn OAuthProvider>> {
        self.providers.get(&provider).cloned()
    }
}

/// Build the application router.
pub fn router(state: Arc<State>) -> Result<Router> {
    let api = Router::new()
        .nest("/auth", handlers::auth::routes())
        .nest("/users", handlers::user::routes())
        .nest("/companies", handlers::company::routes())
        .nest("/people", handlers::person::routes())
        .nest("/blogs", handlers::blog::routes())
        .nest("/images", handlers::image::routes())
        .fallback(|| async { CadenzaError::NotFound("Route") });

    let mut app = Router::new()
        .nest("/api", api)
        .nest_service("/images", ServeDir::new(&state.config.static_dir));

    // serve the built frontend, letting its router handle unknown paths
    if let Some(dir) = &state.config.frontend_dir {
        let index = ServeFile::new(dir.join("index.html"));
        app = app.fallback_service(ServeDir::new(dir).not_found_service(index));
    }

    let origin = HeaderValue::from_str(&state.config.frontend_url)
        .with_context(|| format!("FRONTEND_URL is not a valid origin: {}", state.config.frontend_url))?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT]);

    Ok(app
        .layer(Extension(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http()))
}

/// Run the server.
pub async fn run() -> Result<()> {
    let config = Config::from_env()?;

    let db = db::connect(&config.database)
        .await
        .context("could not connect to the database")?;
    db::sync_schema(&db, config.reset_database)
        .await
        .context("could not synchronize the database schema")?;

    let seeded = if config.seed_database {
        seed::seed_database(&db, &config).await
    } else {
        seed::ensure_admin(&db, &config.allowed_email_domain)
            .await
            .map(|_| ())
    };
    if let Err(e) = seeded {
        tracing::warn!("Seeding the database failed: {:#}", e);
    }

    let addr = config.addr.clone();
    let app = router(Arc::new(State::new(config, db)))?;

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("could not bind to {}", addr))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Could not listen for the shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
