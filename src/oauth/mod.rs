//! Sign-in through third-party OAuth providers.

use async_trait::async_trait;
use entity::{prelude::User, user};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

use crate::auth::{email_allowed, normalize_email};

mod oidc;
mod state;

pub use oidc::OidcProvider;
pub use state::OAuthStates;

/// A supported OAuth provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Google,
    Linkedin,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Google => "google",
            Provider::Linkedin => "linkedin",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a provider tells us about the person signing in.
#[derive(Debug, Clone, Default)]
pub struct OAuthProfile {
    /// The provider's stable id for the account (OpenID `sub`).
    pub provider_id: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub picture: Option<String>,
}

/// A provider's half of the authorization code flow.
#[async_trait]
pub trait OAuthProvider: Send + Sync {
    fn provider(&self) -> Provider;

    /// The URL the browser is sent to in order to sign in.
    fn authorization_url(&self, state: &str) -> Result<String, OAuthError>;

    /// Exchange an authorization code for the signed-in account's profile.
    async fn fetch_profile(&self, code: &str) -> Result<OAuthProfile, OAuthError>;
}

#[derive(Debug, Error)]
pub enum OAuthError {
    #[error("provider is not configured")]
    NotConfigured,

    #[error("state is unknown, expired or was issued for another provider")]
    InvalidState,

    #[error("provider denied the request: {0}")]
    Denied(String),

    #[error("callback carries no authorization code")]
    MissingCode,

    #[error("profile carries no email address")]
    MissingEmail,

    #[error("email domain is not allowed")]
    EmailNotAllowed,

    #[error("email is registered with another sign-in method")]
    ProviderMismatch,

    #[error("invalid provider configuration: {0}")]
    Configuration(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Db(#[from] sea_orm::DbErr),

    #[error(transparent)]
    Session(#[from] crate::error::CadenzaError),
}

/// Map a provider profile onto a local user, creating it on first sign-in.
pub async fn sign_in(
    db: &DatabaseConnection,
    provider: Provider,
    profile: OAuthProfile,
    allowed_domain: &str,
) -> Result<user::Model, OAuthError> {
    let email = profile
        .email
        .as_deref()
        .map(normalize_email)
        .filter(|email| !email.is_empty())
        .ok_or(OAuthError::MissingEmail)?;
    if !email_allowed(&email, allowed_domain) {
        return Err(OAuthError::EmailNotAllowed);
    }

    let existing = User::find()
        .filter(user::Column::Email.eq(email.as_str()))
        .one(db)
        .await?;

    match existing {
        Some(user) if user.auth_provider.as_deref() == Some(provider.as_str()) => {
            if profile.picture.is_none() || user.profile_picture == profile.picture {
                return Ok(user);
            }
            tracing::debug!("Updating profile picture of user {}", user.id);
            let mut user: user::ActiveModel = user.into();
            user.profile_picture = Set(profile.picture);
            Ok(user.update(db).await?)
        }
        Some(user) => {
            tracing::info!(
                "User {} tried to sign in with {} but registered with {:?}",
                user.id,
                provider,
                user.auth_provider
            );
            Err(OAuthError::ProviderMismatch)
        }
        None => {
            let full_name = profile
                .display_name
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| email.clone());
            let user = user::ActiveModel {
                full_name: Set(full_name),
                email: Set(email),
                password: Set(None),
                is_cadenza: Set(false),
                is_admin: Set(false),
                auth_provider: Set(Some(provider.as_str().to_owned())),
                auth_provider_id: Set(Some(profile.provider_id)),
                profile_picture: Set(profile.picture),
                ..Default::default()
            }
            .insert(db)
            .await?;
            tracing::info!("Created user {} from {} sign-in", user.id, provider);
            Ok(user)
        }
    }
}
