//! Bearer token authentication.

use axum::{
    extract::{Extension, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use chrono::{Duration, Utc};
use entity::{prelude::User, user};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use sea_orm::EntityTrait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{constants::MAX_TOKEN_TTL_HOURS, error::CadenzaError, server::State};

/// Claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub user_id: i32,
    pub iat: i64,
    pub exp: i64,
}

/// Signs and verifies HS256 session tokens.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenKeys {
    /// `ttl_hours` is clamped to `1..=MAX_TOKEN_TTL_HOURS`.
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        Self::with_ttl(secret, Duration::hours(ttl_hours.clamp(1, MAX_TOKEN_TTL_HOURS)))
    }

    pub fn with_ttl(secret: &str, ttl: Duration) -> Self {
        TokenKeys {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    /// Issue a token for `user_id`, valid for the configured lifetime.
    pub fn issue(&self, user_id: i32) -> Result<String, CadenzaError> {
        let now = Utc::now();
        let claims = Claims {
            user_id,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?)
    }

    /// Check the signature and expiry of `token`.
    pub fn verify(&self, token: &str) -> Result<Claims, CadenzaError> {
        decode::<Claims>(token, &self.decoding, &Validation::new(Algorithm::HS256))
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("Rejected token: {}", e);
                CadenzaError::InvalidToken
            })
    }
}

/// The signed-in user making a request.
///
/// Rejects with 401 when no bearer token is sent, 403 when it does not verify,
/// and 404 when its user has since been deleted.
#[derive(Debug)]
pub(crate) struct AuthUser(pub(crate) user::Model);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = CadenzaError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Extension(app) = Extension::<Arc<State>>::from_request_parts(parts, state).await?;

        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|rejection| {
                    if rejection.is_missing() {
                        CadenzaError::MissingToken
                    } else {
                        CadenzaError::InvalidToken
                    }
                })?;

        let claims = app.tokens.verify(bearer.token())?;

        match User::find_by_id(claims.user_id).one(&app.db).await? {
            Some(user) => Ok(AuthUser(user)),
            None => Err(CadenzaError::NotFound("User")),
        }
    }
}

/// A signed-in user with admin rights.
#[derive(Debug)]
pub(crate) struct AdminUser(pub(crate) user::Model);

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = CadenzaError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;
        if !user.is_admin {
            return Err(CadenzaError::AdminRequired);
        }
        Ok(AdminUser(user))
    }
}

/// Trim and lowercase an email address.
pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Whether a normalized `email` belongs to `domain`.
pub(crate) fn email_allowed(email: &str, domain: &str) -> bool {
    match email.rsplit_once('@') {
        Some((local, host)) => !local.is_empty() && host == domain,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trip() {
        let keys = TokenKeys::new("test-secret", 24);
        let token = keys.issue(42).unwrap();
        let claims = keys.verify(&token).unwrap();
        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn token_from_other_secret_is_rejected() {
        let token = TokenKeys::new("one", 24).issue(1).unwrap();
        assert!(matches!(
            TokenKeys::new("two", 24).verify(&token),
            Err(CadenzaError::InvalidToken)
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        let keys = TokenKeys::with_ttl("test-secret", Duration::hours(-2));
        let token = keys.issue(1).unwrap();
        assert!(matches!(keys.verify(&token), Err(CadenzaError::InvalidToken)));
    }

    #[test]
    fn token_lifetime_is_clamped() {
        let keys = TokenKeys::new("test-secret", i64::MAX);
        let claims = keys.verify(&keys.issue(1).unwrap()).unwrap();
        assert_eq!(claims.exp - claims.iat, MAX_TOKEN_TTL_HOURS * 3600);
    }

    #[test]
    fn claims_use_camel_case_user_id() {
        let value = serde_json::to_value(Claims {
            user_id: 1,
            iat: 0,
            exp: 1,
        })
        .unwrap();
        assert_eq!(value["userId"], 1);
    }

    #[test]
    fn email_domain_rule() {
        assert!(email_allowed("ada@gmail.com", "gmail.com"));
        assert!(!email_allowed("ada@gmail.com.evil.org", "gmail.com"));
        assert!(!email_allowed("ada@yahoo.com", "gmail.com"));
        assert!(!email_allowed("@gmail.com", "gmail.com"));
        assert!(!email_allowed("gmail.com", "gmail.com"));
        assert_eq!(normalize_email("  Ada@GMail.com "), "ada@gmail.com");
    }
}
