use chrono::{DateTime, Utc};
use entity::user;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

/// The JSON input of `POST /api/auth/register`.
///
/// Fields default to empty so that a missing field gets the same message as a blank one.
#[derive(Debug, Validate, Deserialize)]
pub(crate) struct RegisterInput {
    #[serde(default)]
    pub(crate) full_name: String,
    #[serde(default)]
    pub(crate) email: String,
    #[serde(default)]
    #[validate(length(
        min = 8,
        max = 128,
        message = "Minimum length is 8 characters, maximum is 128"
    ))]
    pub(crate) password: String,
}

impl RegisterInput {
    pub(crate) fn is_complete(&self) -> bool {
        !self.full_name.trim().is_empty() && !self.email.trim().is_empty() && !self.password.is_empty()
    }
}

/// The JSON input of `POST /api/auth/login`.
#[derive(Debug, Deserialize)]
pub(crate) struct LoginInput {
    #[serde(default)]
    pub(crate) email: String,
    #[serde(default)]
    pub(crate) password: String,
}

/// `?token=` of `GET /api/auth/login-success`
#[derive(Debug, Deserialize)]
pub(crate) struct TokenQuery {
    pub(crate) token: Option<String>,
}

/// The response output for a user. Never carries the password hash.
#[derive(Debug, Serialize)]
pub(crate) struct UserResponse {
    pub(crate) id: i32,
    pub(crate) full_name: String,
    pub(crate) email: String,
    pub(crate) is_cadenza: bool,
    pub(crate) is_admin: bool,
    pub(crate) auth_provider: Option<String>,
    pub(crate) profile_picture: Option<String>,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

impl From<user::Model> for UserResponse {
    fn from(user: user::Model) -> Self {
        UserResponse {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
            is_cadenza: user.is_cadenza,
            is_admin: user.is_admin,
            auth_provider: user.auth_provider,
            profile_picture: user.profile_picture,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// `{token, user}`, returned by every endpoint that signs a user in.
#[derive(Debug, Serialize)]
pub(crate) struct AuthResponse {
    pub(crate) token: String,
    pub(crate) user: UserResponse,
}

/// The JSON input of `PUT /api/users/{id}/admin-status`.
///
/// Kept as a raw value so that a non-boolean gets a readable 400 rather than a rejection.
#[derive(Debug, Deserialize)]
pub(crate) struct AdminStatusInput {
    #[serde(default)]
    pub(crate) is_admin: Value,
}

/// The JSON input of `PUT /api/users/{id}/cadenza-status`.
#[derive(Debug, Deserialize)]
pub(crate) struct CadenzaStatusInput {
    #[serde(default)]
    pub(crate) is_cadenza: Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_omits_password() {
        let now = Utc::now();
        let user = user::Model {
            id: 3,
            full_name: "Grace Hopper".into(),
            email: "grace@gmail.com".into(),
            password: Some("$argon2id$secret".into()),
            is_cadenza: false,
            is_admin: false,
            auth_provider: Some("local".into()),
            auth_provider_id: None,
            profile_picture: None,
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_value(UserResponse::from(user)).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["email"], "grace@gmail.com");
    }

    #[test]
    fn registration_requires_every_field() {
        let input: RegisterInput =
            serde_json::from_value(serde_json::json!({ "email": "a@gmail.com" })).unwrap();
        assert!(!input.is_complete());
    }
}
