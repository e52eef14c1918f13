use axum::{
    extract::rejection::{ExtensionRejection, JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

const INTERNAL_SERVER_ERROR_MESSAGE: &str = "Server error";

/// Any possible server errors
#[derive(Debug, Error)]
pub enum CadenzaError {
    #[error(transparent)]
    ValidationError(#[from] validator::ValidationErrors),

    #[error(transparent)]
    JsonRejection(#[from] JsonRejection),

    #[error(transparent)]
    QueryRejection(#[from] QueryRejection),

    #[error(transparent)]
    PathRejection(#[from] PathRejection),

    #[error("{0}")]
    BadRequest(String),

    #[error("No token provided")]
    MissingToken,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("{0}")]
    Unauthenticated(&'static str),

    #[error("Admin access required")]
    AdminRequired,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error(transparent)]
    ExtensionRejection(#[from] ExtensionRejection),

    #[error(transparent)]
    DbError(#[from] sea_orm::DbErr),

    #[error(transparent)]
    TokenError(#[from] jsonwebtoken::errors::Error),

    #[error("password hashing failed: {0}")]
    PasswordHash(String),
}

impl CadenzaError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            CadenzaError::ValidationError(_)
            | CadenzaError::JsonRejection(_)
            | CadenzaError::QueryRejection(_)
            | CadenzaError::PathRejection(_)
            | CadenzaError::BadRequest(_) => StatusCode::BAD_REQUEST,
            CadenzaError::MissingToken | CadenzaError::Unauthenticated(_) => {
                StatusCode::UNAUTHORIZED
            }
            CadenzaError::InvalidToken | CadenzaError::AdminRequired => StatusCode::FORBIDDEN,
            CadenzaError::NotFound(_) => StatusCode::NOT_FOUND,
            CadenzaError::ExtensionRejection(_)
            | CadenzaError::DbError(_)
            | CadenzaError::TokenError(_)
            | CadenzaError::PasswordHash(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for CadenzaError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            CadenzaError::ValidationError(_) => {
                format!("Input validation error: [{}]", self).replace('\n', ", ")
            }
            CadenzaError::JsonRejection(rejection) => rejection.body_text(),
            CadenzaError::QueryRejection(rejection) => rejection.body_text(),
            CadenzaError::PathRejection(rejection) => rejection.body_text(),
            _ if status.is_server_error() => {
                tracing::error!("Server error occurred: {:?}", self);
                INTERNAL_SERVER_ERROR_MESSAGE.into()
            }
            _ => self.to_string(),
        };

        (status, Json(json!({ "success": false, "message": message }))).into_response()
    }
}
