use axum::{
    extract::{self, FromRequest, FromRequestParts, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::CadenzaError;

pub(crate) mod auth;
pub(crate) mod blog;
pub(crate) mod company;
pub(crate) mod image;
pub(crate) mod person;
pub(crate) mod user;

/// A validated JSON body.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ValidatedJson<T>(pub(crate) T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = CadenzaError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

/// `axum::extract::Query`, rejecting with the API's error body.
#[derive(Debug, FromRequestParts)]
#[from_request(via(extract::Query), rejection(CadenzaError))]
pub(crate) struct Query<T>(pub(crate) T);

/// `axum::extract::Path`, rejecting with the API's error body.
#[derive(Debug, FromRequestParts)]
#[from_request(via(extract::Path), rejection(CadenzaError))]
pub(crate) struct Path<T>(pub(crate) T);
