//! Request and response models
//!
//! Database rows live in the `entity` crate; these are the shapes that cross the HTTP boundary.

use axum::Json;
use sea_orm::{ActiveValue, Value};
use serde::{Deserialize, Deserializer, Serialize};

use crate::pagination::{Page, Pagination};

pub(crate) mod blog;
pub(crate) mod company;
pub(crate) mod person;
pub(crate) mod user;

/// The `{success, data, pagination?}` envelope every resource endpoint responds with.
#[derive(Debug, Serialize)]
pub(crate) struct Envelope<T> {
    pub(crate) success: bool,
    pub(crate) data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) pagination: Option<Pagination>,
}

impl<T> Envelope<T> {
    pub(crate) fn data(data: T) -> Json<Self> {
        Json(Envelope {
            success: true,
            data,
            pagination: None,
        })
    }
}

impl<T> Envelope<Vec<T>> {
    pub(crate) fn page(page: Page<T>) -> Json<Self> {
        Json(Envelope {
            success: true,
            data: page.rows,
            pagination: Some(page.pagination),
        })
    }
}

/// A `{success, message}` body, e.g. after a delete.
#[derive(Debug, Serialize)]
pub(crate) struct Message {
    pub(crate) success: bool,
    pub(crate) message: String,
}

impl Message {
    pub(crate) fn ok(message: impl Into<String>) -> Json<Self> {
        Json(Message {
            success: true,
            message: message.into(),
        })
    }
}

/// Deserializes a field that may be absent (`None`), explicitly `null` (`Some(None)`), or set.
///
/// Use together with `#[serde(default)]`.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Overwrite `field` when a changeset carries a value for it.
pub(crate) fn patch<V>(field: &mut ActiveValue<V>, value: Option<V>)
where
    V: Into<Value>,
{
    if let Some(value) = value {
        *field = ActiveValue::Set(value);
    }
}
