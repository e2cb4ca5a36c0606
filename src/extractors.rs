use async_trait::async_trait;
use axum::{
    extract::{FromRequest, Request},
    http::StatusCode,
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::storage::{canonicalize_keys, FieldNames};

/// JSON body whose field names are matched case-insensitively against `T::FIELDS`.
pub struct CiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for CiJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + FieldNames,
{
    type Rejection = (StatusCode, String);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(raw) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|e| (e.status(), e.body_text()))?;

        let value = serde_json::from_value(canonicalize_keys(raw, T::FIELDS))
            .map_err(|e| (StatusCode::BAD_REQUEST, format!("invalid request body: {e}")))?;
        Ok(CiJson(value))
    }
}
