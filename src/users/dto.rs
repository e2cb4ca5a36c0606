use serde::{Deserialize, Serialize};

use crate::storage::FieldNames;

/// Missing or `null` fields read as empty and simply fail to match.
#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl FieldNames for LoginRequest {
    const FIELDS: &'static [&'static str] = &["username", "password"];
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub username: String,
}
