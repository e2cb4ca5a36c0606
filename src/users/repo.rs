use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::storage::{FieldNames, JsonFile};

/// User record as stored in `user.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(rename = "userID")]
    pub user_id: i32,
    pub username: String,
    /// `PLAINTEXT:<password>`, see [`crate::users::password`].
    #[serde(rename = "passwordHash")]
    pub password_hash: String,
    #[serde(rename = "createAt", with = "time::serde::rfc3339")]
    pub create_at: OffsetDateTime,
    #[serde(rename = "createBy")]
    pub create_by: String,
}

impl FieldNames for UserRecord {
    const FIELDS: &'static [&'static str] =
        &["userID", "username", "passwordHash", "createAt", "createBy"];
}

/// Read-only access to the user collection. No write path exists, so no lock.
pub struct UserRepo {
    file: JsonFile,
}

impl UserRepo {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            file: JsonFile::new(path),
        }
    }

    pub async fn load(&self) -> anyhow::Result<Option<Vec<UserRecord>>> {
        self.file.load().await
    }
}
