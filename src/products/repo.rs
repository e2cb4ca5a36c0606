use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tokio::sync::{Mutex, MutexGuard};

use crate::storage::{FieldNames, JsonFile};

/// Product record as stored in `product.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(rename = "productID")]
    pub product_id: i32,
    #[serde(rename = "productName")]
    pub product_name: String,
    #[serde(rename = "productCode")]
    pub product_code: String,
    #[serde(rename = "createAt", with = "time::serde::rfc3339")]
    pub create_at: OffsetDateTime,
    #[serde(rename = "createBy")]
    pub create_by: String,
}

impl FieldNames for ProductRecord {
    const FIELDS: &'static [&'static str] =
        &["productID", "productName", "productCode", "createAt", "createBy"];
}

/// File-backed product collection.
///
/// Writers must hold [`ProductRepo::write_lock`] across the whole
/// load, mutate, save cycle. Readers go straight to [`ProductRepo::load`].
pub struct ProductRepo {
    file: JsonFile,
    lock: Mutex<()>,
}

impl ProductRepo {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            file: JsonFile::new(path),
            lock: Mutex::new(()),
        }
    }

    pub async fn write_lock(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().await
    }

    /// `None` when `product.json` does not exist.
    pub async fn load(&self) -> anyhow::Result<Option<Vec<ProductRecord>>> {
        self.file.load().await
    }

    pub async fn save(&self, products: &[ProductRecord]) -> anyhow::Result<()> {
        self.file.save(products).await
    }
}
