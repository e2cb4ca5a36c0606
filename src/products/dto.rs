use serde::{Deserialize, Serialize};

use crate::products::repo::ProductRecord;
use crate::storage::FieldNames;

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    #[serde(rename = "productName", default)]
    pub product_name: Option<String>,
    #[serde(rename = "productCode", default)]
    pub product_code: Option<String>,
}

impl FieldNames for CreateProductRequest {
    const FIELDS: &'static [&'static str] = &["productName", "productCode"];
}

/// Partial update: `None` keeps the stored value, `Some("")` sets it to empty.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProductRequest {
    #[serde(rename = "productName", default)]
    pub product_name: Option<String>,
    #[serde(rename = "productCode", default)]
    pub product_code: Option<String>,
}

impl FieldNames for UpdateProductRequest {
    const FIELDS: &'static [&'static str] = &["productName", "productCode"];
}

/// Returned by create and update.
#[derive(Debug, Serialize)]
pub struct ProductSummary {
    #[serde(rename = "productID")]
    pub product_id: i32,
    #[serde(rename = "productName")]
    pub product_name: String,
    #[serde(rename = "productCode")]
    pub product_code: String,
}

impl From<ProductRecord> for ProductSummary {
    fn from(p: ProductRecord) -> Self {
        Self {
            product_id: p.product_id,
            product_name: p.product_name,
            product_code: p.product_code,
        }
    }
}
