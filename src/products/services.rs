use anyhow::Context;
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::{
    error::{AppError, AppResult},
    products::{
        dto::{CreateProductRequest, UpdateProductRequest},
        repo::{ProductRecord, ProductRepo},
    },
    text::{eq_ignore_case, is_blank},
};

const CREATED_BY: &str = "User";

fn conflict() -> AppError {
    AppError::Conflict("product already exists".into())
}

/// Max existing ID + 1, or 1 for an empty collection.
pub(crate) fn next_id(products: &[ProductRecord]) -> anyhow::Result<i32> {
    match products.iter().map(|p| p.product_id).max() {
        None => Ok(1),
        Some(max) => max.checked_add(1).context("product id space exhausted"),
    }
}

/// Whether `code` is used by a record other than `except`.
pub(crate) fn code_taken(products: &[ProductRecord], code: &str, except: Option<i32>) -> bool {
    products
        .iter()
        .filter(|p| Some(p.product_id) != except)
        .any(|p| eq_ignore_case(&p.product_code, code))
}

pub async fn list_products(repo: &ProductRepo) -> AppResult<Vec<ProductRecord>> {
    repo.load()
        .await?
        .ok_or_else(|| AppError::not_found("product not found"))
}

pub async fn get_product(repo: &ProductRepo, id: i32) -> AppResult<ProductRecord> {
    let products = repo
        .load()
        .await?
        .ok_or_else(|| AppError::not_found("product.json not found"))?;
    products
        .into_iter()
        .find(|p| p.product_id == id)
        .ok_or_else(|| AppError::not_found(format!("Product {id} not found")))
}

pub async fn create_product(
    repo: &ProductRepo,
    req: CreateProductRequest,
) -> AppResult<ProductRecord> {
    let (name, code) = match (req.product_name, req.product_code) {
        (Some(name), Some(code)) if !is_blank(&name) && !is_blank(&code) => (name, code),
        _ => {
            return Err(AppError::BadRequest(
                "productName and productCode required".into(),
            ))
        }
    };

    let _guard = repo.write_lock().await;
    let mut products = repo.load().await?.unwrap_or_default();

    if code_taken(&products, &code, None) {
        warn!(product_code = %code, "product code already exists");
        return Err(conflict());
    }

    let product = ProductRecord {
        product_id: next_id(&products)?,
        product_name: name,
        product_code: code,
        create_at: OffsetDateTime::now_utc(),
        create_by: CREATED_BY.to_string(),
    };
    products.push(product.clone());
    repo.save(&products).await?;

    info!(
        product_id = product.product_id,
        product_code = %product.product_code,
        "product created"
    );
    Ok(product)
}

pub async fn update_product(
    repo: &ProductRepo,
    id: i32,
    req: UpdateProductRequest,
) -> AppResult<ProductRecord> {
    let _guard = repo.write_lock().await;
    let mut products = repo
        .load()
        .await?
        .ok_or_else(|| AppError::not_found(format!("product {id} not found")))?;

    let idx = products
        .iter()
        .position(|p| p.product_id == id)
        .ok_or_else(|| AppError::not_found(""))?;

    let current = &products[idx];
    let updated = ProductRecord {
        product_name: req
            .product_name
            .unwrap_or_else(|| current.product_name.clone()),
        product_code: req
            .product_code
            .unwrap_or_else(|| current.product_code.clone()),
        ..current.clone()
    };

    if !eq_ignore_case(&current.product_code, &updated.product_code)
        && code_taken(&products, &updated.product_code, Some(id))
    {
        warn!(
            product_id = id,
            product_code = %updated.product_code,
            "product code already exists"
        );
        return Err(conflict());
    }

    products[idx] = updated.clone();
    repo.save(&products).await?;

    info!(product_id = id, "product updated");
    Ok(updated)
}

pub async fn delete_product(repo: &ProductRepo, id: i32) -> AppResult<()> {
    let _guard = repo.write_lock().await;
    let mut products = repo
        .load()
        .await?
        .ok_or_else(|| AppError::not_found("product.json not found"))?;

    let before = products.len();
    products.retain(|p| p.product_id != id);
    if products.len() == before {
        return Err(AppError::not_found(""));
    }
    repo.save(&products).await?;

    info!(product_id = id, "product deleted");
    Ok(())
}
