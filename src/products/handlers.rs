use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tracing::instrument;

use crate::{
    error::{AppError, AppResult},
    extractors::CiJson,
    products::{
        dto::{CreateProductRequest, ProductSummary, UpdateProductRequest},
        repo::ProductRecord,
        services,
    },
    state::AppState,
};

pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/product", get(list_products).post(create_product))
        .route(
            "/product/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

/// Non-integer ids do not match the route at all, so they are reported as 404.
fn parse_id(raw: &str) -> AppResult<i32> {
    raw.parse::<i32>().map_err(|_| AppError::not_found(""))
}

#[instrument(skip(state))]
pub async fn list_products(State(state): State<AppState>) -> AppResult<Json<Vec<ProductRecord>>> {
    let products = services::list_products(&state.products).await?;
    Ok(Json(products))
}

#[instrument(skip(state))]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ProductRecord>> {
    let id = parse_id(&id)?;
    let product = services::get_product(&state.products, id).await?;
    Ok(Json(product))
}

#[instrument(skip(state, payload))]
pub async fn create_product(
    State(state): State<AppState>,
    CiJson(payload): CiJson<CreateProductRequest>,
) -> AppResult<impl IntoResponse> {
    let product = services::create_product(&state.products, payload).await?;
    let location = format!("/product/{}", product.product_id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ProductSummary::from(product)),
    ))
}

#[instrument(skip(state, payload))]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    CiJson(payload): CiJson<UpdateProductRequest>,
) -> AppResult<Json<ProductSummary>> {
    let id = parse_id(&id)?;
    let product = services::update_product(&state.products, id, payload).await?;
    Ok(Json(product.into()))
}

#[instrument(skip(state))]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = parse_id(&id)?;
    services::delete_product(&state.products, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
