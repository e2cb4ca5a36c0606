use axum::{extract::State, routing::post, Json, Router};
use tracing::instrument;

use crate::{
    error::AppResult,
    extractors::CiJson,
    state::AppState,
    users::{
        dto::{LoginRequest, LoginResponse},
        services,
    },
};

pub fn user_routes() -> Router<AppState> {
    Router::new().route("/user/login", post(login))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    CiJson(payload): CiJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let username = services::login(&state.users, payload).await?;
    Ok(Json(LoginResponse { username }))
}
