//! 产品处理器

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};

use super::resource::ResponseShape;
use crate::app::AppState;
use crate::core::{error::ApiError, extract::JsonPayload};

pub async fn index<S: ResponseShape>(
    State(state): State<AppState>,
) -> Result<Json<S::Many>, ApiError> {
    let products = state.product_service.list().await?;
    Ok(Json(S::many(products, &state.base_url)))
}

pub async fn store<S: ResponseShape>(
    State(state): State<AppState>,
    payload: JsonPayload<S::Payload>,
) -> Result<(StatusCode, Json<S::One>), ApiError> {
    let attributes = payload.into_result().map(S::attributes)?;
    let product = state.product_service.create(attributes).await?;
    Ok((StatusCode::CREATED, Json(S::one(product, &state.base_url))))
}

pub async fn show<S: ResponseShape>(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<S::One>, ApiError> {
    let product = state.product_service.show(id).await?;
    Ok(Json(S::one(product, &state.base_url)))
}

pub async fn update<S: ResponseShape>(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: JsonPayload<S::Payload>,
) -> Result<Json<S::One>, ApiError> {
    let attributes = payload.into_result().map(S::attributes);
    let product = state.product_service.update(id, attributes).await?;
    Ok(Json(S::one(product, &state.base_url)))
}

pub async fn destroy<S: ResponseShape>(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.product_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
