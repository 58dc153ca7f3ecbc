//! Product catalog endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;

use angadi_core::{Capability, ProductId};

use crate::db::{ProductInput, ProductRepository, RepositoryError};
use crate::error::{AppError, Result};
use crate::middleware::CurrentAdmin;
use crate::models::Product;
use crate::state::AppState;

use super::require_capability;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    pub title: String,
    pub price: Decimal,
    pub description: String,
    pub image_url: String,
    pub category: String,
    #[serde(default)]
    pub is_temporarily_closed: bool,
}

impl ProductRequest {
    fn into_input(self) -> Result<ProductInput> {
        if self.title.trim().is_empty()
            || self.description.trim().is_empty()
            || self.image_url.trim().is_empty()
            || self.category.trim().is_empty()
        {
            return Err(AppError::BadRequest(
                "title, description, imageUrl, and category are required".to_owned(),
            ));
        }

        if self.price < Decimal::ZERO {
            return Err(AppError::BadRequest("price must not be negative".to_owned()));
        }

        Ok(ProductInput {
            title: self.title,
            price: self.price,
            description: self.description,
            image_url: self.image_url,
            category: self.category,
            is_temporarily_closed: self.is_temporarily_closed,
        })
    }
}

/// GET /api/products
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = ProductRepository::new(state.pool()).list().await?;
    Ok(Json(products))
}

/// POST /api/products
pub async fn create(
    State(state): State<AppState>,
    CurrentAdmin(admin): CurrentAdmin,
    Json(request): Json<ProductRequest>,
) -> Result<(StatusCode, Json<Product>)> {
    require_capability(&admin, Capability::Products)?;

    let input = request.into_input()?;
    let product = ProductRepository::new(state.pool()).create(&input).await?;

    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /api/products/{id}
pub async fn update(
    State(state): State<AppState>,
    CurrentAdmin(admin): CurrentAdmin,
    Path(id): Path<ProductId>,
    Json(request): Json<ProductRequest>,
) -> Result<Json<Product>> {
    require_capability(&admin, Capability::Products)?;

    let input = request.into_input()?;
    let product = ProductRepository::new(state.pool())
        .update(id, &input)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound("product".to_owned()),
            other => AppError::Database(other),
        })?;

    Ok(Json(product))
}

/// DELETE /api/products/{id}
pub async fn delete(
    State(state): State<AppState>,
    CurrentAdmin(admin): CurrentAdmin,
    Path(id): Path<ProductId>,
) -> Result<Json<serde_json::Value>> {
    require_capability(&admin, Capability::Products)?;

    ProductRepository::new(state.pool()).delete(id).await?;

    Ok(Json(json!({ "message": "Product deleted" })))
}
