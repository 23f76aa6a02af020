use std::collections::HashMap;

use axum::Json;
use axum::extract::{Path, State};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use crate::auth::extractor::AdminContext;
use crate::db;
use crate::db::products::ProductFields;
use crate::error::AppError;
use crate::models::ProductWithSizes;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct ProductPayload {
    pub name: String,
    pub style: Option<String>,
    pub fabric: Option<String>,
    pub vendor: Option<String>,
    pub po_date: Option<NaiveDate>,
    pub image: Option<String>,
    #[serde(default)]
    pub size_quantities: HashMap<String, i32>,
}

impl ProductPayload {
    fn fields(&self) -> ProductFields<'_> {
        ProductFields {
            name: &self.name,
            style: self.style.as_deref(),
            fabric: self.fabric.as_deref(),
            vendor: self.vendor.as_deref(),
            po_date: self.po_date,
            image: self.image.as_deref(),
        }
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::BadRequest("Product name is required".to_string()));
        }
        if self.size_quantities.values().any(|q| *q < 0) {
            return Err(AppError::BadRequest(
                "Size quantities cannot be negative".to_string(),
            ));
        }
        Ok(())
    }
}

pub async fn list(
    auth: AdminContext,
    State(state): State<SharedState>,
) -> Result<Json<Vec<ProductWithSizes>>, AppError> {
    let products = db::products::list(&state.pool, auth.tenant_id()).await?;
    Ok(Json(products))
}

pub async fn create(
    auth: AdminContext,
    State(state): State<SharedState>,
    Json(req): Json<ProductPayload>,
) -> Result<Json<serde_json::Value>, AppError> {
    req.validate()?;

    let id = db::products::create(
        &state.pool,
        auth.tenant_id(),
        &req.fields(),
        &req.size_quantities,
    )
    .await?;

    Ok(Json(json!({ "id": id })))
}

pub async fn get(
    auth: AdminContext,
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<ProductWithSizes>, AppError> {
    let product = db::products::find(&state.pool, auth.tenant_id(), id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;
    Ok(Json(product))
}

pub async fn update(
    auth: AdminContext,
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(req): Json<ProductPayload>,
) -> Result<Json<serde_json::Value>, AppError> {
    req.validate()?;

    let updated = db::products::update(
        &state.pool,
        auth.tenant_id(),
        id,
        &req.fields(),
        &req.size_quantities,
    )
    .await?;

    if !updated {
        return Err(AppError::NotFound("Product not found".to_string()));
    }

    Ok(Json(json!({ "message": "Product updated" })))
}

pub async fn delete(
    auth: AdminContext,
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let deleted = db::products::delete(&state.pool, auth.tenant_id(), id).await?;
    if deleted == 0 {
        return Err(AppError::NotFound("Product not found".to_string()));
    }
    Ok(Json(json!({ "message": "Product deleted" })))
}
