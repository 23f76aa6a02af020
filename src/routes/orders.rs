use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;

use crate::auth::extractor::AdminContext;
use crate::db;
use crate::error::AppError;
use crate::models::order;
use crate::models::{Order, OrderRow};
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct UpdateStatus {
    pub status: String,
}

pub async fn list(
    auth: AdminContext,
    State(state): State<SharedState>,
) -> Result<Json<Vec<OrderRow>>, AppError> {
    let orders = db::orders::list_by_tenant(&state.pool, auth.tenant_id()).await?;
    Ok(Json(orders))
}

pub async fn update_status(
    auth: AdminContext,
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateStatus>,
) -> Result<Json<Order>, AppError> {
    if !order::is_valid_status(&req.status) {
        return Err(AppError::BadRequest(format!(
            "Invalid order status '{}'",
            req.status
        )));
    }

    let updated = db::orders::update_status(&state.pool, auth.tenant_id(), id, &req.status)
        .await?
        .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;

    Ok(Json(updated))
}
