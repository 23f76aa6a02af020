use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;
use serde_json::json;

use crate::auth::extractor::AdminContext;
use crate::db;
use crate::error::{AppError, conflict_on_unique};
use crate::models::Customer;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct CustomerPayload {
    pub name: String,
    pub email: String,
    pub industry: Option<String>,
}

impl CustomerPayload {
    fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::BadRequest("Name is required".to_string()));
        }
        if !self.email.contains('@') {
            return Err(AppError::BadRequest("A valid email is required".to_string()));
        }
        Ok(())
    }
}

pub async fn list(
    auth: AdminContext,
    State(state): State<SharedState>,
) -> Result<Json<Vec<Customer>>, AppError> {
    let customers = db::customers::list(&state.pool, auth.tenant_id()).await?;
    Ok(Json(customers))
}

pub async fn create(
    auth: AdminContext,
    State(state): State<SharedState>,
    Json(req): Json<CustomerPayload>,
) -> Result<Json<Customer>, AppError> {
    req.validate()?;

    let customer = db::customers::create(
        &state.pool,
        auth.tenant_id(),
        &req.name,
        &req.email,
        req.industry.as_deref(),
    )
    .await
    .map_err(|e| conflict_on_unique(e, "A customer with this email already exists"))?;

    Ok(Json(customer))
}

pub async fn get(
    auth: AdminContext,
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<Customer>, AppError> {
    let customer = db::customers::find(&state.pool, auth.tenant_id(), id)
        .await?
        .ok_or_else(|| AppError::NotFound("Customer not found".to_string()))?;
    Ok(Json(customer))
}

pub async fn update(
    auth: AdminContext,
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(req): Json<CustomerPayload>,
) -> Result<Json<Customer>, AppError> {
    req.validate()?;

    let customer = db::customers::update(
        &state.pool,
        auth.tenant_id(),
        id,
        &req.name,
        &req.email,
        req.industry.as_deref(),
    )
    .await
    .map_err(|e| conflict_on_unique(e, "A customer with this email already exists"))?
    .ok_or_else(|| AppError::NotFound("Customer not found".to_string()))?;

    Ok(Json(customer))
}

pub async fn delete(
    auth: AdminContext,
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let deleted = db::customers::delete(&state.pool, auth.tenant_id(), id).await?;
    if deleted == 0 {
        return Err(AppError::NotFound("Customer not found".to_string()));
    }
    Ok(Json(json!({ "message": "Customer deleted" })))
}
