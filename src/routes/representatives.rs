use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;
use serde_json::json;

use crate::auth::extractor::AdminContext;
use crate::db;
use crate::db::representatives::RepresentativeFields;
use crate::error::{AppError, conflict_on_unique};
use crate::models::Representative;
use crate::models::representative::STATUSES;
use crate::state::SharedState;

fn default_status() -> String {
    "active".to_string()
}

#[derive(Deserialize)]
pub struct RepresentativePayload {
    pub company_name: String,
    pub name: String,
    pub designation: Option<String>,
    pub email: String,
    pub phone_number: Option<String>,
    pub whatsapp_number: Option<String>,
    pub address: Option<String>,
    pub cnic_number: Option<String>,
    #[serde(default = "default_status")]
    pub status: String,
}

impl RepresentativePayload {
    fn fields(&self) -> RepresentativeFields<'_> {
        RepresentativeFields {
            company_name: &self.company_name,
            name: &self.name,
            designation: self.designation.as_deref(),
            email: &self.email,
            phone_number: self.phone_number.as_deref(),
            whatsapp_number: self.whatsapp_number.as_deref(),
            address: self.address.as_deref(),
            cnic_number: self.cnic_number.as_deref(),
            status: &self.status,
        }
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() || self.company_name.trim().is_empty() {
            return Err(AppError::BadRequest(
                "Name and company name are required".to_string(),
            ));
        }
        if !self.email.contains('@') {
            return Err(AppError::BadRequest("A valid email is required".to_string()));
        }
        if !STATUSES.contains(&self.status.as_str()) {
            return Err(AppError::BadRequest(format!(
                "Invalid status '{}'",
                self.status
            )));
        }
        Ok(())
    }
}

pub async fn list(
    auth: AdminContext,
    State(state): State<SharedState>,
) -> Result<Json<Vec<Representative>>, AppError> {
    let representatives = db::representatives::list(&state.pool, auth.tenant_id()).await?;
    Ok(Json(representatives))
}

pub async fn create(
    auth: AdminContext,
    State(state): State<SharedState>,
    Json(req): Json<RepresentativePayload>,
) -> Result<Json<Representative>, AppError> {
    req.validate()?;

    let representative = db::representatives::create(&state.pool, auth.tenant_id(), &req.fields())
        .await
        .map_err(|e| conflict_on_unique(e, "A representative with this email already exists"))?;

    Ok(Json(representative))
}

pub async fn get(
    auth: AdminContext,
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<Representative>, AppError> {
    let representative = db::representatives::find(&state.pool, auth.tenant_id(), id)
        .await?
        .ok_or_else(|| AppError::NotFound("Representative not found".to_string()))?;
    Ok(Json(representative))
}

pub async fn update(
    auth: AdminContext,
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(req): Json<RepresentativePayload>,
) -> Result<Json<Representative>, AppError> {
    req.validate()?;

    let representative =
        db::representatives::update(&state.pool, auth.tenant_id(), id, &req.fields())
            .await
            .map_err(|e| conflict_on_unique(e, "A representative with this email already exists"))?
            .ok_or_else(|| AppError::NotFound("Representative not found".to_string()))?;

    Ok(Json(representative))
}

pub async fn delete(
    auth: AdminContext,
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let deleted = db::representatives::delete(&state.pool, auth.tenant_id(), id).await?;
    if deleted == 0 {
        return Err(AppError::NotFound("Representative not found".to_string()));
    }
    Ok(Json(json!({ "message": "Representative deleted" })))
}
