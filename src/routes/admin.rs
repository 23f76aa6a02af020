use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;
use serde_json::json;

use crate::auth::extractor::{AdminContext, Session};
use crate::db;
use crate::error::{AppError, conflict_on_reference, conflict_on_unique};
use crate::models::UserRole;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct CreateAccount {
    pub email: String,
    pub name: String,
    pub industry: Option<String>,
}

#[derive(Deserialize)]
pub struct SetAccess {
    pub full_access: bool,
}

fn validate_account(req: &CreateAccount) -> Result<(), AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::BadRequest("Name is required".to_string()));
    }
    if !req.email.contains('@') {
        return Err(AppError::BadRequest("A valid email is required".to_string()));
    }
    Ok(())
}

/// Role probe for the front end: 200 for admins, 403 otherwise.
pub async fn check_admin(
    session: Session,
    State(state): State<SharedState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let row = db::user_roles::find_admin(&state.pool, &session.subject).await?;
    match row {
        Some(_) => Ok(Json(json!({ "role": "admin" }))),
        None => Err(AppError::Forbidden("Admin access required".to_string())),
    }
}

pub async fn list_users(
    auth: AdminContext,
    State(state): State<SharedState>,
) -> Result<Json<Vec<UserRole>>, AppError> {
    let users =
        db::user_roles::list_by_tenant_and_role(&state.pool, auth.tenant_id(), "user").await?;
    Ok(Json(users))
}

/// Seed a user role row for this tenant. The identity-provider account
/// is created out of band; its webhook links the provider ID by email.
pub async fn create_user(
    auth: AdminContext,
    State(state): State<SharedState>,
    Json(req): Json<CreateAccount>,
) -> Result<Json<UserRole>, AppError> {
    validate_account(&req)?;

    let user = db::user_roles::create(
        &state.pool,
        None,
        &req.email,
        &req.name,
        "user",
        req.industry.as_deref(),
        Some(auth.tenant_id()),
    )
    .await
    .map_err(|e| conflict_on_unique(e, "A user with this email already exists"))?;

    Ok(Json(user))
}

pub async fn delete_user(
    auth: AdminContext,
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let deleted = db::user_roles::delete_user(&state.pool, auth.tenant_id(), id)
        .await
        .map_err(|e| conflict_on_reference(e, "Cannot delete a user with existing orders"))?;
    if deleted == 0 {
        return Err(AppError::NotFound("User not found".to_string()));
    }
    Ok(Json(json!({ "message": "User deleted" })))
}

pub async fn list_admins(
    auth: AdminContext,
    State(state): State<SharedState>,
) -> Result<Json<Vec<UserRole>>, AppError> {
    let admins =
        db::user_roles::list_by_tenant_and_role(&state.pool, auth.tenant_id(), "admin").await?;
    Ok(Json(admins))
}

pub async fn create_admin(
    auth: AdminContext,
    State(state): State<SharedState>,
    Json(req): Json<CreateAccount>,
) -> Result<Json<UserRole>, AppError> {
    validate_account(&req)?;

    let admin = db::user_roles::create(
        &state.pool,
        None,
        &req.email,
        &req.name,
        "admin",
        req.industry.as_deref(),
        Some(auth.tenant_id()),
    )
    .await
    .map_err(|e| conflict_on_unique(e, "An admin with this email already exists"))?;

    Ok(Json(admin))
}

/// Toggle a managed account between full (admin) and restricted (user)
/// access.
pub async fn set_admin_access(
    auth: AdminContext,
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(req): Json<SetAccess>,
) -> Result<Json<UserRole>, AppError> {
    let role = if req.full_access { "admin" } else { "user" };

    let updated = db::user_roles::set_role(&state.pool, auth.tenant_id(), id, role)
        .await?
        .ok_or_else(|| AppError::NotFound("Account not found".to_string()))?;

    Ok(Json(updated))
}

pub async fn user_locations(
    auth: AdminContext,
    State(state): State<SharedState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let rows = db::user_roles::list_by_tenant(&state.pool, auth.tenant_id()).await?;

    let locations: Vec<serde_json::Value> = rows
        .iter()
        .map(|row| {
            let location = row.location.as_ref();
            json!({
                "email": row.email,
                "name": row.name,
                "user_id": row.user_id,
                "country": location.and_then(|l| l.get("country")).cloned(),
                "city": location.and_then(|l| l.get("city")).cloned(),
                "ip_address": row.ip_address,
                "last_login_at": row.last_login_at,
            })
        })
        .collect();

    Ok(Json(json!(locations)))
}

pub async fn dashboard(
    auth: AdminContext,
    State(state): State<SharedState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let parent_name = match auth.role.inherit_from.as_deref() {
        Some(_) => {
            db::user_roles::find_admin_with_parent(&state.pool, &auth.session.subject)
                .await?
                .and_then(|(_, parent)| parent)
        }
        None => None,
    };

    let stats = db::dashboard::headline(&state.pool, auth.dashboard_tenant_id()).await?;

    Ok(Json(json!({
        "admin": auth.role,
        "inherits_from": parent_name,
        "stats": {
            "total_products": stats.total_products,
            "total_users": stats.total_users,
            "total_companies": stats.total_companies,
            "active_orders": stats.active_orders,
        }
    })))
}
