use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use serde_json::json;

use crate::auth::extractor::Session;
use crate::db;
use crate::db::orders::PlaceError;
use crate::error::AppError;
use crate::models::{Order, OrderRow, ProductWithSizes, UserRole};
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct PlaceOrder {
    pub product_id: i64,
    pub size: String,
    pub quantity: i32,
    pub price: Option<f64>,
    pub notes: Option<String>,
}

/// Resolve the caller's role row; sessions without one have not been
/// provisioned by an admin yet.
async fn role_row(state: &SharedState, session: &Session) -> Result<UserRole, AppError> {
    db::user_roles::find_by_user_id(&state.pool, &session.subject)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

/// The tenant whose catalog the caller sees: admins see their own,
/// users see their owning admin's.
fn owning_tenant(role: &UserRole, session: &Session) -> Result<String, AppError> {
    if role.is_admin() {
        return Ok(session.subject.clone());
    }
    role.created_by
        .clone()
        .ok_or_else(|| AppError::Forbidden("Account is not assigned to a tenant".to_string()))
}

pub async fn available_products(
    session: Session,
    State(state): State<SharedState>,
) -> Result<Json<Vec<ProductWithSizes>>, AppError> {
    let role = role_row(&state, &session).await?;
    let tenant = owning_tenant(&role, &session)?;

    let products = db::products::list_available(&state.pool, &tenant).await?;
    Ok(Json(products))
}

pub async fn list_orders(
    session: Session,
    State(state): State<SharedState>,
) -> Result<Json<Vec<OrderRow>>, AppError> {
    let role = role_row(&state, &session).await?;
    let orders = db::orders::list_by_user(&state.pool, role.id).await?;
    Ok(Json(orders))
}

pub async fn place_order(
    session: Session,
    State(state): State<SharedState>,
    Json(req): Json<PlaceOrder>,
) -> Result<Json<Order>, AppError> {
    if req.quantity < 1 {
        return Err(AppError::BadRequest(
            "Quantity must be at least 1".to_string(),
        ));
    }
    if req.size.trim().is_empty() {
        return Err(AppError::BadRequest("Size is required".to_string()));
    }

    let role = role_row(&state, &session).await?;
    let tenant = owning_tenant(&role, &session)?;

    let order = db::orders::place(
        &state.pool,
        &tenant,
        role.id,
        req.product_id,
        &req.size,
        req.quantity,
        req.price,
        req.notes.as_deref(),
    )
    .await
    .map_err(|e| match e {
        PlaceError::ProductNotFound => AppError::NotFound("Product not found".to_string()),
        PlaceError::SizeUnavailable => AppError::BadRequest("Size not available".to_string()),
        PlaceError::InsufficientStock { available } => AppError::BadRequest(format!(
            "Not enough quantity available (remaining: {available})"
        )),
        PlaceError::Db(err) => AppError::Database(err),
    })?;

    Ok(Json(order))
}

pub async fn dashboard(
    session: Session,
    State(state): State<SharedState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let role = role_row(&state, &session).await?;

    let stats = db::dashboard::user_order_stats(&state.pool, role.id).await?;
    let monthly = db::dashboard::user_monthly_orders(&state.pool, role.id).await?;
    let by_status = db::dashboard::user_orders_by_status(&state.pool, role.id).await?;
    let recent = db::dashboard::user_recent_orders(&state.pool, role.id).await?;

    Ok(Json(json!({
        "stats": {
            "total_orders": stats.total_orders,
            "pending_orders": stats.pending_orders,
            "total_value": stats.total_value,
        },
        "monthly_orders": monthly
            .iter()
            .map(|m| json!({ "month": m.month, "orders": m.orders, "amount": m.amount }))
            .collect::<Vec<_>>(),
        "orders_by_status": by_status
            .iter()
            .map(|s| json!({ "status": s.status, "count": s.count }))
            .collect::<Vec<_>>(),
        "recent_orders": recent,
    })))
}
