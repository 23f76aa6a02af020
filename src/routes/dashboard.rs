use axum::Json;
use axum::extract::State;
use serde_json::json;

use crate::auth::extractor::AdminContext;
use crate::db;
use crate::db::dashboard::StatusCount;
use crate::error::AppError;
use crate::state::SharedState;

/// Status counts with percentages of the total, rounded to one decimal.
fn with_percentages(counts: &[StatusCount]) -> Vec<serde_json::Value> {
    let total: i64 = counts.iter().map(|c| c.count).sum();
    counts
        .iter()
        .map(|c| {
            let percentage = if total > 0 {
                (c.count as f64 * 1000.0 / total as f64).round() / 10.0
            } else {
                0.0
            };
            json!({ "status": c.status, "count": c.count, "percentage": percentage })
        })
        .collect()
}

pub async fn stats(
    auth: AdminContext,
    State(state): State<SharedState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let tenant = auth.dashboard_tenant_id();

    let stats = db::dashboard::stats(&state.pool, tenant).await?;
    let distribution =
        db::dashboard::representative_status_distribution(&state.pool, tenant).await?;

    Ok(Json(json!({
        "total_products": stats.total_products,
        "total_customers": stats.total_customers,
        "total_companies": stats.total_companies,
        "monthly_orders": stats.monthly_orders,
        "monthly_revenue": stats.monthly_revenue,
        "new_products_this_week": stats.new_products_this_week,
        "company_status_distribution": with_percentages(&distribution),
    })))
}

pub async fn charts(
    auth: AdminContext,
    State(state): State<SharedState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let tenant = auth.dashboard_tenant_id();

    let by_category = db::dashboard::products_by_fabric(&state.pool, tenant).await?;
    let growth = db::dashboard::customer_growth(&state.pool, tenant).await?;
    let distribution =
        db::dashboard::representative_status_distribution(&state.pool, tenant).await?;
    let timeline = db::dashboard::product_timeline(&state.pool, tenant).await?;

    Ok(Json(json!({
        "products_by_category": by_category
            .iter()
            .map(|c| json!({ "category": c.category, "count": c.count }))
            .collect::<Vec<_>>(),
        "customer_growth": growth
            .iter()
            .map(|m| json!({ "month": m.month, "new_customers": m.count }))
            .collect::<Vec<_>>(),
        "company_distribution": with_percentages(&distribution),
        "product_timeline": timeline
            .iter()
            .map(|p| json!({
                "month": p.month,
                "new_products": p.new_products,
                "total_products": p.total_products,
            }))
            .collect::<Vec<_>>(),
    })))
}

pub async fn recent_sales(
    auth: AdminContext,
    State(state): State<SharedState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let tenant = auth.dashboard_tenant_id();

    let sales = db::dashboard::recent_sales(&state.pool, tenant).await?;
    let monthly = db::dashboard::monthly_sales(&state.pool, tenant).await?;

    Ok(Json(json!({
        "recent_sales": sales
            .iter()
            .map(|s| json!({
                "id": s.id,
                "total": s.total,
                "date": s.created_at,
                "name": s.name,
                "email": s.email,
            }))
            .collect::<Vec<_>>(),
        "monthly_stats": {
            "count": monthly.count,
            "total": monthly.total,
            "average": monthly.average,
        }
    })))
}
