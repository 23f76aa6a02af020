use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Allowed order statuses, mirrored by a CHECK constraint.
pub const STATUSES: &[&str] = &["pending", "processing", "shipped", "delivered", "cancelled"];

pub fn is_valid_status(status: &str) -> bool {
    STATUSES.contains(&status)
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub product_id: Option<i64>,
    pub order_size: Option<String>,
    pub order_quantity: i32,
    pub status: String,
    pub total: Option<f64>,
    pub notes: Option<String>,
    #[serde(skip_serializing)]
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An order joined with its product and customer names for list views.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct OrderRow {
    pub id: i64,
    pub customer: Option<String>,
    pub product: Option<String>,
    pub order_size: Option<String>,
    pub order_quantity: i32,
    pub status: String,
    pub total: Option<f64>,
    pub created_at: DateTime<Utc>,
}
