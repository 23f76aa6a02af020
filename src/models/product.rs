use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One size's remaining stock for a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SizeQuantity {
    pub size: String,
    pub quantity: i32,
}

/// A product joined with its per-size stock, as returned by list/get.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct ProductWithSizes {
    pub id: i64,
    pub name: String,
    pub style: Option<String>,
    pub fabric: Option<String>,
    pub vendor: Option<String>,
    pub po_date: Option<NaiveDate>,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub sizes: sqlx::types::Json<Vec<SizeQuantity>>,
}
