use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub industry: Option<String>,
    #[serde(skip_serializing)]
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}
