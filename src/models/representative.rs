use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Allowed representative statuses, mirrored by a CHECK constraint.
pub const STATUSES: &[&str] = &["active", "inactive", "none"];

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Representative {
    pub id: i64,
    pub company_name: String,
    pub name: String,
    pub designation: Option<String>,
    pub email: String,
    pub phone_number: Option<String>,
    pub whatsapp_number: Option<String>,
    pub address: Option<String>,
    pub cnic_number: Option<String>,
    pub status: String,
    #[serde(skip_serializing)]
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
