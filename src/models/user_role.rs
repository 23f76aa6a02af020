use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A role row maps an identity-provider user ID (prefix stripped) to an
/// application role and the admin tenant that owns the account.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct UserRole {
    pub id: i64,
    pub user_id: Option<String>,
    pub email: String,
    pub name: String,
    pub role: String,
    pub industry: Option<String>,
    pub created_by: Option<String>,
    pub inherit_from: Option<String>,
    pub last_login_at: Option<DateTime<Utc>>,
    pub ip_address: Option<String>,
    pub location: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl UserRole {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}
