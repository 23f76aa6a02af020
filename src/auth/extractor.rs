use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;

use crate::auth::session;
use crate::db;
use crate::error::AppError;
use crate::models::UserRole;
use crate::state::SharedState;

/// A verified identity-provider session.
#[derive(Debug, Clone)]
pub struct Session {
    /// Provider user ID as issued ("user_..." form).
    pub provider_id: String,
    /// Prefix-stripped ID, the tenancy key.
    pub subject: String,
    pub email: Option<String>,
    pub name: Option<String>,
}

/// Pull the session token from a Bearer header or the provider's
/// session cookie.
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    if let Some(auth_header) = headers.get("authorization") {
        if let Ok(auth_str) = auth_header.to_str() {
            if let Some(token) = auth_str.strip_prefix("Bearer ") {
                return Some(token.to_string());
            }
        }
    }

    let jar = CookieJar::from_headers(headers);
    jar.get("__session").map(|c| c.value().to_string())
}

impl FromRequestParts<SharedState> for Session {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        let token = token_from_headers(&parts.headers)
            .ok_or_else(|| AppError::Unauthorized("Missing session token".to_string()))?;

        let claims = session::decode_token(&token, &state.config.session_secret)
            .map_err(|_| AppError::Unauthorized("Invalid or expired session".to_string()))?;

        let subject = session::tenant_key(&claims.sub).to_string();
        Ok(Session {
            provider_id: claims.sub,
            subject,
            email: claims.email,
            name: claims.name,
        })
    }
}

/// A session that resolved to an admin role row. Extracting this runs
/// the role check; handlers taking `AdminContext` are admin-only.
#[derive(Debug, Clone)]
pub struct AdminContext {
    pub session: Session,
    pub role: UserRole,
}

impl AdminContext {
    /// The tenant this admin owns records under.
    pub fn tenant_id(&self) -> &str {
        &self.session.subject
    }

    /// The tenant whose dashboard data this admin sees: the parent
    /// admin when inherit_from is set, otherwise their own.
    pub fn dashboard_tenant_id(&self) -> &str {
        self.role
            .inherit_from
            .as_deref()
            .unwrap_or(&self.session.subject)
    }
}

impl FromRequestParts<SharedState> for AdminContext {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state).await?;

        let role = db::user_roles::find_admin(&state.pool, &session.subject)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Admin access required".to_string()))?;

        Ok(AdminContext { session, role })
    }
}
