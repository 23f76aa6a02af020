use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use serde_json::json;

use crate::auth::session;
use crate::db;
use crate::error::AppError;
use crate::state::SharedState;
use crate::webhook;

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Result<&'a str, AppError> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::BadRequest(format!("Missing {name} header")))
}

/// Identity-provider lifecycle events. Signature-verified; user.created
/// links the provider ID to the role row seeded with the same email.
pub async fn identity(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<serde_json::Value>, AppError> {
    let msg_id = header(&headers, "svix-id")?;
    let timestamp = header(&headers, "svix-timestamp")?;
    let signatures = header(&headers, "svix-signature")?;

    webhook::verify(
        &state.config.webhook_secret,
        msg_id,
        timestamp,
        signatures,
        &body,
    )
    .map_err(AppError::BadRequest)?;

    let event: serde_json::Value = serde_json::from_slice(&body)
        .map_err(|_| AppError::BadRequest("Invalid webhook payload".to_string()))?;

    match event.get("type").and_then(|t| t.as_str()) {
        Some("user.created") => {
            let data = event
                .get("data")
                .ok_or_else(|| AppError::BadRequest("Missing event data".to_string()))?;

            let provider_id = data
                .get("id")
                .and_then(|v| v.as_str())
                .ok_or_else(|| AppError::BadRequest("Missing user id".to_string()))?;

            let email = data
                .pointer("/email_addresses/0/email_address")
                .and_then(|v| v.as_str())
                .ok_or_else(|| AppError::BadRequest("Missing email address".to_string()))?;

            let linked =
                db::user_roles::link_user_id(&state.pool, email, session::tenant_key(provider_id))
                    .await?;

            if linked == 0 {
                tracing::info!("user.created webhook for unknown email");
            }

            Ok(Json(json!({ "status": "ok" })))
        }
        // Other lifecycle events are acknowledged so the provider does
        // not retry them.
        _ => Ok(Json(json!({ "status": "ignored" }))),
    }
}
