use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Maximum clock skew accepted between the webhook timestamp and now.
pub const TIMESTAMP_TOLERANCE_SECS: i64 = 300;

/// Verify an identity-provider webhook delivery. The signature header
/// holds space-separated "v1,<base64 mac>" entries; the mac covers
/// "<id>.<timestamp>.<payload>" with HMAC-SHA256 keyed by the decoded
/// "whsec_..." secret.
pub fn verify(
    secret: &str,
    msg_id: &str,
    timestamp: &str,
    signatures: &str,
    payload: &[u8],
) -> Result<(), String> {
    let ts: i64 = timestamp
        .parse()
        .map_err(|_| "Invalid webhook timestamp".to_string())?;
    let now = chrono::Utc::now().timestamp();
    if (now - ts).abs() > TIMESTAMP_TOLERANCE_SECS {
        return Err("Webhook timestamp outside tolerance".to_string());
    }

    let expected = compute_mac(secret, msg_id, timestamp, payload)?;

    for entry in signatures.split_whitespace() {
        let Some(sig) = entry.strip_prefix("v1,") else {
            continue;
        };
        if let Ok(candidate) = BASE64.decode(sig) {
            if bool::from(candidate.as_slice().ct_eq(&expected)) {
                return Ok(());
            }
        }
    }

    Err("No matching webhook signature".to_string())
}

/// Produce the "v1,<base64 mac>" signature for a payload. Counterpart
/// of `verify`, used when exercising the webhook surface.
pub fn sign(
    secret: &str,
    msg_id: &str,
    timestamp: &str,
    payload: &[u8],
) -> Result<String, String> {
    let mac = compute_mac(secret, msg_id, timestamp, payload)?;
    Ok(format!("v1,{}", BASE64.encode(mac)))
}

fn compute_mac(
    secret: &str,
    msg_id: &str,
    timestamp: &str,
    payload: &[u8],
) -> Result<Vec<u8>, String> {
    let key = decode_secret(secret)?;
    let mut mac = HmacSha256::new_from_slice(&key)
        .map_err(|e| format!("Invalid webhook secret: {e}"))?;
    mac.update(msg_id.as_bytes());
    mac.update(b".");
    mac.update(timestamp.as_bytes());
    mac.update(b".");
    mac.update(payload);
    Ok(mac.finalize().into_bytes().to_vec())
}

fn decode_secret(secret: &str) -> Result<Vec<u8>, String> {
    let trimmed = secret.strip_prefix("whsec_").unwrap_or(secret);
    BASE64
        .decode(trimmed)
        .map_err(|e| format!("Invalid webhook secret encoding: {e}"))
}
