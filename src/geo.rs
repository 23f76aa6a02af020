use std::time::{Duration, Instant};

use dashmap::DashMap;
use serde_json::json;

/// How long a cached location stays fresh.
pub const CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// In-process cache of geolocation lookups, keyed by (user, ip).
/// Best-effort only; never consulted for correctness.
pub struct GeoCache {
    entries: DashMap<(String, String), (serde_json::Value, Instant)>,
}

impl GeoCache {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// A fresh cached location, or None on miss/expiry.
    pub fn get(&self, user_id: &str, ip: &str) -> Option<serde_json::Value> {
        let key = (user_id.to_string(), ip.to_string());
        let entry = self.entries.get(&key)?;
        let (value, stored_at) = entry.value();
        if stored_at.elapsed() > CACHE_TTL {
            return None;
        }
        Some(value.clone())
    }

    pub fn insert(&self, user_id: &str, ip: &str, location: serde_json::Value) {
        self.entries.insert(
            (user_id.to_string(), ip.to_string()),
            (location, Instant::now()),
        );
    }

    /// Remove entries older than the given duration.
    pub fn cleanup(&self, max_age: Duration) {
        self.entries
            .retain(|_, (_, stored_at)| stored_at.elapsed() < max_age);
    }
}

impl Default for GeoCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Look up an IP against the configured geolocation API. Returns None
/// on any failure; callers treat this as a cache miss.
pub async fn lookup(
    client: &reqwest::Client,
    api_base: &str,
    ip: &str,
) -> Option<serde_json::Value> {
    let url = format!("{api_base}/{ip}");
    let resp = match client.get(&url).send().await {
        Ok(resp) if resp.status().is_success() => resp,
        Ok(resp) => {
            tracing::debug!("Geolocation lookup for {ip} returned {}", resp.status());
            return None;
        }
        Err(e) => {
            tracing::debug!("Geolocation lookup for {ip} failed: {e}");
            return None;
        }
    };

    let data: serde_json::Value = resp.json().await.ok()?;

    Some(json!({
        "country": data.get("countryName").cloned().unwrap_or(serde_json::Value::Null),
        "city": data.get("city").cloned().unwrap_or(serde_json::Value::Null),
        "region": data.get("stateProv").cloned().unwrap_or(serde_json::Value::Null),
        "ip": ip,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleanup_evicts_expired_entries() {
        let cache = GeoCache::new();
        cache.insert("u1", "1.2.3.4", json!({ "country": "PK" }));
        cache.insert("u2", "5.6.7.8", json!({ "country": "DE" }));
        assert!(cache.get("u1", "1.2.3.4").is_some());

        cache.cleanup(Duration::ZERO);
        assert!(cache.get("u1", "1.2.3.4").is_none());
        assert!(cache.get("u2", "5.6.7.8").is_none());
    }

    #[test]
    fn entries_are_keyed_per_user_and_ip() {
        let cache = GeoCache::new();
        cache.insert("u1", "1.2.3.4", json!({ "country": "PK" }));

        assert!(cache.get("u1", "9.9.9.9").is_none());
        assert!(cache.get("u2", "1.2.3.4").is_none());
        assert_eq!(cache.get("u1", "1.2.3.4").unwrap()["country"], "PK");
    }
}
