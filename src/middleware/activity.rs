use std::net::{IpAddr, SocketAddr};

use axum::extract::{ConnectInfo, Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use ipnet::IpNet;

use crate::auth::extractor::token_from_headers;
use crate::auth::session;
use crate::db;
use crate::geo;
use crate::state::SharedState;

/// Record last-seen activity for authenticated requests: login time,
/// client IP, and a cached geolocation. Best-effort; failures never
/// affect the request.
pub async fn track_activity(
    State(state): State<SharedState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    req: Request,
    next: Next,
) -> Response {
    if let Some(subject) = session_subject(&state, req.headers()) {
        let ip = client_ip(
            req.headers(),
            Some(addr.ip()),
            &state.config.trusted_proxies,
        );
        record(&state, &subject, &ip).await;
    }

    next.run(req).await
}

fn session_subject(state: &SharedState, headers: &HeaderMap) -> Option<String> {
    let token = token_from_headers(headers)?;
    let claims = session::decode_token(&token, &state.config.session_secret).ok()?;
    Some(session::tenant_key(&claims.sub).to_string())
}

async fn record(state: &SharedState, subject: &str, ip: &str) {
    if let Err(e) = db::user_roles::record_activity(&state.pool, subject, ip).await {
        tracing::debug!("Failed to record activity for {subject}: {e}");
    }

    let Some(api_base) = &state.config.geoip_api_base else {
        return;
    };

    // A fresh cache entry means the location was already written.
    if state.geo_cache.get(subject, ip).is_some() {
        return;
    }

    let Some(location) = geo::lookup(&state.http, api_base, ip).await else {
        return;
    };

    state.geo_cache.insert(subject, ip, location.clone());

    if let Err(e) = db::user_roles::set_location(&state.pool, subject, &location).await {
        tracing::debug!("Failed to store location for {subject}: {e}");
    }
}

/// Resolve the client IP. X-Forwarded-For is only trusted when the
/// direct peer is a configured trusted proxy.
pub fn client_ip(headers: &HeaderMap, peer_addr: Option<IpAddr>, trusted_proxies: &[IpNet]) -> String {
    let peer = peer_addr.unwrap_or(IpAddr::from([127, 0, 0, 1]));

    if !trusted_proxies.is_empty() && trusted_proxies.iter().any(|net| net.contains(&peer)) {
        if let Some(xff) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
            // Leftmost entry that is not itself a trusted proxy.
            for ip_str in xff.split(',').map(|s| s.trim()) {
                if let Ok(ip) = ip_str.parse::<IpAddr>() {
                    if !trusted_proxies.iter().any(|net| net.contains(&ip)) {
                        return ip.to_string();
                    }
                }
            }
        }
    }

    peer.to_string()
}
