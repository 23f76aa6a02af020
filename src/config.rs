use std::net::IpAddr;

use ipnet::IpNet;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Shared secret for verifying identity-provider session tokens (HS256).
    pub session_secret: String,
    /// Signing secret for the identity-provider webhook ("whsec_..." form).
    pub webhook_secret: String,
    pub host: IpAddr,
    pub port: u16,
    pub max_body_size: usize,
    pub trusted_proxies: Vec<IpNet>,
    /// Base URL of the IP-geolocation API. None disables lookups.
    pub geoip_api_base: Option<String>,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = env_required("DATABASE_URL")?;
        let session_secret = env_required("STITCHDESK_SESSION_SECRET")?;
        let webhook_secret = env_required("STITCHDESK_WEBHOOK_SECRET")?;

        let host: IpAddr = env_or("STITCHDESK_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid STITCHDESK_HOST: {e}"))?;

        let port: u16 = env_or("STITCHDESK_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid STITCHDESK_PORT: {e}"))?;

        let max_body_size: usize = env_or("STITCHDESK_MAX_BODY_SIZE", "1048576")
            .parse()
            .map_err(|e| format!("Invalid STITCHDESK_MAX_BODY_SIZE: {e}"))?;

        let trusted_proxies: Vec<IpNet> = env_or("STITCHDESK_TRUSTED_PROXIES", "")
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .map(|s| {
                s.trim()
                    .parse()
                    .map_err(|e| format!("Invalid STITCHDESK_TRUSTED_PROXIES entry '{s}': {e}"))
            })
            .collect::<Result<Vec<_>, _>>()?;

        // Empty value disables geolocation lookups entirely.
        let geoip_api_base = match env_or("STITCHDESK_GEOIP_API", "https://api.db-ip.com/v2/free") {
            s if s.trim().is_empty() => None,
            s => Some(s.trim_end_matches('/').to_string()),
        };

        let log_level = env_or("STITCHDESK_LOG_LEVEL", "info");

        Ok(Config {
            database_url,
            session_secret,
            webhook_secret,
            host,
            port,
            max_body_size,
            trusted_proxies,
            geoip_api_base,
            log_level,
        })
    }
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
