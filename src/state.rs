use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::geo::GeoCache;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub pool: PgPool,
    pub config: Config,
    pub http: reqwest::Client,
    pub geo_cache: GeoCache,
}
