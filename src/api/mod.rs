use axum::{Router, http::HeaderValue, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::clients::usgs::UsgsClient;
use crate::config::Config;
use crate::db::Store;

mod error;
mod searches;
mod validation;

pub use error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,

    pub store: Store,

    pub usgs: Arc<UsgsClient>,
}

pub async fn create_app_state_from_config(config: Config) -> anyhow::Result<Arc<AppState>> {
    let store = Store::with_pool_options(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await?;

    let usgs = Arc::new(UsgsClient::new(&config.usgs)?);

    Ok(Arc::new(AppState {
        config,
        store,
        usgs,
    }))
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors_origins = state.config.server.cors_allowed_origins.clone();

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .route(
            "/searchEarthquake/getEarthquakesByDates",
            get(searches::earthquakes_by_dates),
        )
        .route(
            "/searchEarthquake/getEarthquakesByMagnitudes",
            get(searches::earthquakes_by_magnitudes),
        )
        .with_state(state)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}
