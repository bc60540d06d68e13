mod routes;

use std::env;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use axum::http::Method;
use catalog::{CatalogError, SiteStore};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use view::MapConfig;

use crate::routes::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let dataset = env::var("SITES_DATASET")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data/museums.json"));
    let addr: SocketAddr = env::var("SITES_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:9200".to_string())
        .parse()
        .expect("invalid SITES_ADDR");

    let defaults = MapConfig::default();
    let config = MapConfig {
        initial_zoom: env_var_f64("SITES_INITIAL_ZOOM", defaults.initial_zoom),
        aggregation_threshold: env_var_f64(
            "SITES_AGGREGATE_MAX_ZOOM",
            defaults.aggregation_threshold,
        ),
        ..defaults
    };

    let state = AppState::new(config, load_or_empty(&dataset).await);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods([Method::GET, Method::OPTIONS]);

    let app = routes::router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    info!("site map server listening on http://{addr}");
    axum::serve(tokio::net::TcpListener::bind(addr).await.unwrap(), app)
        .await
        .unwrap();
}

/// A failed load is logged and leaves the map empty; the server still starts.
async fn load_or_empty(path: &Path) -> SiteStore {
    match load_dataset(path).await {
        Ok(store) => {
            info!(path = %path.display(), sites = store.len(), "dataset loaded");
            store
        }
        Err(err) => {
            error!("dataset load failed, serving an empty map: {err}");
            SiteStore::new()
        }
    }
}

async fn load_dataset(path: &Path) -> Result<SiteStore, CatalogError> {
    let raw = tokio::fs::read(path).await.map_err(|e| CatalogError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    SiteStore::from_json_slice(&raw)
}

fn env_var_f64(key: &str, default: f64) -> f64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
