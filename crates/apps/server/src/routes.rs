use std::sync::Arc;

use axum::extract::{Path as AxumPath, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use catalog::SiteStore;
use foundation::SiteId;
use serde::Deserialize;
use view::{MapConfig, SiteMap};

#[derive(Clone)]
pub struct AppState {
    map: Arc<SiteMap>,
}

impl AppState {
    /// Groups are computed once here; the store never changes while serving.
    pub fn new(config: MapConfig, store: SiteStore) -> Self {
        Self {
            map: Arc::new(SiteMap::new(config, store)),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct MarkersQuery {
    pub zoom: Option<f64>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/museums.json", get(get_dataset))
        .route("/api/config", get(get_config))
        .route("/api/markers", get(get_markers))
        .route("/api/sites/:id", get(get_site))
        .with_state(state)
}

async fn healthz() -> Response {
    (StatusCode::OK, "ok").into_response()
}

async fn get_dataset(State(state): State<AppState>) -> Response {
    Json(state.map.store().to_dataset()).into_response()
}

async fn get_config(State(state): State<AppState>) -> Response {
    Json(*state.map.config()).into_response()
}

async fn get_markers(
    State(state): State<AppState>,
    Query(query): Query<MarkersQuery>,
) -> Response {
    let zoom = query.zoom.unwrap_or(state.map.config().initial_zoom);
    Json(state.map.at_zoom(zoom)).into_response()
}

async fn get_site(State(state): State<AppState>, AxumPath(id): AxumPath<i64>) -> Response {
    match state.map.store().get(SiteId(id)) {
        Some(site) => Json(site.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, "not found").into_response(),
    }
}
