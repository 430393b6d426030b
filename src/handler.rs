//! `GetData` request pipeline and HTTP routes.
//!
//! The pipeline runs in a fixed order: parse inputs, fetch the dataset,
//! narrow it with the filter chain, then distance-sort the children of
//! whatever is left. [`get_data`] holds the whole pipeline so it can be
//! exercised without an HTTP layer.

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::distance::distance_sort;
use crate::error::{ApiError, Result};
use crate::filter::chain_filter;
use crate::models::Area;
use crate::source::DatasetSource;

/// Raw query string values, all optional
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetDataQuery {
    /// Comma-separated name chain, underscores standing in for spaces
    pub filter: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
}

/// Application state shared across handlers
pub struct AppState<S> {
    pub source: S,
}

impl<S> AppState<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }
}

/// Split a filter string into name tokens.
///
/// `"United_States,California"` becomes `["United States", "California"]`.
/// Empty input yields no tokens; empty segments are kept and never match.
pub fn parse_filter(filter: Option<&str>) -> Vec<String> {
    match filter {
        Some(f) if !f.is_empty() => f.split(',').map(|p| p.replace('_', " ")).collect(),
        _ => Vec::new(),
    }
}

/// Parse the reference coordinate; `None` unless both halves are supplied.
///
/// Values must be finite and within ±90 latitude / ±180 longitude.
pub fn parse_coordinates(latitude: Option<&str>, longitude: Option<&str>) -> Result<Option<(f64, f64)>> {
    let (Some(lat_str), Some(lon_str)) = (latitude, longitude) else {
        return Ok(None);
    };

    let parse = |s: &str, limit: f64| {
        s.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && v.abs() <= limit)
    };

    match (parse(lat_str, 90.0), parse(lon_str, 180.0)) {
        (Some(lat), Some(lon)) => Ok(Some((lat, lon))),
        _ => Err(ApiError::BadCoordinate {
            latitude: lat_str.to_string(),
            longitude: lon_str.to_string(),
        }),
    }
}

/// Run the full request pipeline against `source`
pub async fn get_data<S: DatasetSource>(source: &S, query: &GetDataQuery) -> Result<Area> {
    info!("Filter: {:?}", query.filter);
    info!("Latitude: {:?}", query.latitude);
    info!("Longitude: {:?}", query.longitude);

    let tokens = parse_filter(query.filter.as_deref());
    if tokens.is_empty() {
        info!("No filters supplied");
    } else {
        info!("{} filters", tokens.len());
    }

    info!("Downloading data...");
    let global = source.fetch().await?;

    let mut core = if tokens.is_empty() {
        global
    } else {
        info!("Filtering data...");
        chain_filter(global, tokens.as_slice()).ok_or_else(|| ApiError::FilterNotFound {
            filter: query.filter.clone().unwrap_or_default(),
        })?
    };

    // Fetch and filter failures take precedence over a bad coordinate
    match parse_coordinates(query.latitude.as_deref(), query.longitude.as_deref())? {
        Some((lat, lon)) => {
            info!("Sorting {} areas by distance from ({}, {})", core.areas.len(), lat, lon);
            let children = std::mem::take(&mut core.areas);
            core.areas = distance_sort(children, lat, lon);
        }
        None => info!("No need to sort by distance because a lat and long were not provided"),
    }

    Ok(core)
}

/// GetData endpoint
async fn get_data_handler<S: DatasetSource>(
    State(state): State<Arc<AppState<S>>>,
    query: std::result::Result<Query<GetDataQuery>, QueryRejection>,
) -> Result<Json<Area>> {
    let Query(params) = query.map_err(|e| ApiError::BadQuery(e.body_text()))?;
    let area = get_data(&state.source, &params).await?;
    Ok(Json(area))
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// Health check endpoint
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Build the router with every route bound to `state`
pub fn router<S: DatasetSource>(state: Arc<AppState<S>>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/GetData", get(get_data_handler::<S>))
        .route("/GetDataV2", get(get_data_handler::<S>))
        .route("/api/GetData", get(get_data_handler::<S>))
        .route("/api/GetDataV2", get(get_data_handler::<S>))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
