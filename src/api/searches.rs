//! The two search endpoints share one pipeline:
//! parse -> validate -> fetch upstream -> persist -> transform -> respond.
//! Mode-specific behavior lives in [`SearchRequest`].

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

use crate::clients::usgs::{UsgsClient, UsgsError};
use crate::db::NewSearch;
use crate::transform::{EventFeature, transform};

use super::{ApiError, AppState, validation};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DateSearchParams {
    #[serde(rename = "fechaInicio")]
    pub fecha_inicio: NaiveDate,
    #[serde(rename = "fechaFin")]
    pub fecha_fin: NaiveDate,
    #[serde(rename = "magnitudeMinima")]
    pub magnitude_minima: f64,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MagnitudeSearchParams {
    #[serde(rename = "magnitudeMinima")]
    pub magnitude_minima: f64,
    #[serde(rename = "magnitudeMaxima")]
    pub magnitude_maxima: f64,
}

/// A validated-shape search in one of the two modes. Carries everything
/// the pipeline needs: which rule set applies, how to query the
/// provider, and what to write to the audit log.
#[derive(Debug, Clone, Copy)]
pub enum SearchRequest {
    ByDates {
        start: NaiveDate,
        end: NaiveDate,
        min_magnitude: f64,
    },
    ByMagnitudes {
        min_magnitude: f64,
        max_magnitude: f64,
    },
}

impl SearchRequest {
    fn validate(&self) -> Result<(), ApiError> {
        match *self {
            Self::ByDates {
                start,
                end,
                min_magnitude,
            } => validation::validate_date_search(start, end, min_magnitude, Utc::now().date_naive()),
            Self::ByMagnitudes {
                min_magnitude,
                max_magnitude,
            } => validation::validate_magnitude_search(min_magnitude, max_magnitude),
        }
    }

    async fn fetch(&self, usgs: &UsgsClient) -> Result<Value, UsgsError> {
        match *self {
            Self::ByDates {
                start,
                end,
                min_magnitude,
            } => usgs.fetch_by_date_range(start, end, min_magnitude).await,
            Self::ByMagnitudes {
                min_magnitude,
                max_magnitude,
            } => {
                usgs.fetch_by_magnitude_range(min_magnitude, max_magnitude)
                    .await
            }
        }
    }

    fn to_record(self, raw_response: String) -> NewSearch {
        match self {
            Self::ByDates {
                start,
                end,
                min_magnitude,
            } => NewSearch {
                start_date: Some(start),
                end_date: Some(end),
                min_magnitude,
                max_magnitude: None,
                raw_response,
            },
            Self::ByMagnitudes {
                min_magnitude,
                max_magnitude,
            } => NewSearch {
                start_date: None,
                end_date: None,
                min_magnitude,
                max_magnitude: Some(max_magnitude),
                raw_response,
            },
        }
    }

    const fn mode(&self) -> &'static str {
        match self {
            Self::ByDates { .. } => "by_dates",
            Self::ByMagnitudes { .. } => "by_magnitudes",
        }
    }
}

pub async fn earthquakes_by_dates(
    State(state): State<Arc<AppState>>,
    params: Result<Query<DateSearchParams>, QueryRejection>,
) -> Result<Json<Vec<EventFeature>>, ApiError> {
    let Query(params) = params.map_err(|rejection| ApiError::parse(rejection.body_text()))?;

    execute_search(
        &state,
        SearchRequest::ByDates {
            start: params.fecha_inicio,
            end: params.fecha_fin,
            min_magnitude: params.magnitude_minima,
        },
    )
    .await
}

pub async fn earthquakes_by_magnitudes(
    State(state): State<Arc<AppState>>,
    params: Result<Query<MagnitudeSearchParams>, QueryRejection>,
) -> Result<Json<Vec<EventFeature>>, ApiError> {
    let Query(params) = params.map_err(|rejection| ApiError::parse(rejection.body_text()))?;

    execute_search(
        &state,
        SearchRequest::ByMagnitudes {
            min_magnitude: params.magnitude_minima,
            max_magnitude: params.magnitude_maxima,
        },
    )
    .await
}

/// The shared pipeline. The search is persisted before the response is
/// produced; a storage failure therefore aborts the whole request.
async fn execute_search(
    state: &AppState,
    request: SearchRequest,
) -> Result<Json<Vec<EventFeature>>, ApiError> {
    request.validate()?;

    let raw = request.fetch(&state.usgs).await?;

    let raw_text = serde_json::to_string(&raw)
        .map_err(|e| ApiError::MalformedResponse(e.to_string()))?;

    let search_id = state
        .store
        .log_search(request.to_record(raw_text))
        .await
        .map_err(|e| ApiError::storage(e.to_string()))?;

    let features = transform(&raw)?;

    info!(
        mode = request.mode(),
        search_id,
        events = features.len(),
        "Search completed"
    );

    Ok(Json(features))
}
