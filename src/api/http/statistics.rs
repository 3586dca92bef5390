// src/api/http/statistics.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::api::error::{ApiError, ApiResult, IntoApiError, IntoApiErrorOption};
use crate::state::AppState;
use crate::stats::{StatisticRow, StatsRange, compute_statistics};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

fn parse_date(raw: &str, param: &str) -> ApiResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| ApiError::bad_request(format!("{param} must be a YYYY-MM-DD date")))
}

/// GET /api/statistics?startDate&endDate
pub async fn walk_statistics(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StatisticsQuery>,
) -> ApiResult<Json<Vec<StatisticRow>>> {
    let start_raw = query
        .start_date
        .ok_or_bad_request("startDate and endDate are required")?;
    let end_raw = query
        .end_date
        .ok_or_bad_request("startDate and endDate are required")?;

    let start = parse_date(&start_raw, "startDate")?;
    let end = parse_date(&end_raw, "endDate")?;

    let rows = compute_statistics(
        &state.rosters,
        &state.cage_names,
        &state.dog_walks,
        StatsRange::new(start, end),
    )
    .await
    .into_api_error("Failed to compute statistics")?;

    Ok(Json(rows))
}
