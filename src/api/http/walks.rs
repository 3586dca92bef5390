// src/api/http/walks.rs
// Walk logs, cage-level and per-dog. Timestamps are validated here, at
// write time; the stores never see a stamp that does not parse.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use tracing::info;

use super::{Ack, AckWithId, cage_or_404};
use crate::api::error::{ApiError, ApiResult, IntoApiError, IntoApiErrorOption};
use crate::domain::{CageId, WalkEvent, parse_walk_time};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct WalkCreate {
    pub time: Option<String>,
}

fn validated_time(body: WalkCreate) -> ApiResult<String> {
    let time = body.time.ok_or_bad_request("time is required")?;
    parse_walk_time(&time).map_err(|e| ApiError::bad_request(e.to_string()))?;
    Ok(time)
}

fn new_event(cage: CageId, dog_id: Option<String>, time: String) -> WalkEvent {
    WalkEvent {
        id: uuid::Uuid::new_v4().to_string(),
        time,
        cage_id: cage.get(),
        dog_id,
    }
}

/// GET /cage/{id}/walks
pub async fn list_cage_walks(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u16>,
) -> ApiResult<Json<Vec<WalkEvent>>> {
    let cage = cage_or_404(id)?;
    let log = state
        .cage_walks
        .get(cage)
        .await
        .into_api_error("Failed to read walk log")?
        .unwrap_or_else(|| state.cage_walks.empty_log());
    Ok(Json(log.into_events()))
}

/// POST /cage/{id}/walk
pub async fn record_cage_walk(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u16>,
    Json(body): Json<WalkCreate>,
) -> ApiResult<Json<AckWithId>> {
    let cage = cage_or_404(id)?;
    let time = validated_time(body)?;

    let mut log = state
        .cage_walks
        .get(cage)
        .await
        .into_api_error("Failed to read walk log")?
        .unwrap_or_else(|| state.cage_walks.empty_log());

    let event = new_event(cage, None, time);
    let event_id = event.id.clone();
    log.push(event);

    state
        .cage_walks
        .put(cage, &log)
        .await
        .into_api_error("Failed to save walk log")?;

    info!(%cage, %event_id, "recorded cage walk");
    Ok(Json(AckWithId::ok(event_id)))
}

/// DELETE /cage/{id}/walk/{walk_id}
pub async fn delete_cage_walk(
    State(state): State<Arc<AppState>>,
    Path((id, walk_id)): Path<(u16, String)>,
) -> ApiResult<Json<Ack>> {
    let cage = cage_or_404(id)?;

    let mut log = state
        .cage_walks
        .get(cage)
        .await
        .into_api_error("Failed to read walk log")?
        .ok_or_not_found("no walk records for this cage")?;

    if !log.remove(&walk_id) {
        return Err(ApiError::not_found("walk record not found"));
    }

    state
        .cage_walks
        .put(cage, &log)
        .await
        .into_api_error("Failed to save walk log")?;

    Ok(Json(Ack::ok()))
}

/// GET /cage/{id}/dogs/{dog_id}/walks
pub async fn list_dog_walks(
    State(state): State<Arc<AppState>>,
    Path((id, dog_id)): Path<(u16, String)>,
) -> ApiResult<Json<Vec<WalkEvent>>> {
    let cage = cage_or_404(id)?;
    let log = state
        .dog_walks
        .get(cage, &dog_id)
        .await
        .into_api_error("Failed to read walk log")?
        .unwrap_or_else(|| state.dog_walks.empty_log());
    Ok(Json(log.into_events()))
}

/// POST /cage/{id}/dogs/{dog_id}/walk
pub async fn record_dog_walk(
    State(state): State<Arc<AppState>>,
    Path((id, dog_id)): Path<(u16, String)>,
    Json(body): Json<WalkCreate>,
) -> ApiResult<Json<AckWithId>> {
    let cage = cage_or_404(id)?;
    let time = validated_time(body)?;

    let mut log = state
        .dog_walks
        .get(cage, &dog_id)
        .await
        .into_api_error("Failed to read walk log")?
        .unwrap_or_else(|| state.dog_walks.empty_log());

    let event = new_event(cage, Some(dog_id.clone()), time);
    let event_id = event.id.clone();
    log.push(event);

    state
        .dog_walks
        .put(cage, &dog_id, &log)
        .await
        .into_api_error("Failed to save walk log")?;

    info!(%cage, %dog_id, %event_id, "recorded dog walk");
    Ok(Json(AckWithId::ok(event_id)))
}

/// DELETE /cage/{id}/dogs/{dog_id}/walk/{walk_id}
pub async fn delete_dog_walk(
    State(state): State<Arc<AppState>>,
    Path((id, dog_id, walk_id)): Path<(u16, String, String)>,
) -> ApiResult<Json<Ack>> {
    let cage = cage_or_404(id)?;

    let mut log = state
        .dog_walks
        .get(cage, &dog_id)
        .await
        .into_api_error("Failed to read walk log")?
        .ok_or_not_found("no walk records for this dog")?;

    if !log.remove(&walk_id) {
        return Err(ApiError::not_found("walk record not found"));
    }

    state
        .dog_walks
        .put(cage, &dog_id, &log)
        .await
        .into_api_error("Failed to save walk log")?;

    Ok(Json(Ack::ok()))
}
