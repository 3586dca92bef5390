// src/api/http/dogs.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use tracing::{info, warn};

use super::{Ack, AckWithId, cage_or_404};
use crate::api::error::{ApiError, ApiResult, IntoApiError, IntoApiErrorOption};
use crate::domain::Dog;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DogUpsert {
    pub name: Option<String>,
}

/// GET /cage/{id}/dogs
pub async fn list_dogs(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u16>,
) -> ApiResult<Json<Vec<Dog>>> {
    let cage = cage_or_404(id)?;
    let dogs = state
        .rosters
        .get(cage)
        .await
        .into_api_error("Failed to read dog roster")?
        .unwrap_or_default();
    Ok(Json(dogs))
}

/// POST /cage/{id}/dogs
pub async fn add_dog(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u16>,
    Json(body): Json<DogUpsert>,
) -> ApiResult<Json<AckWithId>> {
    let cage = cage_or_404(id)?;
    let name = body.name.ok_or_bad_request("name is required")?;

    let mut dogs = state
        .rosters
        .get(cage)
        .await
        .into_api_error("Failed to read dog roster")?
        .unwrap_or_default();

    let dog = Dog::new(name, cage);
    let dog_id = dog.id.clone();
    dogs.push(dog);

    state
        .rosters
        .put(cage, &dogs)
        .await
        .into_api_error("Failed to save dog roster")?;

    info!(%cage, %dog_id, "added dog");
    Ok(Json(AckWithId::ok(dog_id)))
}

/// PUT /cage/{id}/dogs/{dog_id}
pub async fn rename_dog(
    State(state): State<Arc<AppState>>,
    Path((id, dog_id)): Path<(u16, String)>,
    Json(body): Json<DogUpsert>,
) -> ApiResult<Json<Ack>> {
    let cage = cage_or_404(id)?;
    let name = body.name.ok_or_bad_request("name is required")?;

    let mut dogs = state
        .rosters
        .get(cage)
        .await
        .into_api_error("Failed to read dog roster")?
        .ok_or_not_found("no dogs recorded for this cage")?;

    let dog = dogs
        .iter_mut()
        .find(|d| d.id == dog_id)
        .ok_or_not_found("dog not found")?;
    dog.name = name;

    state
        .rosters
        .put(cage, &dogs)
        .await
        .into_api_error("Failed to save dog roster")?;

    Ok(Json(Ack::ok()))
}

/// DELETE /cage/{id}/dogs/{dog_id}
///
/// Removes the roster entry and the dog's walk log with it, so scans do
/// not keep tripping over orphaned logs.
pub async fn remove_dog(
    State(state): State<Arc<AppState>>,
    Path((id, dog_id)): Path<(u16, String)>,
) -> ApiResult<Json<Ack>> {
    let cage = cage_or_404(id)?;

    let mut dogs = state
        .rosters
        .get(cage)
        .await
        .into_api_error("Failed to read dog roster")?
        .ok_or_not_found("no dogs recorded for this cage")?;

    let before = dogs.len();
    dogs.retain(|d| d.id != dog_id);
    if dogs.len() == before {
        return Err(ApiError::not_found("dog not found"));
    }

    state
        .rosters
        .put(cage, &dogs)
        .await
        .into_api_error("Failed to save dog roster")?;

    if let Err(e) = state.dog_walks.delete(cage, &dog_id).await {
        warn!(%cage, %dog_id, "failed to delete walk log for removed dog: {e}");
    }

    info!(%cage, %dog_id, "removed dog");
    Ok(Json(Ack::ok()))
}
