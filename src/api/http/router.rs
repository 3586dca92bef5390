// src/api/http/router.rs
// Route table for the whole service.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::{
    cages::{get_cage_name, list_cages, put_cage_name},
    dogs::{add_dog, list_dogs, remove_dog, rename_dog},
    handlers::health_handler,
    photos::{upload_cage_photo, upload_dog_photo},
    statistics::walk_statistics,
    walks::{
        delete_cage_walk, delete_dog_walk, list_cage_walks, list_dog_walks, record_cage_walk,
        record_dog_walk,
    },
};
use crate::config::CONFIG;
use crate::state::AppState;

pub fn app_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        // Health
        .route("/health", get(health_handler))
        // Cage listing and statistics
        .route("/api/cages", get(list_cages))
        .route("/api/statistics", get(walk_statistics))
        // Cage names
        .route("/cage/{id}/name", get(get_cage_name).put(put_cage_name))
        // Cage walk log
        .route("/cage/{id}/walks", get(list_cage_walks))
        .route("/cage/{id}/walk", post(record_cage_walk))
        .route("/cage/{id}/walk/{walk_id}", delete(delete_cage_walk))
        // Dog roster
        .route("/cage/{id}/dogs", get(list_dogs).post(add_dog))
        .route("/cage/{id}/dogs/{dog_id}", put(rename_dog).delete(remove_dog))
        // Dog walk log
        .route("/cage/{id}/dogs/{dog_id}/walks", get(list_dog_walks))
        .route("/cage/{id}/dogs/{dog_id}/walk", post(record_dog_walk))
        .route(
            "/cage/{id}/dogs/{dog_id}/walk/{walk_id}",
            delete(delete_dog_walk),
        )
        // Photo uploads
        .route("/cage/{id}/upload", post(upload_cage_photo))
        .route("/cage/{id}/dogs/{dog_id}/photo", post(upload_dog_photo))
        .layer(DefaultBodyLimit::max(CONFIG.upload_max_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
