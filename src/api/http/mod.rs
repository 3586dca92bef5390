// src/api/http/mod.rs

pub mod cages;
pub mod dogs;
pub mod handlers;
pub mod photos;
pub mod router;
pub mod statistics;
pub mod walks;

use serde::Serialize;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::CageId;

/// Mutation acknowledgement body.
#[derive(Debug, Serialize)]
pub struct Ack {
    pub success: bool,
}

impl Ack {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Acknowledgement carrying the id of a freshly created record.
#[derive(Debug, Serialize)]
pub struct AckWithId {
    pub success: bool,
    pub id: String,
}

impl AckWithId {
    pub fn ok(id: String) -> Self {
        Self { success: true, id }
    }
}

/// Every `/cage/{id}/...` route funnels its path id through here, so the
/// configured cage range is enforced uniformly.
pub(crate) fn cage_or_404(id: u16) -> ApiResult<CageId> {
    CageId::new(id).map_err(|e| ApiError::not_found(e.to_string()))
}
