// src/api/http/cages.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::{Ack, cage_or_404};
use crate::api::error::{ApiResult, IntoApiError, IntoApiErrorOption};
use crate::config::CONFIG;
use crate::domain::{CageId, CageName, WalkLog};
use crate::media::{cage_photo_keys, dog_photo_keys};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CagesQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CageSummary {
    pub id: u16,
    pub name: String,
    pub image_url: String,
    pub last_walk_days: Option<i64>,
    pub walked_today: bool,
    pub has_more: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CagesResponse {
    pub cages: Vec<CageSummary>,
    pub has_more: bool,
    pub next_page: Option<u64>,
}

/// GET /api/cages?page&limit
///
/// Paged summaries over the full configured cage range. A cage with no
/// records at all still appears, under its default name.
pub async fn list_cages(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CagesQuery>,
) -> ApiResult<Json<CagesResponse>> {
    let max_cages = CONFIG.max_cages as u64;
    let page = query.page.unwrap_or(1).max(1) as u64;
    let limit = query.limit.unwrap_or(CONFIG.cages_page_limit).max(1) as u64;

    let start_id = (page - 1) * limit + 1;
    let end_id = (start_id + limit - 1).min(max_cages);

    let today = Local::now().date_naive();
    let mut cages = Vec::new();

    for id in start_id..=end_id {
        let Ok(cage) = CageId::new(id as u16) else {
            continue;
        };

        let dogs = match state.rosters.get(cage).await {
            Ok(dogs) => dogs.unwrap_or_default(),
            Err(e) => {
                warn!(%cage, "skipping unreadable roster in cage listing: {e}");
                Vec::new()
            }
        };

        let thumb_key = match dogs.first() {
            Some(dog) => dog_photo_keys(cage, &dog.id).1,
            None => cage_photo_keys(cage).1,
        };

        let walks = match state.cage_walks.get(cage).await {
            Ok(log) => log,
            Err(e) => {
                warn!(%cage, "skipping unreadable walk log in cage listing: {e}");
                None
            }
        };
        let (walked_today, last_walk_days) = walk_recency(walks.as_ref(), today);

        let name = match state.cage_names.display_name(cage).await {
            Ok(name) => name,
            Err(e) => {
                warn!(%cage, "falling back to default cage name: {e}");
                cage.default_name()
            }
        };

        cages.push(CageSummary {
            id: cage.get(),
            name,
            image_url: state.photos.public_url(&thumb_key),
            last_walk_days,
            walked_today,
            has_more: id < max_cages,
        });
    }

    let has_more = end_id < max_cages;
    Ok(Json(CagesResponse {
        cages,
        has_more,
        next_page: has_more.then(|| page + 1),
    }))
}

/// Today flag plus whole-day distance to the newest strictly-earlier walk.
/// Once the cage was walked today the distance is not reported.
fn walk_recency(log: Option<&WalkLog>, today: NaiveDate) -> (bool, Option<i64>) {
    let Some(log) = log else {
        return (false, None);
    };

    let mut walked_today = false;
    let mut last_walk: Option<NaiveDate> = None;
    for event in log.iter() {
        let Some(time) = event.parsed_time() else {
            continue;
        };
        let date = time.date();
        if date == today {
            walked_today = true;
        } else if date < today {
            last_walk = Some(last_walk.map_or(date, |prev| prev.max(date)));
        }
    }

    if walked_today {
        (true, None)
    } else {
        (false, last_walk.map(|date| (today - date).num_days()))
    }
}

#[derive(Debug, Serialize)]
pub struct CageNameResponse {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CageNameUpdate {
    pub name: Option<String>,
}

/// GET /cage/{id}/name
pub async fn get_cage_name(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u16>,
) -> ApiResult<Json<CageNameResponse>> {
    let cage = cage_or_404(id)?;
    let name = state
        .cage_names
        .display_name(cage)
        .await
        .into_api_error("Failed to read cage name")?;
    Ok(Json(CageNameResponse { name }))
}

/// PUT /cage/{id}/name
pub async fn put_cage_name(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u16>,
    Json(body): Json<CageNameUpdate>,
) -> ApiResult<Json<Ack>> {
    let cage = cage_or_404(id)?;
    let name = body
        .name
        .filter(|n| !n.is_empty())
        .ok_or_bad_request("name is required")?;

    state
        .cage_names
        .put(cage, &CageName { name })
        .await
        .into_api_error("Failed to save cage name")?;

    info!(%cage, "renamed cage");
    Ok(Json(Ack::ok()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::WalkEvent;

    fn log_with(times: &[&str]) -> WalkLog {
        let mut log = WalkLog::with_capacity(20);
        for time in times {
            log.push(WalkEvent {
                id: uuid::Uuid::new_v4().to_string(),
                time: time.to_string(),
                cage_id: 1,
                dog_id: None,
            });
        }
        log
    }

    #[test]
    fn test_walk_recency_today() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
        let log = log_with(&["2024-05-20 07:30:00", "2024-05-18 07:30:00"]);
        assert_eq!(walk_recency(Some(&log), today), (true, None));
    }

    #[test]
    fn test_walk_recency_days_since() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
        let log = log_with(&["2024-05-14 07:30:00", "2024-05-17 19:00:00"]);
        assert_eq!(walk_recency(Some(&log), today), (false, Some(3)));
    }

    #[test]
    fn test_walk_recency_empty() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
        assert_eq!(walk_recency(None, today), (false, None));
        assert_eq!(walk_recency(Some(&log_with(&[])), today), (false, None));
    }
}
