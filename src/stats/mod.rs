// src/stats/mod.rs
// Walk statistics: per-dog walk counts over a date range, joined with dog
// and cage display names. Computed fresh on every query straight off the
// stores; nothing here is persisted.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use tracing::warn;

use crate::domain::WalkEvent;
use crate::store::{CageNameStore, DogWalkStore, RosterStore, StoreError};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticRow {
    pub dog_id: String,
    pub dog_name: String,
    pub cage_id: u16,
    pub cage_name: String,
    pub walk_count: u64,
}

/// Inclusive date range for a statistics query. The end date is widened to
/// its last instant so the whole calendar day counts.
#[derive(Debug, Clone, Copy)]
pub struct StatsRange {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl StatsRange {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start: start_date.and_hms_opt(0, 0, 0).expect("midnight is valid"),
            end: end_date
                .and_hms_milli_opt(23, 59, 59, 999)
                .expect("end of day is valid"),
        }
    }

    fn contains(&self, event: &WalkEvent) -> bool {
        match event.parsed_time() {
            Some(t) => t >= self.start && t <= self.end,
            None => {
                warn!(id = %event.id, time = %event.time, "walk event with unparseable timestamp");
                false
            }
        }
    }
}

/// Count every dog's walks inside the range, descending by count.
///
/// Every rostered dog gets a row, walked or not. Walk logs whose dog id is
/// not on any roster contribute nothing; that is policy, not an error.
pub async fn compute_statistics(
    rosters: &RosterStore,
    names: &CageNameStore,
    dog_walks: &DogWalkStore,
    range: StatsRange,
) -> Result<Vec<StatisticRow>, StoreError> {
    let mut by_dog: HashMap<String, StatisticRow> = HashMap::new();

    for (cage, dogs) in rosters.list().await? {
        let cage_name = match names.display_name(cage).await {
            Ok(name) => name,
            Err(e) => {
                warn!(%cage, "falling back to default cage name: {e}");
                cage.default_name()
            }
        };
        for dog in dogs {
            by_dog.insert(
                dog.id.clone(),
                StatisticRow {
                    dog_name: dog.display_name().to_string(),
                    dog_id: dog.id,
                    cage_id: cage.get(),
                    cage_name: cage_name.clone(),
                    walk_count: 0,
                },
            );
        }
    }

    for (_cage, dog_id, log) in dog_walks.list().await? {
        let walked = log.iter().filter(|event| range.contains(event)).count() as u64;
        if let Some(row) = by_dog.get_mut(&dog_id) {
            row.walk_count += walked;
        }
    }

    let mut rows: Vec<StatisticRow> = by_dog.into_values().collect();
    rows.sort_by(|a, b| b.walk_count.cmp(&a.walk_count));
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CageId, CageName, Dog, WalkEvent, WalkLog};

    struct Fixture {
        _dir: tempfile::TempDir,
        rosters: RosterStore,
        names: CageNameStore,
        dog_walks: DogWalkStore,
    }

    fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let rosters = RosterStore::new(dir.path());
        let names = CageNameStore::new(dir.path());
        let dog_walks = DogWalkStore::new(dir.path(), 20);
        Fixture {
            _dir: dir,
            rosters,
            names,
            dog_walks,
        }
    }

    fn walk(cage: CageId, dog_id: &str, time: &str) -> WalkEvent {
        WalkEvent {
            id: uuid::Uuid::new_v4().to_string(),
            time: time.to_string(),
            cage_id: cage.get(),
            dog_id: Some(dog_id.to_string()),
        }
    }

    async fn seed_dog(fx: &Fixture, cage: CageId, id: &str, name: &str) {
        let mut dogs = fx.rosters.get(cage).await.unwrap().unwrap_or_default();
        dogs.push(Dog {
            id: id.to_string(),
            name: name.to_string(),
            cage_id: cage.get(),
        });
        fx.rosters.put(cage, &dogs).await.unwrap();
    }

    async fn seed_walks(fx: &Fixture, cage: CageId, dog_id: &str, times: &[&str]) {
        let mut log = WalkLog::with_capacity(20);
        for time in times {
            log.push(walk(cage, dog_id, time));
        }
        fx.dog_walks.put(cage, dog_id, &log).await.unwrap();
    }

    fn range(start: &str, end: &str) -> StatsRange {
        StatsRange::new(start.parse().unwrap(), end.parse().unwrap())
    }

    #[tokio::test]
    async fn test_counts_are_range_inclusive() {
        let fx = fixture();
        let cage = CageId::new(3).unwrap();
        seed_dog(&fx, cage, "abc", "Rex").await;
        seed_walks(
            &fx,
            cage,
            "abc",
            &["2024-01-01 09:00:00", "2024-01-05 10:00:00"],
        )
        .await;

        let rows = compute_statistics(
            &fx.rosters,
            &fx.names,
            &fx.dog_walks,
            range("2024-01-01", "2024-01-03"),
        )
        .await
        .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].dog_id, "abc");
        assert_eq!(rows[0].dog_name, "Rex");
        assert_eq!(rows[0].cage_id, 3);
        assert_eq!(rows[0].walk_count, 1);

        let rows = compute_statistics(
            &fx.rosters,
            &fx.names,
            &fx.dog_walks,
            range("2024-01-01", "2024-01-05"),
        )
        .await
        .unwrap();
        assert_eq!(rows[0].walk_count, 2);
    }

    #[tokio::test]
    async fn test_end_date_covers_whole_day() {
        let fx = fixture();
        let cage = CageId::new(1).unwrap();
        seed_dog(&fx, cage, "d1", "Bo").await;
        seed_walks(&fx, cage, "d1", &["2024-03-10 23:59:59"]).await;

        let rows = compute_statistics(
            &fx.rosters,
            &fx.names,
            &fx.dog_walks,
            range("2024-03-10", "2024-03-10"),
        )
        .await
        .unwrap();
        assert_eq!(rows[0].walk_count, 1);
    }

    #[tokio::test]
    async fn test_sorted_descending_by_count() {
        let fx = fixture();
        let cage = CageId::new(2).unwrap();
        seed_dog(&fx, cage, "busy", "Busy").await;
        seed_dog(&fx, cage, "lazy", "Lazy").await;
        seed_walks(
            &fx,
            cage,
            "busy",
            &[
                "2024-01-01 08:00:00",
                "2024-01-01 18:00:00",
                "2024-01-02 08:00:00",
                "2024-01-02 18:00:00",
                "2024-01-03 08:00:00",
            ],
        )
        .await;
        seed_walks(&fx, cage, "lazy", &["2024-01-01 12:00:00", "2024-01-02 12:00:00"]).await;

        let rows = compute_statistics(
            &fx.rosters,
            &fx.names,
            &fx.dog_walks,
            range("2024-01-01", "2024-01-07"),
        )
        .await
        .unwrap();
        assert_eq!(rows[0].dog_id, "busy");
        assert_eq!(rows[0].walk_count, 5);
        assert_eq!(rows[1].dog_id, "lazy");
        assert_eq!(rows[1].walk_count, 2);
    }

    #[tokio::test]
    async fn test_dog_without_log_still_appears() {
        let fx = fixture();
        let cage = CageId::new(4).unwrap();
        seed_dog(&fx, cage, "nolog", "").await;

        let rows = compute_statistics(
            &fx.rosters,
            &fx.names,
            &fx.dog_walks,
            range("2024-01-01", "2024-01-31"),
        )
        .await
        .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].walk_count, 0);
        assert_eq!(rows[0].dog_name, "이름 없음");
        assert_eq!(rows[0].cage_name, "4번 견사");
    }

    #[tokio::test]
    async fn test_orphan_log_contributes_nothing() {
        let fx = fixture();
        let cage = CageId::new(6).unwrap();
        seed_dog(&fx, cage, "known", "Known").await;
        seed_walks(&fx, cage, "ghost", &["2024-01-02 09:00:00"]).await;

        let rows = compute_statistics(
            &fx.rosters,
            &fx.names,
            &fx.dog_walks,
            range("2024-01-01", "2024-01-31"),
        )
        .await
        .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].dog_id, "known");
        assert_eq!(rows[0].walk_count, 0);
    }

    #[tokio::test]
    async fn test_custom_cage_name_joined() {
        let fx = fixture();
        let cage = CageId::new(8).unwrap();
        seed_dog(&fx, cage, "d8", "Ball").await;
        fx.names
            .put(cage, &CageName { name: "별관".to_string() })
            .await
            .unwrap();

        let rows = compute_statistics(
            &fx.rosters,
            &fx.names,
            &fx.dog_walks,
            range("2024-01-01", "2024-01-02"),
        )
        .await
        .unwrap();
        assert_eq!(rows[0].cage_name, "별관");
    }

    #[tokio::test]
    async fn test_unparseable_timestamp_counts_zero() {
        let fx = fixture();
        let cage = CageId::new(10).unwrap();
        seed_dog(&fx, cage, "odd", "Odd").await;
        seed_walks(&fx, cage, "odd", &["definitely not a date"]).await;

        let rows = compute_statistics(
            &fx.rosters,
            &fx.names,
            &fx.dog_walks,
            range("2020-01-01", "2030-01-01"),
        )
        .await
        .unwrap();
        assert_eq!(rows[0].walk_count, 0);
    }
}
