// src/domain/mod.rs
// Core kennel types shared by the stores, the HTTP layer and the
// statistics aggregator.

use std::collections::VecDeque;
use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::CONFIG;

/// Wall-clock format used for walk timestamps, both on the wire and on disk.
pub const WALK_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("cage id {0} is out of range (1..={1})")]
    CageOutOfRange(u16, u16),
    #[error("invalid walk timestamp '{0}', expected YYYY-MM-DD HH:MM:SS")]
    BadTimestamp(String),
}

/// Identifier of an enclosure. Construction is the single place the
/// configured 1..=max_cages bound is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CageId(u16);

impl CageId {
    pub fn new(raw: u16) -> Result<Self, DomainError> {
        let max = CONFIG.max_cages;
        if raw >= 1 && raw <= max {
            Ok(Self(raw))
        } else {
            Err(DomainError::CageOutOfRange(raw, max))
        }
    }

    pub fn get(self) -> u16 {
        self.0
    }

    /// Default display name used when no name record exists for the cage.
    pub fn default_name(self) -> String {
        format!("{}번 견사", self.0)
    }
}

impl fmt::Display for CageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dog {
    pub id: String,
    pub name: String,
    pub cage_id: u16,
}

impl Dog {
    pub fn new(name: String, cage: CageId) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            cage_id: cage.get(),
        }
    }

    /// Roster entries may carry an empty name; viewers get a placeholder.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() { "이름 없음" } else { &self.name }
    }
}

/// Per-cage custom display name record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CageName {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalkEvent {
    pub id: String,
    pub time: String,
    pub cage_id: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dog_id: Option<String>,
}

impl WalkEvent {
    /// Timestamps are validated at write time, but files can be edited by
    /// hand; readers treat an unparseable stamp as outside every range.
    pub fn parsed_time(&self) -> Option<NaiveDateTime> {
        parse_walk_time(&self.time).ok()
    }
}

pub fn parse_walk_time(raw: &str) -> Result<NaiveDateTime, DomainError> {
    NaiveDateTime::parse_from_str(raw, WALK_TIME_FORMAT)
        .map_err(|_| DomainError::BadTimestamp(raw.to_string()))
}

/// Bounded log of the most recent walk events, oldest first.
///
/// Eviction policy: pushing past `capacity` silently drops the oldest entry.
#[derive(Debug, Clone)]
pub struct WalkLog {
    events: VecDeque<WalkEvent>,
    capacity: usize,
}

impl WalkLog {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Rebuild a log from its stored form, keeping only the newest
    /// `capacity` entries if the file somehow grew past the bound.
    pub fn from_events(mut events: Vec<WalkEvent>, capacity: usize) -> Self {
        if events.len() > capacity {
            events.drain(..events.len() - capacity);
        }
        Self {
            events: events.into(),
            capacity,
        }
    }

    pub fn push(&mut self, event: WalkEvent) {
        if self.events.len() == self.capacity {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    /// Remove the event with the given id. Returns false when absent.
    pub fn remove(&mut self, event_id: &str) -> bool {
        let before = self.events.len();
        self.events.retain(|e| e.id != event_id);
        self.events.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &WalkEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn into_events(self) -> Vec<WalkEvent> {
        self.events.into()
    }
}
