//! Visit lists: favorites, color buckets, memos and visited marks.
//!
//! A visit list is the one piece of user-owned state in the
//! application. It is keyed by event and split per day; each record
//! ties a circle to a color bucket (0 = uncolored, 1..=9 = catalog
//! colors), an optional memo and a visited flag.

use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use uuid::Uuid;

use crate::constants::MAX_FAVORITE_COLOR;

/// File format version written to new visit lists.
pub const VISIT_LIST_VERSION: &str = "1.0";

/// Metadata stored in a visit list file's frontmatter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitListMeta {
    /// Stable identifier for this list.
    pub id: String,
    /// Event the list belongs to.
    pub event: String,
    /// Human-readable list name.
    pub name: String,
    /// Creation timestamp.
    pub created: DateTime<Utc>,
    /// Last modification timestamp.
    pub modified: DateTime<Utc>,
    /// File format version.
    pub version: String,
}

/// One circle's entry in a visit list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteRecord {
    /// Circle the record refers to.
    pub circle_id: u32,
    /// Circle name cached at the time the record was created, so the
    /// file stays readable without the catalog at hand.
    pub name: String,
    /// Color bucket, 0 = uncolored.
    pub color: u8,
    /// Free-form memo.
    pub memo: String,
    /// Whether the circle has been visited.
    pub visited: bool,
}

/// A per-event visit list, split by event day.
///
/// Records within a day are kept sorted by `circle_id` and unique per
/// circle, so saved files are deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct VisitList {
    /// List metadata (persisted as frontmatter).
    pub metadata: VisitListMeta,
    days: BTreeMap<u8, Vec<FavoriteRecord>>,
}

impl VisitList {
    /// Creates an empty visit list for an event.
    ///
    /// # Arguments
    ///
    /// * `event` - Event name the list belongs to
    /// * `days` - Day numbers the event runs on
    #[must_use]
    pub fn new(event: &str, days: &[u8]) -> Self {
        let now = Utc::now();
        let mut day_map = BTreeMap::new();
        for &day in days {
            day_map.insert(day, Vec::new());
        }
        Self {
            metadata: VisitListMeta {
                id: Uuid::new_v4().to_string(),
                event: event.to_string(),
                name: format!("{event} visits"),
                created: now,
                modified: now,
                version: VISIT_LIST_VERSION.to_string(),
            },
            days: day_map,
        }
    }

    /// Creates an empty list around already-parsed metadata.
    #[must_use]
    pub fn from_metadata(metadata: VisitListMeta) -> Self {
        Self {
            metadata,
            days: BTreeMap::new(),
        }
    }

    /// Registers a day section, so it survives a save/load round trip
    /// even while empty.
    pub fn ensure_day(&mut self, day: u8) {
        self.days.entry(day).or_default();
    }

    /// Day numbers present in the list, ascending.
    #[must_use]
    pub fn days(&self) -> Vec<u8> {
        self.days.keys().copied().collect()
    }

    /// Records for one day, sorted by circle id.
    #[must_use]
    pub fn records_for(&self, day: u8) -> &[FavoriteRecord] {
        self.days.get(&day).map_or(&[], Vec::as_slice)
    }

    /// A single record, when present.
    #[must_use]
    pub fn record(&self, day: u8, circle_id: u32) -> Option<&FavoriteRecord> {
        self.days
            .get(&day)?
            .iter()
            .find(|r| r.circle_id == circle_id)
    }

    /// Total number of records across all days.
    #[must_use]
    pub fn len(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    /// Whether the list has no records at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Circle ids marked visited on one day.
    #[must_use]
    pub fn visited_for(&self, day: u8) -> HashSet<u32> {
        self.records_for(day)
            .iter()
            .filter(|r| r.visited)
            .map(|r| r.circle_id)
            .collect()
    }

    /// Number of visited circles on one day.
    #[must_use]
    pub fn visited_count(&self, day: u8) -> usize {
        self.records_for(day).iter().filter(|r| r.visited).count()
    }

    /// Inserts or replaces a record, keeping day order sorted.
    ///
    /// Used by the file parser; interactive edits go through the
    /// `toggle_visited`/`set_color`/`set_memo` methods instead.
    ///
    /// # Errors
    ///
    /// Returns an error when the record's color bucket is out of range.
    pub fn insert_record(&mut self, day: u8, record: FavoriteRecord) -> Result<()> {
        if record.color > MAX_FAVORITE_COLOR {
            bail!(
                "Color bucket {} out of range for circle {} (max {})",
                record.color,
                record.circle_id,
                MAX_FAVORITE_COLOR
            );
        }
        let records = self.days.entry(day).or_default();
        match records.binary_search_by_key(&record.circle_id, |r| r.circle_id) {
            Ok(idx) => records[idx] = record,
            Err(idx) => records.insert(idx, record),
        }
        Ok(())
    }

    /// Toggles the visited mark for a circle, creating an uncolored
    /// record when none exists yet. Returns the new visited state.
    pub fn toggle_visited(&mut self, day: u8, circle_id: u32, name: &str) -> bool {
        let record = self.ensure_record(day, circle_id, name);
        record.visited = !record.visited;
        let visited = record.visited;
        self.prune(day, circle_id);
        self.touch();
        visited
    }

    /// Sets the color bucket for a circle. Bucket 0 removes the color;
    /// a record that ends up uncolored, unvisited and memo-less is
    /// dropped entirely.
    ///
    /// # Errors
    ///
    /// Returns an error when `color` exceeds the bucket range.
    pub fn set_color(&mut self, day: u8, circle_id: u32, name: &str, color: u8) -> Result<()> {
        if color > MAX_FAVORITE_COLOR {
            bail!("Color bucket {color} out of range (max {MAX_FAVORITE_COLOR})");
        }
        self.ensure_record(day, circle_id, name).color = color;
        self.prune(day, circle_id);
        self.touch();
        Ok(())
    }

    /// Advances a circle's color bucket by one, wrapping back to
    /// uncolored after the last bucket. Returns the new bucket.
    pub fn cycle_color(&mut self, day: u8, circle_id: u32, name: &str) -> u8 {
        let record = self.ensure_record(day, circle_id, name);
        record.color = if record.color >= MAX_FAVORITE_COLOR {
            0
        } else {
            record.color + 1
        };
        let color = record.color;
        self.prune(day, circle_id);
        self.touch();
        color
    }

    /// Replaces the memo for a circle.
    pub fn set_memo(&mut self, day: u8, circle_id: u32, name: &str, memo: &str) {
        self.ensure_record(day, circle_id, name).memo = memo.to_string();
        self.prune(day, circle_id);
        self.touch();
    }

    /// Removes a circle's record. Returns whether one existed.
    pub fn remove(&mut self, day: u8, circle_id: u32) -> bool {
        let Some(records) = self.days.get_mut(&day) else {
            return false;
        };
        match records.binary_search_by_key(&circle_id, |r| r.circle_id) {
            Ok(idx) => {
                records.remove(idx);
                self.touch();
                true
            }
            Err(_) => false,
        }
    }

    /// Updates the modification timestamp.
    pub fn touch(&mut self) {
        self.metadata.modified = Utc::now();
    }

    fn ensure_record(&mut self, day: u8, circle_id: u32, name: &str) -> &mut FavoriteRecord {
        let records = self.days.entry(day).or_default();
        let idx = match records.binary_search_by_key(&circle_id, |r| r.circle_id) {
            Ok(idx) => idx,
            Err(idx) => {
                records.insert(
                    idx,
                    FavoriteRecord {
                        circle_id,
                        name: name.to_string(),
                        color: 0,
                        memo: String::new(),
                        visited: false,
                    },
                );
                idx
            }
        };
        &mut records[idx]
    }

    /// Drops a record that no longer carries any state.
    fn prune(&mut self, day: u8, circle_id: u32) {
        let Some(records) = self.days.get_mut(&day) else {
            return;
        };
        if let Ok(idx) = records.binary_search_by_key(&circle_id, |r| r.circle_id) {
            let record = &records[idx];
            if record.color == 0 && !record.visited && record.memo.is_empty() {
                records.remove(idx);
            }
        }
    }
}
