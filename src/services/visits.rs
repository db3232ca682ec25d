//! Visit list I/O service.
//!
//! This module centralizes visit list file operations: locating the
//! per-event file under the data directory, loading (or creating) a
//! list, saving it atomically, and exporting records as CSV.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::constants::APP_BINARY_NAME;
use crate::models::{Catalog, VisitList};
use crate::parser;

/// Service for managing visit list file I/O operations.
pub struct VisitListService;

impl VisitListService {
    /// Default directory visit lists are stored in
    /// (`<data_dir>/hallmap/visits`).
    ///
    /// # Errors
    ///
    /// Returns an error when the platform data directory cannot be
    /// determined.
    pub fn default_data_dir() -> Result<PathBuf> {
        let base = dirs::data_dir().context("Could not determine data directory")?;
        Ok(base.join(APP_BINARY_NAME).join("visits"))
    }

    /// File path for one event's visit list inside `data_dir`.
    #[must_use]
    pub fn path_for_event(data_dir: &Path, event: &str) -> PathBuf {
        data_dir.join(format!("{}.md", sanitize_filename(event)))
    }

    /// Loads a visit list from a Markdown file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the visit list file to load
    pub fn load(path: &Path) -> Result<VisitList> {
        parser::parse_visit_list(path)
            .with_context(|| format!("Failed to load visit list from {}", path.display()))
    }

    /// Loads the event's visit list, creating an empty one on first
    /// use. Returns the list together with the path it lives at.
    ///
    /// # Arguments
    ///
    /// * `data_dir` - Directory visit lists are stored in
    /// * `event` - Event name (also the file name, sanitized)
    /// * `days` - Event day numbers for a freshly created list
    pub fn load_or_create(
        data_dir: &Path,
        event: &str,
        days: &[u8],
    ) -> Result<(VisitList, PathBuf)> {
        let path = Self::path_for_event(data_dir, event);
        if path.exists() {
            let list = Self::load(&path)?;
            return Ok((list, path));
        }

        std::fs::create_dir_all(data_dir).with_context(|| {
            format!("Failed to create visit list directory {}", data_dir.display())
        })?;
        let list = VisitList::new(event, days);
        Self::save(&list, &path)?;
        Ok((list, path))
    }

    /// Saves a visit list to a Markdown file.
    ///
    /// This performs an atomic write using a temp file + rename pattern
    /// so the file is never left in a corrupted state.
    pub fn save(list: &VisitList, path: &Path) -> Result<()> {
        parser::save_visit_list(list, path)
            .with_context(|| format!("Failed to save visit list to {}", path.display()))
    }

    /// Writes visit list records as CSV.
    ///
    /// One row per record, ordered by day then circle id. When `day`
    /// is given, only that day's records are written. Circle details
    /// (space label, genre) are pulled from the catalog when the
    /// circle is known there. Returns the number of data rows written.
    pub fn export_csv(
        list: &VisitList,
        catalog: &Catalog,
        day: Option<u8>,
        out: &mut impl Write,
    ) -> Result<usize> {
        writeln!(out, "day,circle_id,name,space,genre,color,visited,memo")
            .context("Failed to write CSV header")?;

        let mut rows = 0;
        for list_day in list.days() {
            if day.is_some_and(|d| d != list_day) {
                continue;
            }
            for record in list.records_for(list_day) {
                let circle = catalog.circle(record.circle_id);
                let space = circle.map_or(String::new(), |c| catalog.space_label(c));
                let genre = circle
                    .and_then(|c| catalog.genre_name(c.genre_id))
                    .unwrap_or_default();
                writeln!(
                    out,
                    "{},{},{},{},{},{},{},{}",
                    list_day,
                    record.circle_id,
                    csv_field(&record.name),
                    csv_field(&space),
                    csv_field(genre),
                    record.color,
                    record.visited,
                    csv_field(&record.memo),
                )
                .context("Failed to write CSV row")?;
                rows += 1;
            }
        }
        Ok(rows)
    }
}

/// Quotes a CSV field when it contains a delimiter, quote or newline.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Sanitizes an event name for use as a filename.
///
/// # Examples
///
/// ```
/// # use hallmap::services::visits::sanitize_filename;
/// assert_eq!(sanitize_filename("Test Market 1"), "test_market_1");
/// assert_eq!(sanitize_filename("Event/Name:Test"), "event_name_test");
/// ```
#[must_use]
pub fn sanitize_filename(name: &str) -> String {
    name.replace(['/', '\\', ':', ' '], "_").to_lowercase()
}
