//! Catalog snapshot parser.
//!
//! This module handles parsing catalog snapshot JSON files into the
//! in-memory [`Catalog`], establishing the ordering invariants the
//! rest of the application relies on and rejecting structurally broken
//! snapshots up front. Advisory problems (overlapping cells, circles
//! without a mapped space) are collected separately so callers can log
//! or print them without failing the load.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use crate::models::{
    Block, Catalog, CellOrientation, Circle, EventDay, Genre, Hall, LayoutCell, VenueMap,
};

/// Catalog snapshot file structure (venue layout rows keep their raw
/// orientation code until conversion).
#[derive(Debug, Clone, Deserialize)]
struct CatalogSnapshot {
    /// Event display name
    event_name: String,
    /// Event days
    days: Vec<EventDay>,
    /// Exhibition halls
    halls: Vec<Hall>,
    /// Venue maps
    maps: Vec<VenueMap>,
    /// Space blocks
    blocks: Vec<Block>,
    /// Catalog genres
    #[serde(default)]
    genres: Vec<Genre>,
    /// Venue layout rows
    cells: Vec<RawCell>,
    /// Exhibitor rows
    circles: Vec<Circle>,
}

/// Venue layout row as stored in the snapshot.
#[derive(Debug, Clone, Deserialize)]
struct RawCell {
    block_id: u32,
    space_number: u32,
    x: i32,
    y: i32,
    /// Orientation code: 0 unknown, 1 left, 2 bottom, 3 right, 4 top.
    orientation: u8,
    hall_id: u32,
    map_id: u32,
}

/// Loads a catalog from a snapshot JSON file.
///
/// # Arguments
///
/// * `path` - Path to the snapshot file
///
/// # Errors
///
/// Returns errors for:
/// - File not found or unreadable
/// - Invalid JSON
/// - Structurally broken data (duplicate identifiers, dangling
///   references, no event days)
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog snapshot: {}", path.display()))?;
    let catalog = parse_catalog_str(&content)
        .with_context(|| format!("Failed to parse catalog snapshot: {}", path.display()))?;
    // Advisory findings (overlaps, unplaced circles) do not block the
    // load; they still deserve a trace in the log.
    for finding in validate_catalog(&catalog) {
        warn!("{finding}");
    }
    Ok(catalog)
}

/// Parses a catalog snapshot from a string.
pub fn parse_catalog_str(content: &str) -> Result<Catalog> {
    let snapshot: CatalogSnapshot =
        serde_json::from_str(content).context("Invalid catalog snapshot JSON")?;
    build_catalog(snapshot)
}

/// Converts a raw snapshot into a validated, sorted catalog.
fn build_catalog(snapshot: CatalogSnapshot) -> Result<Catalog> {
    if snapshot.event_name.trim().is_empty() {
        bail!("Catalog snapshot has an empty event name");
    }
    if snapshot.days.is_empty() {
        bail!("Catalog snapshot has no event days");
    }
    if snapshot.maps.is_empty() {
        bail!("Catalog snapshot has no venue maps");
    }

    let mut days = snapshot.days;
    days.sort_by_key(|d| d.day);
    check_unique(days.iter().map(|d| u32::from(d.day)), "event day")?;
    check_unique(snapshot.maps.iter().map(|m| m.map_id), "venue map id")?;
    check_unique(snapshot.halls.iter().map(|h| h.hall_id), "hall id")?;
    check_unique(snapshot.blocks.iter().map(|b| b.block_id), "block id")?;
    check_unique(snapshot.genres.iter().map(|g| g.genre_id), "genre id")?;

    let map_ids: HashSet<u32> = snapshot.maps.iter().map(|m| m.map_id).collect();
    let hall_ids: HashSet<u32> = snapshot.halls.iter().map(|h| h.hall_id).collect();

    for map in &snapshot.maps {
        if map.space_size == 0 {
            bail!("Venue map {} has a zero space size", map.map_id);
        }
    }
    for hall in &snapshot.halls {
        if !map_ids.contains(&hall.map_id) {
            bail!(
                "Hall {} references unknown venue map {}",
                hall.hall_id,
                hall.map_id
            );
        }
    }

    // Convert cells, keeping diagnostics for odd orientation codes.
    let mut cells = Vec::with_capacity(snapshot.cells.len());
    for raw in snapshot.cells {
        if !map_ids.contains(&raw.map_id) {
            bail!(
                "Cell ({}, {}) references unknown venue map {}",
                raw.block_id,
                raw.space_number,
                raw.map_id
            );
        }
        if !hall_ids.contains(&raw.hall_id) {
            bail!(
                "Cell ({}, {}) references unknown hall {}",
                raw.block_id,
                raw.space_number,
                raw.hall_id
            );
        }
        if raw.orientation > 4 {
            debug!(
                block_id = raw.block_id,
                space_number = raw.space_number,
                code = raw.orientation,
                "Unknown cell orientation code, treating as unknown"
            );
        }
        cells.push(LayoutCell {
            block_id: raw.block_id,
            space_number: raw.space_number,
            x: raw.x,
            y: raw.y,
            orientation: CellOrientation::from(raw.orientation),
            hall_id: raw.hall_id,
            map_id: raw.map_id,
        });
    }

    cells.sort_by_key(LayoutCell::identity);
    if let Some(pair) = cells.windows(2).find(|w| w[0].identity() == w[1].identity()) {
        bail!(
            "Duplicate layout cell ({}, {}) in snapshot",
            pair[0].block_id,
            pair[0].space_number
        );
    }

    let mut circles = snapshot.circles;
    circles.sort_by_key(|c| c.circle_id);
    if let Some(pair) = circles.windows(2).find(|w| w[0].circle_id == w[1].circle_id) {
        bail!("Duplicate circle id {} in snapshot", pair[0].circle_id);
    }

    Ok(Catalog {
        event_name: snapshot.event_name,
        days,
        halls: snapshot.halls,
        maps: snapshot.maps,
        blocks: snapshot.blocks,
        genres: snapshot.genres,
        cells,
        circles,
    })
}

fn check_unique(ids: impl Iterator<Item = u32>, what: &str) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            bail!("Duplicate {what} {id} in snapshot");
        }
    }
    Ok(())
}

/// Advisory catalog checks that do not prevent loading.
///
/// Returns one human-readable message per finding:
/// - layout cells whose rectangles overlap on the same map
/// - circles placed on a `(block, space)` with no layout cell
/// - circles scheduled on a day the event does not run
/// - circles with a genre the snapshot does not define
#[must_use]
pub fn validate_catalog(catalog: &Catalog) -> Vec<String> {
    let mut findings = Vec::new();

    // Overlap scan per map. Cells are axis-aligned squares of the
    // map's space size, so two cells overlap when both coordinate
    // deltas are strictly smaller than the side length.
    for map in &catalog.maps {
        let side = i64::from(map.space_size);
        let cells: Vec<&LayoutCell> = catalog.cells_for_map(map.map_id).collect();
        for (i, a) in cells.iter().enumerate() {
            for b in &cells[i + 1..] {
                let dx = (i64::from(a.x) - i64::from(b.x)).abs();
                let dy = (i64::from(a.y) - i64::from(b.y)).abs();
                if dx < side && dy < side {
                    findings.push(format!(
                        "Cells ({}, {}) and ({}, {}) overlap on map {}",
                        a.block_id, a.space_number, b.block_id, b.space_number, map.name
                    ));
                }
            }
        }
    }

    let day_numbers: HashSet<u8> = catalog.days.iter().map(|d| d.day).collect();
    let genre_ids: HashSet<u32> = catalog.genres.iter().map(|g| g.genre_id).collect();

    for circle in &catalog.circles {
        if catalog.cell(circle.block_id, circle.space_number).is_none() {
            findings.push(format!(
                "Circle {} ({}) has no layout cell for space ({}, {})",
                circle.circle_id, circle.name, circle.block_id, circle.space_number
            ));
        }
        if !day_numbers.contains(&circle.day) {
            findings.push(format!(
                "Circle {} ({}) is scheduled on unknown day {}",
                circle.circle_id, circle.name, circle.day
            ));
        }
        if !genre_ids.contains(&circle.genre_id) {
            findings.push(format!(
                "Circle {} ({}) has unknown genre {}",
                circle.circle_id, circle.name, circle.genre_id
            ));
        }
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_snapshot() -> serde_json::Value {
        serde_json::json!({
            "event_name": "Test Market 1",
            "days": [
                {"day": 1, "date": "2025-08-16"},
                {"day": 2, "date": "2025-08-17"}
            ],
            "halls": [
                {"hall_id": 1, "name": "East 1", "map_id": 1}
            ],
            "maps": [
                {"map_id": 1, "name": "East", "width": 400, "height": 300, "space_size": 50}
            ],
            "blocks": [
                {"block_id": 1, "name": "A"}
            ],
            "genres": [
                {"genre_id": 1, "name": "Original"}
            ],
            "cells": [
                {"block_id": 1, "space_number": 2, "x": 50, "y": 0,
                 "orientation": 1, "hall_id": 1, "map_id": 1},
                {"block_id": 1, "space_number": 1, "x": 0, "y": 0,
                 "orientation": 1, "hall_id": 1, "map_id": 1}
            ],
            "circles": [
                {"circle_id": 200, "name": "Beta Press", "genre_id": 1,
                 "day": 1, "block_id": 1, "space_number": 2},
                {"circle_id": 100, "name": "Alpha Works", "genre_id": 1,
                 "day": 1, "block_id": 1, "space_number": 1}
            ]
        })
    }

    fn parse(value: &serde_json::Value) -> Result<Catalog> {
        parse_catalog_str(&value.to_string())
    }

    #[test]
    fn test_parse_sorts_circles_and_cells() {
        let catalog = parse(&sample_snapshot()).unwrap();
        let circle_ids: Vec<u32> = catalog.circles.iter().map(|c| c.circle_id).collect();
        assert_eq!(circle_ids, vec![100, 200]);
        let identities: Vec<(u32, u32)> =
            catalog.cells.iter().map(LayoutCell::identity).collect();
        assert_eq!(identities, vec![(1, 1), (1, 2)]);
    }

    #[test]
    fn test_parse_defaults_optional_circle_fields() {
        let catalog = parse(&sample_snapshot()).unwrap();
        let circle = catalog.circle(100).unwrap();
        assert_eq!(circle.penname, "");
        assert_eq!(circle.space_sub, 0);
        assert!(circle.description.is_none());
    }

    #[test]
    fn test_duplicate_circle_id_fails() {
        let mut snapshot = sample_snapshot();
        snapshot["circles"][0]["circle_id"] = serde_json::json!(100);
        let err = parse(&snapshot).unwrap_err();
        assert!(err.to_string().contains("Duplicate circle id 100"));
    }

    #[test]
    fn test_duplicate_cell_identity_fails() {
        let mut snapshot = sample_snapshot();
        snapshot["cells"][0]["space_number"] = serde_json::json!(1);
        snapshot["cells"][0]["block_id"] = serde_json::json!(1);
        let err = parse(&snapshot).unwrap_err();
        assert!(err.to_string().contains("Duplicate layout cell (1, 1)"));
    }

    #[test]
    fn test_no_days_fails() {
        let mut snapshot = sample_snapshot();
        snapshot["days"] = serde_json::json!([]);
        assert!(parse(&snapshot).is_err());
    }

    #[test]
    fn test_dangling_cell_map_fails() {
        let mut snapshot = sample_snapshot();
        snapshot["cells"][0]["map_id"] = serde_json::json!(9);
        let err = parse(&snapshot).unwrap_err();
        assert!(err.to_string().contains("unknown venue map 9"));
    }

    #[test]
    fn test_zero_space_size_fails() {
        let mut snapshot = sample_snapshot();
        snapshot["maps"][0]["space_size"] = serde_json::json!(0);
        assert!(parse(&snapshot).is_err());
    }

    #[test]
    fn test_out_of_range_orientation_degrades_to_unknown() {
        let mut snapshot = sample_snapshot();
        snapshot["cells"][0]["orientation"] = serde_json::json!(9);
        let catalog = parse(&snapshot).unwrap();
        assert_eq!(
            catalog.cell(1, 2).unwrap().orientation,
            CellOrientation::Unknown
        );
    }

    #[test]
    fn test_validate_clean_catalog_has_no_findings() {
        let catalog = parse(&sample_snapshot()).unwrap();
        assert!(validate_catalog(&catalog).is_empty());
    }

    #[test]
    fn test_validate_reports_overlap() {
        let mut snapshot = sample_snapshot();
        // Shift the second cell so the two squares intersect.
        snapshot["cells"][0]["x"] = serde_json::json!(30);
        let catalog = parse(&snapshot).unwrap();
        let findings = validate_catalog(&catalog);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].contains("overlap"));
    }

    #[test]
    fn test_validate_reports_unplaced_circle() {
        let mut snapshot = sample_snapshot();
        snapshot["circles"][0]["space_number"] = serde_json::json!(77);
        let catalog = parse(&snapshot).unwrap();
        let findings = validate_catalog(&catalog);
        assert!(findings.iter().any(|f| f.contains("no layout cell")));
    }

    #[test]
    fn test_validate_reports_unknown_day_and_genre() {
        let mut snapshot = sample_snapshot();
        snapshot["circles"][0]["day"] = serde_json::json!(9);
        snapshot["circles"][1]["genre_id"] = serde_json::json!(42);
        let catalog = parse(&snapshot).unwrap();
        let findings = validate_catalog(&catalog);
        assert!(findings.iter().any(|f| f.contains("unknown day 9")));
        assert!(findings.iter().any(|f| f.contains("unknown genre 42")));
    }

    #[test]
    fn test_load_catalog_missing_file() {
        let result = load_catalog(Path::new("/nonexistent/catalog.json"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_warns_on_advisory_findings() {
        use std::io::Write;
        use std::sync::{Arc, Mutex};

        #[derive(Clone)]
        struct Capture(Arc<Mutex<Vec<u8>>>);

        impl Write for Capture {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let mut snapshot = sample_snapshot();
        snapshot["circles"][0]["space_number"] = serde_json::json!(77);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(&path, snapshot.to_string()).unwrap();

        let capture = Capture(Arc::new(Mutex::new(Vec::new())));
        let sink = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || sink.clone())
            .with_ansi(false)
            .finish();

        // The unplaced circle is logged but the load still succeeds.
        let catalog =
            tracing::subscriber::with_default(subscriber, || load_catalog(&path)).unwrap();
        assert_eq!(catalog.circles.len(), 2);

        let logs = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("WARN"));
        assert!(logs.contains("no layout cell"));
    }
}
