//! Shared test fixtures for E2E CLI tests.
#![allow(dead_code)] // Some fixtures reserved for future tests

use chrono::{TimeZone, Utc};
use hallmap::models::{FavoriteRecord, VisitList};
use hallmap::parser::save_visit_list;
use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Builds a small but complete catalog snapshot as JSON.
///
/// Two days, one hall on one map, two blocks, three cells and four
/// circles. Circle 100/101 share cell A-1 on day 1 ("a" and "b"
/// halves), circle 200 sits in B-1 on day 2, circle 300 has no mapped
/// cell so validators report it as unplaced.
pub fn test_catalog_snapshot() -> Value {
    json!({
        "event_name": "Test Market 1",
        "days": [
            { "day": 1, "date": "2026-08-15" },
            { "day": 2, "date": "2026-08-16" },
        ],
        "halls": [
            { "hall_id": 1, "name": "East 1", "map_id": 1 },
        ],
        "maps": [
            { "map_id": 1, "name": "East Hall", "width": 40, "height": 30, "space_size": 2 },
        ],
        "blocks": [
            { "block_id": 1, "name": "A" },
            { "block_id": 2, "name": "B" },
        ],
        "genres": [
            { "genre_id": 10, "name": "Music" },
            { "genre_id": 20, "name": "Games" },
        ],
        "cells": [
            { "block_id": 1, "space_number": 1, "x": 0, "y": 0,
              "orientation": 4, "hall_id": 1, "map_id": 1 },
            { "block_id": 1, "space_number": 2, "x": 2, "y": 0,
              "orientation": 4, "hall_id": 1, "map_id": 1 },
            { "block_id": 2, "space_number": 1, "x": 0, "y": 10,
              "orientation": 2, "hall_id": 1, "map_id": 1 },
        ],
        "circles": [
            { "circle_id": 100, "name": "Alpha Works", "penname": "alice",
              "genre_id": 10, "day": 1, "block_id": 1, "space_number": 1,
              "space_sub": 0 },
            { "circle_id": 101, "name": "Beta Press", "penname": "bob",
              "genre_id": 20, "day": 1, "block_id": 1, "space_number": 1,
              "space_sub": 1 },
            { "circle_id": 200, "name": "Gamma Circle", "penname": "carol",
              "genre_id": 10, "day": 2, "block_id": 2, "space_number": 1,
              "space_sub": 0 },
            { "circle_id": 300, "name": "Delta Sound", "penname": "dave",
              "genre_id": 10, "day": 1, "block_id": 2, "space_number": 99,
              "space_sub": 0 },
        ],
    })
}

/// Writes a catalog snapshot to a temp file.
///
/// # Returns
/// Tuple of (file path, temp dir handle - keep alive for test duration)
pub fn create_temp_catalog_file(snapshot: &Value) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("catalog.json");
    let content = serde_json::to_string_pretty(snapshot).expect("Failed to serialize snapshot");
    fs::write(&path, content).expect("Failed to write catalog file");
    (path, temp_dir)
}

/// Creates a visit list with deterministic metadata and a few records.
///
/// Day 1: circle 100 visited with color 3 and a memo, circle 101
/// unvisited. Day 2: circle 200 unvisited with color 1.
pub fn test_visit_list() -> VisitList {
    let mut list = VisitList::new("Test Market 1", &[1, 2]);
    list.metadata.id = "00000000-0000-0000-0000-000000000000".to_string();
    list.metadata.created = Utc.with_ymd_and_hms(2026, 8, 1, 9, 0, 0).unwrap();
    list.metadata.modified = Utc.with_ymd_and_hms(2026, 8, 2, 10, 30, 0).unwrap();

    list.insert_record(
        1,
        FavoriteRecord {
            circle_id: 100,
            name: "Alpha Works".to_string(),
            color: 3,
            memo: "west entrance".to_string(),
            visited: true,
        },
    )
    .unwrap();
    list.insert_record(
        1,
        FavoriteRecord {
            circle_id: 101,
            name: "Beta Press".to_string(),
            color: 0,
            memo: String::new(),
            visited: false,
        },
    )
    .unwrap();
    list.insert_record(
        2,
        FavoriteRecord {
            circle_id: 200,
            name: "Gamma Circle".to_string(),
            color: 1,
            memo: String::new(),
            visited: false,
        },
    )
    .unwrap();

    list
}

/// Writes a visit list to a temp file.
///
/// # Returns
/// Tuple of (file path, temp dir handle - keep alive for test duration)
pub fn create_temp_visit_list_file(list: &VisitList) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("visits.md");
    save_visit_list(list, &path).expect("Failed to write visit list");
    (path, temp_dir)
}
