//! Visit list file parsing and generation.
//!
//! Visit lists are stored as human-readable Markdown with YAML
//! frontmatter for metadata. Each event day is a `## Day N` section
//! whose entries are checklist lines:
//!
//! ```text
//! - [x] 12345 color:3 | Moonlight Works | west entrance first
//! ```
//!
//! The checkbox is the visited mark, `color:` the favorite bucket, the
//! first pipe field the cached circle name and the optional second
//! pipe field a memo. Files are written atomically (temp file plus
//! rename) so a crash mid-save never corrupts the list.

use anyhow::{bail, Context, Result};
use regex::Regex;
use std::path::Path;

use crate::models::{FavoriteRecord, VisitList, VisitListMeta};

/// Parses a visit list from a Markdown file.
///
/// # Arguments
///
/// * `path` - Path to the visit list file to load
///
/// # Errors
///
/// Returns errors for:
/// - File not found or unreadable
/// - Missing or invalid YAML frontmatter
/// - Malformed checklist entries
pub fn parse_visit_list(path: &Path) -> Result<VisitList> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read visit list file: {}", path.display()))?;
    parse_visit_list_str(&content)
        .with_context(|| format!("Failed to parse visit list file: {}", path.display()))
}

/// Parses a visit list from a string.
pub fn parse_visit_list_str(content: &str) -> Result<VisitList> {
    let lines: Vec<&str> = content.lines().collect();

    let (metadata, content_start) = parse_frontmatter(&lines)?;
    let mut list = VisitList::from_metadata(metadata);

    parse_entries(&lines[content_start..], content_start, &mut list)?;

    Ok(list)
}

/// Parses YAML frontmatter from the beginning of the file.
///
/// Returns the parsed metadata and the line index where content starts.
fn parse_frontmatter(lines: &[&str]) -> Result<(VisitListMeta, usize)> {
    // Find frontmatter boundaries
    let mut start_idx = None;
    let mut end_idx = None;

    for (idx, line) in lines.iter().enumerate() {
        let trimmed = line.trim();
        if trimmed == "---" {
            if start_idx.is_none() {
                start_idx = Some(idx);
            } else if end_idx.is_none() {
                end_idx = Some(idx);
                break;
            }
        }
    }

    let start =
        start_idx.ok_or_else(|| anyhow::anyhow!("Missing frontmatter start marker (---)"))?;
    let end = end_idx.ok_or_else(|| anyhow::anyhow!("Missing frontmatter end marker (---)"))?;

    let yaml_content = lines[start + 1..end].join("\n");

    let metadata: VisitListMeta =
        serde_yml::from_str(&yaml_content).context("Failed to parse YAML frontmatter")?;

    if metadata.event.trim().is_empty() {
        bail!("Visit list frontmatter has an empty event name");
    }

    Ok((metadata, end + 1))
}

/// Parses day sections and checklist entries into the list.
fn parse_entries(lines: &[&str], line_offset: usize, list: &mut VisitList) -> Result<()> {
    // Compiled once per parse; file sizes make this irrelevant.
    let day_re = Regex::new(r"^##\s+Day\s+(\d+)\s*$").context("Invalid day header pattern")?;
    let entry_re = Regex::new(r"^-\s*\[([ xX])\]\s+(\d+)(?:\s+color:(\d+))?\s*\|([^|]*)(?:\|(.*))?$")
        .context("Invalid entry pattern")?;

    let mut current_day: Option<u8> = None;

    for (idx, line) in lines.iter().enumerate() {
        let line_no = line_offset + idx + 1;
        let trimmed = line.trim();

        if let Some(caps) = day_re.captures(trimmed) {
            let day: u8 = caps[1]
                .parse()
                .with_context(|| format!("Invalid day number on line {line_no}"))?;
            list.ensure_day(day);
            current_day = Some(day);
            continue;
        }

        if trimmed.starts_with("- [") {
            let day = current_day
                .ok_or_else(|| anyhow::anyhow!("Entry before any day header on line {line_no}"))?;
            let caps = entry_re.captures(trimmed).ok_or_else(|| {
                anyhow::anyhow!("Malformed visit entry on line {line_no}: {trimmed}")
            })?;

            let visited = !caps[1].trim().is_empty();
            let circle_id: u32 = caps[2]
                .parse()
                .with_context(|| format!("Invalid circle id on line {line_no}"))?;
            let color: u8 = match caps.get(3) {
                Some(m) => m
                    .as_str()
                    .parse()
                    .with_context(|| format!("Invalid color bucket on line {line_no}"))?,
                None => 0,
            };
            let name = caps[4].trim().to_string();
            let memo = caps
                .get(5)
                .map_or(String::new(), |m| m.as_str().trim().to_string());

            list.insert_record(
                day,
                FavoriteRecord {
                    circle_id,
                    name,
                    color,
                    memo,
                    visited,
                },
            )
            .with_context(|| format!("Invalid visit entry on line {line_no}"))?;
        }

        // Anything else (titles, blank lines, prose) is ignored.
    }

    Ok(())
}

/// Generates Markdown content from a visit list.
pub fn generate_visit_list(list: &VisitList) -> Result<String> {
    let mut output = String::new();

    output.push_str(&generate_frontmatter(list)?);
    output.push('\n');
    output.push_str(&format!("# {}\n", list.metadata.name));

    for day in list.days() {
        output.push_str(&format!("\n## Day {day}\n\n"));
        for record in list.records_for(day) {
            let mark = if record.visited { 'x' } else { ' ' };
            // Pipes would break the column format on re-parse.
            let name = record.name.replace('|', "/");
            let mut line = format!(
                "- [{mark}] {} color:{} | {}",
                record.circle_id, record.color, name
            );
            if !record.memo.is_empty() {
                let memo = record.memo.replace('|', "/");
                line.push_str(&format!(" | {memo}"));
            }
            line.push('\n');
            output.push_str(&line);
        }
    }

    Ok(output)
}

/// Generates YAML frontmatter from metadata.
fn generate_frontmatter(list: &VisitList) -> Result<String> {
    let yaml = serde_yml::to_string(&list.metadata)
        .context("Failed to serialize visit list metadata to YAML")?;
    Ok(format!("---\n{yaml}---\n"))
}

/// Saves a visit list to a Markdown file.
///
/// This performs an atomic write using a temp file + rename pattern to
/// ensure the file is never left in a corrupted state.
///
/// # Errors
///
/// Returns errors for:
/// - File I/O failures
/// - Permission issues
/// - Atomic rename failures
pub fn save_visit_list(list: &VisitList, path: &Path) -> Result<()> {
    let markdown = generate_visit_list(list)?;
    atomic_write(path, &markdown)
}

/// Performs an atomic file write using temp file + rename pattern.
fn atomic_write(path: &Path, content: &str) -> Result<()> {
    let temp_path = path.with_extension("md.tmp");

    std::fs::write(&temp_path, content)
        .with_context(|| format!("Failed to write to temporary file: {}", temp_path.display()))?;

    std::fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to rename temporary file to: {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sample_content() -> String {
        [
            "---",
            "id: 6d1aa8cc-0000-0000-0000-000000000000",
            "event: Test Market 1",
            "name: Test Market 1 visits",
            "created: 2025-08-01T09:00:00Z",
            "modified: 2025-08-02T10:30:00Z",
            "version: '1.0'",
            "---",
            "",
            "# Test Market 1 visits",
            "",
            "## Day 1",
            "",
            "- [x] 100 color:3 | Alpha Works | west entrance",
            "- [ ] 200 color:1 | Beta Press",
            "",
            "## Day 2",
            "",
        ]
        .join("\n")
    }

    #[test]
    fn test_parse_sample_fields() {
        let list = parse_visit_list_str(&sample_content()).unwrap();
        assert_eq!(list.metadata.event, "Test Market 1");
        assert_eq!(
            list.metadata.created,
            Utc.with_ymd_and_hms(2025, 8, 1, 9, 0, 0).unwrap()
        );
        assert_eq!(list.days(), vec![1, 2]);

        let alpha = list.record(1, 100).unwrap();
        assert!(alpha.visited);
        assert_eq!(alpha.color, 3);
        assert_eq!(alpha.name, "Alpha Works");
        assert_eq!(alpha.memo, "west entrance");

        let beta = list.record(1, 200).unwrap();
        assert!(!beta.visited);
        assert_eq!(beta.memo, "");
    }

    #[test]
    fn test_round_trip_preserves_entries() {
        let list = parse_visit_list_str(&sample_content()).unwrap();
        let regenerated = generate_visit_list(&list).unwrap();
        let reparsed = parse_visit_list_str(&regenerated).unwrap();
        assert_eq!(list, reparsed);
    }

    #[test]
    fn test_missing_frontmatter_fails() {
        let result = parse_visit_list_str("# No frontmatter\n\n## Day 1\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_entry_before_day_header_fails() {
        let content = sample_content().replace("## Day 1", "");
        let result = parse_visit_list_str(&content);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("before any day header"));
    }

    #[test]
    fn test_malformed_entry_fails() {
        let content = sample_content().replace("- [x] 100 color:3", "- [x] banana color:3");
        assert!(parse_visit_list_str(&content).is_err());
    }

    #[test]
    fn test_out_of_range_color_fails() {
        let content = sample_content().replace("color:3", "color:12");
        assert!(parse_visit_list_str(&content).is_err());
    }

    #[test]
    fn test_uppercase_checkbox_accepted() {
        let content = sample_content().replace("- [x] 100", "- [X] 100");
        let list = parse_visit_list_str(&content).unwrap();
        assert!(list.record(1, 100).unwrap().visited);
    }

    #[test]
    fn test_empty_day_section_survives_round_trip() {
        let list = parse_visit_list_str(&sample_content()).unwrap();
        let regenerated = generate_visit_list(&list).unwrap();
        assert!(regenerated.contains("## Day 2"));
    }

    #[test]
    fn test_pipes_in_names_are_defanged() {
        let mut list = VisitList::new("Test", &[1]);
        list.set_color(1, 100, "A|B", 1).unwrap();
        let markdown = generate_visit_list(&list).unwrap();
        let reparsed = parse_visit_list_str(&markdown).unwrap();
        assert_eq!(reparsed.record(1, 100).unwrap().name, "A/B");
    }

    #[test]
    fn test_save_and_load_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("visits.md");
        let mut list = VisitList::new("Test Market 1", &[1]);
        list.toggle_visited(1, 100, "Alpha Works");
        save_visit_list(&list, &path)?;

        let loaded = parse_visit_list(&path)?;
        assert!(loaded.record(1, 100).unwrap().visited);
        // No stray temp file left behind.
        assert!(!dir.path().join("visits.md.tmp").exists());
        Ok(())
    }

    #[test]
    fn test_metadata_timestamps_round_trip() {
        let mut list = VisitList::new("Test", &[1]);
        // Pin timestamps so the comparison is exact.
        list.metadata.created = Utc.with_ymd_and_hms(2025, 8, 1, 9, 0, 0).unwrap();
        list.metadata.modified = Utc.with_ymd_and_hms(2025, 8, 2, 10, 30, 0).unwrap();
        let markdown = generate_visit_list(&list).unwrap();
        let reparsed = parse_visit_list_str(&markdown).unwrap();
        assert_eq!(reparsed.metadata, list.metadata);
    }
}
