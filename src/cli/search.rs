//! Search command matching circles by name or pen name.

use crate::cli::common::{CliError, CliResult, SearchHit, SearchResponse};
use crate::parser::load_catalog;
use clap::Args;
use std::path::PathBuf;

/// Search circles in a catalog snapshot
#[derive(Debug, Clone, Args)]
pub struct SearchArgs {
    /// Path to catalog snapshot JSON file
    #[arg(short, long, value_name = "FILE")]
    pub catalog: PathBuf,

    /// Query matched against circle names and pen names
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Restrict results to one event day
    #[arg(short, long, value_name = "N")]
    pub day: Option<u8>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

impl SearchArgs {
    /// Execute the search command
    pub fn execute(&self) -> CliResult<()> {
        let catalog = load_catalog(&self.catalog)
            .map_err(|e| CliError::io(format!("Failed to load catalog: {e:#}")))?;

        let hits: Vec<SearchHit> = catalog
            .circles
            .iter()
            .filter(|c| self.day.is_none_or(|d| c.day == d))
            .filter(|c| c.matches_query(&self.query))
            .map(|c| SearchHit {
                circle_id: c.circle_id,
                name: c.name.clone(),
                penname: c.penname.clone(),
                day: c.day,
                space: catalog.space_label(c),
                genre: catalog
                    .genre_name(c.genre_id)
                    .unwrap_or_default()
                    .to_string(),
            })
            .collect();

        let response = SearchResponse {
            query: self.query.clone(),
            hits,
        };

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&response)
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
            );
        } else if response.hits.is_empty() {
            println!("No circles match '{}'", response.query);
        } else {
            println!("{} match(es) for '{}':", response.hits.len(), response.query);
            println!();
            for hit in &response.hits {
                let genre = if hit.genre.is_empty() {
                    String::new()
                } else {
                    format!("  [{}]", hit.genre)
                };
                println!(
                    "  Day {}  {:>8}  {} ({}){}",
                    hit.day, hit.space, hit.name, hit.penname, genre
                );
            }
        }

        Ok(())
    }
}
