//! Inspection command printing catalog statistics.

use crate::cli::common::{CliError, CliResult, DaySummary, InspectResponse};
use crate::parser::load_catalog;
use clap::Args;
use std::path::PathBuf;

/// Print summary statistics for a catalog snapshot
#[derive(Debug, Clone, Args)]
pub struct InspectArgs {
    /// Path to catalog snapshot JSON file
    #[arg(short, long, value_name = "FILE")]
    pub catalog: PathBuf,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

impl InspectArgs {
    /// Execute the inspect command
    pub fn execute(&self) -> CliResult<()> {
        let catalog = load_catalog(&self.catalog)
            .map_err(|e| CliError::io(format!("Failed to load catalog: {e:#}")))?;

        let days = catalog
            .days
            .iter()
            .map(|d| DaySummary {
                day: d.day,
                date: d.date.to_string(),
                circles: catalog.circles_on_day(d.day).count(),
            })
            .collect();

        let response = InspectResponse {
            event: catalog.event_name.clone(),
            days,
            halls: catalog.halls.len(),
            maps: catalog.maps.len(),
            blocks: catalog.blocks.len(),
            genres: catalog.genres.len(),
            cells: catalog.cells.len(),
            circles: catalog.circles.len(),
        };

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&response)
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
            );
        } else {
            println!("Event: {}", response.event);
            println!();
            println!("Days:");
            for day in &response.days {
                println!(
                    "  Day {} ({}): {} circles",
                    day.day, day.date, day.circles
                );
            }
            println!();
            println!("Halls:   {}", response.halls);
            println!("Maps:    {}", response.maps);
            println!("Blocks:  {}", response.blocks);
            println!("Genres:  {}", response.genres);
            println!("Cells:   {}", response.cells);
            println!("Circles: {}", response.circles);
        }

        Ok(())
    }
}
