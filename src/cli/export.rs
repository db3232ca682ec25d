//! Export command writing a visit checklist as CSV.

use crate::cli::common::{CliError, CliResult};
use crate::parser::{load_catalog, parse_visit_list};
use crate::services::VisitListService;
use clap::Args;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// Export a visit list as a CSV checklist
#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    /// Path to catalog snapshot JSON file
    #[arg(short, long, value_name = "FILE")]
    pub catalog: PathBuf,

    /// Path to visit list markdown file
    #[arg(short, long, value_name = "FILE")]
    pub visits: PathBuf,

    /// Restrict the export to one event day
    #[arg(short, long, value_name = "N")]
    pub day: Option<u8>,

    /// Output file (stdout when omitted)
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,
}

impl ExportArgs {
    /// Execute the export command
    pub fn execute(&self) -> CliResult<()> {
        let catalog = load_catalog(&self.catalog)
            .map_err(|e| CliError::io(format!("Failed to load catalog: {e:#}")))?;
        let list = parse_visit_list(&self.visits)
            .map_err(|e| CliError::io(format!("Failed to load visit list: {e:#}")))?;

        if let Some(day) = self.day {
            if !list.days().contains(&day) {
                return Err(CliError::validation(format!(
                    "Visit list has no day {day}"
                )));
            }
        }

        match &self.out {
            Some(path) => {
                let file = File::create(path).map_err(|e| {
                    CliError::io(format!("Failed to create {}: {e}", path.display()))
                })?;
                let mut writer = BufWriter::new(file);
                let rows = VisitListService::export_csv(&list, &catalog, self.day, &mut writer)
                    .map_err(|e| CliError::io(format!("Failed to write CSV: {e:#}")))?;
                writer
                    .flush()
                    .map_err(|e| CliError::io(format!("Failed to write CSV: {e}")))?;
                eprintln!("Wrote {} row(s) to {}", rows, path.display());
            }
            None => {
                let stdout = io::stdout();
                let mut writer = stdout.lock();
                VisitListService::export_csv(&list, &catalog, self.day, &mut writer)
                    .map_err(|e| CliError::io(format!("Failed to write CSV: {e:#}")))?;
            }
        }

        Ok(())
    }
}
