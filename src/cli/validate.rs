//! Validation command for catalog snapshot files.

use crate::cli::common::{CliError, CliResult, ValidationMessage, ValidationResponse};
use crate::parser::{parse_catalog_str, validate_catalog};
use clap::Args;
use std::fs;
use std::path::PathBuf;

/// Validate a catalog snapshot for structural errors and advisory findings
#[derive(Debug, Clone, Args)]
pub struct ValidateArgs {
    /// Path to catalog snapshot JSON file
    #[arg(short, long, value_name = "FILE")]
    pub catalog: PathBuf,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Treat advisory findings as errors (exit non-zero)
    #[arg(long)]
    pub strict: bool,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> CliResult<()> {
        let content = fs::read_to_string(&self.catalog).map_err(|e| {
            CliError::io(format!(
                "Failed to read catalog snapshot {}: {e}",
                self.catalog.display()
            ))
        })?;

        // Structural errors (bad JSON, duplicate ids, dangling references)
        // make the snapshot unusable; advisory findings do not.
        let (valid, findings) = match parse_catalog_str(&content) {
            Ok(catalog) => {
                let warnings = validate_catalog(&catalog)
                    .into_iter()
                    .map(|message| ValidationMessage {
                        severity: "warning".to_string(),
                        message,
                    })
                    .collect();
                (true, warnings)
            }
            Err(e) => (
                false,
                vec![ValidationMessage {
                    severity: "error".to_string(),
                    message: format!("{e:#}"),
                }],
            ),
        };

        let response = ValidationResponse { valid, findings };

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&response)
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
            );
        } else {
            if response.valid {
                println!("✓ Catalog is valid");
            } else {
                println!("✗ Catalog is invalid");
            }

            if !response.findings.is_empty() {
                println!("\nFindings:");
                for finding in &response.findings {
                    let prefix = if finding.severity == "error" {
                        "  ✗"
                    } else {
                        "  ⚠"
                    };
                    println!("{} {}", prefix, finding.message);
                }
            }
        }

        if !response.valid {
            return Err(CliError::validation("Catalog validation failed"));
        }

        if self.strict && !response.findings.is_empty() {
            return Err(CliError::validation("Findings present in strict mode"));
        }

        Ok(())
    }
}
