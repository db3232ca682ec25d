//! Hallmap - Terminal catalog browser for doujinshi conventions
//!
//! This application renders convention venue maps in the terminal,
//! tracks circles to visit, and overlays checkmarks for completed
//! visits. Subcommands provide headless catalog tooling.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hallmap::cli::{ExportArgs, InspectArgs, SearchArgs, ValidateArgs};
use hallmap::config::Config;
use hallmap::constants::{APP_BINARY_NAME, APP_NAME};
use hallmap::parser;
use hallmap::services::VisitListService;
use hallmap::tui;

/// Hallmap - Terminal catalog browser for convention venue maps
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to catalog snapshot JSON file
    #[arg(value_name = "FILE")]
    catalog_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable debug logging (subcommands only)
    #[arg(long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a catalog snapshot
    Validate(ValidateArgs),
    /// Print catalog statistics
    Inspect(InspectArgs),
    /// Search circles by name or pen name
    Search(SearchArgs),
    /// Export a visit list as CSV
    Export(ExportArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(command) = cli.command {
        // Headless mode: structured logging to stderr, stable exit codes.
        let filter = if cli.verbose { "debug" } else { "warn" };
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| filter.into()),
            )
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();

        let result = match command {
            Commands::Validate(args) => args.execute(),
            Commands::Inspect(args) => args.execute(),
            Commands::Search(args) => args.execute(),
            Commands::Export(args) => args.execute(),
        };

        if let Err(e) = result {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code.code());
        }
        return Ok(());
    }

    // TUI mode. No tracing init here: the alternate screen owns stdout
    // and stderr writes would tear the UI.
    let config = Config::load().unwrap_or_else(|_| Config::default());

    let catalog_path = match cli.catalog_path.or_else(|| config.paths.catalog.clone()) {
        Some(path) => path,
        None => {
            eprintln!("Error: No catalog snapshot specified.");
            eprintln!();
            eprintln!("Pass a catalog file or set one in the config:");
            eprintln!("  {APP_BINARY_NAME} path/to/catalog.json");
            eprintln!();
            eprintln!("For headless tooling, run:");
            eprintln!("  {APP_BINARY_NAME} --help");
            std::process::exit(1);
        }
    };

    if !catalog_path.exists() {
        eprintln!(
            "Error: Catalog snapshot not found: {}",
            catalog_path.display()
        );
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  {APP_BINARY_NAME} comiket105.json");
        eprintln!("  {APP_BINARY_NAME} validate --catalog comiket105.json");
        std::process::exit(1);
    }

    println!("{} v{}", APP_NAME, env!("CARGO_PKG_VERSION"));
    println!("Loading catalog...");

    let catalog = parser::load_catalog(&catalog_path)?;

    let data_dir = match config.paths.data_dir.clone() {
        Some(dir) => dir,
        None => VisitListService::default_data_dir()?,
    };
    let (visit_list, visit_list_path) =
        VisitListService::load_or_create(&data_dir, &catalog.event_name, &catalog.day_numbers())
            .context("Failed to load visit list")?;

    let mut terminal = tui::setup_terminal()?;
    let mut app_state = tui::AppState::new(catalog, visit_list, visit_list_path, config)?;

    // Run main TUI loop
    let result = tui::run_tui(&mut app_state, &mut terminal);

    // Restore terminal before surfacing any loop error
    tui::restore_terminal(terminal)?;

    result?;

    Ok(())
}
