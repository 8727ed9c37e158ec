//! Rental Harvest main entry point
//!
//! This is the command-line interface for the rental listing harvester.

use clap::Parser;
use rental_harvest::config::{load_config_with_hash, validate, Config};
use rental_harvest::crawler::run_traversal;
use rental_harvest::output::{print_statistics, JsonFileSink, ResultSink, RunStatistics, SinkOutcome};
use rental_harvest::url::ListingSource;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Rental Harvest: a polite rental-listing harvester
///
/// Walks the rental index page by page, extracts every listing it links to
/// and writes the results as one JSON array.
#[derive(Parser, Debug)]
#[command(name = "rental-harvest")]
#[command(version)]
#[command(about = "A polite rental-listing harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults are used when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Number of announcements to collect
    #[arg(long, value_name = "N")]
    limit: Option<usize>,

    /// Where to write the JSON array
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Pause between index pages in milliseconds
    #[arg(long, value_name = "MS")]
    delay_ms: Option<u64>,

    /// Show the effective configuration without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match load_effective_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config)?;
    } else {
        handle_harvest(&config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("rental_harvest=info,warn"),
            1 => EnvFilter::new("rental_harvest=debug,info"),
            2 => EnvFilter::new("rental_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the configuration file (or defaults), applies overrides and validates
fn load_effective_config(cli: &Cli) -> rental_harvest::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No configuration file given, using defaults");
            Config::default()
        }
    };

    apply_overrides(&mut config, cli);
    validate(&config)?;
    Ok(config)
}

/// Applies command-line overrides on top of the loaded configuration
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(limit) = cli.limit {
        config.traversal.target_count = limit;
    }
    if let Some(output) = &cli.output {
        config.output.json_path = output.to_string_lossy().into_owned();
    }
    if let Some(delay_ms) = cli.delay_ms {
        config.traversal.page_delay_ms = delay_ms;
    }
}

/// Handles the --dry-run mode: shows what would be harvested
fn handle_dry_run(config: &Config) -> rental_harvest::Result<()> {
    let source = ListingSource::from_config(&config.source)?;

    println!("=== Rental Harvest Dry Run ===\n");

    println!("Source:");
    println!("  First index page: {}", source.index_url(1));
    println!("  Origin: {}", source.origin());

    println!("\nRequests:");
    println!("  User agent: {}", config.http.user_agent);
    println!("  Accept-Language: {}", config.http.accept_language);

    println!("\nTraversal:");
    println!("  Target count: {}", config.traversal.target_count);
    println!("  Delay between index pages: {}ms", config.traversal.page_delay_ms);

    println!("\nOutput:");
    println!("  JSON: {} (indent {})", config.output.json_path, config.output.indent);

    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Handles the main harvest operation
async fn handle_harvest(config: &Config) -> rental_harvest::Result<()> {
    tracing::info!(
        "Collecting up to {} announcements",
        config.traversal.target_count
    );

    let report = run_traversal(config).await?;
    print_statistics(&RunStatistics::from_report(&report));

    let sink = JsonFileSink::from_config(&config.output);
    match sink.write(&report.announcements) {
        Ok(SinkOutcome::Written { path, count }) => {
            println!(
                "Successfully fetched and saved {} announcements to {}.",
                count,
                path.display()
            );
            Ok(())
        }
        Ok(SinkOutcome::Skipped) => {
            println!("No announcements were fetched or saved.");
            Ok(())
        }
        Err(e) => {
            tracing::error!("Failed to write {}: {}", sink.path().display(), e);
            Err(e.into())
        }
    }
}
