use std::path::{Path, PathBuf};

use clap::Parser;
use modelstore::{
    config::StoreConfig,
    observability,
    store::DataStore,
    sync::{SyncReport, Syncer},
    validate::{self, ValidationReport},
};
use reqwest::Client;

/// CLI arguments for the model metadata store tools
#[derive(Parser, Debug)]
#[command(version, about = "Static AI-model metadata store tools", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Path to config file (defaults to ./modelstore.toml if it exists,
    /// otherwise built-in defaults)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Data store root, overriding the configured one
    #[arg(short, long, global = true)]
    root: Option<PathBuf>,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Fetch the models.dev catalog and rewrite provider documents and the index
    Sync {
        /// Keep at most two representatives per model family
        #[arg(long)]
        slim: bool,
    },
    /// Check every provider, alias and index document
    ///
    /// Exits with status 1 when any document is invalid.
    Validate,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();

    let config = load_config(args.config.as_deref(), args.root);

    if let Err(e) = observability::init_tracing(&config.observability.logging) {
        eprintln!("Warning: {e}");
    }

    let store = DataStore::new(&config.root);

    match args.command {
        Command::Sync { slim } => run_sync(&config, store, slim).await,
        Command::Validate => run_validate(store).await,
    }
}

fn load_config(path: Option<&Path>, root_override: Option<PathBuf>) -> StoreConfig {
    let mut config = match StoreConfig::load(path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    if let Some(root) = root_override {
        config.root = root;
    }
    config
}

async fn run_sync(config: &StoreConfig, store: DataStore, slim: bool) {
    let options = config.sync.to_options(slim);
    let syncer = Syncer::new(Client::new(), store, options);

    match syncer.run().await {
        Ok(report) => print_sync_report(&report),
        Err(e) => {
            tracing::error!(error = %e, "Sync failed");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

fn print_sync_report(report: &SyncReport) {
    if report.slim {
        println!("Slim mode: keeping at most two models per family");
    }
    for provider in &report.providers {
        if provider.models_written == provider.models_fetched {
            println!("✓ {}: {} models", provider.provider_id, provider.models_written);
        } else {
            println!(
                "✓ {}: {} models ({} upstream)",
                provider.provider_id, provider.models_written, provider.models_fetched
            );
        }
    }

    println!();
    println!(
        "Synced {} providers ({} models) in {}ms",
        report.providers.len(),
        report.models_written(),
        report.duration_ms
    );
    println!(
        "Index: {} providers, {} models total ({} manual) -> {}",
        report.index.providers.len(),
        report.index.total_models,
        report.index.sources.manual.len(),
        report.index_path.display()
    );
}

async fn run_validate(store: DataStore) {
    let report = match validate::validate_store(&store).await {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    print_validation_report(&report);

    if !report.is_success() {
        std::process::exit(1);
    }
}

fn print_validation_report(report: &ValidationReport) {
    for file in &report.files {
        if file.is_valid() {
            println!("✓ {}", file.path.display());
        } else {
            println!("✗ {}", file.path.display());
            for error in &file.errors {
                println!("    - {error}");
            }
        }
    }

    println!();
    println!("{}/{} files valid", report.valid_count(), report.files.len());
    if !report.is_success() {
        println!("{} files have errors", report.invalid_count());
    }
}
