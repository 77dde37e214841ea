//! Estate Store
//!
//! Maintenance commands for the JSON document store behind the estate admin site:
//! seeding the default administrator and migrating the legacy relational database.

mod bootstrap;
mod config;
mod errors;
mod migrate;
mod models;
mod source;
mod store;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use bootstrap::BootstrapOutcome;
use config::Config;
use errors::AppError;
use migrate::{MigrateOptions, MigrationOrchestrator};
use models::Collection;
use source::SourceResolver;
use store::DocumentStore;

#[derive(Parser)]
#[command(name = "estate-store", about = "Estate document store maintenance")]
struct Cli {
    /// Path to the JSON document store (overrides ESTATE_STORE_PATH)
    #[arg(long, value_name = "PATH", global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Create the default administrator if it does not exist
    SeedAdmin,
    /// Migrate every entity from the legacy database into the store
    Migrate {
        /// Legacy database URL, tried after the .env candidates
        #[arg(long, value_name = "URL")]
        source_url: Option<String>,
        /// Build and report the document without writing it
        #[arg(long)]
        dry_run: bool,
    },
    /// Print record counts per collection
    Stats {
        /// Only count this collection (its key in the store, e.g. galleryItems)
        #[arg(long, value_name = "NAME")]
        collection: Option<Collection>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::from_env();
    if let Some(store) = cli.store {
        config.store_path = store;
    }

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    let registry = tracing_subscriber::registry().with(env_filter);
    if config.log_json {
        registry.with(fmt_layer.json()).init();
    } else {
        registry.with(fmt_layer).init();
    }

    tracing::info!("Store path: {:?}", config.store_path);

    let result = match cli.cmd {
        Cmd::SeedAdmin => seed_admin(&config).await,
        Cmd::Migrate {
            source_url,
            dry_run,
        } => {
            if source_url.is_some() {
                config.source_url = source_url;
            }
            migrate(&config, MigrateOptions { dry_run }).await
        }
        Cmd::Stats { collection } => stats(&config, collection).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => ExitCode::from(report_fatal(&e)),
    }
}

/// Report a fatal error once, through the log, and return the exit status.
fn report_fatal(err: &AppError) -> u8 {
    tracing::error!("{}", err);
    err.exit_code()
}

async fn seed_admin(config: &Config) -> Result<(), AppError> {
    let store = DocumentStore::new(&config.store_path);

    match bootstrap::ensure_default_admin(&store, &config.admin).await? {
        BootstrapOutcome::Created(admin) => {
            println!("Created administrator {} ({})", admin.email, admin.id)
        }
        BootstrapOutcome::AlreadyExists { .. } => {
            println!("Administrator {} already exists", config.admin.email)
        }
    }

    Ok(())
}

async fn migrate(config: &Config, options: MigrateOptions) -> Result<(), AppError> {
    let store = DocumentStore::new(&config.store_path);
    let resolver = SourceResolver::standard(config);
    tracing::debug!(
        "Resolver candidates: {}",
        resolver.candidates().collect::<Vec<_>>().join(", ")
    );

    let report = MigrationOrchestrator::new(&store, options)
        .run(&resolver)
        .await?;

    print!("{}", report);
    if !report.is_complete() {
        tracing::warn!("Migration finished with failed entities");
    }
    Ok(())
}

async fn stats(config: &Config, only: Option<Collection>) -> Result<(), AppError> {
    let document = DocumentStore::new(&config.store_path).load().await?;

    let collections = match only {
        Some(collection) => vec![collection],
        None => Collection::ALL.to_vec(),
    };

    let mut total = 0;
    for collection in collections {
        let count = document.collection(collection).len();
        println!("{:<20} {:>8}", collection.as_str(), count);
        total += count;
    }
    println!("{:<20} {:>8}", "all", total);

    Ok(())
}
