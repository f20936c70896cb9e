//! Load recycler facilities from a JSON file into the database.
//!
//! ```sh
//! cargo run --bin import-recyclers -- data/recyclers.json
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use growloop_backend::application::{check_import, import_recyclers, parse_import_document};
use growloop_backend::config::AppConfig;
use growloop_backend::infrastructure::db::{create_pool, run_migrations};
use growloop_backend::infrastructure::repositories::RecyclerRepositoryImpl;
use growloop_backend::observability::init_tracing;
use tracing::info;

/// `import-recyclers` command arguments.
#[derive(Debug, Parser)]
#[command(
    name = "import-recyclers",
    about = "Import recycler facilities from a JSON array",
    version
)]
struct CliArgs {
    /// JSON file holding an array of facility records.
    #[arg(value_name = "file")]
    input: PathBuf,
    /// Validate records without writing to the database.
    #[arg(long)]
    dry_run: bool,
    /// Skip applying pending migrations before importing.
    #[arg(long)]
    skip_migrations: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = CliArgs::parse();

    let config = AppConfig::from_env().context("failed to load application configuration")?;
    init_tracing(&config.logging);

    let raw = tokio::fs::read_to_string(&args.input)
        .await
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let records = parse_import_document(&raw)?;
    info!(file = %args.input.display(), records = records.len(), "import file parsed");

    let summary = if args.dry_run {
        check_import(records)
    } else {
        let pool = create_pool(&config.database)
            .await
            .context("failed to create database pool")?;
        if !args.skip_migrations {
            run_migrations(&pool)
                .await
                .context("database migrations failed")?;
        }
        let repo = RecyclerRepositoryImpl::new(pool);
        import_recyclers(&repo, records).await?
    };

    info!(
        inserted = summary.inserted,
        skipped = summary.skipped,
        dry_run = args.dry_run,
        "recycler import finished"
    );
    Ok(())
}
