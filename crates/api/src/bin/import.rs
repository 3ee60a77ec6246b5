//! `folio-import`: load a directory of markdown files into the entry store.
//!
//! ```text
//! folio-import                     # import ./entries/*.md
//! folio-import ./pages --clear     # wipe all entries, then import ./pages/*.md
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio_api::import::import_directory;

/// Connections needed by a single sequential import.
const IMPORT_MAX_CONNECTIONS: u32 = 2;

#[derive(Parser)]
#[command(
    name = "folio-import",
    version,
    about = "Import markdown files into the Folio entry store"
)]
struct Cli {
    /// Directory containing `*.md` files. Each file stem becomes a title.
    #[arg(default_value = "entries")]
    dir: PathBuf,

    /// Delete all existing entries before importing.
    #[arg(long)]
    clear: bool,

    /// PostgreSQL connection string.
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio_api=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let pool = folio_db::create_pool(&cli.database_url, IMPORT_MAX_CONNECTIONS)
        .await
        .context("Failed to connect to database")?;
    folio_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    let summary = import_directory(&pool, &cli.dir, cli.clear)
        .await
        .with_context(|| format!("Import from {} failed", cli.dir.display()))?;

    if cli.clear {
        println!("Deleted {} existing rows.", summary.deleted);
    }
    for title in &summary.skipped {
        println!("Skipped invalid title: {title:?}");
    }
    println!(
        "Import complete. Created: {}, Updated: {}, Total: {}",
        summary.created,
        summary.updated,
        summary.total()
    );

    pool.close().await;
    Ok(())
}
