//! Bulk import of markdown files into the entry store.
//!
//! Each `*.md` file in a directory becomes one entry: the file stem is the
//! title, the file body the content. Existing titles (ignoring case) have
//! their content overwritten. The whole run is one transaction.

use std::path::{Path, PathBuf};

use folio_core::entry::validate_title;
use folio_db::repositories::EntryRepo;
use sqlx::PgPool;

/// Counters reported at the end of an import.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    /// Rows removed by `--clear` before importing.
    pub deleted: u64,
    pub created: usize,
    pub updated: usize,
    /// File stems rejected as titles.
    pub skipped: Vec<String>,
}

impl ImportSummary {
    pub fn total(&self) -> usize {
        self.created + self.updated
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Import directory not found: {}", .0.display())]
    MissingDirectory(PathBuf),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// The `*.md` files directly inside `dir`, sorted by path.
pub fn collect_markdown_files(dir: &Path) -> Result<Vec<PathBuf>, ImportError> {
    if !dir.is_dir() {
        return Err(ImportError::MissingDirectory(dir.to_path_buf()));
    }

    let io_err = |source| ImportError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for item in std::fs::read_dir(dir).map_err(io_err)? {
        let path = item.map_err(io_err)?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "md") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Import every markdown file in `dir`, optionally deleting all entries first.
pub async fn import_directory(
    pool: &PgPool,
    dir: &Path,
    clear: bool,
) -> Result<ImportSummary, ImportError> {
    let files = collect_markdown_files(dir)?;
    let mut summary = ImportSummary::default();

    let mut tx = pool.begin().await?;

    if clear {
        summary.deleted = EntryRepo::delete_all(&mut *tx).await?;
        tracing::warn!(deleted = summary.deleted, "Cleared existing entries");
    }

    for path in files {
        let Some(title) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string) else {
            continue;
        };

        if let Err(e) = validate_title(&title) {
            tracing::warn!(file = %path.display(), error = %e, "Skipping file");
            summary.skipped.push(title);
            continue;
        }

        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| ImportError::Io {
                path: path.clone(),
                source,
            })?;

        let upserted = EntryRepo::upsert_content(&mut *tx, &title, &content).await?;
        if upserted.inserted {
            summary.created += 1;
        } else {
            summary.updated += 1;
        }
        tracing::debug!(title = %upserted.entry.title, created = upserted.inserted, "Imported entry");
    }

    tx.commit().await?;

    tracing::info!(
        created = summary.created,
        updated = summary.updated,
        skipped = summary.skipped.len(),
        "Import complete"
    );

    Ok(summary)
}
