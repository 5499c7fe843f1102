//! Transaction and category sources.
//!
//! Loose payloads (REST API JSON dumps or CSV exports) are normalized here,
//! once, into typed records. Bad fields are coerced; records that cannot be
//! identified at all are skipped with a warning.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::models::{Category, Transaction};

mod csv_file;
mod fields;
mod payload;

pub use payload::{categories_from_json, transactions_from_json};

pub trait DataSource {
    fn load_transactions(&self) -> Result<Vec<Transaction>>;
    fn load_categories(&self) -> Result<Vec<Category>>;
}

/// Snapshot files on disk. `.csv` files are read as CSV, anything else as JSON.
#[derive(Debug, Clone)]
pub struct FileSource {
    transactions: PathBuf,
    categories: PathBuf,
}

impl FileSource {
    pub fn new(transactions: PathBuf, categories: PathBuf) -> Self {
        Self {
            transactions,
            categories,
        }
    }
}

impl DataSource for FileSource {
    fn load_transactions(&self) -> Result<Vec<Transaction>> {
        let path = &self.transactions;
        let txns = if is_csv(path) {
            csv_file::read_transactions(path)?
        } else {
            transactions_from_json(&read(path)?)
                .with_context(|| format!("Invalid transactions JSON: {}", path.display()))?
        };
        tracing::info!(count = txns.len(), path = %path.display(), "loaded transactions");
        Ok(txns)
    }

    fn load_categories(&self) -> Result<Vec<Category>> {
        let path = &self.categories;
        let cats = if is_csv(path) {
            csv_file::read_categories(path)?
        } else {
            categories_from_json(&read(path)?)
                .with_context(|| format!("Invalid categories JSON: {}", path.display()))?
        };
        tracing::info!(count = cats.len(), path = %path.display(), "loaded categories");
        Ok(cats)
    }
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
