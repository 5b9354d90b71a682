//! Dataset loading
//!
//! A dataset is a JSON file holding either a bare array of runs or an
//! envelope `{ "updatedAt": ..., "runs": [...] }`, or a directory of such
//! files. Directory entries are read in sorted path order.

use chrono::NaiveDate;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use crate::catalog::{Catalog, CatalogError, Run};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DataFile {
    Envelope {
        #[serde(rename = "updatedAt", default)]
        updated_at: Option<NaiveDate>,
        runs: Vec<Run>,
    },
    Bare(Vec<Run>),
}

impl DataFile {
    fn into_parts(self) -> (Vec<Run>, Option<NaiveDate>) {
        match self {
            DataFile::Envelope { updated_at, runs } => (runs, updated_at),
            DataFile::Bare(runs) => (runs, None),
        }
    }
}

/// Load a catalog from a file or directory
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let files = if path.is_dir() {
        data_files(path)?
    } else {
        vec![path.to_path_buf()]
    };

    let mut runs = Vec::new();
    let mut updated_at: Option<NaiveDate> = None;

    for file in &files {
        let (file_runs, file_date) = read_data_file(file)?;
        debug!(path = %file.display(), runs = file_runs.len(), "loaded dataset file");
        runs.extend(file_runs);
        updated_at = updated_at.max(file_date);
    }

    let catalog = Catalog::new(runs)?.with_updated_at(updated_at);
    debug!(total = catalog.len(), "catalog ready");
    Ok(catalog)
}

/// Parse a single dataset file
fn read_data_file(path: &Path) -> Result<(Vec<Run>, Option<NaiveDate>), CatalogError> {
    let content = fs::read_to_string(path).map_err(|source| CatalogError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_data(&content)
        .map(DataFile::into_parts)
        .map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

fn parse_data(content: &str) -> Result<DataFile, serde_json::Error> {
    serde_json::from_str(content)
}

/// Collect `*.json` files under a directory in sorted order
fn data_files(dir: &Path) -> Result<Vec<PathBuf>, CatalogError> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|source| CatalogError::Walk {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path.to_path_buf());
        }
    }

    if files.is_empty() {
        return Err(CatalogError::NoDataFiles {
            path: dir.to_path_buf(),
        });
    }

    Ok(files)
}
