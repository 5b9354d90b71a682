//! Catalog module - The read-only run dataset and the pure operations over it
//!
//! Provides:
//! - Run records (model)
//! - Dataset loading from a JSON file or a directory of JSON files
//! - Multi-term filtering (filter)
//! - Detail lookup by id

pub mod filter;
pub mod load;
pub mod lookup;
pub mod model;

use chrono::NaiveDate;
use std::collections::HashSet;
use std::path::PathBuf;

use crate::session::location::is_addressable;

pub use model::Run;

/// Errors raised while building a catalog
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("duplicate run id: {id}")]
    DuplicateId { id: String },
    #[error("run id {id:?} cannot be used in a location")]
    UnaddressableId { id: String },
    #[error("no .json dataset files found under {path}")]
    NoDataFiles { path: PathBuf },
    #[error("failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// The full, immutable dataset
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    runs: Vec<Run>,
    updated_at: Option<NaiveDate>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids and ids no location can name
    pub fn new(runs: Vec<Run>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(runs.len());
        for run in &runs {
            if !is_addressable(&run.id) {
                return Err(CatalogError::UnaddressableId { id: run.id.clone() });
            }
            if !seen.insert(run.id.as_str()) {
                return Err(CatalogError::DuplicateId { id: run.id.clone() });
            }
        }
        Ok(Self {
            runs,
            updated_at: None,
        })
    }

    pub fn with_updated_at(mut self, updated_at: Option<NaiveDate>) -> Self {
        self.updated_at = updated_at;
        self
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    pub fn updated_at(&self) -> Option<NaiveDate> {
        self.updated_at
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}
