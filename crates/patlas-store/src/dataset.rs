//! Dataset payload: the boundary contract with the external data source.
//!
//! A dataset is one plain JSON document carrying the category definitions
//! for both axes plus the patent records: the shape an external store or
//! API hands over at load time.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use patlas_core::{Axis, CategoryDef, PatentRecord, Result, Taxonomy};

use crate::store::PatentStore;

/// The load-time payload: taxonomy definitions plus records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    pub categories: Vec<CategoryDef>,
    pub patents: Vec<PatentRecord>,
}

impl Dataset {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Validate the payload and split it into the immutable taxonomy and
    /// the record store.
    ///
    /// Beyond per-record validation, every record's `category1` must be a
    /// defined axis-1 code and `category2`, when present, a defined axis-2
    /// code; a miss fails with `UnknownCategory`.
    pub fn into_parts(self) -> Result<(Taxonomy, PatentStore)> {
        let taxonomy = Taxonomy::build(&self.categories)?;

        for patent in &self.patents {
            taxonomy.lookup_on(Axis::TechnologyField, &patent.category1)?;
            if let Some(category2) = &patent.category2 {
                taxonomy.lookup_on(Axis::ImplementationType, category2)?;
            }
        }

        let store = PatentStore::from_records(self.patents)?;
        info!(
            categories = taxonomy.len(),
            patents = store.len(),
            "dataset loaded"
        );
        Ok((taxonomy, store))
    }
}
