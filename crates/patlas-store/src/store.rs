//! In-memory patent record store.
//!
//! Owns the working set of records for one session. The store is
//! single-threaded and synchronous: every operation runs to completion, and
//! a serving context that wants concurrency gives each session its own
//! store. The only in-core mutation is grade assignment; every other field
//! is immutable once loaded.

use std::collections::HashMap;

use tracing::debug;

use patlas_core::{Grade, PatentRecord, PatlasError, Result};

/// The working set of patent records, indexed by id.
#[derive(Debug, Clone, Default)]
pub struct PatentStore {
    records: Vec<PatentRecord>,
    by_id: HashMap<String, usize>,
}

impl PatentStore {
    /// Build a store from intake records.
    ///
    /// Every record is re-validated at this boundary, and duplicate ids are
    /// rejected with `DuplicateId`.
    pub fn from_records(records: Vec<PatentRecord>) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(records.len());
        for (idx, record) in records.iter().enumerate() {
            record.validate()?;
            if by_id.insert(record.id.clone(), idx).is_some() {
                return Err(PatlasError::DuplicateId(record.id.clone()));
            }
        }
        Ok(Self { records, by_id })
    }

    /// All records, in intake order.
    pub fn records(&self) -> &[PatentRecord] {
        &self.records
    }

    /// Fetch a single record by id.
    pub fn get(&self, id: &str) -> Option<&PatentRecord> {
        self.by_id.get(id).map(|&idx| &self.records[idx])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Assign a grade and rationale to one record.
    ///
    /// Replaces only the grade and reason fields, unconditionally
    /// (last-write-wins); reapplying the identical pair is a no-op.
    /// Fails with `PatentNotFound` for an unknown id, leaving the store
    /// untouched. Derived aggregates computed earlier (per-category counts,
    /// tallies) are stale after a successful assignment and must be
    /// recomputed by the caller.
    pub fn assign_grade(
        &mut self,
        id: &str,
        grade: Grade,
        reason: Option<String>,
    ) -> Result<&PatentRecord> {
        let idx = *self
            .by_id
            .get(id)
            .ok_or_else(|| PatlasError::PatentNotFound(id.to_string()))?;

        let record = &mut self.records[idx];
        if record.grade == Some(grade) && record.grade_reason == reason {
            debug!(id, grade = grade.as_str(), "grade unchanged, skipping write");
        } else {
            record.grade = Some(grade);
            record.grade_reason = reason;
            debug!(id, grade = grade.as_str(), "grade assigned");
        }
        Ok(&self.records[idx])
    }
}
