//! Conjunctive predicate filtering over patent records.
//!
//! Criteria are an explicit value object rather than ambient view state:
//! the form layer parses its permissive option strings into a
//! `FilterCriteria` once, at the boundary, and the filter itself only ever
//! sees typed values.

use tracing::debug;

use patlas_core::{
    Axis, DetailStatus, Grade, LifecycleStatus, PatentRecord, PatlasError, Result, Taxonomy,
};

/// One filter configuration. `None` (or an empty search term) means "all"
/// for that criterion; all criteria are ANDed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub status: Option<LifecycleStatus>,
    pub detail_status: Option<DetailStatus>,
    pub category1: Option<String>,
    pub category2: Option<String>,
    pub grade: Option<Grade>,
    pub search_term: String,
}

impl FilterCriteria {
    /// Parse permissive form-layer options into typed criteria.
    ///
    /// Every key accepts `"all"`. Outside that, `status`/`detailStatus`/
    /// `grade` must be one of their documented values and `category1`/
    /// `category2` must be defined on their axis; anything else fails with
    /// `InvalidFilterValue`. `searchTerm` is free text and taken verbatim.
    pub fn from_options(taxonomy: &Taxonomy, options: &[(&str, &str)]) -> Result<Self> {
        let mut criteria = Self::default();
        for &(key, value) in options {
            let invalid = || PatlasError::InvalidFilterValue {
                key: key.to_string(),
                value: value.to_string(),
            };
            if key == "searchTerm" {
                criteria.search_term = value.to_string();
                continue;
            }
            if value == "all" {
                match key {
                    "status" | "detailStatus" | "category1" | "category2" | "grade" => continue,
                    _ => return Err(invalid()),
                }
            }
            match key {
                "status" => {
                    criteria.status = Some(LifecycleStatus::parse(value).ok_or_else(invalid)?);
                }
                "detailStatus" => {
                    criteria.detail_status =
                        Some(DetailStatus::parse(value).ok_or_else(invalid)?);
                }
                "category1" => {
                    taxonomy
                        .lookup_on(Axis::TechnologyField, value)
                        .map_err(|_| invalid())?;
                    criteria.category1 = Some(value.to_string());
                }
                "category2" => {
                    taxonomy
                        .lookup_on(Axis::ImplementationType, value)
                        .map_err(|_| invalid())?;
                    criteria.category2 = Some(value.to_string());
                }
                "grade" => {
                    criteria.grade = Some(value.parse::<Grade>().map_err(|_| invalid())?);
                }
                _ => return Err(invalid()),
            }
        }
        Ok(criteria)
    }

    /// True when every predicate matches.
    ///
    /// Predicates are pure and commutative; evaluation order never changes
    /// the result.
    pub fn matches(&self, record: &PatentRecord) -> bool {
        if let Some(status) = self.status
            && record.status != status
        {
            return false;
        }
        if let Some(detail) = self.detail_status
            && record.detail_status != detail
        {
            return false;
        }
        if let Some(category1) = &self.category1
            && record.category1 != *category1
        {
            return false;
        }
        if let Some(category2) = &self.category2
            && record.category2.as_deref() != Some(category2.as_str())
        {
            return false;
        }
        // A grade filter of X also matches records with no grade at all.
        if let Some(grade) = self.grade
            && record.effective_grade() != grade
        {
            return false;
        }
        self.matches_search(record)
    }

    fn matches_search(&self, record: &PatentRecord) -> bool {
        if self.search_term.is_empty() {
            return true;
        }
        let needle = self.search_term.to_lowercase();
        if record.title.to_lowercase().contains(&needle) {
            return true;
        }
        record
            .application_number
            .as_ref()
            .is_some_and(|number| number.to_lowercase().contains(&needle))
    }
}

/// Apply the criteria, returning the matching subset as a new sequence.
///
/// The input is never mutated, and the output preserves input order.
pub fn filter<'a>(records: &'a [PatentRecord], criteria: &FilterCriteria) -> Vec<&'a PatentRecord> {
    let matched: Vec<&PatentRecord> = records.iter().filter(|r| criteria.matches(r)).collect();
    debug!(total = records.len(), matched = matched.len(), "filter applied");
    matched
}
