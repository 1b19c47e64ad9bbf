//! Patent record model and boundary validation.
//!
//! Records arrive from an external intake process as a plain data payload;
//! everything except the grade fields is immutable once stored. Unknown
//! status or grade strings are rejected at deserialization rather than
//! carried through as free-form text.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{PatlasError, Result};
use crate::grade::Grade;

/// Coarse lifecycle status of a patent right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LifecycleStatus {
    Active,
    Inactive,
}

impl LifecycleStatus {
    pub const ALL: [LifecycleStatus; 2] = [LifecycleStatus::Active, LifecycleStatus::Inactive];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    /// Parse the wire form; `None` for anything outside the documented set.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            _ => None,
        }
    }
}

impl fmt::Display for LifecycleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fine-grained prosecution state, subordinate to the lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DetailStatus {
    UnderExamination,
    Registered,
    Rejected,
    Invalidated,
    Withdrawn,
    Abandoned,
}

impl DetailStatus {
    pub const ALL: [DetailStatus; 6] = [
        DetailStatus::UnderExamination,
        DetailStatus::Registered,
        DetailStatus::Rejected,
        DetailStatus::Invalidated,
        DetailStatus::Withdrawn,
        DetailStatus::Abandoned,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnderExamination => "under-examination",
            Self::Registered => "registered",
            Self::Rejected => "rejected",
            Self::Invalidated => "invalidated",
            Self::Withdrawn => "withdrawn",
            Self::Abandoned => "abandoned",
        }
    }

    /// Parse the wire form; `None` for anything outside the documented set.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|d| d.as_str() == s)
    }

    /// The lifecycle status this detail state implies.
    pub fn lifecycle(&self) -> LifecycleStatus {
        match self {
            Self::UnderExamination | Self::Registered => LifecycleStatus::Active,
            Self::Rejected | Self::Invalidated | Self::Withdrawn | Self::Abandoned => {
                LifecycleStatus::Inactive
            }
        }
    }
}

impl fmt::Display for DetailStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One tracked patent or application.
///
/// `application_number` is absent for not-yet-filed records; `category2` is
/// absent when the record has no axis-2 classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatentRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_number: Option<String>,
    pub title: String,
    pub status: LifecycleStatus,
    pub detail_status: DetailStatus,
    /// Axis-1 (technology field) category code.
    pub category1: String,
    /// Axis-2 (implementation type) category code; `None` = unclassified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category2: Option<String>,
    pub application_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,
    /// Assessed validity in [0, 100].
    pub validity_score: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<Grade>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade_reason: Option<String>,
}

impl PatentRecord {
    /// The grade aggregation sees: an ungraded record reads as X.
    pub fn effective_grade(&self) -> Grade {
        self.grade.unwrap_or(Grade::X)
    }

    /// Boundary validation for intake records.
    ///
    /// Checks the lifecycle/detail-status consistency rule, date ordering,
    /// and the validity-score range. Category codes are checked separately
    /// against the taxonomy at dataset load.
    pub fn validate(&self) -> Result<()> {
        if self.detail_status.lifecycle() != self.status {
            return Err(PatlasError::StatusMismatch {
                id: self.id.clone(),
                status: self.status,
                detail: self.detail_status,
            });
        }
        if let Some(expiry) = self.expiry_date
            && expiry < self.application_date
        {
            return Err(PatlasError::InvalidDateRange {
                id: self.id.clone(),
            });
        }
        if self.validity_score > 100 {
            return Err(PatlasError::ScoreOutOfRange {
                id: self.id.clone(),
                score: self.validity_score,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> PatentRecord {
        PatentRecord {
            id: id.to_string(),
            application_number: Some("US17/123,456".to_string()),
            title: "Neural engine for on-device inference".to_string(),
            status: LifecycleStatus::Active,
            detail_status: DetailStatus::Registered,
            category1: "1A".to_string(),
            category2: Some("2B".to_string()),
            application_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            expiry_date: Some(NaiveDate::from_ymd_opt(2044, 1, 15).unwrap()),
            validity_score: 85,
            grade: Some(Grade::S),
            grade_reason: Some("direct claim overlap".to_string()),
        }
    }

    #[test]
    fn detail_status_implies_lifecycle() {
        assert_eq!(
            DetailStatus::Registered.lifecycle(),
            LifecycleStatus::Active
        );
        assert_eq!(
            DetailStatus::UnderExamination.lifecycle(),
            LifecycleStatus::Active
        );
        for detail in [
            DetailStatus::Rejected,
            DetailStatus::Invalidated,
            DetailStatus::Withdrawn,
            DetailStatus::Abandoned,
        ] {
            assert_eq!(detail.lifecycle(), LifecycleStatus::Inactive);
        }
    }

    #[test]
    fn valid_record_passes() {
        record("p-1").validate().unwrap();
    }

    #[test]
    fn inconsistent_status_rejected() {
        let mut r = record("p-1");
        r.status = LifecycleStatus::Inactive;
        let err = r.validate().unwrap_err();
        assert!(matches!(err, PatlasError::StatusMismatch { .. }));
    }

    #[test]
    fn expiry_before_application_rejected() {
        let mut r = record("p-1");
        r.expiry_date = Some(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        let err = r.validate().unwrap_err();
        assert!(matches!(err, PatlasError::InvalidDateRange { .. }));
    }

    #[test]
    fn expiry_equal_to_application_allowed() {
        let mut r = record("p-1");
        r.expiry_date = Some(r.application_date);
        r.validate().unwrap();
    }

    #[test]
    fn score_above_100_rejected() {
        let mut r = record("p-1");
        r.validity_score = 101;
        let err = r.validate().unwrap_err();
        assert!(matches!(err, PatlasError::ScoreOutOfRange { score: 101, .. }));
    }

    #[test]
    fn missing_grade_reads_as_x() {
        let mut r = record("p-1");
        r.grade = None;
        assert_eq!(r.effective_grade(), Grade::X);
    }

    #[test]
    fn wire_shape_is_camel_case() {
        let json = serde_json::to_string(&record("p-1")).unwrap();
        assert!(json.contains("\"applicationNumber\""));
        assert!(json.contains("\"detailStatus\":\"registered\""));
        assert!(json.contains("\"validityScore\":85"));
    }

    #[test]
    fn optional_fields_may_be_absent() {
        let json = r#"{
            "id": "p-2",
            "title": "Filterless ambient light sensor",
            "status": "active",
            "detailStatus": "under-examination",
            "category1": "1B",
            "applicationDate": "2024-02-01",
            "validityScore": 60
        }"#;
        let r: PatentRecord = serde_json::from_str(json).unwrap();
        assert!(r.application_number.is_none());
        assert!(r.category2.is_none());
        assert!(r.expiry_date.is_none());
        assert!(r.grade.is_none());
        r.validate().unwrap();
    }

    #[test]
    fn unknown_status_string_rejected_at_the_boundary() {
        let json = r#"{
            "id": "p-3",
            "title": "t",
            "status": "granted",
            "detailStatus": "registered",
            "category1": "1A",
            "applicationDate": "2024-02-01",
            "validityScore": 10
        }"#;
        assert!(serde_json::from_str::<PatentRecord>(json).is_err());
    }
}
