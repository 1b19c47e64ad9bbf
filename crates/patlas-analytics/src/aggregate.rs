//! Pure aggregation over patent records.
//!
//! Every function here is deterministic and side-effect free: identical
//! input produces identical output regardless of call order, so a caller
//! may recompute per render without memoization. Nothing is cached here:
//! derived counts that used to live on taxonomy nodes are recomputed from
//! the record set instead.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use patlas_core::code;
use patlas_core::{Axis, DetailStatus, Grade, LifecycleStatus, PatentRecord};

/// Core-patent count at or above which a portfolio reads as strong.
pub const STRONG_CORE_COUNT: usize = 10;
/// Core-patent count at or above which a portfolio reads as moderate.
pub const MODERATE_CORE_COUNT: usize = 5;

/// Validity score at or above which a record is high-validity.
pub const HIGH_VALIDITY_SCORE: u8 = 80;
/// Validity score at or above which a record is medium-validity.
pub const MEDIUM_VALIDITY_SCORE: u8 = 60;

// ── Status tally ──

/// Counts per lifecycle status and per detail status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusTally {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    by_detail: BTreeMap<DetailStatus, usize>,
}

impl StatusTally {
    pub fn count(&self, status: LifecycleStatus) -> usize {
        match status {
            LifecycleStatus::Active => self.active,
            LifecycleStatus::Inactive => self.inactive,
        }
    }

    pub fn detail_count(&self, detail: DetailStatus) -> usize {
        self.by_detail.get(&detail).copied().unwrap_or(0)
    }
}

/// Tally lifecycle and detail statuses in one pass.
pub fn status_tally(records: &[PatentRecord]) -> StatusTally {
    let mut tally = StatusTally {
        total: records.len(),
        ..Default::default()
    };
    for record in records {
        match record.status {
            LifecycleStatus::Active => tally.active += 1,
            LifecycleStatus::Inactive => tally.inactive += 1,
        }
        *tally.by_detail.entry(record.detail_status).or_default() += 1;
    }
    tally
}

// ── Grade tally ──

/// Counts per grade, with absent grades folded into X.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GradeTally {
    pub total: usize,
    pub s: usize,
    pub a: usize,
    pub b: usize,
    pub c: usize,
    pub x: usize,
}

impl GradeTally {
    pub fn count(&self, grade: Grade) -> usize {
        match grade {
            Grade::S => self.s,
            Grade::A => self.a,
            Grade::B => self.b,
            Grade::C => self.c,
            Grade::X => self.x,
        }
    }

    /// Core patents: graded S or A.
    pub fn core_count(&self) -> usize {
        self.s + self.a
    }

    /// Analyzed patents: everything except X (graded or absent).
    pub fn major_count(&self) -> usize {
        self.total - self.x
    }

    /// Core share of analyzed patents, in [0, 1]; 0 when nothing is graded.
    pub fn core_ratio(&self) -> f64 {
        if self.major_count() == 0 {
            0.0
        } else {
            self.core_count() as f64 / self.major_count() as f64
        }
    }

    /// Share of the whole set carrying this grade, as a percentage.
    pub fn share(&self, grade: Grade) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.count(grade) as f64 * 100.0 / self.total as f64
        }
    }
}

/// Tally grades in one pass. Records with no grade count as X.
pub fn grade_tally(records: &[PatentRecord]) -> GradeTally {
    let mut tally = GradeTally {
        total: records.len(),
        ..Default::default()
    };
    for record in records {
        match record.effective_grade() {
            Grade::S => tally.s += 1,
            Grade::A => tally.a += 1,
            Grade::B => tally.b += 1,
            Grade::C => tally.c += 1,
            Grade::X => tally.x += 1,
        }
    }
    tally
}

// ── Two-axis matrix ──

/// Cell key of the two-axis portfolio matrix.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MatrixKey {
    pub category1: String,
    /// `None` = axis-2 unclassified.
    pub category2: Option<String>,
}

impl fmt::Display for MatrixKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.category2 {
            Some(category2) => write!(f, "{}|{}", self.category1, category2),
            None => write!(f, "{}|unclassified", self.category1),
        }
    }
}

/// Sparse two-axis tally: absent cells implicitly count 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortfolioMatrix {
    cells: BTreeMap<MatrixKey, usize>,
}

impl PortfolioMatrix {
    /// Count for one cell; 0 for cells no record falls into.
    pub fn count(&self, category1: &str, category2: Option<&str>) -> usize {
        let key = MatrixKey {
            category1: category1.to_string(),
            category2: category2.map(str::to_string),
        };
        self.cells.get(&key).copied().unwrap_or(0)
    }

    /// Occupied cells in deterministic (code) order.
    pub fn cells(&self) -> impl Iterator<Item = (&MatrixKey, usize)> {
        self.cells.iter().map(|(key, &count)| (key, count))
    }

    /// Sum over every cell. Equals the record count, since axis-1 is
    /// required on every record.
    pub fn total(&self) -> usize {
        self.cells.values().sum()
    }

    /// Number of cells holding at least one patent.
    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }

    /// Number of cells at or above the given count.
    pub fn strength_cells(&self, threshold: usize) -> usize {
        self.cells.values().filter(|&&count| count >= threshold).count()
    }
}

/// Build the sparse (axis-1, axis-2-or-unclassified) tally in a single pass.
pub fn portfolio_matrix(records: &[PatentRecord]) -> PortfolioMatrix {
    // Accumulate in a HashMap (O(1) amortized per record), then hand out a
    // BTreeMap so iteration order is deterministic.
    let mut accum: HashMap<MatrixKey, usize> = HashMap::new();
    for record in records {
        let key = MatrixKey {
            category1: record.category1.clone(),
            category2: record.category2.clone(),
        };
        *accum.entry(key).or_insert(0) += 1;
    }
    PortfolioMatrix {
        cells: accum.into_iter().collect(),
    }
}

// ── Per-category counts ──

/// Recompute per-category patent counts for one axis.
///
/// Counts are keyed by the exact code each record carries; a record tagged
/// with a minor also rolls up into the minor's major. Records with no
/// axis-2 code contribute nothing to the axis-2 counts. The result is the
/// derived view that replaces cached per-node counts: callers re-run this
/// after grade-independent record changes instead of hand-editing a cache.
pub fn category_counts(records: &[PatentRecord], axis: Axis) -> BTreeMap<String, usize> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for record in records {
        let code = match axis {
            Axis::TechnologyField => Some(record.category1.as_str()),
            Axis::ImplementationType => record.category2.as_deref(),
        };
        let Some(code) = code else { continue };
        *counts.entry(code.to_string()).or_default() += 1;
        if let Some(parent) = code::parent_code(code) {
            *counts.entry(parent).or_default() += 1;
        }
    }
    counts
}

// ── Portfolio strength ──

/// Strength classification derived from the core-patent count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortfolioStrength {
    Strong,
    Moderate,
    Weak,
}

impl PortfolioStrength {
    /// Classify a core-patent count against the fixed thresholds.
    pub fn classify(core_count: usize) -> Self {
        if core_count >= STRONG_CORE_COUNT {
            Self::Strong
        } else if core_count >= MODERATE_CORE_COUNT {
            Self::Moderate
        } else {
            Self::Weak
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strong => "strong",
            Self::Moderate => "moderate",
            Self::Weak => "weak",
        }
    }
}

impl fmt::Display for PortfolioStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Validity banding ──

/// Banding applied to validity scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidityBand {
    High,
    Medium,
    Low,
}

impl ValidityBand {
    pub fn of(score: u8) -> Self {
        if score >= HIGH_VALIDITY_SCORE {
            Self::High
        } else if score >= MEDIUM_VALIDITY_SCORE {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(id: &str, category1: &str, category2: Option<&str>, grade: Option<Grade>) -> PatentRecord {
        PatentRecord {
            id: id.to_string(),
            application_number: None,
            title: format!("Patent {id}"),
            status: LifecycleStatus::Active,
            detail_status: DetailStatus::Registered,
            category1: category1.to_string(),
            category2: category2.map(str::to_string),
            application_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            expiry_date: None,
            validity_score: 70,
            grade,
            grade_reason: None,
        }
    }

    #[test]
    fn status_tally_counts_both_levels() {
        let mut rejected = record("p-3", "1A", None, None);
        rejected.status = LifecycleStatus::Inactive;
        rejected.detail_status = DetailStatus::Rejected;
        let mut pending = record("p-2", "1A", None, None);
        pending.detail_status = DetailStatus::UnderExamination;
        let records = vec![record("p-1", "1A", None, None), pending, rejected];

        let tally = status_tally(&records);
        assert_eq!(tally.total, 3);
        assert_eq!(tally.count(LifecycleStatus::Active), 2);
        assert_eq!(tally.count(LifecycleStatus::Inactive), 1);
        assert_eq!(tally.detail_count(DetailStatus::Registered), 1);
        assert_eq!(tally.detail_count(DetailStatus::UnderExamination), 1);
        assert_eq!(tally.detail_count(DetailStatus::Rejected), 1);
        assert_eq!(tally.detail_count(DetailStatus::Withdrawn), 0);
    }

    #[test]
    fn grade_tally_folds_absent_into_x() {
        // records = [S, A, B, ungraded] → {S:1, A:1, B:1, X:1},
        // core 2, analyzed 3, ratio 0.667.
        let records = vec![
            record("p-1", "1A", None, Some(Grade::S)),
            record("p-2", "1A", None, Some(Grade::A)),
            record("p-3", "1A", None, Some(Grade::B)),
            record("p-4", "1A", None, None),
        ];

        let tally = grade_tally(&records);
        assert_eq!(
            (tally.s, tally.a, tally.b, tally.c, tally.x),
            (1, 1, 1, 0, 1)
        );
        assert_eq!(tally.core_count(), 2);
        assert_eq!(tally.major_count(), 3);
        assert_eq!((tally.core_ratio() * 1000.0).round() / 1000.0, 0.667);
    }

    #[test]
    fn grade_tally_sums_to_record_count() {
        let records = vec![
            record("p-1", "1A", None, Some(Grade::S)),
            record("p-2", "1A", None, Some(Grade::C)),
            record("p-3", "1A", None, Some(Grade::X)),
            record("p-4", "1A", None, None),
            record("p-5", "1A", None, Some(Grade::B)),
        ];
        let tally = grade_tally(&records);
        let sum: usize = Grade::ALL.iter().map(|&g| tally.count(g)).sum();
        assert_eq!(sum, records.len());
    }

    #[test]
    fn core_ratio_is_zero_without_analyzed_patents() {
        let records = vec![
            record("p-1", "1A", None, None),
            record("p-2", "1A", None, Some(Grade::X)),
        ];
        let tally = grade_tally(&records);
        assert_eq!(tally.major_count(), 0);
        assert_eq!(tally.core_ratio(), 0.0);

        assert_eq!(grade_tally(&[]).core_ratio(), 0.0);
    }

    #[test]
    fn core_ratio_stays_in_unit_interval() {
        let records = vec![
            record("p-1", "1A", None, Some(Grade::S)),
            record("p-2", "1A", None, Some(Grade::A)),
        ];
        let ratio = grade_tally(&records).core_ratio();
        assert!((0.0..=1.0).contains(&ratio));
        assert_eq!(ratio, 1.0);
    }

    #[test]
    fn grade_shares() {
        let records = vec![
            record("p-1", "1A", None, Some(Grade::S)),
            record("p-2", "1A", None, Some(Grade::S)),
            record("p-3", "1A", None, None),
            record("p-4", "1A", None, Some(Grade::B)),
        ];
        let tally = grade_tally(&records);
        assert_eq!(tally.share(Grade::S), 50.0);
        assert_eq!(tally.share(Grade::B), 25.0);
        assert_eq!(tally.share(Grade::X), 25.0);
        assert_eq!(GradeTally::default().share(Grade::S), 0.0);
    }

    #[test]
    fn matrix_counts_pairs_with_unclassified_axis2() {
        // [{1A,2A}, {1A,2A}, {1B,-}] → {"1A|2A": 2, "1B|unclassified": 1}
        let records = vec![
            record("p-1", "1A", Some("2A"), None),
            record("p-2", "1A", Some("2A"), None),
            record("p-3", "1B", None, None),
        ];

        let matrix = portfolio_matrix(&records);
        assert_eq!(matrix.count("1A", Some("2A")), 2);
        assert_eq!(matrix.count("1B", None), 1);
        assert_eq!(matrix.count("1B", Some("2A")), 0);
        assert_eq!(matrix.occupied_cells(), 2);
        assert_eq!(matrix.total(), records.len());
    }

    #[test]
    fn matrix_keys_render_with_unclassified_sentinel() {
        let records = vec![
            record("p-1", "1A", Some("2A"), None),
            record("p-2", "1B", None, None),
        ];
        let matrix = portfolio_matrix(&records);
        let rendered: Vec<String> = matrix.cells().map(|(key, _)| key.to_string()).collect();
        assert_eq!(rendered, vec!["1A|2A", "1B|unclassified"]);
    }

    #[test]
    fn matrix_strength_cells() {
        let records: Vec<PatentRecord> = (0..7)
            .map(|i| {
                let category2 = if i < 5 { Some("2A") } else { Some("2B") };
                record(&format!("p-{i}"), "1A", category2, None)
            })
            .collect();
        let matrix = portfolio_matrix(&records);
        assert_eq!(matrix.strength_cells(5), 1);
        assert_eq!(matrix.strength_cells(2), 2);
        assert_eq!(matrix.strength_cells(8), 0);
    }

    #[test]
    fn aggregation_is_deterministic() {
        let records = vec![
            record("p-1", "1B", Some("2A"), Some(Grade::A)),
            record("p-2", "1A", None, None),
            record("p-3", "1A", Some("2B"), Some(Grade::S)),
        ];
        assert_eq!(grade_tally(&records), grade_tally(&records));
        assert_eq!(status_tally(&records), status_tally(&records));
        assert_eq!(portfolio_matrix(&records), portfolio_matrix(&records));
    }

    #[test]
    fn category_counts_roll_minors_into_majors() {
        let records = vec![
            record("p-1", "1AA", None, None),
            record("p-2", "1AA", None, None),
            record("p-3", "1AB", None, None),
            record("p-4", "1A", None, None),
            record("p-5", "1B", None, None),
        ];

        let counts = category_counts(&records, Axis::TechnologyField);
        assert_eq!(counts.get("1AA"), Some(&2));
        assert_eq!(counts.get("1AB"), Some(&1));
        // Major total: its own direct tag plus the rolled-up minors.
        assert_eq!(counts.get("1A"), Some(&4));
        assert_eq!(counts.get("1B"), Some(&1));
    }

    #[test]
    fn category_counts_skip_unclassified_axis2() {
        let records = vec![
            record("p-1", "1A", Some("2BA"), None),
            record("p-2", "1A", None, None),
        ];
        let counts = category_counts(&records, Axis::ImplementationType);
        assert_eq!(counts.get("2BA"), Some(&1));
        assert_eq!(counts.get("2B"), Some(&1));
        assert_eq!(counts.values().sum::<usize>(), 2);
    }

    #[test]
    fn strength_thresholds() {
        assert_eq!(PortfolioStrength::classify(0), PortfolioStrength::Weak);
        assert_eq!(PortfolioStrength::classify(4), PortfolioStrength::Weak);
        assert_eq!(PortfolioStrength::classify(5), PortfolioStrength::Moderate);
        assert_eq!(PortfolioStrength::classify(9), PortfolioStrength::Moderate);
        assert_eq!(PortfolioStrength::classify(10), PortfolioStrength::Strong);
        assert_eq!(PortfolioStrength::classify(40), PortfolioStrength::Strong);
    }

    #[test]
    fn validity_bands() {
        assert_eq!(ValidityBand::of(100), ValidityBand::High);
        assert_eq!(ValidityBand::of(80), ValidityBand::High);
        assert_eq!(ValidityBand::of(79), ValidityBand::Medium);
        assert_eq!(ValidityBand::of(60), ValidityBand::Medium);
        assert_eq!(ValidityBand::of(59), ValidityBand::Low);
        assert_eq!(ValidityBand::of(0), ValidityBand::Low);
    }
}
