use thiserror::Error;

use crate::record::{DetailStatus, LifecycleStatus};

pub type Result<T> = std::result::Result<T, PatlasError>;

/// Validation failures surfaced by the core.
///
/// All variants are caller errors, not transient conditions: none are
/// retryable, and none are fatal to the process.
#[derive(Debug, Error)]
pub enum PatlasError {
    #[error("unknown category code: {0}")]
    UnknownCategory(String),

    #[error("invalid filter value {value:?} for {key}")]
    InvalidFilterValue { key: String, value: String },

    #[error("patent not found: {0}")]
    PatentNotFound(String),

    #[error("invalid grade: {0:?}")]
    InvalidGrade(String),

    #[error("duplicate patent id: {0}")]
    DuplicateId(String),

    #[error("duplicate category code: {0}")]
    DuplicateCategory(String),

    #[error("minor category {code} has no major {parent} on its axis")]
    UnknownParent { code: String, parent: String },

    #[error("patent {id}: detail status {detail} is inconsistent with lifecycle status {status}")]
    StatusMismatch {
        id: String,
        status: LifecycleStatus,
        detail: DetailStatus,
    },

    #[error("patent {id}: expiry date precedes application date")]
    InvalidDateRange { id: String },

    #[error("patent {id}: validity score {score} is outside 0-100")]
    ScoreOutOfRange { id: String, score: u8 },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
