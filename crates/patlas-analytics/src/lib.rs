pub mod aggregate;
pub mod filter;

pub use aggregate::{
    GradeTally, MatrixKey, PortfolioMatrix, PortfolioStrength, StatusTally, ValidityBand,
    category_counts, grade_tally, portfolio_matrix, status_tally,
};
pub use filter::{FilterCriteria, filter};
