pub mod code;
pub mod error;
pub mod grade;
pub mod record;
pub mod taxonomy;

pub use error::{PatlasError, Result};
pub use grade::Grade;
pub use record::{DetailStatus, LifecycleStatus, PatentRecord};
pub use taxonomy::{Axis, Category, CategoryDef, Taxonomy};
