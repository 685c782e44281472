//! Tabular input for batch tax computation.

mod loader;

pub use loader::{BatchLoadError, BatchRecordLoader};
