//! Storage layer: JSON dataset snapshots, cluster lookup, report list queries.

mod error;
pub use error::StoreError;

pub mod batch;
pub mod dataset;
pub mod query;
pub mod store;

pub use dataset::Dataset;
pub use query::{DEFAULT_PAGE_SIZE, ReportPage, ReportQuery, SortOrder, hazard_types};
pub use store::{ReportSource, ReportStore};
