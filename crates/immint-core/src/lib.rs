//! immint-core: DSpace → DataCite metadata transforms
//!
//! This library provides pure Rust implementations of:
//! - Language-suffixed field resolution over DSpace export rows
//! - The DSpace export → DataCite import mapping
//! - Resource type classification with a user-editable side file
//! - DOI result files and the merge back into DSpace import files
//! - Per-prefix statistics over past submission runs
//!
//! Network submission lives in the companion `immint-datacite` crate; this
//! crate stays free of HTTP so the transforms are trivially testable.

pub mod error;
pub mod mapper;
pub mod merge;
pub mod names;
pub mod record;
pub mod report;
pub mod stats;
pub mod typemap;

// Re-export main types for convenience
pub use error::{Error, Result};
pub use mapper::{MapReport, MapperConfig, NormalizedRecord};
pub use merge::{MergeConfig, MergeReport, MergeSummary};
pub use record::SourceRecord;
pub use report::DoiResult;
pub use stats::PrefixCount;
pub use typemap::TypeMapping;
