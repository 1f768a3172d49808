//! Free-text extractors applied to canonical table cells.

pub mod objective;
pub mod performance_target;

pub use objective::extract_objective;
pub use performance_target::parse_performance_target;
