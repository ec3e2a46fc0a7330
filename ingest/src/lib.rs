pub mod results;
pub mod stats;

#[cfg(test)]
mod results_test;

pub use results::{all_stats, IngestError, Metric, ResultSet, Role, RoleStats, SizeRecord};
pub use stats::Aggregate;
