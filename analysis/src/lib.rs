pub mod combine;
pub mod format;
pub mod normalize;

#[cfg(test)]
mod normalize_test;

pub use combine::{combine, combine_in, Unit, GB, KB, MB};
pub use normalize::{ratio, AnalysisError, Baselines};
