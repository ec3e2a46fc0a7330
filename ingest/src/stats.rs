use serde::{Deserialize, Serialize};

/// mean/std pair of a single metric over repeated benchmark runs
#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Default)]
pub struct Aggregate {
    pub mean: f64,
    pub std: f64,
}

impl Aggregate {
    pub fn new(mean: f64, std: f64) -> Self {
        Self { mean, std }
    }

    /// arithmetic mean and population standard deviation (divisor n)
    /// returns `None` for an empty sample set
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let count = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / count;
        let variance = samples
            .iter()
            .map(|sample| (sample - mean).powi(2))
            .sum::<f64>()
            / count;

        Some(Self {
            mean,
            std: variance.sqrt(),
        })
    }

    /// divide both values by a unit divisor, e.g. bytes -> kilobytes
    pub fn scaled(self, divisor: f64) -> Self {
        Self {
            mean: self.mean / divisor,
            std: self.std / divisor,
        }
    }
}
