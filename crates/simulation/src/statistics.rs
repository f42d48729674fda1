//! Summary statistics over trial samples.

use serde::{Deserialize, Serialize};

/// Number of histogram buckets.
pub const HISTOGRAM_BUCKETS: usize = 20;

/// Fixed-size distribution of trial PNLs, ordered from lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Histogram(pub [u64; HISTOGRAM_BUCKETS]);

impl Histogram {
    /// Linear binning of `samples` between their minimum and maximum.
    ///
    /// When every sample is equal the range defaults to 1 and all samples
    /// land in the first bucket. The maximum is counted in the last
    /// bucket, so the counts always sum to `samples.len()`.
    #[must_use]
    pub fn from_samples(samples: &[f64], min: f64, max: f64) -> Self {
        let spread = max - min;
        let range = if spread == 0.0 { 1.0 } else { spread };
        let mut counts = [0u64; HISTOGRAM_BUCKETS];
        for sample in samples {
            let bin = ((sample - min) / range * HISTOGRAM_BUCKETS as f64).floor();
            let index = (bin.max(0.0) as usize).min(HISTOGRAM_BUCKETS - 1);
            counts[index] += 1;
        }
        Self(counts)
    }

    /// Bucket counts.
    #[must_use]
    pub fn counts(&self) -> &[u64; HISTOGRAM_BUCKETS] {
        &self.0
    }

    /// Sum of all bucket counts.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.0.iter().sum()
    }
}

/// Sorts samples ascending; NaNs sort last.
pub fn sort_samples(samples: &mut [f64]) {
    samples.sort_by(f64::total_cmp);
}

/// Value at `sorted[floor(len * quantile)]`, index clamped to the last sample.
pub fn percentile_of_sorted(sorted: &[f64], quantile: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let index = (sorted.len() as f64 * quantile).floor() as usize;
    Some(sorted[index.min(sorted.len() - 1)])
}

/// Arithmetic mean; zero for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
