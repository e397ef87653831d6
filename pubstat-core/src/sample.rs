//! Immutable numeric samples
//!
//! A `Sample` is validated once at construction (non-empty, all finite)
//! and only read afterwards.

use crate::{Result, StatError};
use serde::{Deserialize, Serialize};

/// Ordered, non-empty collection of finite observations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct Sample {
    values: Vec<f64>,
}

impl Sample {
    /// Create a sample, rejecting empty input and NaN/infinite values
    pub fn new(values: impl Into<Vec<f64>>) -> Result<Self> {
        let values = values.into();
        if values.is_empty() {
            return Err(StatError::domain("sample", "sample must not be empty"));
        }
        if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
            return Err(StatError::non_finite("sample", *bad));
        }
        Ok(Self { values })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false; kept for API symmetry with slices
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }

    pub fn mean(&self) -> f64 {
        self.sum() / self.len() as f64
    }

    /// Sample variance (n - 1 denominator)
    pub fn variance(&self) -> Result<f64> {
        variance_impl(&self.values, true)
    }

    /// Population variance (n denominator)
    pub fn variance_p(&self) -> f64 {
        // n >= 1 is guaranteed by construction
        variance_impl(&self.values, false).unwrap_or(0.0)
    }

    /// Sample standard deviation (n - 1 denominator)
    pub fn std_dev(&self) -> Result<f64> {
        Ok(self.variance()?.sqrt())
    }

    pub fn median(&self) -> f64 {
        quantile_sorted(&self.sorted(), 0.5)
    }

    /// Quantile with linear interpolation between order statistics
    pub fn quantile(&self, q: f64) -> Result<f64> {
        if !q.is_finite() || !(0.0..=1.0).contains(&q) {
            return Err(StatError::probability("q", q));
        }
        Ok(quantile_sorted(&self.sorted(), q))
    }

    /// Values in ascending order (returns new vector)
    pub fn sorted(&self) -> Vec<f64> {
        sorted(&self.values)
    }
}

impl TryFrom<Vec<f64>> for Sample {
    type Error = StatError;

    fn try_from(values: Vec<f64>) -> Result<Self> {
        Sample::new(values)
    }
}

impl From<Sample> for Vec<f64> {
    fn from(sample: Sample) -> Self {
        sample.values
    }
}

impl AsRef<[f64]> for Sample {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}

/// Variance (sample or population)
pub fn variance_impl(values: &[f64], sample: bool) -> Result<f64> {
    let n = values.len();
    if n == 0 {
        return Err(StatError::domain("sample", "cannot calculate variance of empty sample"));
    }
    if sample && n < 2 {
        return Err(StatError::too_small("sample", 2, n));
    }

    let m = values.iter().sum::<f64>() / n as f64;
    let ss: f64 = values.iter().map(|x| (x - m) * (x - m)).sum();
    let divisor = if sample { (n - 1) as f64 } else { n as f64 };
    Ok(ss / divisor)
}

/// Sort values (returns new vector)
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

/// Quantile of already-sorted values; rank = q * (n - 1)
fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }

    let rank = q * (n - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if hi >= n {
        return sorted[n - 1];
    }
    if lo == hi {
        return sorted[lo];
    }

    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Ranks (1-indexed, average for ties) in input order
pub fn ranks(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut indexed: Vec<(f64, usize)> = values.iter().copied().enumerate().map(|(i, v)| (v, i)).collect();
    indexed.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut result = vec![0.0; n];
    let mut i = 0;
    while i < n {
        let mut j = i + 1;
        while j < n && indexed[j].0 == indexed[i].0 {
            j += 1;
        }
        // Positions i..j are tied: average of ranks i+1..=j
        let avg_rank = (i + 1 + j) as f64 / 2.0;
        for item in &indexed[i..j] {
            result[item.1] = avg_rank;
        }
        i = j;
    }

    result
}
