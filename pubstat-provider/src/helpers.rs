//! Helper functions for provider tests
//!
//! Common utilities for validating inputs and shaping outputs.

use pubstat_core::{Result, StatError};

/// Require minimum count
pub fn require_min_count(values: &[f64], min: usize, test: &str) -> Result<()> {
    if values.len() < min {
        return Err(StatError::provider(
            test,
            format!("requires at least {} values, got {}", min, values.len()),
        ));
    }
    Ok(())
}

/// Require finite input
pub fn require_finite(values: &[f64], test: &str) -> Result<()> {
    if values.iter().any(|v| !v.is_finite()) {
        return Err(StatError::provider(test, "input contains NaN or infinite values"));
    }
    Ok(())
}

/// Require at least two groups, each with at least `min_size` finite values
pub fn require_groups(groups: &[&[f64]], min_size: usize, test: &str) -> Result<()> {
    if groups.len() < 2 {
        return Err(StatError::provider(
            test,
            format!("requires at least 2 groups, got {}", groups.len()),
        ));
    }
    for group in groups {
        require_min_count(group, min_size, test)?;
        require_finite(group, test)?;
    }
    Ok(())
}

/// Require two equal-length paired series
pub fn require_paired(x: &[f64], y: &[f64], test: &str) -> Result<()> {
    if x.len() != y.len() {
        return Err(StatError::provider(
            test,
            format!("series must have equal length: {} vs {}", x.len(), y.len()),
        ));
    }
    require_finite(x, test)?;
    require_finite(y, test)
}

/// Squash floating-point noise outside [0, 1]
pub fn clamp_p(p: f64) -> f64 {
    p.clamp(0.0, 1.0)
}

pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample variance; callers guarantee at least two values
pub fn variance(values: &[f64]) -> f64 {
    let m = mean(values);
    values.iter().map(|x| (x - m) * (x - m)).sum::<f64>() / (values.len() - 1) as f64
}

/// Σ (t³ - t) over tie groups of sorted values
pub fn tie_term(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    let mut term = 0.0;
    let mut i = 0;
    while i < n {
        let mut j = i + 1;
        while j < n && sorted[j] == sorted[i] {
            j += 1;
        }
        let t = (j - i) as f64;
        term += t * t * t - t;
        i = j;
    }
    term
}
