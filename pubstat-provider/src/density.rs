//! Density estimation and binning

use crate::distributions::standard_normal;
use crate::helpers::{require_finite, require_min_count, variance};
use pubstat_core::{Result, StatError};
use statrs::distribution::Continuous;

// ============ Gaussian KDE ============

/// Gaussian kernel density estimate evaluated at `points`.
///
/// Bandwidth follows Scott's rule: the kernel variance is the sample
/// variance scaled by n^(-2/5).
pub fn gaussian_kde(data: &[f64], points: &[f64]) -> Result<Vec<f64>> {
    require_min_count(data, 2, "gaussian_kde")?;
    require_finite(data, "gaussian_kde")?;

    let n = data.len() as f64;
    let factor = n.powf(-0.2);
    let h = (variance(data) * factor * factor).sqrt();
    if h <= 0.0 {
        return Err(StatError::provider("gaussian_kde", "data has zero variance"));
    }

    let kernel = standard_normal()?;
    Ok(points
        .iter()
        .map(|x| data.iter().map(|xi| kernel.pdf((x - xi) / h)).sum::<f64>() / (n * h))
        .collect())
}

// ============ Histogram ============

/// Counts per bin; bins are half-open `[eᵢ, eᵢ₊₁)` except the last, which
/// also includes its right edge. Values outside the edges are ignored.
///
/// With `density`, each count is divided by the in-range total times the
/// bin width so that the histogram integrates to one.
pub fn histogram(data: &[f64], edges: &[f64], density: bool) -> Result<Vec<f64>> {
    require_finite(data, "histogram")?;
    if edges.len() < 2 {
        return Err(StatError::provider("histogram", "at least two bin edges are required"));
    }
    require_finite(edges, "histogram")?;
    if edges.windows(2).any(|w| w[1] <= w[0]) {
        return Err(StatError::provider("histogram", "bin edges must increase monotonically"));
    }

    let bins = edges.len() - 1;
    let first = edges[0];
    let last = edges[bins];
    let mut counts = vec![0.0; bins];
    for &x in data {
        if x < first || x > last {
            continue;
        }
        let idx = edges.partition_point(|&e| e <= x).saturating_sub(1).min(bins - 1);
        counts[idx] += 1.0;
    }

    if !density {
        return Ok(counts);
    }

    let total: f64 = counts.iter().sum();
    if total == 0.0 {
        return Err(StatError::provider("histogram", "no observations fall within the bin edges"));
    }
    Ok(counts
        .iter()
        .zip(edges.windows(2))
        .map(|(c, w)| c / (total * (w[1] - w[0])))
        .collect())
}
