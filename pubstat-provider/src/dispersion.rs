//! Homogeneity-of-variance tests: Bartlett, Levene (Brown-Forsythe)

use crate::distributions::{chi_sf, f_sf};
use crate::helpers::{clamp_p, mean, require_groups, variance};
use crate::provider::TestOutcome;
use pubstat_core::{Result, Sample, StatError};

// ============ Bartlett ============

/// Bartlett's test; T ~ χ²(k-1) under equal variances.
pub fn bartlett(groups: &[&[f64]]) -> Result<TestOutcome> {
    require_groups(groups, 2, "bartlett")?;

    let k = groups.len() as f64;
    let sizes: Vec<f64> = groups.iter().map(|g| g.len() as f64).collect();
    let vars: Vec<f64> = groups.iter().map(|g| variance(g)).collect();
    if vars.iter().any(|v| *v <= 0.0) {
        return Err(StatError::provider("bartlett", "every group needs non-zero variance"));
    }

    let n_total: f64 = sizes.iter().sum();
    let nk = n_total - k;
    let pooled = sizes.iter().zip(&vars).map(|(n, v)| (n - 1.0) * v).sum::<f64>() / nk;

    // (N-k) ln s²ₚ - Σ(nᵢ-1) ln s²ᵢ
    let num = nk * pooled.ln()
        - sizes.iter().zip(&vars).map(|(n, v)| (n - 1.0) * v.ln()).sum::<f64>();

    let sum_recip: f64 = sizes.iter().map(|n| 1.0 / (n - 1.0)).sum();
    let c = 1.0 + (sum_recip - 1.0 / nk) / (3.0 * (k - 1.0));

    let statistic = num / c;
    Ok(TestOutcome {
        statistic,
        p_value: clamp_p(chi_sf(statistic, k - 1.0)?),
    })
}

// ============ Levene ============

/// Levene's test centred on group medians; W ~ F(k-1, N-k).
pub fn levene(groups: &[&[f64]]) -> Result<TestOutcome> {
    require_groups(groups, 2, "levene")?;

    // zᵢⱼ = |xᵢⱼ - median(groupᵢ)|
    let mut z_groups = Vec::with_capacity(groups.len());
    for g in groups {
        let median = Sample::new(g.to_vec())?.median();
        z_groups.push(g.iter().map(|x| (x - median).abs()).collect::<Vec<f64>>());
    }

    let k = z_groups.len() as f64;
    let n_total: f64 = z_groups.iter().map(|z| z.len() as f64).sum();
    let grand_mean = z_groups.iter().flatten().sum::<f64>() / n_total;

    let mut between = 0.0;
    let mut within = 0.0;
    for z in &z_groups {
        let zm = mean(z);
        between += z.len() as f64 * (zm - grand_mean).powi(2);
        within += z.iter().map(|v| (v - zm).powi(2)).sum::<f64>();
    }
    if within <= 0.0 {
        return Err(StatError::provider(
            "levene",
            "absolute deviations are constant within every group",
        ));
    }

    let statistic = (n_total - k) / (k - 1.0) * between / within;
    Ok(TestOutcome {
        statistic,
        p_value: clamp_p(f_sf(statistic, k - 1.0, n_total - k)?),
    })
}
