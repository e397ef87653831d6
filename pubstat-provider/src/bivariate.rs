//! Correlation: Pearson, Spearman

use crate::distributions::correlation_p;
use crate::helpers::{clamp_p, mean, require_min_count, require_paired};
use crate::provider::Correlation;
use pubstat_core::{Result, StatError, ranks};

// ============ Correlation (Pearson) ============

/// Pearson's r with a two-sided p-value from Student's t on n-2 df.
pub fn pearson(x: &[f64], y: &[f64]) -> Result<Correlation> {
    require_paired(x, y, "pearson")?;
    require_min_count(x, 2, "pearson")?;
    correlation_impl(x, y, "pearson")
}

// ============ Spearman Rank Correlation ============

/// Spearman's ρ: Pearson's r on average ranks.
pub fn spearman(x: &[f64], y: &[f64]) -> Result<Correlation> {
    require_paired(x, y, "spearman")?;
    require_min_count(x, 2, "spearman")?;
    correlation_impl(&ranks(x), &ranks(y), "spearman")
}

fn correlation_impl(x: &[f64], y: &[f64], test: &str) -> Result<Correlation> {
    let n = x.len();
    let mx = mean(x);
    let my = mean(y);

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (xi, yi) in x.iter().zip(y) {
        sxy += (xi - mx) * (yi - my);
        sxx += (xi - mx) * (xi - mx);
        syy += (yi - my) * (yi - my);
    }
    if sxx <= 0.0 || syy <= 0.0 {
        return Err(StatError::provider(test, "an input is constant; correlation is undefined"));
    }

    let r = (sxy / (sxx.sqrt() * syy.sqrt())).clamp(-1.0, 1.0);

    let p_value = if n == 2 {
        1.0
    } else {
        let df = (n - 2) as f64;
        correlation_p(r, df)?
    };

    Ok(Correlation {
        coefficient: r,
        p_value: clamp_p(p_value),
    })
}
