//! Location tests: two-sample t-test, Mann-Whitney U, Kruskal-Wallis

use crate::distributions::{chi_sf, standard_normal, t_two_sided};
use crate::helpers::{clamp_p, mean, require_finite, require_groups, require_min_count, tie_term, variance};
use crate::provider::{Alternative, TestOutcome};
use pubstat_core::{Result, StatError, ranks, sorted};
use statrs::distribution::ContinuousCDF;

// ============ Two-Sample T-Test ============

/// Independent two-sample t-test with a two-sided p-value.
///
/// With `equal_var` the pooled variance and n₁+n₂-2 degrees of freedom are
/// used; otherwise Welch's statistic with Welch-Satterthwaite df.
pub fn t_test_ind(a: &[f64], b: &[f64], equal_var: bool) -> Result<TestOutcome> {
    require_min_count(a, 2, "t_test_ind")?;
    require_min_count(b, 2, "t_test_ind")?;
    require_finite(a, "t_test_ind")?;
    require_finite(b, "t_test_ind")?;

    let n1 = a.len() as f64;
    let n2 = b.len() as f64;
    let var1 = variance(a);
    let var2 = variance(b);

    let (se_sq, df) = if equal_var {
        let df = n1 + n2 - 2.0;
        let pooled = ((n1 - 1.0) * var1 + (n2 - 1.0) * var2) / df;
        (pooled * (1.0 / n1 + 1.0 / n2), df)
    } else {
        let v1 = var1 / n1;
        let v2 = var2 / n2;
        let df = (v1 + v2).powi(2) / (v1 * v1 / (n1 - 1.0) + v2 * v2 / (n2 - 1.0));
        (v1 + v2, df)
    };

    if se_sq <= 0.0 {
        return Err(StatError::provider(
            "t_test_ind",
            "both samples have zero variance",
        ));
    }

    let t = (mean(a) - mean(b)) / se_sq.sqrt();
    Ok(TestOutcome {
        statistic: t,
        p_value: clamp_p(t_two_sided(t, df)?),
    })
}

// ============ Mann-Whitney U ============

/// Largest size at which both samples still qualify for the exact null
/// distribution (only one of them needs to be this small).
const MWU_EXACT_MAX: usize = 8;

/// Mann-Whitney U test.
///
/// The statistic is U₁ = R₁ - n₁(n₁+1)/2 for the first sample. Without
/// ties, and unless both samples exceed eight observations, the p-value
/// comes from the exact null distribution; otherwise from the normal
/// approximation with tie and continuity correction.
pub fn mann_whitney_u(a: &[f64], b: &[f64], alternative: Alternative) -> Result<TestOutcome> {
    require_min_count(a, 1, "mann_whitney_u")?;
    require_min_count(b, 1, "mann_whitney_u")?;
    require_finite(a, "mann_whitney_u")?;
    require_finite(b, "mann_whitney_u")?;

    let n1 = a.len();
    let n2 = b.len();

    let combined: Vec<f64> = a.iter().chain(b.iter()).copied().collect();
    let r = ranks(&combined);
    let r1: f64 = r[..n1].iter().sum();

    let n1f = n1 as f64;
    let n2f = n2 as f64;
    let u1 = r1 - n1f * (n1f + 1.0) / 2.0;
    let u2 = n1f * n2f - u1;

    let ties = tie_term(&sorted(&combined));
    let exact = ties == 0.0 && (n1 <= MWU_EXACT_MAX || n2 <= MWU_EXACT_MAX);

    let u = match alternative {
        Alternative::Greater => u1,
        Alternative::Less => u2,
        Alternative::TwoSided => u1.max(u2),
    };

    let p = if exact {
        let dist = mwu_exact_distribution(n1.min(n2), n1.max(n2));
        // P(U >= u); u is integral without ties
        let start = u.round() as usize;
        dist[start.min(dist.len())..].iter().sum::<f64>()
    } else {
        let n = n1f + n2f;
        let mu = n1f * n2f / 2.0;
        let s = (n1f * n2f / 12.0 * ((n + 1.0) - ties / (n * (n - 1.0)))).sqrt();
        if s <= 0.0 {
            return Err(StatError::provider("mann_whitney_u", "all observations are identical"));
        }
        standard_normal()?.sf((u - mu - 0.5) / s)
    };

    let p = match alternative {
        Alternative::TwoSided => 2.0 * p,
        _ => p,
    };

    Ok(TestOutcome {
        statistic: u1,
        p_value: clamp_p(p),
    })
}

/// Null distribution of U over 0..=n1*n2.
///
/// p(i, j)[k] = i/(i+j) · p(i-1, j)[k-j] + j/(i+j) · p(i, j-1)[k]: the
/// largest observation belongs to the first sample (beating all j of the
/// second) or to the second. Rows are rolled over j so memory stays
/// proportional to n1² · n2; the distribution is symmetric in (n1, n2),
/// so callers pass the smaller size first.
fn mwu_exact_distribution(n1: usize, n2: usize) -> Vec<f64> {
    // rows[i] holds p(i, j) for the current j
    let mut rows: Vec<Vec<f64>> = vec![vec![1.0]; n1 + 1];
    for j in 1..=n2 {
        for i in 1..=n1 {
            let total = (i + j) as f64;
            let mut next = vec![0.0; i * j + 1];
            for (k, p) in rows[i].iter().enumerate() {
                next[k] += p * j as f64 / total;
            }
            for (k, p) in rows[i - 1].iter().enumerate() {
                next[k + j] += p * i as f64 / total;
            }
            rows[i] = next;
        }
    }
    rows.swap_remove(n1)
}

// ============ Kruskal-Wallis ============

/// Kruskal-Wallis H test with tie correction; H ~ χ²(k-1).
pub fn kruskal_wallis(groups: &[&[f64]]) -> Result<TestOutcome> {
    require_groups(groups, 1, "kruskal_wallis")?;

    let combined: Vec<f64> = groups.iter().flat_map(|g| g.iter().copied()).collect();
    let n = combined.len() as f64;
    let r = ranks(&combined);

    let mut h = 0.0;
    let mut offset = 0;
    for g in groups {
        let rank_sum: f64 = r[offset..offset + g.len()].iter().sum();
        h += rank_sum * rank_sum / g.len() as f64;
        offset += g.len();
    }
    h = 12.0 / (n * (n + 1.0)) * h - 3.0 * (n + 1.0);

    let correction = 1.0 - tie_term(&sorted(&combined)) / (n * n * n - n);
    if correction <= 0.0 {
        return Err(StatError::provider("kruskal_wallis", "all numbers are identical"));
    }
    h /= correction;

    let df = (groups.len() - 1) as f64;
    Ok(TestOutcome {
        statistic: h,
        p_value: clamp_p(chi_sf(h, df)?),
    })
}
