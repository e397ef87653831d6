//! Shapiro-Wilk test for normality
//!
//! Coefficients and p-value follow Royston's algorithm AS R94 (1995),
//! valid for 3 ≤ n ≤ 5000.

use crate::distributions::standard_normal;
use crate::helpers::{clamp_p, require_finite, require_min_count};
use crate::provider::TestOutcome;
use pubstat_core::{Result, StatError, sorted};
use statrs::distribution::{ContinuousCDF, Normal};

const SW_MAX_N: usize = 5000;

// Royston polynomial coefficients
const C1: [f64; 6] = [0.0, 0.221157, -0.147981, -2.07119, 4.434685, -2.706056];
const C2: [f64; 6] = [0.0, 0.042981, -0.293762, -1.752461, 5.682633, -3.582633];
const C3: [f64; 4] = [0.544, -0.39978, 0.025054, -6.714e-4];
const C4: [f64; 4] = [1.3822, -0.77857, 0.062767, -0.0020322];
const C5: [f64; 4] = [-1.5861, -0.31082, -0.083751, 0.0038915];
const C6: [f64; 3] = [-0.4803, -0.082676, 0.0030302];
const G: [f64; 2] = [-2.273, 0.459];

pub fn shapiro_wilk(data: &[f64]) -> Result<TestOutcome> {
    require_min_count(data, 3, "shapiro_wilk")?;
    require_finite(data, "shapiro_wilk")?;
    let n = data.len();
    if n > SW_MAX_N {
        return Err(StatError::provider(
            "shapiro_wilk",
            format!("limited to n ≤ {}, got {}", SW_MAX_N, n),
        ));
    }

    let x = sorted(data);
    if x[n - 1] - x[0] <= 0.0 {
        return Err(StatError::provider("shapiro_wilk", "all values are identical"));
    }

    let normal = standard_normal()?;
    let a = coefficients(n, &normal)?;

    let mut b = 0.0;
    for (i, ai) in a.iter().enumerate() {
        b += ai * (x[n - 1 - i] - x[i]);
    }
    let m = x.iter().sum::<f64>() / n as f64;
    let ss: f64 = x.iter().map(|v| (v - m) * (v - m)).sum();
    let w = (b * b / ss).min(1.0);

    Ok(TestOutcome {
        statistic: w,
        p_value: clamp_p(p_value(w, n, &normal)),
    })
}

/// Antisymmetric weights for the upper half of the order statistics
fn coefficients(n: usize, normal: &Normal) -> Result<Vec<f64>> {
    let nn2 = n / 2;
    if n == 3 {
        return Ok(vec![std::f64::consts::FRAC_1_SQRT_2]);
    }

    // Blom's approximation of expected normal order statistics (lower half)
    let an25 = n as f64 + 0.25;
    let m: Vec<f64> = (1..=nn2)
        .map(|i| normal.inverse_cdf((i as f64 - 0.375) / an25))
        .collect();
    let summ2 = 2.0 * m.iter().map(|v| v * v).sum::<f64>();
    let ssumm2 = summ2.sqrt();
    let rsn = 1.0 / (n as f64).sqrt();

    let a1 = poly(&C1, rsn) - m[0] / ssumm2;
    let mut a = vec![0.0; nn2];

    let (first_free, fac_sq, denom) = if n > 5 {
        let a2 = -m[1] / ssumm2 + poly(&C2, rsn);
        a[1] = a2;
        (
            2,
            summ2 - 2.0 * m[0] * m[0] - 2.0 * m[1] * m[1],
            1.0 - 2.0 * a1 * a1 - 2.0 * a2 * a2,
        )
    } else {
        (1, summ2 - 2.0 * m[0] * m[0], 1.0 - 2.0 * a1 * a1)
    };
    if fac_sq <= 0.0 || denom <= 0.0 {
        return Err(StatError::provider("shapiro_wilk", "coefficient normalisation failed"));
    }
    let fac = (fac_sq / denom).sqrt();

    a[0] = a1;
    for i in first_free..nn2 {
        a[i] = -m[i] / fac;
    }
    Ok(a)
}

fn p_value(w: f64, n: usize, normal: &Normal) -> f64 {
    let nf = n as f64;

    if n == 3 {
        // exact: 6/π (asin √W - π/3)
        let p = 6.0 / std::f64::consts::PI * (w.sqrt().asin() - std::f64::consts::FRAC_PI_3);
        return p.max(0.0);
    }

    let w1 = 1.0 - w;
    if w1 <= 0.0 {
        return 1.0;
    }
    let y = w1.ln();

    let (y, m, s) = if n <= 11 {
        let gamma = poly(&G, nf);
        if y >= gamma {
            return 0.0;
        }
        (-(gamma - y).ln(), poly(&C3, nf), poly(&C4, nf).exp())
    } else {
        let ln_n = nf.ln();
        (y, poly(&C5, ln_n), poly(&C6, ln_n).exp())
    };

    normal.sf((y - m) / s)
}

/// Evaluate polynomial at x: c[0] + c[1]*x + c[2]*x^2 + ...
fn poly(coeffs: &[f64], x: f64) -> f64 {
    coeffs.iter().rev().fold(0.0, |acc, c| acc * x + c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symmetric_data_looks_normal() {
        let data = [-1.5, -1.0, -0.5, 0.0, 0.5, 1.0, 1.5];
        let r = shapiro_wilk(&data).unwrap();
        assert!(r.statistic > 0.9 && r.statistic <= 1.0);
        assert!(r.p_value > 0.05);
    }

    #[test]
    fn test_skewed_data_rejects_normality() {
        let data = [1.0, 1.0, 1.1, 1.2, 1.2, 1.3, 1.4, 2.0, 5.0, 12.0, 30.0, 80.0];
        let r = shapiro_wilk(&data).unwrap();
        assert!(r.p_value < 0.01);
    }

    #[test]
    fn test_n3_equally_spaced_is_one() {
        let r = shapiro_wilk(&[1.0, 2.0, 3.0]).unwrap();
        assert!((r.statistic - 1.0).abs() < 1e-12);
        assert!((r.p_value - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_too_few_values() {
        let err = shapiro_wilk(&[1.0, 2.0]).unwrap_err();
        assert_eq!(err.code(), pubstat_core::codes::PROVIDER_ERROR);
    }

    #[test]
    fn test_identical_values() {
        assert!(shapiro_wilk(&[2.0, 2.0, 2.0, 2.0]).is_err());
    }

    #[test]
    fn test_poly() {
        assert_eq!(poly(&[1.0, 2.0, 3.0], 2.0), 17.0);
    }
}
