//! Numeric-to-text rendering
//!
//! Every function is deterministic and locale-independent. Out-of-range
//! or non-finite input fails with a domain error naming the argument;
//! nothing is clamped or substituted.

use crate::engine::confidence_interval_bounds;
use pubstat_core::{Result, Sample, StatError};
use serde::{Deserialize, Serialize};

/// Render a number with precision chosen by magnitude.
///
/// | \|x\|              | rendering                       |
/// |--------------------|---------------------------------|
/// | > 100              | integer, truncated toward zero  |
/// | (10, 100]          | 1 decimal                       |
/// | (0.1, 10]          | 2 decimals                      |
/// | [0.001, 0.1]       | 3 decimals                      |
/// | (0, 0.001)         | up to the first significant digit |
///
/// Zero falls into the last band and is rejected: it has no first
/// significant digit.
pub fn format_number(x: f64) -> Result<String> {
    if !x.is_finite() {
        return Err(StatError::non_finite("x", x));
    }

    let magnitude = x.abs();
    let text = if magnitude > 100.0 {
        format!("{:.0}", x.trunc())
    } else if magnitude > 10.0 {
        format!("{:.1}", x)
    } else if magnitude > 0.1 {
        format!("{:.2}", x)
    } else if magnitude >= 0.001 {
        format!("{:.3}", x)
    } else {
        if x == 0.0 {
            return Err(StatError::domain(
                "x",
                "zero has no significant digit to show; guard before formatting",
            ));
        }
        let places = -magnitude.log10().floor();
        format!("{:.*}", places as usize, x)
    };

    Ok(text)
}

/// Round to the nearest integer, ties to even, and render without decimals
pub fn format_integer(x: f64) -> Result<String> {
    if !x.is_finite() {
        return Err(StatError::non_finite("x", x));
    }
    // + 0.0 folds -0 into 0
    Ok(format!("{:.0}", x.round_ties_even() + 0.0))
}

/// Three decimals with the leading zero elided: 0.041 → ".041"
pub fn format_p_value(p: f64) -> Result<String> {
    check_probability(p)?;
    let text = format!("{:.3}", p);
    Ok(match text.strip_prefix('0') {
        Some(rest) => rest.to_string(),
        None => text,
    })
}

/// "p<.001" below the threshold, otherwise "p=" and the three-decimal value
pub fn parse_p_value(p: f64) -> Result<String> {
    check_probability(p)?;
    if p < 0.001 {
        Ok("p<.001".to_string())
    } else {
        Ok(format!("p={}", format_p_value(p)?))
    }
}

/// `parse_p_value` inside a math span
pub fn print_p_value(p: f64) -> Result<String> {
    Ok(format!("${}$", parse_p_value(p)?))
}

fn check_probability(p: f64) -> Result<()> {
    if !p.is_finite() || !(0.0..=1.0).contains(&p) {
        return Err(StatError::probability("p", p));
    }
    Ok(())
}

// ============ Significance ============

/// Significance tier, ordered from most to least significant
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignificanceTier {
    /// p < .001 / n
    HighlySignificant,
    /// p < .01 / n
    VerySignificant,
    /// p < .05 / n
    Significant,
    NotSignificant,
}

impl SignificanceTier {
    pub fn stars(&self) -> &'static str {
        match self {
            Self::HighlySignificant => "***",
            Self::VerySignificant => "**",
            Self::Significant => "*",
            Self::NotSignificant => "ns",
        }
    }

    /// LaTeX superscript form for annotating a value inside a math span
    pub fn superscript(&self) -> &'static str {
        match self {
            Self::HighlySignificant => "^{***}",
            Self::VerySignificant => "^{**}",
            Self::Significant => "^*",
            Self::NotSignificant => "ns",
        }
    }
}

/// Bonferroni-adjusted tier: each threshold is divided by `n_comparisons`
pub fn significance_tier(p: f64, n_comparisons: u32) -> Result<SignificanceTier> {
    check_probability(p)?;
    if n_comparisons == 0 {
        return Err(StatError::domain("n_comparisons", "must be at least 1"));
    }

    let n = n_comparisons as f64;
    let tier = if p < 0.001 / n {
        SignificanceTier::HighlySignificant
    } else if p < 0.01 / n {
        SignificanceTier::VerySignificant
    } else if p < 0.05 / n {
        SignificanceTier::Significant
    } else {
        SignificanceTier::NotSignificant
    };
    Ok(tier)
}

pub fn significance_stars(p: f64, n_comparisons: u32) -> Result<&'static str> {
    Ok(significance_tier(p, n_comparisons)?.stars())
}

/// Stars for a single comparison
pub fn significance_stars_default(p: f64) -> Result<&'static str> {
    significance_stars(p, 1)
}

// ============ Descriptive Statistics ============

/// Options for `print_ci`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CiOptions {
    /// Confidence percentage in [50, 100]
    pub percent: f64,
    /// Omit the "95% CI" label and render only the interval
    pub interval_only: bool,
}

impl Default for CiOptions {
    fn default() -> Self {
        Self {
            percent: 95.0,
            interval_only: false,
        }
    }
}

pub fn print_mean(sample: &Sample) -> Result<String> {
    Ok(format!("$M={}$", format_number(sample.mean())?))
}

pub fn print_median(sample: &Sample) -> Result<String> {
    Ok(format!("$Mdn={}$", format_number(sample.median())?))
}

/// Sample standard deviation (n - 1 denominator)
pub fn print_std(sample: &Sample) -> Result<String> {
    Ok(format!("$SD={}$", format_number(sample.std_dev()?)?))
}

pub fn print_mean_and_std(sample: &Sample) -> Result<String> {
    Ok(format!("{}, {}", print_mean(sample)?, print_std(sample)?))
}

/// Quantile interval covering `options.percent` of the sample
pub fn print_ci(sample: &Sample, options: &CiOptions) -> Result<String> {
    let (left, right) = confidence_interval_bounds(options.percent)?;
    let interval = format!(
        "$[{}, {}]$",
        format_number(sample.quantile(left)?)?,
        format_number(sample.quantile(right)?)?
    );
    if options.interval_only {
        Ok(interval)
    } else {
        Ok(format!("{}% CI {}", options.percent, interval))
    }
}

pub fn print_iqr(sample: &Sample) -> Result<String> {
    Ok(format!(
        "IQR $={} - {}$",
        format_number(sample.quantile(0.25)?)?,
        format_number(sample.quantile(0.75)?)?
    ))
}
