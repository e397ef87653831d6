//! Provider traits and result records

use pubstat_core::{Result, StatError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Statistic and p-value of a single test invocation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TestOutcome {
    pub statistic: f64,
    pub p_value: f64,
}

/// Correlation coefficient and two-sided p-value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Correlation {
    pub coefficient: f64,
    pub p_value: f64,
}

/// Alternative hypothesis for rank tests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Alternative {
    #[default]
    TwoSided,
    /// First sample stochastically smaller
    Less,
    /// First sample stochastically greater
    Greater,
}

impl Alternative {
    pub fn as_str(&self) -> &'static str {
        match self {
            Alternative::TwoSided => "two-sided",
            Alternative::Less => "less",
            Alternative::Greater => "greater",
        }
    }
}

impl fmt::Display for Alternative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Alternative {
    type Err = StatError;

    /// An empty string counts as unset and resolves to two-sided
    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "" | "two-sided" => Ok(Alternative::TwoSided),
            "less" => Ok(Alternative::Less),
            "greater" => Ok(Alternative::Greater),
            other => Err(StatError::configuration(
                "alternative",
                format!("expected 'two-sided', 'less' or 'greater', got '{}'", other),
            )),
        }
    }
}

/// Hypothesis-test and density primitives consumed by the engine
pub trait StatsProvider: Send + Sync {
    /// Two-sample t-test, pooled (`equal_var`) or Welch
    fn t_test_ind(&self, a: &[f64], b: &[f64], equal_var: bool) -> Result<TestOutcome>;

    /// Mann-Whitney U test; the statistic is U of the first sample
    fn mann_whitney_u(&self, a: &[f64], b: &[f64], alternative: Alternative) -> Result<TestOutcome>;

    fn shapiro_wilk(&self, x: &[f64]) -> Result<TestOutcome>;

    fn kruskal_wallis(&self, groups: &[&[f64]]) -> Result<TestOutcome>;

    fn bartlett(&self, groups: &[&[f64]]) -> Result<TestOutcome>;

    fn levene(&self, groups: &[&[f64]]) -> Result<TestOutcome>;

    fn pearson(&self, x: &[f64], y: &[f64]) -> Result<Correlation>;

    fn spearman(&self, x: &[f64], y: &[f64]) -> Result<Correlation>;

    /// Gaussian kernel density estimate evaluated at `points`
    fn gaussian_kde(&self, data: &[f64], points: &[f64]) -> Result<Vec<f64>>;

    /// Counts (or densities) over the bins delimited by `edges`
    fn histogram(&self, data: &[f64], edges: &[f64], density: bool) -> Result<Vec<f64>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alternative_parse() {
        assert_eq!("less".parse::<Alternative>().unwrap(), Alternative::Less);
        assert_eq!("greater".parse::<Alternative>().unwrap(), Alternative::Greater);
        assert_eq!("two-sided".parse::<Alternative>().unwrap(), Alternative::TwoSided);
    }

    #[test]
    fn test_alternative_empty_is_two_sided() {
        assert_eq!("".parse::<Alternative>().unwrap(), Alternative::TwoSided);
    }

    #[test]
    fn test_alternative_unknown_is_config_error() {
        let err = "sideways".parse::<Alternative>().unwrap_err();
        assert_eq!(err.code(), pubstat_core::codes::CONFIG_ERROR);
    }

    #[test]
    fn test_alternative_display_roundtrip() {
        for alt in [Alternative::TwoSided, Alternative::Less, Alternative::Greater] {
            assert_eq!(alt.to_string().parse::<Alternative>().unwrap(), alt);
        }
    }
}
