//! pubstat Statistics Provider
//!
//! Hypothesis tests, correlation, kernel density and histogram primitives
//! behind the `StatsProvider` trait. `NativeProvider` implements them in
//! f64 arithmetic; alternative backends only need to implement the trait.

mod helpers;
mod provider;
pub mod distributions;
mod hypothesis;
mod goodness;
mod dispersion;
mod bivariate;
mod density;

pub use provider::{Alternative, Correlation, StatsProvider, TestOutcome};

use pubstat_core::Result;
use tracing::debug;

/// Pure-Rust provider backed by `statrs` distributions
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeProvider;

impl NativeProvider {
    pub fn new() -> Self {
        Self
    }
}

impl StatsProvider for NativeProvider {
    fn t_test_ind(&self, a: &[f64], b: &[f64], equal_var: bool) -> Result<TestOutcome> {
        debug!(test = "t_test_ind", n1 = a.len(), n2 = b.len(), equal_var, "running provider test");
        hypothesis::t_test_ind(a, b, equal_var)
    }

    fn mann_whitney_u(&self, a: &[f64], b: &[f64], alternative: Alternative) -> Result<TestOutcome> {
        debug!(test = "mann_whitney_u", n1 = a.len(), n2 = b.len(), %alternative, "running provider test");
        hypothesis::mann_whitney_u(a, b, alternative)
    }

    fn shapiro_wilk(&self, x: &[f64]) -> Result<TestOutcome> {
        debug!(test = "shapiro_wilk", n = x.len(), "running provider test");
        goodness::shapiro_wilk(x)
    }

    fn kruskal_wallis(&self, groups: &[&[f64]]) -> Result<TestOutcome> {
        debug!(test = "kruskal_wallis", groups = groups.len(), "running provider test");
        hypothesis::kruskal_wallis(groups)
    }

    fn bartlett(&self, groups: &[&[f64]]) -> Result<TestOutcome> {
        debug!(test = "bartlett", groups = groups.len(), "running provider test");
        dispersion::bartlett(groups)
    }

    fn levene(&self, groups: &[&[f64]]) -> Result<TestOutcome> {
        debug!(test = "levene", groups = groups.len(), "running provider test");
        dispersion::levene(groups)
    }

    fn pearson(&self, x: &[f64], y: &[f64]) -> Result<Correlation> {
        debug!(test = "pearson", n = x.len(), "running provider test");
        bivariate::pearson(x, y)
    }

    fn spearman(&self, x: &[f64], y: &[f64]) -> Result<Correlation> {
        debug!(test = "spearman", n = x.len(), "running provider test");
        bivariate::spearman(x, y)
    }

    fn gaussian_kde(&self, data: &[f64], points: &[f64]) -> Result<Vec<f64>> {
        density::gaussian_kde(data, points)
    }

    fn histogram(&self, data: &[f64], edges: &[f64], density: bool) -> Result<Vec<f64>> {
        density::histogram(data, edges, density)
    }
}
