//! Plot data producers
//!
//! These compute the quantities a plotting surface draws (quantile
//! whiskers, bin edges, bar heights, density curves) without drawing
//! anything themselves.

use crate::engine::{confidence_interval_bounds, StatEngine};
use pubstat_core::{Result, Sample, StatError};
use pubstat_provider::StatsProvider;
use serde::{Deserialize, Serialize};

// ============ Boxplot ============

/// Central marker of a boxplot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dash {
    #[default]
    Mean,
    Median,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxplotOptions {
    /// Whisker coverage in [50, 100]
    pub percent: f64,
    pub show_box: bool,
    pub show_extremes: bool,
    pub dash: Dash,
}

impl Default for BoxplotOptions {
    fn default() -> Self {
        Self {
            percent: 95.0,
            show_box: true,
            show_extremes: true,
            dash: Dash::Mean,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boxplot {
    pub dash: f64,
    /// First and third quartile, when the box is shown
    pub quartiles: Option<(f64, f64)>,
    /// Quantiles at the interval bounds
    pub whiskers: (f64, f64),
    /// Observations strictly below the lower whisker, in input order
    pub lower_extremes: Vec<f64>,
    /// Observations strictly above the upper whisker, in input order
    pub upper_extremes: Vec<f64>,
}

pub fn boxplot(sample: &Sample, options: &BoxplotOptions) -> Result<Boxplot> {
    let (left, right) = confidence_interval_bounds(options.percent)?;
    let whiskers = (sample.quantile(left)?, sample.quantile(right)?);

    let dash = match options.dash {
        Dash::Mean => sample.mean(),
        Dash::Median => sample.median(),
    };

    let quartiles = if options.show_box {
        Some((sample.quantile(0.25)?, sample.quantile(0.75)?))
    } else {
        None
    };

    let (lower_extremes, upper_extremes) = if options.show_extremes {
        let values = sample.values();
        (
            values.iter().copied().filter(|x| *x < whiskers.0).collect(),
            values.iter().copied().filter(|x| *x > whiskers.1).collect(),
        )
    } else {
        (Vec::new(), Vec::new())
    };

    Ok(Boxplot {
        dash,
        quartiles,
        whiskers,
        lower_extremes,
        upper_extremes,
    })
}

// ============ Histograms ============

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarKdeOptions {
    /// Histogram bin width
    pub step: f64,
    /// Spacing of the KDE evaluation grid
    pub kde_step: f64,
}

impl Default for BarKdeOptions {
    fn default() -> Self {
        Self {
            step: 0.1,
            kde_step: 0.01,
        }
    }
}

/// Density histogram with a kernel density curve over the same range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarKde {
    pub edges: Vec<f64>,
    /// One density per bin, `edges.len() - 1` entries
    pub heights: Vec<f64>,
    pub kde_points: Vec<f64>,
    pub kde_density: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogBarOptions {
    pub num_bins: usize,
}

impl Default for LogBarOptions {
    fn default() -> Self {
        Self { num_bins: 100 }
    }
}

/// Bars over logarithmically spaced edges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogBar {
    pub edges: Vec<f64>,
    pub widths: Vec<f64>,
    /// Histogram density divided by bin width
    pub heights: Vec<f64>,
}

impl<P: StatsProvider> StatEngine<P> {
    pub fn bar_and_kde(&self, sample: &Sample, left: f64, right: f64, options: &BarKdeOptions) -> Result<BarKde> {
        require_range(left, right)?;
        require_step(options.step, "step")?;
        require_step(options.kde_step, "kde_step")?;

        let edges = arange(left, right + options.step, options.step, "step")?;
        let heights = self.provider().histogram(sample.values(), &edges, true)?;

        let kde_points = arange(left, right + options.kde_step, options.kde_step, "kde_step")?;
        let kde_density = self.provider().gaussian_kde(sample.values(), &kde_points)?;

        Ok(BarKde {
            edges,
            heights,
            kde_points,
            kde_density,
        })
    }

    pub fn log_bar(&self, sample: &Sample, left: f64, right: f64, options: &LogBarOptions) -> Result<LogBar> {
        require_range(left, right)?;
        if left <= 0.0 {
            return Err(StatError::domain("left", format!("log-spaced edges need a positive start, got {}", left)));
        }
        if options.num_bins < 2 {
            return Err(StatError::configuration("num_bins", "at least two edges are required"));
        }
        if options.num_bins > MAX_GRID_POINTS {
            return Err(StatError::configuration(
                "num_bins",
                format!("at most {} edges are supported, got {}", MAX_GRID_POINTS, options.num_bins),
            ));
        }

        let edges = logspace(left.log10(), right.log10(), options.num_bins);
        let widths: Vec<f64> = edges.windows(2).map(|w| w[1] - w[0]).collect();
        let density = self.provider().histogram(sample.values(), &edges, true)?;
        let heights = density.iter().zip(&widths).map(|(d, w)| d / w).collect();

        Ok(LogBar {
            edges,
            widths,
            heights,
        })
    }
}

fn require_range(left: f64, right: f64) -> Result<()> {
    if !left.is_finite() {
        return Err(StatError::non_finite("left", left));
    }
    if !right.is_finite() {
        return Err(StatError::non_finite("right", right));
    }
    if left >= right {
        return Err(StatError::domain("left, right", format!("empty range [{}, {}]", left, right)));
    }
    Ok(())
}

fn require_step(step: f64, option: &str) -> Result<()> {
    if !step.is_finite() || step <= 0.0 {
        return Err(StatError::configuration(option, format!("must be a positive number, got {}", step)));
    }
    Ok(())
}

/// Upper bound on the points of any generated grid
const MAX_GRID_POINTS: usize = 1_000_000;

/// Evenly spaced values in [start, stop), `ceil((stop - start) / step)` of them
fn arange(start: f64, stop: f64, step: f64, option: &str) -> Result<Vec<f64>> {
    let len = ((stop - start) / step).ceil().max(0.0);
    if len > MAX_GRID_POINTS as f64 {
        return Err(StatError::configuration(
            option,
            format!("a step of {} yields more than {} grid points", step, MAX_GRID_POINTS),
        ));
    }
    Ok((0..len as usize).map(|i| start + i as f64 * step).collect())
}

/// `num` powers of ten with exponents evenly spaced from `start` to `stop`
fn logspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    let step = (stop - start) / (num - 1) as f64;
    (0..num)
        .map(|i| {
            let exponent = if i == num - 1 { stop } else { start + i as f64 * step };
            10f64.powf(exponent)
        })
        .collect()
}
