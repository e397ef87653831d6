//! Reference distributions
//!
//! Thin wrappers over `statrs` returning the tail probabilities the tests
//! need. Invalid parameters surface as provider errors.

use pubstat_core::{Result, StatError};
use statrs::distribution::{ChiSquared, ContinuousCDF, FisherSnedecor, Normal, StudentsT};
use statrs::function::beta::checked_beta_reg;
use std::fmt::Display;

fn provider_error<E: Display>(dist: &'static str) -> impl Fn(E) -> StatError {
    move |e| StatError::provider(dist, e.to_string())
}

/// N(0, 1)
pub fn standard_normal() -> Result<Normal> {
    Normal::new(0.0, 1.0).map_err(provider_error("normal"))
}

/// P(|T| ≥ |t|) for Student's t on `df` degrees of freedom
pub fn t_two_sided(t: f64, df: f64) -> Result<f64> {
    let dist = StudentsT::new(0.0, 1.0, df).map_err(provider_error("students_t"))?;
    Ok(2.0 * dist.sf(t.abs()))
}

/// Upper tail of χ²(df)
pub fn chi_sf(x: f64, df: f64) -> Result<f64> {
    let dist = ChiSquared::new(df).map_err(provider_error("chi_squared"))?;
    if x <= 0.0 {
        return Ok(1.0);
    }
    Ok(dist.sf(x))
}

/// Upper tail of F(d1, d2)
pub fn f_sf(x: f64, d1: f64, d2: f64) -> Result<f64> {
    let dist = FisherSnedecor::new(d1, d2).map_err(provider_error("fisher_snedecor"))?;
    if x <= 0.0 {
        return Ok(1.0);
    }
    Ok(dist.sf(x))
}

/// Two-sided p-value of a correlation coefficient on `df` = n - 2.
///
/// t = r √(df / (1 - r²)) has the tail I_{1-r²}(df/2, 1/2), which stays
/// finite at |r| = 1.
pub fn correlation_p(r: f64, df: f64) -> Result<f64> {
    checked_beta_reg(df / 2.0, 0.5, 1.0 - r * r).map_err(provider_error("beta_reg"))
}
