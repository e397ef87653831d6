//! pubstat Core - Fundamental types
//!
//! This crate provides the core types used throughout pubstat:
//! - `Sample`: Validated, read-only numeric observations
//! - `StatError`: Domain, configuration and provider errors

mod error;
mod sample;

pub use error::{StatError, codes};
pub use sample::{Sample, ranks, sorted, variance_impl};

/// Result alias used across the workspace
pub type Result<T> = std::result::Result<T, StatError>;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Result, Sample, StatError};
    pub use crate::error::codes;
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_roundtrip() {
        let s = Sample::new(vec![2.0, 4.0, 6.0]).unwrap();
        assert_eq!(s.len(), 3);
        assert!((s.mean() - 4.0).abs() < 1e-12);
        assert!((s.std_dev().unwrap() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_error_code_from_prelude() {
        let err: StatError = StatError::percent("percent", 40.0);
        assert_eq!(err.code(), codes::DOMAIN_ERROR);
    }
}
