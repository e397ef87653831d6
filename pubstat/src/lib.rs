//! pubstat - Publication-Ready Statistics
//!
//! Runs common inferential tests through a `StatsProvider` and renders the
//! results in the compact math notation used in manuscripts:
//!
//! ```text
//! $t(8)=-5.00, p=.001, d=3.16$
//! $U=0, p=.008, r=1.00$
//! ```

pub mod format;
pub mod engine;
pub mod plot;

pub use engine::{
    CorrelationMethod, CorrelationOptions, CorrelationReport, GroupTest, GroupTestReport,
    MannWhitneyOptions, MannWhitneyReport, Report, ShapiroReport, StatEngine, TTestOptions,
    TTestReport,
};
pub use format::{CiOptions, SignificanceTier};
pub use plot::{BarKde, BarKdeOptions, Boxplot, BoxplotOptions, Dash, LogBar, LogBarOptions};
pub use pubstat_core::{codes, Result, Sample, StatError};
pub use pubstat_provider::{Alternative, NativeProvider, StatsProvider};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::engine::{
        CorrelationOptions, MannWhitneyOptions, Report, StatEngine, TTestOptions,
    };
    pub use crate::format::{
        format_number, parse_p_value, print_ci, print_mean, print_mean_and_std, print_std,
        significance_stars, CiOptions,
    };
    pub use pubstat_core::{Result, Sample, StatError};
    pub use pubstat_provider::Alternative;
}
