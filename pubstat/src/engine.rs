//! Statistical test runner
//!
//! `StatEngine` delegates each test to a `StatsProvider`, adds the
//! secondary quantities the provider does not return (degrees of freedom,
//! effect sizes), and packages everything into a report. Reports render
//! to the publication notation through `Report::render`.

use crate::format::{format_integer, format_number, parse_p_value};
use pubstat_core::{Result, Sample, StatError};
use pubstat_provider::{Alternative, NativeProvider, StatsProvider};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::info;

// ============ Derived Quantities ============

/// Lower and upper quantile positions for a central `percent` interval.
///
/// `percent` must lie in [50, 100].
pub fn confidence_interval_bounds(percent: f64) -> Result<(f64, f64)> {
    if !percent.is_finite() || !(50.0..=100.0).contains(&percent) {
        return Err(StatError::percent("percent", percent));
    }
    let left = (100.0 - percent) / 200.0;
    Ok((left, 1.0 - left))
}

/// Pooled standard deviation of two samples
pub fn pooled_std_dev(a: &Sample, b: &Sample) -> Result<f64> {
    let n1 = a.len() as f64;
    let n2 = b.len() as f64;
    if a.len() + b.len() <= 2 {
        return Err(StatError::domain(
            "a, b",
            format!("pooled standard deviation needs more than 2 observations, got {}", a.len() + b.len()),
        ));
    }
    // (n - 1)·s² is the sum of squared deviations, n·σ²
    let ss = n1 * a.variance_p() + n2 * b.variance_p();
    Ok((ss / (n1 + n2 - 2.0)).sqrt())
}

/// Cohen's d: absolute mean difference over the pooled standard deviation
pub fn cohens_d(a: &Sample, b: &Sample) -> Result<f64> {
    let pooled = pooled_std_dev(a, b)?;
    if pooled == 0.0 {
        return Err(StatError::domain("a, b", "pooled standard deviation is zero"));
    }
    Ok((a.mean() - b.mean()).abs() / pooled)
}

/// Welch–Satterthwaite degrees of freedom.
///
/// Reported for every t-test, including the pooled-variance one.
pub fn welch_degrees_of_freedom(a: &Sample, b: &Sample) -> Result<f64> {
    let n1 = a.len() as f64;
    let n2 = b.len() as f64;
    let v1 = a.variance()? / n1;
    let v2 = b.variance()? / n2;

    let denom = v1 * v1 / (n1 - 1.0) + v2 * v2 / (n2 - 1.0);
    if denom == 0.0 {
        return Err(StatError::domain("a, b", "both samples have zero variance"));
    }
    Ok((v1 + v2).powi(2) / denom)
}

/// Rank-biserial correlation from a U statistic: 1 - 2U / (n1·n2)
pub fn rank_biserial(u: f64, n1: usize, n2: usize) -> Result<f64> {
    if n1 == 0 || n2 == 0 {
        return Err(StatError::domain("n1, n2", "sample sizes must be positive"));
    }
    if !u.is_finite() {
        return Err(StatError::non_finite("u", u));
    }
    Ok(1.0 - 2.0 * u / (n1 as f64 * n2 as f64))
}

/// `format_number` with an exact zero rendered as "0"
pub(crate) fn format_statistic(x: f64) -> Result<String> {
    if x == 0.0 {
        Ok("0".to_string())
    } else {
        format_number(x)
    }
}

// ============ Options ============

/// Options for `StatEngine::t_test`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TTestOptions {
    /// Explicit variance assumption. `None` runs the pooled test quietly;
    /// `Some` emits an informational event naming the test variant.
    pub equal_variance: Option<bool>,
}

impl TTestOptions {
    pub fn with_equal_variance(equal_variance: bool) -> Self {
        Self {
            equal_variance: Some(equal_variance),
        }
    }

    pub fn resolved_equal_variance(&self) -> bool {
        self.equal_variance.unwrap_or(true)
    }
}

/// Options for `StatEngine::mann_whitney_u`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MannWhitneyOptions {
    /// Unset, null or "" all resolve to two-sided
    #[serde(deserialize_with = "deserialize_alternative")]
    pub alternative: Option<Alternative>,
}

impl MannWhitneyOptions {
    pub fn with_alternative(alternative: Alternative) -> Self {
        Self {
            alternative: Some(alternative),
        }
    }

    /// Parse an alternative name; the empty string means unset
    pub fn from_alternative_str(s: &str) -> Result<Self> {
        if s.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(Self::with_alternative(s.parse()?))
    }

    pub fn resolved_alternative(&self) -> Alternative {
        self.alternative.unwrap_or_default()
    }
}

fn deserialize_alternative<'de, D>(deserializer: D) -> std::result::Result<Option<Alternative>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Options for the correlation tests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrelationOptions {
    /// Show the combined sample size next to the symbol, with the p-value
    pub include_sample_size: bool,
}

impl Default for CorrelationOptions {
    fn default() -> Self {
        Self {
            include_sample_size: true,
        }
    }
}

// ============ Reports ============

/// A test result that can be rendered in publication notation
pub trait Report {
    fn render(&self) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TTestReport {
    pub statistic: f64,
    pub p_value: f64,
    /// Welch–Satterthwaite df
    pub df: f64,
    /// Cohen's d
    pub effect_size: f64,
}

impl Report for TTestReport {
    fn render(&self) -> Result<String> {
        Ok(format!(
            "$t({})={}, {}, d={}$",
            format_integer(self.df)?,
            format_statistic(self.statistic)?,
            parse_p_value(self.p_value)?,
            format_statistic(self.effect_size)?
        ))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MannWhitneyReport {
    pub statistic: f64,
    pub p_value: f64,
    /// Rank-biserial correlation
    pub r: f64,
    pub alternative: Alternative,
}

impl Report for MannWhitneyReport {
    fn render(&self) -> Result<String> {
        Ok(format!(
            "$U={}, {}, r={}$",
            format_statistic(self.statistic)?,
            parse_p_value(self.p_value)?,
            format_statistic(self.r)?
        ))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapiroReport {
    pub statistic: f64,
    pub p_value: f64,
    pub n: usize,
}

impl Report for ShapiroReport {
    fn render(&self) -> Result<String> {
        Ok(format!(
            "$W({})={}, {}$",
            self.n,
            format_statistic(self.statistic)?,
            parse_p_value(self.p_value)?
        ))
    }
}

/// Multi-group tests sharing the `<symbol>=stat, p` rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupTest {
    KruskalWallis,
    Bartlett,
    Levene,
}

impl GroupTest {
    pub fn symbol(&self) -> &'static str {
        match self {
            GroupTest::KruskalWallis => "H",
            GroupTest::Bartlett => "T",
            GroupTest::Levene => "F",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupTestReport {
    pub test: GroupTest,
    pub statistic: f64,
    pub p_value: f64,
}

impl Report for GroupTestReport {
    fn render(&self) -> Result<String> {
        Ok(format!(
            "${}={}, {}$",
            self.test.symbol(),
            format_statistic(self.statistic)?,
            parse_p_value(self.p_value)?
        ))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationMethod {
    Pearson,
    Spearman,
}

impl CorrelationMethod {
    pub fn symbol(&self) -> &'static str {
        match self {
            CorrelationMethod::Pearson => "r",
            CorrelationMethod::Spearman => "\\rho",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrelationReport {
    pub method: CorrelationMethod,
    pub coefficient: f64,
    pub p_value: f64,
    /// Combined size of both samples
    pub n: usize,
    pub include_sample_size: bool,
}

impl Report for CorrelationReport {
    fn render(&self) -> Result<String> {
        let symbol = self.method.symbol();
        let coefficient = format_statistic(self.coefficient)?;
        if self.include_sample_size {
            Ok(format!(
                "${}({})={}, {}$",
                symbol,
                self.n,
                coefficient,
                parse_p_value(self.p_value)?
            ))
        } else {
            Ok(format!("${}={}$", symbol, coefficient))
        }
    }
}

// ============ Engine ============

/// Runs tests through a provider and builds reports
#[derive(Debug, Clone, Default)]
pub struct StatEngine<P: StatsProvider = NativeProvider> {
    provider: P,
}

impl StatEngine<NativeProvider> {
    pub fn native() -> Self {
        Self::new(NativeProvider::new())
    }
}

impl<P: StatsProvider> StatEngine<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Two-sample t-test with Welch df and Cohen's d
    pub fn t_test(&self, a: &Sample, b: &Sample, options: &TTestOptions) -> Result<TTestReport> {
        if let Some(equal_variance) = options.equal_variance {
            let variant = if equal_variance {
                "independent t-test"
            } else {
                "Welch's t-test"
            };
            info!(test = "t_test", equal_variance, "performing {}", variant);
        }

        let outcome = self
            .provider
            .t_test_ind(a.values(), b.values(), options.resolved_equal_variance())?;

        Ok(TTestReport {
            statistic: outcome.statistic,
            p_value: outcome.p_value,
            df: welch_degrees_of_freedom(a, b)?,
            effect_size: cohens_d(a, b)?,
        })
    }

    pub fn t_test_text(&self, a: &Sample, b: &Sample, options: &TTestOptions) -> Result<String> {
        self.t_test(a, b, options)?.render()
    }

    /// Mann-Whitney U with rank-biserial r computed from the same U
    pub fn mann_whitney_u(
        &self,
        a: &Sample,
        b: &Sample,
        options: &MannWhitneyOptions,
    ) -> Result<MannWhitneyReport> {
        let alternative = options.resolved_alternative();
        let outcome = self.provider.mann_whitney_u(a.values(), b.values(), alternative)?;

        Ok(MannWhitneyReport {
            statistic: outcome.statistic,
            p_value: outcome.p_value,
            r: rank_biserial(outcome.statistic, a.len(), b.len())?,
            alternative,
        })
    }

    pub fn mann_whitney_u_text(
        &self,
        a: &Sample,
        b: &Sample,
        options: &MannWhitneyOptions,
    ) -> Result<String> {
        self.mann_whitney_u(a, b, options)?.render()
    }

    pub fn shapiro_wilk(&self, sample: &Sample) -> Result<ShapiroReport> {
        let outcome = self.provider.shapiro_wilk(sample.values())?;
        Ok(ShapiroReport {
            statistic: outcome.statistic,
            p_value: outcome.p_value,
            n: sample.len(),
        })
    }

    pub fn shapiro_wilk_text(&self, sample: &Sample) -> Result<String> {
        self.shapiro_wilk(sample)?.render()
    }

    pub fn kruskal_wallis(&self, samples: &[&Sample]) -> Result<GroupTestReport> {
        self.group_test(GroupTest::KruskalWallis, samples)
    }

    pub fn kruskal_wallis_text(&self, samples: &[&Sample]) -> Result<String> {
        self.kruskal_wallis(samples)?.render()
    }

    pub fn bartlett(&self, samples: &[&Sample]) -> Result<GroupTestReport> {
        self.group_test(GroupTest::Bartlett, samples)
    }

    pub fn bartlett_text(&self, samples: &[&Sample]) -> Result<String> {
        self.bartlett(samples)?.render()
    }

    pub fn levene(&self, samples: &[&Sample]) -> Result<GroupTestReport> {
        self.group_test(GroupTest::Levene, samples)
    }

    pub fn levene_text(&self, samples: &[&Sample]) -> Result<String> {
        self.levene(samples)?.render()
    }

    fn group_test(&self, test: GroupTest, samples: &[&Sample]) -> Result<GroupTestReport> {
        let groups: Vec<&[f64]> = samples.iter().map(|s| s.values()).collect();
        let outcome = match test {
            GroupTest::KruskalWallis => self.provider.kruskal_wallis(&groups)?,
            GroupTest::Bartlett => self.provider.bartlett(&groups)?,
            GroupTest::Levene => self.provider.levene(&groups)?,
        };
        Ok(GroupTestReport {
            test,
            statistic: outcome.statistic,
            p_value: outcome.p_value,
        })
    }

    pub fn pearson(&self, a: &Sample, b: &Sample, options: &CorrelationOptions) -> Result<CorrelationReport> {
        self.correlation(CorrelationMethod::Pearson, a, b, options)
    }

    pub fn pearson_text(&self, a: &Sample, b: &Sample, options: &CorrelationOptions) -> Result<String> {
        self.pearson(a, b, options)?.render()
    }

    pub fn spearman(&self, a: &Sample, b: &Sample, options: &CorrelationOptions) -> Result<CorrelationReport> {
        self.correlation(CorrelationMethod::Spearman, a, b, options)
    }

    pub fn spearman_text(&self, a: &Sample, b: &Sample, options: &CorrelationOptions) -> Result<String> {
        self.spearman(a, b, options)?.render()
    }

    fn correlation(
        &self,
        method: CorrelationMethod,
        a: &Sample,
        b: &Sample,
        options: &CorrelationOptions,
    ) -> Result<CorrelationReport> {
        let correlation = match method {
            CorrelationMethod::Pearson => self.provider.pearson(a.values(), b.values())?,
            CorrelationMethod::Spearman => self.provider.spearman(a.values(), b.values())?,
        };
        Ok(CorrelationReport {
            method,
            coefficient: correlation.coefficient,
            p_value: correlation.p_value,
            n: a.len() + b.len(),
            include_sample_size: options.include_sample_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pubstat_core::codes;
    use std::io;
    use std::sync::{Arc, Mutex};

    fn sample(values: &[f64]) -> Sample {
        Sample::new(values.to_vec()).unwrap()
    }

    fn low() -> Sample {
        sample(&[1.0, 2.0, 3.0, 4.0, 5.0])
    }

    fn high() -> Sample {
        sample(&[6.0, 7.0, 8.0, 9.0, 10.0])
    }

    #[test]
    fn test_confidence_interval_bounds() {
        assert_eq!(confidence_interval_bounds(95.0).unwrap(), (0.025, 0.975));
        assert_eq!(confidence_interval_bounds(50.0).unwrap(), (0.25, 0.75));
        assert_eq!(confidence_interval_bounds(100.0).unwrap(), (0.0, 1.0));
    }

    #[test]
    fn test_confidence_interval_bounds_out_of_range() {
        let err = confidence_interval_bounds(40.0).unwrap_err();
        assert_eq!(err.code(), codes::DOMAIN_ERROR);
        assert!(confidence_interval_bounds(100.5).is_err());
        assert!(confidence_interval_bounds(f64::NAN).is_err());
    }

    #[test]
    fn test_pooled_std_dev() {
        let sd = pooled_std_dev(&low(), &high()).unwrap();
        assert!((sd - 2.5_f64.sqrt()).abs() < 1e-12);

        let a = sample(&[1.0, 4.0, 9.0]);
        let b = sample(&[2.0, 2.5, 3.0, 10.0]);
        let ab = pooled_std_dev(&a, &b).unwrap();
        let ba = pooled_std_dev(&b, &a).unwrap();
        assert!((ab - ba).abs() < 1e-12);
    }

    #[test]
    fn test_pooled_std_dev_too_small() {
        let err = pooled_std_dev(&sample(&[1.0]), &sample(&[2.0])).unwrap_err();
        assert!(err.is_domain());
    }

    #[test]
    fn test_cohens_d() {
        let d = cohens_d(&low(), &high()).unwrap();
        assert!((d - 5.0 / 2.5_f64.sqrt()).abs() < 1e-12);
        assert_eq!(cohens_d(&low(), &low()).unwrap(), 0.0);
    }

    #[test]
    fn test_welch_df() {
        let df = welch_degrees_of_freedom(&low(), &high()).unwrap();
        assert!((df - 8.0).abs() < 1e-12);

        // unequal variances pull df below n1 + n2 - 2
        let a = sample(&[1.0, 1.1, 0.9, 1.05]);
        let b = sample(&[0.0, 10.0, 20.0, 5.0, 15.0, 30.0]);
        let df = welch_degrees_of_freedom(&a, &b).unwrap();
        assert!(df < 8.0 && df > 4.0);
    }

    #[test]
    fn test_welch_df_single_value() {
        assert!(welch_degrees_of_freedom(&sample(&[1.0]), &high()).unwrap_err().is_domain());
    }

    #[test]
    fn test_rank_biserial() {
        assert_eq!(rank_biserial(0.0, 5, 5).unwrap(), 1.0);
        assert_eq!(rank_biserial(25.0, 5, 5).unwrap(), -1.0);
        assert_eq!(rank_biserial(12.5, 5, 5).unwrap(), 0.0);
        assert!(rank_biserial(1.0, 0, 5).is_err());
    }

    #[test]
    fn test_t_test_text() {
        let engine = StatEngine::native();
        let text = engine
            .t_test_text(&low(), &high(), &TTestOptions::with_equal_variance(true))
            .unwrap();
        assert_eq!(text, "$t(8)=-5.00, p=.001, d=3.16$");
    }

    #[test]
    fn test_t_test_raw_matches_text() {
        let engine = StatEngine::native();
        let a = sample(&[2.1, 3.4, 1.9, 5.6, 4.4, 3.3]);
        let b = sample(&[4.0, 5.5, 6.1, 7.2, 5.0]);
        let report = engine.t_test(&a, &b, &TTestOptions::default()).unwrap();
        let expected = format!(
            "$t({})={}, {}, d={}$",
            format_integer(report.df).unwrap(),
            format_number(report.statistic).unwrap(),
            parse_p_value(report.p_value).unwrap(),
            format_number(report.effect_size).unwrap()
        );
        assert_eq!(engine.t_test_text(&a, &b, &TTestOptions::default()).unwrap(), expected);
        assert!(report.effect_size > 0.0);
    }

    /// Log output captured from a scoped subscriber
    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn t_test_log(options: TTestOptions) -> (TTestReport, String) {
        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();
        let report = tracing::subscriber::with_default(subscriber, || {
            StatEngine::native().t_test(&low(), &high(), &options).unwrap()
        });
        let output = String::from_utf8(log.0.lock().unwrap().clone()).unwrap();
        (report, output)
    }

    #[test]
    fn test_t_test_emits_note() {
        let (pooled, log) = t_test_log(TTestOptions::with_equal_variance(true));
        assert!(log.contains("independent t-test"), "{}", log);
        assert!(!log.contains("Welch"));

        let (welch, log) = t_test_log(TTestOptions::with_equal_variance(false));
        assert!(log.contains("Welch's t-test"), "{}", log);

        // equal variances and sizes make both variants coincide
        assert!((welch.statistic - pooled.statistic).abs() < 1e-12);
        assert_eq!(welch.df, pooled.df);
    }

    #[test]
    fn test_t_test_silent_without_explicit_variance() {
        let (report, log) = t_test_log(TTestOptions::default());
        assert!(log.is_empty(), "{}", log);
        assert!((report.statistic + 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_mann_whitney_text() {
        let engine = StatEngine::native();
        let text = engine
            .mann_whitney_u_text(&low(), &high(), &MannWhitneyOptions::default())
            .unwrap();
        assert_eq!(text, "$U=0, p=.008, r=1.00$");
    }

    #[test]
    fn test_mann_whitney_alternative_normalized() {
        let engine = StatEngine::native();
        let unset = engine
            .mann_whitney_u(&low(), &high(), &MannWhitneyOptions::default())
            .unwrap();
        let empty = engine
            .mann_whitney_u(&low(), &high(), &MannWhitneyOptions::from_alternative_str("").unwrap())
            .unwrap();
        assert_eq!(unset, empty);
        assert_eq!(unset.alternative, Alternative::TwoSided);

        let less = engine
            .mann_whitney_u(&low(), &high(), &MannWhitneyOptions::with_alternative(Alternative::Less))
            .unwrap();
        assert!((less.p_value - 1.0 / 252.0).abs() < 1e-12);
        assert_eq!(less.r, unset.r);
    }

    #[test]
    fn test_mann_whitney_bad_alternative() {
        let err = MannWhitneyOptions::from_alternative_str("sideways").unwrap_err();
        assert_eq!(err.code(), codes::CONFIG_ERROR);
    }

    #[test]
    fn test_mann_whitney_options_from_json() {
        let opts: MannWhitneyOptions = serde_json::from_str(r#"{"alternative": ""}"#).unwrap();
        assert_eq!(opts.resolved_alternative(), Alternative::TwoSided);

        let opts: MannWhitneyOptions = serde_json::from_str(r#"{"alternative": "greater"}"#).unwrap();
        assert_eq!(opts.alternative, Some(Alternative::Greater));

        let opts: MannWhitneyOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(opts.alternative, None);

        assert!(serde_json::from_str::<MannWhitneyOptions>(r#"{"alternative": "up"}"#).is_err());
    }

    #[test]
    fn test_shapiro_text() {
        let engine = StatEngine::native();
        let text = engine.shapiro_wilk_text(&low()).unwrap();
        assert_eq!(text, "$W(5)=0.99, p=.967$");
    }

    #[test]
    fn test_group_tests_text() {
        let engine = StatEngine::native();
        let a = low();
        let b = high();

        let kruskal = engine.kruskal_wallis(&[&a, &b]).unwrap();
        assert!(engine.kruskal_wallis_text(&[&a, &b]).unwrap().starts_with("$H="));
        assert!(kruskal.p_value < 0.05);

        // identical spread: both variance tests give a statistic of exactly zero
        assert_eq!(engine.bartlett_text(&[&a, &b]).unwrap(), "$T=0, p=1.000$");
        assert!(engine.levene_text(&[&a, &b]).unwrap().starts_with("$F="));
    }

    #[test]
    fn test_group_report_symbols() {
        let report = GroupTestReport {
            test: GroupTest::Levene,
            statistic: 4.5,
            p_value: 0.0412,
        };
        assert_eq!(report.render().unwrap(), "$F=4.50, p=.041$");
    }

    #[test]
    fn test_pearson_text() {
        let engine = StatEngine::native();
        let x = low();
        let y = sample(&[2.0, 1.0, 4.0, 3.0, 5.0]);
        let text = engine.pearson_text(&x, &y, &CorrelationOptions::default()).unwrap();
        assert_eq!(text, "$r(10)=0.80, p=.104$");

        let short = CorrelationOptions {
            include_sample_size: false,
        };
        assert_eq!(engine.pearson_text(&x, &y, &short).unwrap(), "$r=0.80$");
    }

    #[test]
    fn test_spearman_text() {
        let engine = StatEngine::native();
        let x = sample(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let y = sample(&[1.0, 4.0, 9.0, 16.0, 25.0, 36.0]);
        let text = engine.spearman_text(&x, &y, &CorrelationOptions::default()).unwrap();
        assert_eq!(text, "$\\rho(12)=1.00, p<.001$");
    }

    #[test]
    fn test_correlation_mismatched_lengths() {
        let engine = StatEngine::native();
        let err = engine
            .pearson(&low(), &sample(&[1.0, 2.0]), &CorrelationOptions::default())
            .unwrap_err();
        assert_eq!(err.code(), codes::PROVIDER_ERROR);
    }

    #[test]
    fn test_reports_render_their_raw_fields() {
        let engine = StatEngine::native();
        let a = sample(&[2.1, 3.4, 1.9, 5.6, 4.4, 3.3]);
        let b = sample(&[4.0, 5.5, 6.1, 7.2, 5.0]);
        let c = sample(&[1.2, 2.9, 2.2, 6.1, 3.9, 3.0]);

        let mw_options = MannWhitneyOptions::default();
        let mw = engine.mann_whitney_u(&a, &b, &mw_options).unwrap();
        assert_eq!(
            engine.mann_whitney_u_text(&a, &b, &mw_options).unwrap(),
            format!(
                "$U={}, {}, r={}$",
                format_statistic(mw.statistic).unwrap(),
                parse_p_value(mw.p_value).unwrap(),
                format_statistic(mw.r).unwrap()
            )
        );

        let sw = engine.shapiro_wilk(&a).unwrap();
        assert_eq!(
            engine.shapiro_wilk_text(&a).unwrap(),
            format!(
                "$W({})={}, {}$",
                sw.n,
                format_statistic(sw.statistic).unwrap(),
                parse_p_value(sw.p_value).unwrap()
            )
        );

        let groups = [&a, &b, &c];
        let reports = [
            (engine.kruskal_wallis(&groups).unwrap(), engine.kruskal_wallis_text(&groups).unwrap()),
            (engine.bartlett(&groups).unwrap(), engine.bartlett_text(&groups).unwrap()),
            (engine.levene(&groups).unwrap(), engine.levene_text(&groups).unwrap()),
        ];
        for (report, text) in &reports {
            let expected = format!(
                "${}={}, {}$",
                report.test.symbol(),
                format_statistic(report.statistic).unwrap(),
                parse_p_value(report.p_value).unwrap()
            );
            assert_eq!(text, &expected);
        }

        for include_sample_size in [true, false] {
            let options = CorrelationOptions { include_sample_size };
            let pairs = [
                (engine.pearson(&a, &c, &options).unwrap(), engine.pearson_text(&a, &c, &options).unwrap()),
                (engine.spearman(&a, &c, &options).unwrap(), engine.spearman_text(&a, &c, &options).unwrap()),
            ];
            for (report, text) in &pairs {
                let coefficient = format_statistic(report.coefficient).unwrap();
                let expected = if include_sample_size {
                    format!(
                        "${}({})={}, {}$",
                        report.method.symbol(),
                        a.len() + c.len(),
                        coefficient,
                        parse_p_value(report.p_value).unwrap()
                    )
                } else {
                    format!("${}={}$", report.method.symbol(), coefficient)
                };
                assert_eq!(text, &expected);
            }
        }
    }

    #[test]
    fn test_report_serializes() {
        let engine = StatEngine::native();
        let report = engine
            .mann_whitney_u(&low(), &high(), &MannWhitneyOptions::default())
            .unwrap();
        let json = serde_json::to_value(report).unwrap();
        assert_eq!(json["alternative"], "two-sided");
        assert_eq!(json["statistic"], 0.0);
    }
}
