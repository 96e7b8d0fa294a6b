//! Value records shared by the interval and test engines

use crate::errors::{StatsError, StatsResult};

/// Default sample size above which the normal distribution is used for means
pub const DEFAULT_NORMAL_THRESHOLD: usize = 30;

/// Significance level alpha, strictly inside (0, 1)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SignificanceLevel(f64);

impl SignificanceLevel {
    /// Validate and wrap a significance level
    pub fn new(alpha: f64) -> StatsResult<Self> {
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(StatsError::InvalidAlpha(alpha));
        }
        Ok(Self(alpha))
    }

    /// Build from a confidence level given either as a fraction (0.95) or a
    /// percentage (95)
    pub fn from_confidence(level: f64) -> StatsResult<Self> {
        let fraction = if level > 1.0 && level < 100.0 {
            level / 100.0
        } else {
            level
        };
        if !(fraction > 0.0 && fraction < 1.0) {
            return Err(StatsError::InvalidInput(format!(
                "confidence level {} must be in (0, 1) or (1, 100)",
                level
            )));
        }
        Self::new(1.0 - fraction)
    }

    pub fn alpha(self) -> f64 {
        self.0
    }

    /// Confidence level 1 - alpha
    pub fn confidence(self) -> f64 {
        1.0 - self.0
    }
}

impl Default for SignificanceLevel {
    fn default() -> Self {
        Self(0.05)
    }
}

impl TryFrom<f64> for SignificanceLevel {
    type Error = StatsError;

    fn try_from(alpha: f64) -> StatsResult<Self> {
        Self::new(alpha)
    }
}

/// Summary statistics of a single group
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SampleSummary {
    /// Sample mean
    pub mean: f64,
    /// Standard deviation (sample or population, depending on the caller)
    pub std_dev: f64,
    /// Number of observations
    pub size: usize,
}

impl SampleSummary {
    pub fn new(mean: f64, std_dev: f64, size: usize) -> StatsResult<Self> {
        let summary = Self {
            mean,
            std_dev,
            size,
        };
        summary.validate()?;
        Ok(summary)
    }

    /// Summarise raw observations using the n - 1 sample standard deviation.
    ///
    /// A single observation yields a standard deviation of zero.
    pub fn from_observations(data: &[f64]) -> StatsResult<Self> {
        if data.is_empty() {
            return Err(StatsError::EmptyInput {
                field: "observations",
            });
        }
        reject_nonfinite(data, "observations")?;

        let n = data.len();
        let mean = data.iter().sum::<f64>() / n as f64;
        let std_dev = if n > 1 {
            let ss: f64 = data.iter().map(|x| (x - mean) * (x - mean)).sum();
            (ss / (n - 1) as f64).sqrt()
        } else {
            0.0
        };

        Ok(Self {
            mean,
            std_dev,
            size: n,
        })
    }

    /// Check the record invariants: finite mean, std_dev >= 0, size >= 1
    pub fn validate(&self) -> StatsResult<()> {
        if !self.mean.is_finite() {
            return Err(StatsError::InvalidInput(format!(
                "mean must be finite, got {}",
                self.mean
            )));
        }
        if !(self.std_dev.is_finite() && self.std_dev >= 0.0) {
            return Err(StatsError::NegativeStdDev(self.std_dev));
        }
        if self.size == 0 {
            return Err(StatsError::InvalidInput("sample size must be >= 1".into()));
        }
        Ok(())
    }

    pub fn variance(&self) -> f64 {
        self.std_dev * self.std_dev
    }

    /// Standard error of the mean, std_dev / sqrt(size)
    pub fn standard_error(&self) -> StatsResult<f64> {
        standard_error(self.std_dev, self.size)
    }
}

/// Standard error of a mean: `std_dev / sqrt(size)`
pub fn standard_error(std_dev: f64, size: usize) -> StatsResult<f64> {
    if size == 0 {
        return Err(StatsError::InvalidInput("sample size must be >= 1".into()));
    }
    if !(std_dev.is_finite() && std_dev >= 0.0) {
        return Err(StatsError::NegativeStdDev(std_dev));
    }
    Ok(std_dev / (size as f64).sqrt())
}

/// Which side(s) of the reference distribution form the rejection region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TailType {
    /// H1: parameter != hypothesized value
    #[default]
    TwoTailed,
    /// H1: parameter > hypothesized value
    UpperTailed,
    /// H1: parameter < hypothesized value
    LowerTailed,
}

/// Null hypothesis and decision configuration for a mean test
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TestSpec {
    /// Value of the parameter under H0
    pub hypothesized_value: f64,
    /// Rejection region
    pub tail: TailType,
    /// Use the normal distribution (true) or Student-t (false)
    pub sigma_known: bool,
}

impl TestSpec {
    pub fn new(hypothesized_value: f64, tail: TailType, sigma_known: bool) -> Self {
        Self {
            hypothesized_value,
            tail,
            sigma_known,
        }
    }
}

impl Default for TestSpec {
    fn default() -> Self {
        Self {
            hypothesized_value: 0.0,
            tail: TailType::TwoTailed,
            sigma_known: false,
        }
    }
}

/// Symmetric confidence interval around a point estimate
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConfidenceInterval {
    /// Point estimate
    pub point_estimate: f64,
    /// Critical value times standard error
    pub margin_of_error: f64,
    /// Lower bound (estimate - margin)
    pub lower_bound: f64,
    /// Upper bound (estimate + margin)
    pub upper_bound: f64,
    /// Standard error used
    pub standard_error: f64,
    /// Critical value used
    pub critical_value: f64,
    /// Degrees of freedom (None for the normal distribution)
    pub df: Option<f64>,
    /// Confidence level 1 - alpha
    pub confidence_level: f64,
}

impl ConfidenceInterval {
    pub(crate) fn from_parts(
        point_estimate: f64,
        standard_error: f64,
        critical_value: f64,
        df: Option<f64>,
        alpha: SignificanceLevel,
    ) -> Self {
        let margin_of_error = critical_value * standard_error;
        Self {
            point_estimate,
            margin_of_error,
            lower_bound: point_estimate - margin_of_error,
            upper_bound: point_estimate + margin_of_error,
            standard_error,
            critical_value,
            df,
            confidence_level: alpha.confidence(),
        }
    }

    /// Whether `value` lies inside the closed interval
    pub fn contains(&self, value: f64) -> bool {
        self.lower_bound <= value && value <= self.upper_bound
    }

    /// True when zero lies strictly outside the interval
    pub fn excludes_zero(&self) -> bool {
        self.lower_bound > 0.0 || self.upper_bound < 0.0
    }

    pub fn width(&self) -> f64 {
        self.upper_bound - self.lower_bound
    }
}

/// Reference distribution used for intervals on a mean
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MeanDistribution {
    /// Standard normal critical values
    Normal,
    /// Student-t with size - 1 degrees of freedom
    #[default]
    StudentT,
    /// Normal when size > threshold, Student-t otherwise
    BySampleSize { threshold: usize },
}

impl MeanDistribution {
    /// Resolve to `true` when the Student-t distribution should be used
    pub fn use_t(self, size: usize) -> bool {
        match self {
            MeanDistribution::Normal => false,
            MeanDistribution::StudentT => true,
            MeanDistribution::BySampleSize { threshold } => size <= threshold,
        }
    }

    /// Size-based rule with the classic threshold of 30
    pub fn by_sample_size() -> Self {
        MeanDistribution::BySampleSize {
            threshold: DEFAULT_NORMAL_THRESHOLD,
        }
    }
}

/// Reject slices holding NaN or infinite values
pub(crate) fn reject_nonfinite(data: &[f64], field: &str) -> StatsResult<()> {
    match data.iter().position(|x| !x.is_finite()) {
        Some(i) => Err(StatsError::InvalidInput(format!(
            "{} contains a non-finite value at index {}",
            field, i
        ))),
        None => Ok(()),
    }
}
