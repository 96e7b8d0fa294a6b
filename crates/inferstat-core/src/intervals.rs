//! Confidence intervals
//!
//! - One mean (normal or Student-t critical values)
//! - One proportion (Wald interval)
//! - Difference of two means (Welch or paired)

use crate::distributions::{DistributionProvider, Family};
use crate::errors::{StatsError, StatsResult};
use crate::types::{ConfidenceInterval, MeanDistribution, SampleSummary, SignificanceLevel};
use tracing::{debug, trace};

/// Options for an interval on one mean
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeanIntervalOptions {
    /// Reference distribution policy (default: Student-t)
    pub distribution: MeanDistribution,
}

/// Options for an interval on a difference of means
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeanDifferenceOptions {
    /// Treat `a` as the summary of per-pair differences
    pub paired: bool,
}

/// Interval for a population mean
///
/// # Arguments
/// * `dist` - Distribution backend
/// * `summary` - Sample summary
/// * `alpha` - Significance level in (0, 1)
/// * `use_t` - Student-t with `size - 1` df when true, standard normal otherwise
pub fn interval_for_mean<D: DistributionProvider>(
    dist: &D,
    summary: &SampleSummary,
    alpha: f64,
    use_t: bool,
) -> StatsResult<ConfidenceInterval> {
    let alpha = SignificanceLevel::new(alpha)?;
    summary.validate()?;

    let family = if use_t {
        if summary.size < 2 {
            return Err(StatsError::InsufficientDataMsg(
                "Student-t interval requires at least 2 observations".into(),
            ));
        }
        Family::StudentT {
            df: (summary.size - 1) as f64,
        }
    } else {
        Family::Normal
    };

    let se = summary.standard_error()?;
    let critical = dist.quantile(family, 1.0 - alpha.alpha() / 2.0)?;
    let ci = ConfidenceInterval::from_parts(summary.mean, se, critical, family.df(), alpha);

    debug!(
        mean = summary.mean,
        n = summary.size,
        use_t,
        lower = ci.lower_bound,
        upper = ci.upper_bound,
        "mean interval"
    );
    Ok(ci)
}

/// Interval for a mean with the reference distribution chosen by `options`
pub fn interval_for_mean_with<D: DistributionProvider>(
    dist: &D,
    summary: &SampleSummary,
    alpha: f64,
    options: &MeanIntervalOptions,
) -> StatsResult<ConfidenceInterval> {
    let use_t = options.distribution.use_t(summary.size);
    trace!(policy = ?options.distribution, use_t, "resolved mean distribution");
    interval_for_mean(dist, summary, alpha, use_t)
}

/// Wald interval for a population proportion
///
/// # Arguments
/// * `successes` - Number of successes, at most `n`
/// * `n` - Number of trials, > 0
/// * `alpha` - Significance level in (0, 1)
pub fn interval_for_proportion<D: DistributionProvider>(
    dist: &D,
    successes: u64,
    n: u64,
    alpha: f64,
) -> StatsResult<ConfidenceInterval> {
    let alpha = SignificanceLevel::new(alpha)?;
    if n == 0 {
        return Err(StatsError::InvalidInput("Number of trials must be > 0".into()));
    }
    if successes > n {
        return Err(StatsError::InvalidInput(format!(
            "successes ({}) cannot exceed trials ({})",
            successes, n
        )));
    }

    let p_hat = successes as f64 / n as f64;
    let se = (p_hat * (1.0 - p_hat) / n as f64).sqrt();
    let critical = dist.quantile(Family::Normal, 1.0 - alpha.alpha() / 2.0)?;
    let ci = ConfidenceInterval::from_parts(p_hat, se, critical, None, alpha);

    debug!(
        p_hat,
        n,
        lower = ci.lower_bound,
        upper = ci.upper_bound,
        "proportion interval"
    );
    Ok(ci)
}

/// Standard error and degrees of freedom for `a.mean - b.mean`.
///
/// Independent samples use the Welch standard error with Welch-Satterthwaite
/// df truncated to an integer; paired samples treat `a` as the summary of the
/// per-pair differences.
pub(crate) fn mean_difference_se_df(
    a: &SampleSummary,
    b: &SampleSummary,
    paired: bool,
) -> StatsResult<(f64, f64)> {
    a.validate()?;
    if paired {
        if a.size < 2 {
            return Err(StatsError::InsufficientDataMsg(
                "paired comparison requires at least 2 pairs".into(),
            ));
        }
        let se = a.standard_error()?;
        return Ok((se, (a.size - 1) as f64));
    }

    b.validate()?;
    if a.size < 2 || b.size < 2 {
        return Err(StatsError::InsufficientDataMsg(
            "Welch comparison requires at least 2 observations per group".into(),
        ));
    }

    let va = a.variance() / a.size as f64;
    let vb = b.variance() / b.size as f64;
    let se = (va + vb).sqrt();
    let denom = va * va / (a.size - 1) as f64 + vb * vb / (b.size - 1) as f64;
    if se == 0.0 || denom == 0.0 {
        return Err(StatsError::ZeroStandardError);
    }
    let df = ((va + vb) * (va + vb) / denom).trunc();
    if df < 1.0 {
        return Err(StatsError::InvalidDegreesOfFreedom(df));
    }
    trace!(se, df, "welch standard error");
    Ok((se, df))
}

/// Interval for the difference of two means, `a.mean - b.mean`
///
/// # Arguments
/// * `a` - First group, or the per-pair differences when `paired`
/// * `b` - Second group
/// * `alpha` - Significance level in (0, 1)
/// * `paired` - Paired (dependent) samples
pub fn interval_for_mean_difference<D: DistributionProvider>(
    dist: &D,
    a: &SampleSummary,
    b: &SampleSummary,
    alpha: f64,
    paired: bool,
) -> StatsResult<ConfidenceInterval> {
    let alpha = SignificanceLevel::new(alpha)?;
    let (se, df) = mean_difference_se_df(a, b, paired)?;
    let critical = dist.quantile(Family::StudentT { df }, 1.0 - alpha.alpha() / 2.0)?;
    let diff = a.mean - b.mean;
    let ci = ConfidenceInterval::from_parts(diff, se, critical, Some(df), alpha);

    debug!(
        diff,
        df,
        paired,
        lower = ci.lower_bound,
        upper = ci.upper_bound,
        "mean difference interval"
    );
    Ok(ci)
}

/// Interval for a difference of means with options
pub fn interval_for_mean_difference_with<D: DistributionProvider>(
    dist: &D,
    a: &SampleSummary,
    b: &SampleSummary,
    alpha: f64,
    options: &MeanDifferenceOptions,
) -> StatsResult<ConfidenceInterval> {
    interval_for_mean_difference(dist, a, b, alpha, options.paired)
}
