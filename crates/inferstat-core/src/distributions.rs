//! Reference distributions
//!
//! Every engine evaluates the normal, Student-t, F and chi-square distributions
//! through the [`DistributionProvider`] trait. [`Statrs`] is the default backend;
//! any other numeric library can be plugged in by implementing the trait.
//!
//! Providers are stateless: a distribution object is built for each call and
//! dropped afterwards, so providers are trivially shareable across threads.

use crate::errors::{StatsError, StatsResult};
use crate::types::{SignificanceLevel, TailType};
use statrs::distribution::{
    ChiSquared, Continuous, ContinuousCDF, FisherSnedecor, Normal, StudentsT,
};

/// Continuous distribution family and its shape parameters
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Family {
    /// Standard normal N(0, 1)
    Normal,
    /// Student-t with `df` degrees of freedom
    StudentT { df: f64 },
    /// Fisher-Snedecor F with numerator `df1` and denominator `df2`
    F { df1: f64, df2: f64 },
    /// Chi-square with `df` degrees of freedom
    ChiSquare { df: f64 },
}

impl Family {
    /// Check that all degrees of freedom are finite and positive
    pub fn validate(&self) -> StatsResult<()> {
        match *self {
            Family::Normal => Ok(()),
            Family::StudentT { df } | Family::ChiSquare { df } => check_df(df),
            Family::F { df1, df2 } => {
                check_df(df1)?;
                check_df(df2)
            }
        }
    }

    /// Normal when `sigma_known`, otherwise Student-t with `df`
    pub fn z_or_t(sigma_known: bool, df: f64) -> Self {
        if sigma_known {
            Family::Normal
        } else {
            Family::StudentT { df }
        }
    }

    /// Degrees of freedom of the single-parameter families
    pub fn df(&self) -> Option<f64> {
        match *self {
            Family::Normal | Family::F { .. } => None,
            Family::StudentT { df } | Family::ChiSquare { df } => Some(df),
        }
    }
}

fn check_df(df: f64) -> StatsResult<()> {
    if df.is_finite() && df > 0.0 {
        Ok(())
    } else {
        Err(StatsError::InvalidDegreesOfFreedom(df))
    }
}

fn check_probability(p: f64) -> StatsResult<()> {
    if p > 0.0 && p < 1.0 {
        Ok(())
    } else {
        Err(StatsError::InvalidProbability(p))
    }
}

/// CDF, quantile and density evaluation for the supported families
pub trait DistributionProvider {
    /// Cumulative distribution function, P(X <= x)
    fn cdf(&self, family: Family, x: f64) -> StatsResult<f64>;

    /// Inverse CDF. Fails with a domain error unless `0 < p < 1`.
    fn quantile(&self, family: Family, p: f64) -> StatsResult<f64>;

    /// Probability density at `x`
    fn pdf(&self, family: Family, x: f64) -> StatsResult<f64>;

    /// Upper tail probability, P(X > x)
    fn survival(&self, family: Family, x: f64) -> StatsResult<f64> {
        Ok(1.0 - self.cdf(family, x)?)
    }
}

impl<P: DistributionProvider + ?Sized> DistributionProvider for &P {
    fn cdf(&self, family: Family, x: f64) -> StatsResult<f64> {
        (**self).cdf(family, x)
    }

    fn quantile(&self, family: Family, p: f64) -> StatsResult<f64> {
        (**self).quantile(family, p)
    }

    fn pdf(&self, family: Family, x: f64) -> StatsResult<f64> {
        (**self).pdf(family, x)
    }
}

/// Distribution backend built on `statrs`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Statrs;

/// A constructed `statrs` distribution
enum Dist {
    Normal(Normal),
    StudentT(StudentsT),
    F(FisherSnedecor),
    ChiSquare(ChiSquared),
}

fn convert_error(e: impl std::fmt::Display) -> StatsError {
    StatsError::Domain(e.to_string())
}

impl Statrs {
    fn build(family: Family) -> StatsResult<Dist> {
        family.validate()?;
        let dist = match family {
            Family::Normal => Dist::Normal(Normal::new(0.0, 1.0).map_err(convert_error)?),
            Family::StudentT { df } => {
                Dist::StudentT(StudentsT::new(0.0, 1.0, df).map_err(convert_error)?)
            }
            Family::F { df1, df2 } => {
                Dist::F(FisherSnedecor::new(df1, df2).map_err(convert_error)?)
            }
            Family::ChiSquare { df } => {
                Dist::ChiSquare(ChiSquared::new(df).map_err(convert_error)?)
            }
        };
        Ok(dist)
    }
}

/// Upper bound on bisection steps; a double interval collapses well before this.
const MAX_BISECTION_STEPS: usize = 2048;

/// Invert a continuous CDF by bracketing and bisecting down to float resolution.
///
/// `support_min` is the lower end of the support (`NEG_INFINITY` when unbounded).
/// For a support starting at zero the lower bracket is shrunk geometrically so
/// small quantiles keep their relative precision.
fn bisect_quantile<F: Fn(f64) -> f64>(cdf: F, p: f64, support_min: f64) -> f64 {
    let mut lo = if support_min.is_finite() {
        support_min
    } else {
        -1.0
    };
    let mut hi = 1.0;
    while cdf(hi) < p && hi.is_finite() {
        lo = hi;
        hi *= 2.0;
    }
    if support_min.is_finite() {
        while lo == support_min && hi / 2.0 > support_min.max(f64::MIN_POSITIVE) {
            let half = hi / 2.0;
            if cdf(half) < p {
                lo = half;
            } else {
                hi = half;
            }
        }
    } else {
        while cdf(lo) > p && lo.is_finite() {
            hi = lo;
            lo *= 2.0;
        }
    }

    for _ in 0..MAX_BISECTION_STEPS {
        let mid = lo + (hi - lo) / 2.0;
        if mid <= lo || mid >= hi {
            break;
        }
        if cdf(mid) < p {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    lo + (hi - lo) / 2.0
}

/// Student-t quantile, searched in the upper half and mirrored: q(p) = -q(1 - p).
fn student_t_quantile(d: &StudentsT, p: f64) -> f64 {
    if p == 0.5 {
        return 0.0;
    }
    let upper = bisect_quantile(|x| d.cdf(x), p.max(1.0 - p), 0.0);
    if p < 0.5 {
        -upper
    } else {
        upper
    }
}

impl DistributionProvider for Statrs {
    fn cdf(&self, family: Family, x: f64) -> StatsResult<f64> {
        if x.is_nan() {
            return Err(StatsError::Domain("cdf argument is NaN".into()));
        }
        let p = match Self::build(family)? {
            Dist::Normal(d) => d.cdf(x),
            Dist::StudentT(d) => d.cdf(x),
            Dist::F(d) => d.cdf(x),
            Dist::ChiSquare(d) => d.cdf(x),
        };
        Ok(p.clamp(0.0, 1.0))
    }

    fn quantile(&self, family: Family, p: f64) -> StatsResult<f64> {
        check_probability(p)?;
        let q = match Self::build(family)? {
            Dist::Normal(d) => d.inverse_cdf(p),
            Dist::StudentT(d) => student_t_quantile(&d, p),
            Dist::F(d) => bisect_quantile(|x| d.cdf(x), p, 0.0),
            Dist::ChiSquare(d) => bisect_quantile(|x| d.cdf(x), p, 0.0),
        };
        Ok(q)
    }

    fn pdf(&self, family: Family, x: f64) -> StatsResult<f64> {
        if x.is_nan() {
            return Err(StatsError::Domain("pdf argument is NaN".into()));
        }
        let density = match Self::build(family)? {
            Dist::Normal(d) => d.pdf(x),
            Dist::StudentT(d) => d.pdf(x),
            Dist::F(d) => d.pdf(x),
            Dist::ChiSquare(d) => d.pdf(x),
        };
        Ok(density.max(0.0))
    }
}

/// Critical value bounding the rejection region for `tail` at level `alpha`.
///
/// Two-tailed returns the upper `1 - alpha/2` quantile, upper-tailed the
/// `1 - alpha` quantile and lower-tailed the `alpha` quantile.
pub fn critical_value<D: DistributionProvider>(
    dist: &D,
    family: Family,
    alpha: SignificanceLevel,
    tail: TailType,
) -> StatsResult<f64> {
    let a = alpha.alpha();
    let p = match tail {
        TailType::TwoTailed => 1.0 - a / 2.0,
        TailType::UpperTailed => 1.0 - a,
        TailType::LowerTailed => a,
    };
    dist.quantile(family, p)
}

/// p-value of `statistic` under `family` for the given tail
pub fn p_value<D: DistributionProvider>(
    dist: &D,
    family: Family,
    statistic: f64,
    tail: TailType,
) -> StatsResult<f64> {
    let p = match tail {
        TailType::TwoTailed => 2.0 * dist.survival(family, statistic.abs())?,
        TailType::UpperTailed => dist.survival(family, statistic)?,
        TailType::LowerTailed => dist.cdf(family, statistic)?,
    };
    Ok(p.clamp(0.0, 1.0))
}
