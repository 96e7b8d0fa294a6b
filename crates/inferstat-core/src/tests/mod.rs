//! Statistical hypothesis testing
//!
//! Decision rules shared by the parametric (Z, t, F) and categorical
//! (proportion, chi-square) tests.


use crate::distributions::Family;
use crate::types::{SignificanceLevel, TailType};

/// Outcome of a Z or t test
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TestResult {
    /// Test statistic (z or t)
    pub statistic: f64,
    /// Critical value bounding the rejection region (upper bound for two-tailed tests)
    pub critical_value: Option<f64>,
    /// p-value
    pub p_value: f64,
    /// Whether H0 is rejected at `alpha`
    pub reject: bool,
    /// Standard error in the denominator of the statistic
    pub standard_error: f64,
    /// Degrees of freedom (None for z tests)
    pub df: Option<f64>,
    /// Significance level used
    pub alpha: f64,
    /// Rejection region
    pub tail: TailType,
    /// Test method/name
    pub method: String,
}

/// One-way ANOVA table
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnovaResult {
    /// F statistic
    pub f_statistic: f64,
    /// p-value
    pub p_value: f64,
    /// Between-groups degrees of freedom (k - 1)
    pub df_between: usize,
    /// Within-groups degrees of freedom (N - k)
    pub df_within: usize,
    /// Between-groups sum of squares
    pub ss_between: f64,
    /// Within-groups sum of squares
    pub ss_within: f64,
    /// Between-groups mean square
    pub ms_between: f64,
    /// Within-groups mean square
    pub ms_within: f64,
    /// Mean of all pooled observations
    pub grand_mean: f64,
    /// Mean of each group, in input order
    pub group_means: Vec<f64>,
    /// Number of groups
    pub n_groups: usize,
    /// Total sample size
    pub n: usize,
}

impl AnovaResult {
    /// At least one group mean differs at level `alpha`
    pub fn reject(&self, alpha: SignificanceLevel) -> bool {
        self.p_value < alpha.alpha()
    }
}

/// Chi-square goodness-of-fit result
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChiSquareResult {
    /// Chi-square statistic
    pub statistic: f64,
    /// p-value
    pub p_value: f64,
    /// Degrees of freedom
    pub df: usize,
    /// Expected frequency of each category
    pub expected: Vec<f64>,
    /// Method name
    pub method: String,
}

impl ChiSquareResult {
    /// The observed frequencies do not fit the expected ones at level `alpha`
    pub fn reject(&self, alpha: SignificanceLevel) -> bool {
        self.p_value < alpha.alpha()
    }
}

/// Chi-square test of independence result
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndependenceResult {
    /// Chi-square statistic
    pub statistic: f64,
    /// p-value
    pub p_value: f64,
    /// Degrees of freedom, (rows - 1)(cols - 1)
    pub df: usize,
    /// Expected counts under independence, same shape as the input table
    pub expected: Vec<Vec<f64>>,
    /// Whether Yates' continuity correction was applied
    pub corrected: bool,
    /// Method name
    pub method: String,
}

impl IndependenceResult {
    /// The variables are associated at level `alpha`
    pub fn reject(&self, alpha: SignificanceLevel) -> bool {
        self.p_value < alpha.alpha()
    }
}

/// Critical-value decision. Inequalities are strict: a statistic equal to the
/// critical value is never rejected.
pub(crate) fn in_rejection_region(statistic: f64, critical: f64, tail: TailType) -> bool {
    match tail {
        TailType::TwoTailed => statistic.abs() > critical,
        TailType::UpperTailed => statistic > critical,
        TailType::LowerTailed => statistic < critical,
    }
}

/// Short label for a Z/t reference family
pub(crate) fn family_label(family: Family) -> &'static str {
    match family {
        Family::Normal => "z",
        Family::StudentT { .. } => "t",
        Family::F { .. } => "F",
        Family::ChiSquare { .. } => "chi-square",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_region_is_strict() {
        assert!(!in_rejection_region(1.96, 1.96, TailType::TwoTailed));
        assert!(!in_rejection_region(-1.96, 1.96, TailType::TwoTailed));
        assert!(in_rejection_region(-1.97, 1.96, TailType::TwoTailed));
        assert!(!in_rejection_region(1.64, 1.64, TailType::UpperTailed));
        assert!(in_rejection_region(1.65, 1.64, TailType::UpperTailed));
        assert!(!in_rejection_region(-1.64, -1.64, TailType::LowerTailed));
        assert!(in_rejection_region(-1.65, -1.64, TailType::LowerTailed));
    }

    #[test]
    fn test_family_label() {
        assert_eq!(family_label(Family::Normal), "z");
        assert_eq!(family_label(Family::StudentT { df: 3.0 }), "t");
    }
}
