//! inferstat-core: Inferential statistics for teaching tools
//!
//! Confidence intervals, one- and two-sample hypothesis tests, chi-square
//! tests and one-way ANOVA computed from caller-supplied summaries. All
//! operations are pure functions over a [`DistributionProvider`]; [`Statrs`]
//! is the default backend.

pub mod distributions;
pub mod errors;
pub mod intervals;
pub mod simulation;
pub mod tests;
pub mod types;

pub use distributions::{critical_value, p_value, DistributionProvider, Family, Statrs};
pub use errors::{ErrorKind, StatsError, StatsResult};
pub use intervals::{
    interval_for_mean, interval_for_mean_difference, interval_for_mean_difference_with,
    interval_for_mean_with, interval_for_proportion, MeanDifferenceOptions, MeanIntervalOptions,
};
pub use simulation::{
    simulate_interval_coverage, CoverageSimulationOptions, CoverageSimulationResult,
};
pub use tests::categorical::{
    expected_frequencies, goodness_of_fit_test, goodness_of_fit_uniform, independence_test,
    one_proportion_test, one_proportion_test_with, ChiSquareOptions, ProportionTestOptions,
};
pub use tests::parametric::{one_mean_test, one_way_anova, two_sample_t_test};
pub use tests::{AnovaResult, ChiSquareResult, IndependenceResult, TestResult};
pub use types::*;
