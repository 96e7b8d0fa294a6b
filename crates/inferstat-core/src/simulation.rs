//! Repeated-sampling coverage of z intervals
//!
//! Draws many samples from a known normal population, builds the known-sigma
//! interval for each and counts how often the interval covers the true mean.

use crate::distributions::{DistributionProvider, Family};
use crate::errors::{StatsError, StatsResult};
use crate::types::{ConfidenceInterval, SignificanceLevel};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use statrs::distribution::Normal;
use tracing::debug;

/// Options for a coverage simulation
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoverageSimulationOptions {
    /// Population mean
    pub mu: f64,
    /// Population standard deviation (known)
    pub sigma: f64,
    /// Size of each sample
    pub sample_size: usize,
    /// Significance level
    pub alpha: f64,
    /// Number of samples drawn
    pub repetitions: usize,
    /// Optional seed for reproducibility
    pub seed: Option<u64>,
}

impl Default for CoverageSimulationOptions {
    fn default() -> Self {
        Self {
            mu: 50.0,
            sigma: 10.0,
            sample_size: 30,
            alpha: 0.05,
            repetitions: 100,
            seed: None,
        }
    }
}

/// Result of a coverage simulation
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoverageSimulationResult {
    /// One interval per repetition, in draw order
    pub intervals: Vec<ConfidenceInterval>,
    /// Number of intervals containing `mu`
    pub covered: usize,
    /// `covered / repetitions`
    pub coverage: f64,
    /// Nominal confidence level 1 - alpha
    pub nominal: f64,
}

/// Simulate interval coverage for a normal population with known sigma
pub fn simulate_interval_coverage<D: DistributionProvider>(
    dist: &D,
    options: &CoverageSimulationOptions,
) -> StatsResult<CoverageSimulationResult> {
    let alpha = SignificanceLevel::new(options.alpha)?;
    if !options.mu.is_finite() {
        return Err(StatsError::InvalidInput("mu must be finite".into()));
    }
    if !(options.sigma.is_finite() && options.sigma > 0.0) {
        return Err(StatsError::NegativeStdDev(options.sigma));
    }
    if options.sample_size == 0 {
        return Err(StatsError::InvalidInput("sample size must be >= 1".into()));
    }
    if options.repetitions == 0 {
        return Err(StatsError::InvalidInput("repetitions must be >= 1".into()));
    }

    let population = Normal::new(options.mu, options.sigma)
        .map_err(|e| StatsError::Domain(e.to_string()))?;
    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let se = options.sigma / (options.sample_size as f64).sqrt();
    let critical = dist.quantile(Family::Normal, 1.0 - alpha.alpha() / 2.0)?;

    let intervals: Vec<ConfidenceInterval> = (0..options.repetitions)
        .map(|_| {
            let sum: f64 = (&mut rng)
                .sample_iter::<f64, _>(&population)
                .take(options.sample_size)
                .sum();
            let mean = sum / options.sample_size as f64;
            ConfidenceInterval::from_parts(mean, se, critical, None, alpha)
        })
        .collect();

    let covered = intervals.iter().filter(|ci| ci.contains(options.mu)).count();
    let coverage = covered as f64 / options.repetitions as f64;

    debug!(
        repetitions = options.repetitions,
        covered,
        coverage,
        nominal = alpha.confidence(),
        "interval coverage simulation"
    );

    Ok(CoverageSimulationResult {
        intervals,
        covered,
        coverage,
        nominal: alpha.confidence(),
    })
}
