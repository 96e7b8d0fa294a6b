use thiserror::Error;

/// Broad classification of a [`StatsError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Argument outside the mathematical domain of a distribution function
    Domain,
    /// Caller violated a precondition of an engine operation
    InvalidInput,
}

/// Errors that can occur during statistical computations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    // Domain errors
    #[error("Invalid probability: {0} (must be in (0, 1))")]
    InvalidProbability(f64),

    #[error("Invalid significance level: {0} (must be in (0, 1))")]
    InvalidAlpha(f64),

    #[error("Invalid degrees of freedom: {0} (must be finite and > 0)")]
    InvalidDegreesOfFreedom(f64),

    #[error("Invalid standard deviation: {0} (must be finite and >= 0)")]
    NegativeStdDev(f64),

    #[error("Distribution error: {0}")]
    Domain(String),

    // Input validation errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Dimension mismatch: {0}")]
    DimensionMismatchMsg(String),

    #[error("Insufficient data: {0}")]
    InsufficientDataMsg(String),

    #[error("Empty input: {field} cannot be empty")]
    EmptyInput { field: &'static str },

    #[error("Standard error is zero; the test statistic is undefined")]
    ZeroStandardError,

    #[error("Within-group variance is zero; the F statistic is undefined")]
    ZeroVariance,
}

impl StatsError {
    /// Whether this error is a domain error or an input precondition failure
    pub fn kind(&self) -> ErrorKind {
        match self {
            StatsError::InvalidProbability(_)
            | StatsError::InvalidAlpha(_)
            | StatsError::InvalidDegreesOfFreedom(_)
            | StatsError::NegativeStdDev(_)
            | StatsError::Domain(_) => ErrorKind::Domain,
            StatsError::InvalidInput(_)
            | StatsError::DimensionMismatchMsg(_)
            | StatsError::InsufficientDataMsg(_)
            | StatsError::EmptyInput { .. }
            | StatsError::ZeroStandardError
            | StatsError::ZeroVariance => ErrorKind::InvalidInput,
        }
    }

    pub fn is_domain(&self) -> bool {
        self.kind() == ErrorKind::Domain
    }

    pub fn is_invalid_input(&self) -> bool {
        self.kind() == ErrorKind::InvalidInput
    }
}

/// Result type for statistical operations
pub type StatsResult<T> = Result<T, StatsError>;
