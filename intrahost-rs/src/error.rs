//! Error types.
//!
//! Errors come in two flavours. [`ConfigError`] is raised while a disease is
//! being set up and means the disease model cannot be trusted. [`DrawError`] is
//! raised while drawing a trajectory and signals a broken invariant that setup
//! validation should already have excluded. Neither is transient: callers
//! should stop the run rather than retry.
use crate::{Age, DiseaseId, Real};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing parameter '{name}' for disease {disease}")]
    MissingParameter { name: String, disease: DiseaseId },

    #[error("malformed parameter '{name}' for disease {disease}: {message}")]
    MalformedParameter {
        name: String,
        disease: DiseaseId,
        message: String,
    },

    #[error("duration distribution '{0}' is empty")]
    EmptyDistribution(String),

    #[error("duration distribution '{0}' has no positive weight")]
    ZeroDistribution(String),

    #[error("duration distribution '{name}' has invalid weight {weight} at day {day}")]
    InvalidWeight { name: String, day: usize, weight: Real },

    #[error("duration distribution '{name}' has {len} weights, expected {expected}")]
    LengthMismatch {
        name: String,
        len: usize,
        expected: usize,
    },

    #[error("probability '{name}' must lie in [0, 1], got {value}")]
    ProbabilityOutOfRange { name: String, value: Real },

    #[error("asymptomatic infectivity multiplier must be a non-negative number, got {0}")]
    NegativeMultiplier(Real),

    #[error("infectivity '{name}' must be a non-negative number, got {value}")]
    InvalidInfectivity { name: String, value: Real },

    #[error("unsupported heterogeneous infectivity distribution {0} (only 0 = uniform is supported)")]
    UnsupportedDistribution(i64),

    #[error("unsupported infection model {0} (expected 0 = branching or 1 = sequential)")]
    UnsupportedProgressionModel(i64),

    #[error("unknown intra-host model '{0}' (expected 'hetero' or 'fixed')")]
    UnknownIntraHostModel(String),

    #[error(
        "heterogeneous infectivity can be negative at age {age}: \
         location {location} - scale {scale} / 2 < 0"
    )]
    NegativeInfectivity { age: Age, location: Real, scale: Real },

    #[error("heterogeneous infectivity scale must be non-negative, got {scale} at age {age}")]
    NegativeScale { age: Age, scale: Real },

    #[error("age map '{name}': {message}")]
    InvalidAgeMap { name: String, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl ConfigError {
    pub fn missing(name: &str, disease: DiseaseId) -> Self {
        ConfigError::MissingParameter {
            name: name.to_string(),
            disease,
        }
    }

    pub fn malformed(name: &str, disease: DiseaseId, message: impl Into<String>) -> Self {
        ConfigError::MalformedParameter {
            name: name.to_string(),
            disease,
            message: message.into(),
        }
    }

    pub fn age_map(name: &str, message: impl Into<String>) -> Self {
        ConfigError::InvalidAgeMap {
            name: name.to_string(),
            message: message.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DrawError {
    #[error("age {0} at exposure is outside the supported range 0..=109")]
    AgeOutOfRange(Age),

    #[error("drew invalid infectivity {value} for age {age}")]
    InvalidInfectivity { age: Age, value: Real },

    #[error("no intra-host model was set up for disease {0}")]
    UnknownDisease(DiseaseId),
}

/// Any failure raised by this crate.
#[derive(Error, Debug)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("trajectory error: {0}")]
    Draw(#[from] DrawError),
}

impl Error {
    /// True for errors raised while setting diseases up.
    pub fn is_config(&self) -> bool {
        matches!(self, Error::Config(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
