//! Per-disease parameters.
//!
//! Diseases are configured once, before any trajectory is drawn. Values come
//! from a [`ParamStore`], which answers named lookups for a given disease id.
//! [`ParamFile`] is the TOML-backed store used by the binary and tests.
mod age_map;
pub mod constants;
mod param_file;
mod progression;

pub use age_map::*;
pub use param_file::*;
pub use progression::*;

use crate::{error::ConfigError, DiseaseId, Real};

/// Named, per-disease parameter lookups.
///
/// Missing keys must be reported as [`ConfigError::MissingParameter`] and
/// values of the wrong type as [`ConfigError::MalformedParameter`].
pub trait ParamStore {
    /// Number of diseases configured, with ids `0..disease_count()`.
    fn disease_count(&self) -> usize;

    /// True if the parameter is present for the disease.
    fn contains(&self, name: &str, disease: DiseaseId) -> bool;

    fn scalar(&self, name: &str, disease: DiseaseId) -> Result<Real, ConfigError>;

    fn integer(&self, name: &str, disease: DiseaseId) -> Result<i64, ConfigError>;

    fn text(&self, name: &str, disease: DiseaseId) -> Result<String, ConfigError>;

    /// Read a vector of values. Its length is the number of entries read.
    fn vector(&self, name: &str, disease: DiseaseId) -> Result<Vec<Real>, ConfigError>;

    fn age_map(&self, name: &str, disease: DiseaseId) -> Result<AgeMap, ConfigError>;

    /// Scalar lookup that checks the value is a probability.
    fn probability(&self, name: &str, disease: DiseaseId) -> Result<Real, ConfigError> {
        let value = self.scalar(name, disease)?;
        if !(0.0..=1.0).contains(&value) {
            return Err(ConfigError::ProbabilityOutOfRange {
                name: name.to_string(),
                value,
            });
        }
        Ok(value)
    }
}
