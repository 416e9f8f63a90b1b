pub use crate::batch::generate_batch;
pub use crate::error::{ConfigError, DrawError};
pub use crate::infection::{Exposure, Infection, Loads};
pub use crate::models::*;
pub use crate::params::{AgeMap, DiseaseProgressionParameters, ParamFile, ParamStore, ProgressionModel};
pub use crate::random::{default_rng, seeded_rng, seeded_stream, RandomSource};
pub use crate::registry::DiseaseRegistry;
pub use crate::sampler::{draw_duration, DurationPmf};
pub use crate::trajectory::{Trajectory, TrajectoryRow};
pub use crate::{Age, Day, DiseaseId, Real, StrainId, MAX_AGE};

/// An age distribution array in bins of 10 years, covering ages 0 to 109.
pub type AgeDistribution10 = [Real; 11];

/// Simple trait to simplify the use of age-dependent values/parameters.
pub trait ForAge<T> {
    /// Return the content of parameter for agents with the given age.
    fn for_age(&self, age: Age) -> T;
}

impl ForAge<Real> for Real {
    fn for_age(&self, _age: Age) -> Real {
        *self
    }
}

impl ForAge<Real> for AgeDistribution10 {
    fn for_age(&self, age: Age) -> Real {
        self[((age / 10) as usize).min(10)]
    }
}
