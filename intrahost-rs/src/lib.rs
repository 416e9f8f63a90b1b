//! Within-host natural history of an infection for agent-based epidemic
//! simulations.
//!
//! Given that an agent becomes exposed to a pathogen, an intra-host model
//! draws how long the agent stays latent, asymptomatic-infectious and
//! symptomatic-infectious, and how infectious it is on each of those days. The
//! result is a [`Trajectory`], consumed by the outer transmission model.
pub mod batch;
pub mod error;
pub mod infection;
pub mod models;
pub mod params;
pub mod prelude;
pub mod random;
pub mod registry;
pub mod sampler;
pub mod trajectory;
pub mod utils;

pub use crate::error::{ConfigError, DrawError, Error, Result};
pub use crate::models::{FixedIntraHost, HeteroIntraHost, IntraHost, IntraHostModel};
pub use crate::registry::DiseaseRegistry;
pub use crate::trajectory::Trajectory;

/// Basic representation of time. Trajectories are indexed by simulated days.
pub type Day = usize;

/// Base Real type used by this crate. Uses an alias to easily change precision
/// if necessary.
pub type Real = f64;

/// Age of an agent at exposure.
pub type Age = u8;

/// Opaque disease handle, assigned by the parameter store.
pub type DiseaseId = usize;

/// Pathogen strain handle.
pub type StrainId = u32;

/// Oldest age covered by the age-dependent parameter tables.
pub const MAX_AGE: Age = 109;
