use crate::{Age, DiseaseId, Real, StrainId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Pathogen loads an agent was exposed to, keyed by strain.
///
/// Magnitudes are carried along but every strain currently receives the same
/// trajectory shape.
pub type Loads = BTreeMap<StrainId, Real>;

/// The view of an infection an intra-host model needs.
pub trait Infection {
    /// Agent's age when exposed.
    fn age_at_exposure(&self) -> Age;

    /// Disease the agent was exposed to.
    fn disease_id(&self) -> DiseaseId;
}

/// Minimal infection record, used by the batch driver and tests.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Exposure {
    pub age: Age,
    pub disease: DiseaseId,
}

impl Exposure {
    pub fn new(age: Age, disease: DiseaseId) -> Self {
        Exposure { age, disease }
    }
}

impl Infection for Exposure {
    fn age_at_exposure(&self) -> Age {
        self.age
    }

    fn disease_id(&self) -> DiseaseId {
        self.disease
    }
}

/// Loads with the same magnitude for each strain.
pub fn uniform_loads(strains: &[StrainId], magnitude: Real) -> Loads {
    strains.iter().map(|&s| (s, magnitude)).collect()
}
