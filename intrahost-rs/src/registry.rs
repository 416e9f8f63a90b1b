use crate::{
    error::{ConfigError, DrawError},
    infection::{Infection, Loads},
    models::{IntraHost, IntraHostModel},
    params::ParamStore,
    random::RandomSource,
    trajectory::Trajectory,
    DiseaseId,
};
use log::info;

/// The intra-host model of every configured disease.
///
/// Built once before the simulation starts, then only read. Sharing it
/// between worker threads is safe as long as each worker owns its generator.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DiseaseRegistry {
    models: Vec<IntraHost>,
}

impl DiseaseRegistry {
    /// Set up every disease in the store, failing on the first invalid one.
    pub fn setup(store: &impl ParamStore) -> Result<Self, ConfigError> {
        let models = (0..store.disease_count())
            .map(|disease| IntraHost::setup(store, disease))
            .collect::<Result<Vec<_>, _>>()?;
        info!("{} disease model(s) ready", models.len());
        Ok(DiseaseRegistry { models })
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn get(&self, disease: DiseaseId) -> Option<&IntraHost> {
        self.models.get(disease)
    }

    pub fn iter(&self) -> impl Iterator<Item = (DiseaseId, &IntraHost)> {
        self.models.iter().enumerate()
    }

    /// Draw a trajectory with the model of the infection's disease.
    pub fn get_trajectory<I, R>(
        &self,
        infection: &I,
        loads: &Loads,
        rng: &mut R,
    ) -> Result<Trajectory, DrawError>
    where
        I: Infection,
        R: RandomSource,
    {
        let disease = infection.disease_id();
        self.get(disease)
            .ok_or(DrawError::UnknownDisease(disease))?
            .get_trajectory(infection, loads, rng)
    }
}
