use super::{InfectionCourse, IntraHostModel};
use crate::{
    error::{ConfigError, DrawError},
    params::{constants as cte, DiseaseProgressionParameters, ParamStore},
    random::RandomSource,
    Age, DiseaseId, Real,
};
use getset::{CopyGetters, Getters};

/// Intra-host model where every individual is equally infectious.
///
/// Stage durations are drawn exactly as in [`super::HeteroIntraHost`], but the
/// infectivity values are per-disease constants and consume no random numbers.
#[derive(Debug, Clone, PartialEq, Getters, CopyGetters)]
pub struct FixedIntraHost {
    #[getset(get = "pub")]
    progression: DiseaseProgressionParameters,
    #[getset(get_copy = "pub")]
    symp_infectivity: Real,
    #[getset(get_copy = "pub")]
    asymp_infectivity: Real,
}

impl FixedIntraHost {
    pub fn new(
        progression: DiseaseProgressionParameters,
        symp_infectivity: Real,
        asymp_infectivity: Real,
    ) -> Result<Self, ConfigError> {
        for &(name, value) in [
            (cte::SYMP_INFECTIVITY, symp_infectivity),
            (cte::ASYMP_INFECTIVITY, asymp_infectivity),
        ]
        .iter()
        {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidInfectivity {
                    name: name.to_string(),
                    value,
                });
            }
        }
        Ok(FixedIntraHost {
            progression,
            symp_infectivity,
            asymp_infectivity,
        })
    }
}

impl IntraHostModel for FixedIntraHost {
    fn setup(store: &impl ParamStore, disease: DiseaseId) -> Result<Self, ConfigError> {
        let progression = DiseaseProgressionParameters::setup(store, disease)?;
        let symp = store.scalar(cte::SYMP_INFECTIVITY, disease)?;
        let asymp = store.scalar(cte::ASYMP_INFECTIVITY, disease)?;
        Self::new(progression, symp, asymp)
    }

    fn progression(&self) -> &DiseaseProgressionParameters {
        &self.progression
    }

    fn draw_course<R: RandomSource>(
        &self,
        _age: Age,
        rng: &mut R,
    ) -> Result<InfectionCourse, DrawError> {
        let values = (self.symp_infectivity, self.asymp_infectivity);
        InfectionCourse::draw(&self.progression, rng, |_| Ok(values))
    }
}
