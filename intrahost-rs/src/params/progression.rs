use super::{constants as cte, ParamStore};
use crate::{error::ConfigError, random::RandomSource, sampler::DurationPmf, Day, DiseaseId, Real};
use getset::{CopyGetters, Getters};
use log::info;
use paste::paste;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

/// How an infection moves through the infectious stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgressionModel {
    /// SEIR/SEiR: after latency an infection is either asymptomatic-infectious
    /// or symptomatic-infectious, never both.
    Branching,
    /// SEiIR: every infection is asymptomatic-infectious first; symptomatic
    /// ones then continue into a symptomatic window.
    Sequential,
}

impl TryFrom<i64> for ProgressionModel {
    type Error = ConfigError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(ProgressionModel::Branching),
            1 => Ok(ProgressionModel::Sequential),
            _ => Err(ConfigError::UnsupportedProgressionModel(code)),
        }
    }
}

impl Default for ProgressionModel {
    fn default() -> Self {
        ProgressionModel::Branching
    }
}

/// Stage durations and symptom probability of one disease.
///
/// Built once at setup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Getters, CopyGetters)]
pub struct DiseaseProgressionParameters {
    #[getset(get = "pub")]
    name: String,

    /// Probability that an infection becomes symptomatic.
    #[getset(get_copy = "pub")]
    prob_symptomatic: Real,

    #[getset(get_copy = "pub")]
    progression_model: ProgressionModel,

    #[getset(get = "pub")]
    days_latent: DurationPmf,

    #[getset(get = "pub")]
    days_asymp: DurationPmf,

    #[getset(get = "pub")]
    days_symp: DurationPmf,

    /// Latent plus the longest single infectious stage. Used to pre-size
    /// buffers; sequential courses can run longer, see `max_duration`.
    #[getset(get_copy = "pub")]
    max_days: Day,

    /// Longest trajectory this disease can produce.
    #[getset(get_copy = "pub")]
    max_duration: Day,
}

macro_rules! stage_durations {
    ($($stage:ident),* $(,)?) => {
        paste! {
            $(
                /// Draw the number of days spent in this stage.
                pub fn [<draw_ $stage>](&self, rng: &mut impl RandomSource) -> Day {
                    self.$stage.draw(rng)
                }

                pub fn [<max_ $stage>](&self) -> Day {
                    self.$stage.max_day()
                }
            )*
        }
    };
}

impl DiseaseProgressionParameters {
    pub fn new(
        name: &str,
        prob_symptomatic: Real,
        progression_model: ProgressionModel,
        days_latent: DurationPmf,
        days_asymp: DurationPmf,
        days_symp: DurationPmf,
    ) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&prob_symptomatic) {
            return Err(ConfigError::ProbabilityOutOfRange {
                name: cte::PROB_SYMPTOMATIC.to_string(),
                value: prob_symptomatic,
            });
        }
        let max_days = days_latent.max_day() + days_asymp.max_day().max(days_symp.max_day());
        let max_duration = match progression_model {
            ProgressionModel::Branching => max_days,
            ProgressionModel::Sequential => {
                days_latent.max_day() + days_asymp.max_day() + days_symp.max_day()
            }
        };

        Ok(DiseaseProgressionParameters {
            name: name.to_string(),
            prob_symptomatic,
            progression_model,
            days_latent,
            days_asymp,
            days_symp,
            max_days,
            max_duration,
        })
    }

    /// Read the progression parameters of a disease from the store.
    pub fn setup(store: &impl ParamStore, disease: DiseaseId) -> Result<Self, ConfigError> {
        let name = if store.contains(cte::NAME, disease) {
            store.text(cte::NAME, disease)?
        } else {
            format!("disease {}", disease)
        };
        let prob_symptomatic = store.probability(cte::PROB_SYMPTOMATIC, disease)?;
        let read_pmf = |key: &str| DurationPmf::new(key, store.vector(key, disease)?);
        let days_latent = read_pmf(cte::DAYS_LATENT)?;
        let days_asymp = read_pmf(cte::DAYS_ASYMP)?;
        let days_symp = read_pmf(cte::DAYS_SYMP)?;
        let model = ProgressionModel::try_from(store.integer(cte::INFECTION_MODEL, disease)?)?;

        let params = Self::new(&name, prob_symptomatic, model, days_latent, days_asymp, days_symp)?;
        info!(
            "{}: {:?} progression, P(symptomatic) = {}, at most {} days",
            params.name, params.progression_model, params.prob_symptomatic, params.max_duration
        );
        return Ok(params);
    }

    stage_durations!(days_latent, days_asymp, days_symp);

    /// Bernoulli draw deciding if an infection will show symptoms.
    pub fn draw_symptoms(&self, rng: &mut impl RandomSource) -> bool {
        rng.uniform() < self.prob_symptomatic
    }

    /// Infections never leave a waning period in this model.
    pub fn days_susceptible(&self) -> Day {
        0
    }
}
