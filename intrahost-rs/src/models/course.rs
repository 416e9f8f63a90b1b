use crate::{
    error::DrawError,
    infection::Loads,
    params::{DiseaseProgressionParameters, ProgressionModel},
    random::RandomSource,
    trajectory::Trajectory,
    Day, Real,
};
use serde::{Deserialize, Serialize};
use std::iter;

/// Resolved natural history of one infection.
///
/// Stages always come in the order latent, asymptomatic-infectious,
/// symptomatic-infectious; any of them may last zero days.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InfectionCourse {
    pub will_be_symptomatic: bool,
    pub days_latent: Day,
    pub days_asymptomatic: Day,
    pub days_symptomatic: Day,
    pub symptomatic_infectivity: Real,
    pub asymptomatic_infectivity: Real,
}

impl InfectionCourse {
    /// Run the progression state machine.
    ///
    /// Random numbers are consumed in a fixed order: symptom onset, latent
    /// duration, then `infectivity` (which returns the symptomatic and
    /// asymptomatic values, in that order), then the infectious stage
    /// durations. Both infectivity values are drawn even when only one of
    /// them ends up in the trajectory.
    pub fn draw<R, F>(
        params: &DiseaseProgressionParameters,
        rng: &mut R,
        infectivity: F,
    ) -> Result<Self, DrawError>
    where
        R: RandomSource,
        F: FnOnce(&mut R) -> Result<(Real, Real), DrawError>,
    {
        let will_be_symptomatic = params.draw_symptoms(rng);
        let days_latent = params.draw_days_latent(rng);
        let (symptomatic_infectivity, asymptomatic_infectivity) = infectivity(rng)?;

        let mut days_asymptomatic = 0;
        let mut days_symptomatic = 0;
        match params.progression_model() {
            ProgressionModel::Sequential => {
                days_asymptomatic = params.draw_days_asymp(rng);
                if will_be_symptomatic {
                    days_symptomatic = params.draw_days_symp(rng);
                }
            }
            ProgressionModel::Branching => {
                if will_be_symptomatic {
                    days_symptomatic = params.draw_days_symp(rng);
                } else {
                    days_asymptomatic = params.draw_days_asymp(rng);
                }
            }
        }

        Ok(InfectionCourse {
            will_be_symptomatic,
            days_latent,
            days_asymptomatic,
            days_symptomatic,
            symptomatic_infectivity,
            asymptomatic_infectivity,
        })
    }

    /// Days before symptom onset.
    pub fn days_incubating(&self) -> Day {
        self.days_latent + self.days_asymptomatic
    }

    pub fn duration(&self) -> Day {
        self.days_incubating() + self.days_symptomatic
    }

    /// Day-indexed infectivity, shared by every strain.
    pub fn infectivity_trajectory(&self) -> Vec<Real> {
        iter::repeat(0.0)
            .take(self.days_latent)
            .chain(iter::repeat(self.asymptomatic_infectivity).take(self.days_asymptomatic))
            .chain(iter::repeat(self.symptomatic_infectivity).take(self.days_symptomatic))
            .collect()
    }

    pub fn symptomaticity_trajectory(&self) -> Vec<Real> {
        iter::repeat(0.0)
            .take(self.days_incubating())
            .chain(iter::repeat(1.0).take(self.days_symptomatic))
            .collect()
    }

    /// Assemble the trajectory handed to the transmission model.
    ///
    /// Load magnitudes are ignored: every strain gets the same infectivity.
    pub fn to_trajectory(&self, loads: &Loads) -> Trajectory {
        let mut trajectory = Trajectory::new();
        let infectivity = self.infectivity_trajectory();
        for &strain in loads.keys() {
            trajectory.set_infectivity_trajectory(strain, infectivity.clone());
        }
        trajectory.set_symptomaticity_trajectory(self.symptomaticity_trajectory());
        return trajectory;
    }
}
