//! Intra-host models.
//!
//! An intra-host model turns an exposure into a [`Trajectory`]. Every model
//! shares the same progression state machine ([`InfectionCourse`]) and differs
//! in where infectivity values come from. The model of each disease is chosen
//! once, at setup, by the `intra_host_model` parameter.
mod course;
mod fixed;
mod hetero;

pub use course::*;
pub use fixed::*;
pub use hetero::*;

use crate::{
    error::{ConfigError, DrawError},
    infection::{Infection, Loads},
    params::{constants as cte, DiseaseProgressionParameters, ParamStore},
    random::RandomSource,
    trajectory::Trajectory,
    Age, Day, DiseaseId, MAX_AGE,
};
use log::debug;

/// Common interface of intra-host models.
pub trait IntraHostModel: Sized {
    /// Read and validate the parameters of one disease.
    fn setup(store: &impl ParamStore, disease: DiseaseId) -> Result<Self, ConfigError>;

    fn progression(&self) -> &DiseaseProgressionParameters;

    /// Resolve stage durations and infectivity for an individual of the
    /// given age.
    fn draw_course<R: RandomSource>(&self, age: Age, rng: &mut R)
        -> Result<InfectionCourse, DrawError>;

    /// Draw the full trajectory of a new infection.
    ///
    /// Each strain in `loads` gets its own (identical) infectivity sequence.
    fn get_trajectory<I, R>(
        &self,
        infection: &I,
        loads: &Loads,
        rng: &mut R,
    ) -> Result<Trajectory, DrawError>
    where
        I: Infection,
        R: RandomSource,
    {
        let age = infection.age_at_exposure();
        if age > MAX_AGE {
            return Err(DrawError::AgeOutOfRange(age));
        }
        let course = self.draw_course(age, rng)?;
        debug!(
            target: "trajectory",
            "age {}: latent {}, asymp {}, symp {} days",
            age, course.days_latent, course.days_asymptomatic, course.days_symptomatic
        );
        Ok(course.to_trajectory(loads))
    }

    /// Latent plus the longest single infectious stage.
    fn max_days(&self) -> Day {
        self.progression().max_days()
    }

    /// Upper bound on trajectory length.
    fn max_duration(&self) -> Day {
        self.progression().max_duration()
    }
}

/// Intra-host model of a disease, as selected by its parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum IntraHost {
    Hetero(HeteroIntraHost),
    Fixed(FixedIntraHost),
}

impl IntraHost {
    /// Short name, as used in parameter files.
    pub fn kind(&self) -> &'static str {
        match self {
            IntraHost::Hetero(_) => "hetero",
            IntraHost::Fixed(_) => "fixed",
        }
    }
}

impl IntraHostModel for IntraHost {
    /// Models default to `hetero` when `intra_host_model` is not given.
    fn setup(store: &impl ParamStore, disease: DiseaseId) -> Result<Self, ConfigError> {
        let kind = if store.contains(cte::INTRA_HOST_MODEL, disease) {
            store.text(cte::INTRA_HOST_MODEL, disease)?
        } else {
            "hetero".to_string()
        };
        match kind.as_str() {
            "hetero" => Ok(IntraHost::Hetero(HeteroIntraHost::setup(store, disease)?)),
            "fixed" => Ok(IntraHost::Fixed(FixedIntraHost::setup(store, disease)?)),
            _ => Err(ConfigError::UnknownIntraHostModel(kind)),
        }
    }

    fn progression(&self) -> &DiseaseProgressionParameters {
        match self {
            IntraHost::Hetero(model) => model.progression(),
            IntraHost::Fixed(model) => model.progression(),
        }
    }

    fn draw_course<R: RandomSource>(
        &self,
        age: Age,
        rng: &mut R,
    ) -> Result<InfectionCourse, DrawError> {
        match self {
            IntraHost::Hetero(model) => model.draw_course(age, rng),
            IntraHost::Fixed(model) => model.draw_course(age, rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        infection::{uniform_loads, Exposure},
        params::{ParamFile, ProgressionModel},
        random::seeded_rng,
    };

    const DATA: &str = r#"
        [[disease]]
        name = "covid"
        symp = 0.6
        infection_model = 0
        days_latent = [0.0, 0.1, 0.3, 0.4, 0.2]
        days_asymp = [0.0, 0.2, 0.3, 0.3, 0.2]
        days_symp = [0.0, 0.0, 0.1, 0.2, 0.3, 0.3, 0.1]
        hetero_infectivity_distribution = 0
        hetero_infectivity_asymp_multiplier = 0.5
        hetero_infectivity_location_map = { ages = [[0, 17], [18, 109]], values = [0.8, 1.0] }
        hetero_infectivity_scale_map = { ages = [[0, 109]], values = [1.0] }
        symp_infectivity = 1.0
        asymp_infectivity = 0.5

        [[disease]]
        name = "covid-fixed"
        intra_host_model = "fixed"
        symp = 0.6
        infection_model = 1
        days_latent = [0.0, 0.1, 0.3, 0.4, 0.2]
        days_asymp = [0.0, 0.2, 0.3, 0.3, 0.2]
        days_symp = [0.0, 0.0, 0.1, 0.2, 0.3, 0.3, 0.1]
        symp_infectivity = 1.0
        asymp_infectivity = 0.5
    "#;

    fn setup(disease: DiseaseId) -> IntraHost {
        let store: ParamFile = DATA.parse().unwrap();
        IntraHost::setup(&store, disease).unwrap()
    }

    #[test]
    fn selects_model_from_parameters() {
        assert_eq!(setup(0).kind(), "hetero");
        assert_eq!(setup(1).kind(), "fixed");
        assert_eq!(setup(0).max_days(), 4 + 6);
        assert_eq!(setup(0).max_duration(), 4 + 6);
        assert_eq!(setup(1).max_days(), 4 + 6);
        assert_eq!(setup(1).max_duration(), 4 + 4 + 6);

        let data = DATA.replacen("name = \"covid\"", "intra_host_model = \"pbpk\"", 1);
        let store: ParamFile = data.parse().unwrap();
        assert!(matches!(
            IntraHost::setup(&store, 0),
            Err(ConfigError::UnknownIntraHostModel(_))
        ));
    }

    #[test]
    fn lengths_always_agree() {
        let loads = uniform_loads(&[0, 1, 2], 1.0);
        let mut rng = seeded_rng(2);
        for disease in 0..2 {
            let model = setup(disease);
            for i in 0..2_000 {
                let exposure = Exposure::new((i % 110) as Age, disease);
                let traj = model.get_trajectory(&exposure, &loads, &mut rng).unwrap();
                assert_eq!(traj.strains().count(), 3);
                for strain in traj.strains() {
                    assert_eq!(traj.infectivity(strain).unwrap().len(), traj.duration());
                }
                assert!(traj.duration() <= model.max_duration());
            }
        }
    }

    #[test]
    fn branching_never_mixes_stages() {
        let model = setup(0);
        assert_eq!(model.progression().progression_model(), ProgressionModel::Branching);
        let mut rng = seeded_rng(12);
        for _ in 0..5_000 {
            let course = model.draw_course(50, &mut rng).unwrap();
            assert!(course.days_asymptomatic == 0 || course.days_symptomatic == 0);
            assert_eq!(course.days_symptomatic > 0, course.will_be_symptomatic);
        }
    }

    #[test]
    fn sequential_always_has_asymptomatic_window() {
        let model = setup(1);
        let mut rng = seeded_rng(13);
        let mut both = 0;
        for _ in 0..5_000 {
            let course = model.draw_course(50, &mut rng).unwrap();
            assert!(course.days_asymptomatic > 0);
            if course.days_symptomatic > 0 {
                assert!(course.will_be_symptomatic);
                both += 1;
            }
        }
        assert!(both > 0);
    }

    #[test]
    fn sequential_trajectories_fit_in_max_duration() {
        let model = setup(1);
        let loads = uniform_loads(&[0], 1.0);
        let mut rng = seeded_rng(14);
        let longest = (0..5_000)
            .map(|i| {
                let exposure = Exposure::new((i % 110) as Age, 1);
                model.get_trajectory(&exposure, &loads, &mut rng).unwrap().duration()
            })
            .max()
            .unwrap();
        assert!(longest > model.max_days());
        assert!(longest <= model.max_duration());
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let model = setup(0);
        let loads = uniform_loads(&[0], 1.0);
        let run = |seed| {
            let mut rng = seeded_rng(seed);
            (0..100)
                .map(|i| {
                    model
                        .get_trajectory(&Exposure::new(i as Age, 0), &loads, &mut rng)
                        .unwrap()
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(run(7), run(7));
    }

    #[test]
    fn rejects_ages_outside_tables() {
        let model = setup(1);
        let mut rng = seeded_rng(0);
        let res = model.get_trajectory(&Exposure::new(120, 1), &uniform_loads(&[0], 1.0), &mut rng);
        assert_eq!(res, Err(DrawError::AgeOutOfRange(120)));
    }
}
