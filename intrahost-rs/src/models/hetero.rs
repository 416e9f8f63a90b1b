//! Heterogeneous infectivity.
//!
//! Each infected individual gets its own infectivity, drawn from an
//! age-dependent distribution. This lets the transmission model reproduce the
//! over-dispersion in secondary cases seen in real outbreaks (a few
//! individuals infect many, most infect few).
use super::{InfectionCourse, IntraHostModel};
use crate::{
    error::{ConfigError, DrawError},
    params::{constants as cte, AgeMap, DiseaseProgressionParameters, ParamStore},
    random::RandomSource,
    Age, DiseaseId, Real, MAX_AGE,
};
use getset::{CopyGetters, Getters};
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

/// Family of the per-individual infectivity distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InfectivityDistribution {
    /// Uniform on `[location - scale / 2, location + scale / 2]`.
    Uniform,
}

impl TryFrom<i64> for InfectivityDistribution {
    type Error = ConfigError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(InfectivityDistribution::Uniform),
            _ => Err(ConfigError::UnsupportedDistribution(code)),
        }
    }
}

/// Age-dependent infectivity distribution of one disease.
#[derive(Debug, Clone, PartialEq, Getters, CopyGetters)]
pub struct HeteroInfectivity {
    #[getset(get_copy = "pub")]
    distribution: InfectivityDistribution,

    /// Asymptomatic infectivity relative to symptomatic infectivity.
    #[getset(get_copy = "pub")]
    asymp_multiplier: Real,

    #[getset(get = "pub")]
    location: AgeMap,

    #[getset(get = "pub")]
    scale: AgeMap,
}

impl HeteroInfectivity {
    /// Build and validate. Fails if any age in `0..=MAX_AGE` has a negative
    /// scale or could draw a negative infectivity.
    pub fn new(
        distribution: InfectivityDistribution,
        asymp_multiplier: Real,
        location: AgeMap,
        scale: AgeMap,
    ) -> Result<Self, ConfigError> {
        if !asymp_multiplier.is_finite() || asymp_multiplier < 0.0 {
            return Err(ConfigError::NegativeMultiplier(asymp_multiplier));
        }
        let new = HeteroInfectivity {
            distribution,
            asymp_multiplier,
            location,
            scale,
        };
        new.check_non_negative()?;
        return Ok(new);
    }

    pub fn setup(store: &impl ParamStore, disease: DiseaseId) -> Result<Self, ConfigError> {
        let distribution =
            InfectivityDistribution::try_from(store.integer(cte::HETERO_DISTRIBUTION, disease)?)?;
        let multiplier = store.scalar(cte::HETERO_ASYMP_MULTIPLIER, disease)?;
        let location = store.age_map(cte::HETERO_LOCATION_MAP, disease)?;
        let scale = store.age_map(cte::HETERO_SCALE_MAP, disease)?;
        Self::new(distribution, multiplier, location, scale)
    }

    /// Smallest and largest infectivity that can be drawn at the given age.
    pub fn bounds(&self, age: Age) -> (Real, Real) {
        match self.distribution {
            InfectivityDistribution::Uniform => {
                let loc = self.location.value_at(age);
                let half = self.scale.value_at(age) / 2.0;
                (loc - half, loc + half)
            }
        }
    }

    fn check_non_negative(&self) -> Result<(), ConfigError> {
        for age in 0..=MAX_AGE {
            let scale = self.scale.value_at(age);
            if scale < 0.0 {
                return Err(ConfigError::NegativeScale { age, scale });
            }
            let (lower, _) = self.bounds(age);
            if lower < 0.0 {
                return Err(ConfigError::NegativeInfectivity {
                    age,
                    location: self.location.value_at(age),
                    scale: self.scale.value_at(age),
                });
            }
        }
        Ok(())
    }

    /// Draw the infectivity of a symptomatic individual of the given age.
    pub fn symptomatic_infectivity(
        &self,
        age: Age,
        rng: &mut impl RandomSource,
    ) -> Result<Real, DrawError> {
        if age > MAX_AGE {
            return Err(DrawError::AgeOutOfRange(age));
        }
        let value = match self.distribution {
            InfectivityDistribution::Uniform => {
                let loc = self.location.value_at(age);
                let scale = self.scale.value_at(age);
                (loc - scale / 2.0) + scale * rng.uniform()
            }
        };
        if !value.is_finite() || value < 0.0 {
            return Err(DrawError::InvalidInfectivity { age, value });
        }
        Ok(value)
    }

    /// Draw the infectivity of an asymptomatic individual of the given age.
    ///
    /// This is the multiplier times a fresh symptomatic draw, not a transform
    /// of a previous one.
    pub fn asymptomatic_infectivity(
        &self,
        age: Age,
        rng: &mut impl RandomSource,
    ) -> Result<Real, DrawError> {
        Ok(self.asymp_multiplier * self.symptomatic_infectivity(age, rng)?)
    }
}

/// Intra-host model with per-individual, age-dependent infectivity.
#[derive(Debug, Clone, PartialEq, Getters)]
#[getset(get = "pub")]
pub struct HeteroIntraHost {
    progression: DiseaseProgressionParameters,
    infectivity: HeteroInfectivity,
}

impl HeteroIntraHost {
    pub fn new(progression: DiseaseProgressionParameters, infectivity: HeteroInfectivity) -> Self {
        HeteroIntraHost {
            progression,
            infectivity,
        }
    }
}

impl IntraHostModel for HeteroIntraHost {
    fn setup(store: &impl ParamStore, disease: DiseaseId) -> Result<Self, ConfigError> {
        let progression = DiseaseProgressionParameters::setup(store, disease)?;
        let infectivity = HeteroInfectivity::setup(store, disease)?;
        Ok(Self::new(progression, infectivity))
    }

    fn progression(&self) -> &DiseaseProgressionParameters {
        &self.progression
    }

    fn draw_course<R: RandomSource>(
        &self,
        age: Age,
        rng: &mut R,
    ) -> Result<InfectionCourse, DrawError> {
        InfectionCourse::draw(&self.progression, rng, |rng| {
            let symptomatic = self.infectivity.symptomatic_infectivity(age, rng)?;
            let asymptomatic = self.infectivity.asymptomatic_infectivity(age, rng)?;
            Ok((symptomatic, asymptomatic))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        infection::{uniform_loads, Exposure},
        params::ParamFile,
        random::seeded_rng,
    };
    use assert_approx_eq::assert_approx_eq;

    fn uniform(loc: Real, scale: Real, multiplier: Real) -> Result<HeteroInfectivity, ConfigError> {
        HeteroInfectivity::new(
            InfectivityDistribution::Uniform,
            multiplier,
            AgeMap::constant("location", loc).unwrap(),
            AgeMap::constant("scale", scale).unwrap(),
        )
    }

    #[test]
    fn draws_stay_within_bounds() {
        let location = AgeMap::new("location", vec![(0, 17), (18, 109)], vec![1.0, 4.0]).unwrap();
        let scale = AgeMap::new("scale", vec![(0, 17), (18, 109)], vec![2.0, 1.0]).unwrap();
        let model =
            HeteroInfectivity::new(InfectivityDistribution::Uniform, 0.5, location, scale).unwrap();
        let mut rng = seeded_rng(8);
        for &age in [3u8, 40, 109].iter() {
            let (lo, hi) = model.bounds(age);
            for _ in 0..1_000 {
                let x = model.symptomatic_infectivity(age, &mut rng).unwrap();
                assert!(lo <= x && x <= hi);
                let y = model.asymptomatic_infectivity(age, &mut rng).unwrap();
                assert!(0.5 * lo <= y && y <= 0.5 * hi);
            }
        }
    }

    #[test]
    fn uniform_draw_has_expected_mean() {
        let model = uniform(3.0, 2.0, 1.0).unwrap();
        let mut rng = seeded_rng(5);
        let n = 50_000;
        let mean = (0..n)
            .map(|_| model.symptomatic_infectivity(30, &mut rng).unwrap())
            .sum::<Real>()
            / n as Real;
        assert_approx_eq!(mean, 3.0, 0.02);
    }

    #[test]
    fn asymptomatic_draw_is_independent() {
        let model = uniform(5.0, 4.0, 2.0).unwrap();
        let mut a = seeded_rng(99);
        let mut b = seeded_rng(99);
        let first = model.symptomatic_infectivity(20, &mut a).unwrap();
        let _ = model.symptomatic_infectivity(20, &mut b).unwrap();
        let second = model.symptomatic_infectivity(20, &mut a).unwrap();
        let asymp = model.asymptomatic_infectivity(20, &mut b).unwrap();
        assert_approx_eq!(asymp, 2.0 * second);
        assert!(first != second);
    }

    #[test]
    fn rejects_possibly_negative_infectivity() {
        assert!(uniform(1.0, 2.0, 1.0).is_ok());
        assert!(matches!(
            uniform(1.0, 2.5, 1.0),
            Err(ConfigError::NegativeInfectivity { age: 0, .. })
        ));

        let location = AgeMap::new("location", vec![(0, 64), (65, 109)], vec![2.0, 0.1]).unwrap();
        let scale = AgeMap::constant("scale", 1.0).unwrap();
        let res = HeteroInfectivity::new(InfectivityDistribution::Uniform, 1.0, location, scale);
        assert!(matches!(res, Err(ConfigError::NegativeInfectivity { age: 65, .. })));
    }

    #[test]
    fn negative_scales_have_their_own_error() {
        assert!(matches!(
            uniform(0.2, -1.0, 1.0),
            Err(ConfigError::NegativeScale { age: 0, .. })
        ));

        let location = AgeMap::constant("location", 5.0).unwrap();
        let scale = AgeMap::new("scale", vec![(0, 79), (80, 109)], vec![1.0, -0.5]).unwrap();
        let res = HeteroInfectivity::new(InfectivityDistribution::Uniform, 1.0, location, scale);
        assert!(matches!(res, Err(ConfigError::NegativeScale { age: 80, .. })));
    }

    #[test]
    fn rejects_negative_multiplier() {
        assert!(matches!(
            uniform(1.0, 0.0, -0.5),
            Err(ConfigError::NegativeMultiplier(_))
        ));
    }

    #[test]
    fn unsupported_distribution_is_fatal() {
        assert!(matches!(
            InfectivityDistribution::try_from(1),
            Err(ConfigError::UnsupportedDistribution(1))
        ));
    }

    #[test]
    fn ages_beyond_tables_are_rejected_at_draw_time() {
        let model = uniform(1.0, 0.0, 1.0).unwrap();
        let mut rng = seeded_rng(1);
        assert_eq!(
            model.symptomatic_infectivity(110, &mut rng),
            Err(DrawError::AgeOutOfRange(110))
        );
    }

    const DEGENERATE: &str = r#"
        [[disease]]
        symp = 1.0
        infection_model = 0
        days_latent = [1.0]
        days_asymp = [1.0]
        days_symp = [1.0]
        hetero_infectivity_distribution = 0
        hetero_infectivity_asymp_multiplier = 2.0
        hetero_infectivity_location_map = { ages = [[0, 109]], values = [10.0] }
        hetero_infectivity_scale_map = { ages = [[0, 109]], values = [0.0] }
    "#;

    #[test]
    fn zero_length_stages_give_empty_trajectories() {
        let store: ParamFile = DEGENERATE.parse().unwrap();
        let model = HeteroIntraHost::setup(&store, 0).unwrap();
        assert_eq!(model.max_days(), 0);

        let mut rng = seeded_rng(17);
        let loads = uniform_loads(&[0, 1], 1.0);
        for age in 0..=MAX_AGE {
            let traj = model
                .get_trajectory(&Exposure::new(age, 0), &loads, &mut rng)
                .unwrap();
            assert_eq!(traj.infectivity(0), Some(&[][..]));
            assert_eq!(traj.infectivity(1), Some(&[][..]));
            assert!(traj.symptomaticity().is_empty());

            let course = model.draw_course(age, &mut rng).unwrap();
            assert_eq!(course.symptomatic_infectivity, 10.0);
            assert_eq!(course.asymptomatic_infectivity, 20.0);
        }
    }

    #[test]
    fn setup_rejects_negative_infectivity() {
        let data = DEGENERATE.replace("values = [0.0]", "values = [30.0]");
        let store: ParamFile = data.parse().unwrap();
        assert!(matches!(
            HeteroIntraHost::setup(&store, 0),
            Err(ConfigError::NegativeInfectivity { .. })
        ));
    }
}
