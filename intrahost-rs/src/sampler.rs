use crate::{error::ConfigError, random::RandomSource, Day, Real};
use getset::Getters;
use log::warn;

/// An empirical distribution over how many days a disease stage lasts.
///
/// Weights are indexed by day-count `0..=max_day` and do not need to be
/// normalized. The cumulative distribution is computed once, so each draw
/// costs one uniform number and a binary search.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct DurationPmf {
    #[getset(get = "pub")]
    name: String,
    #[getset(get = "pub")]
    weights: Vec<Real>,
    cdf: Vec<Real>,
}

impl DurationPmf {
    /// Validate weights and build the cumulative table.
    ///
    /// Empty, all-zero, negative and non-finite weights are rejected. Weights
    /// that do not add up to one are normalized by their actual sum.
    pub fn new(name: &str, weights: Vec<Real>) -> Result<Self, ConfigError> {
        if weights.is_empty() {
            return Err(ConfigError::EmptyDistribution(name.to_string()));
        }
        for (day, &weight) in weights.iter().enumerate() {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ConfigError::InvalidWeight {
                    name: name.to_string(),
                    day,
                    weight,
                });
            }
        }

        let mut acc = 0.0;
        let mut cdf: Vec<Real> = weights
            .iter()
            .map(|w| {
                acc += w;
                acc
            })
            .collect();
        let total = acc;
        if total <= 0.0 {
            return Err(ConfigError::ZeroDistribution(name.to_string()));
        }
        if (total - 1.0).abs() > 1e-6 {
            warn!("'{}' weights add up to {}, normalizing", name, total);
        }
        for c in cdf.iter_mut() {
            *c /= total;
        }

        Ok(DurationPmf {
            name: name.to_string(),
            weights,
            cdf,
        })
    }

    /// Largest day-count this distribution can produce.
    pub fn max_day(&self) -> Day {
        self.weights.len() - 1
    }

    /// Draw a stage duration in `0..=max_day`.
    pub fn draw(&self, rng: &mut impl RandomSource) -> Day {
        let u = rng.uniform();
        let day = self.cdf.partition_point(|&c| c <= u);

        // The last cumulative value is total / total == 1.0 > u, so the search
        // always lands in range. Clamp anyway against exotic rounding.
        day.min(self.max_day())
    }

    /// Expected duration in days.
    pub fn mean(&self) -> Real {
        let total: Real = self.weights.iter().sum();
        self.weights
            .iter()
            .enumerate()
            .map(|(day, w)| day as Real * w)
            .sum::<Real>()
            / total
    }
}

/// Draw an integer day-count in `0..=max_day` from unnormalized weights.
///
/// `pmf` must hold exactly `max_day + 1` weights. Prefer building a
/// [`DurationPmf`] once when drawing repeatedly from the same weights.
pub fn draw_duration(
    max_day: Day,
    pmf: &[Real],
    rng: &mut impl RandomSource,
) -> Result<Day, ConfigError> {
    if pmf.len().checked_sub(1) != Some(max_day) {
        return Err(ConfigError::LengthMismatch {
            name: "pmf".to_string(),
            len: pmf.len(),
            expected: max_day.saturating_add(1),
        });
    }
    let distribution = DurationPmf::new("pmf", pmf.to_vec())?;
    Ok(distribution.draw(rng))
}
