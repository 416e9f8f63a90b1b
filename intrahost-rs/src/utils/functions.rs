use crate::{prelude::AgeDistribution10, Age, MAX_AGE};
use rand::distributions::WeightedIndex;
use rand::prelude::*;

/// Sample n ages from ten-year age bins. Weights do not need to be normalized;
/// within a bin ages are uniform. Returns `None` if the weights are invalid.
pub fn random_ages(n: usize, rng: &mut impl Rng, probs: &AgeDistribution10) -> Option<Vec<Age>> {
    let distrib = WeightedIndex::new(probs.iter()).ok()?;
    let ages = (0..n)
        .map(|_| ((10 * distrib.sample(rng) + rng.gen_range(0..10)) as Age).min(MAX_AGE))
        .collect();
    return Some(ages);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::seeded_rng;

    #[test]
    fn ages_fall_in_weighted_bins() {
        let mut probs = [0.0; 11];
        probs[2] = 1.0;
        probs[10] = 1.0;
        let ages = random_ages(1_000, &mut seeded_rng(3), &probs).unwrap();
        assert!(ages.iter().all(|&a| (20..30).contains(&a) || a >= 100));
        assert!(ages.iter().all(|&a| a <= MAX_AGE));
    }

    #[test]
    fn all_zero_weights_are_rejected() {
        assert!(random_ages(10, &mut seeded_rng(3), &[0.0; 11]).is_none());
    }
}
