use rand::Rng;
use rand_distr::{Beta, Distribution};

use crate::error::{BanditError, Result};
use crate::policy::{Context, Policy, argmax, check_arm, check_n_arms};

/// Thompson Sampling policy using Beta distribution
///
/// This policy maintains a Beta(successes, failures) posterior for each arm,
/// starting from the uniform Beta(1, 1) prior, and plays the arm whose
/// posterior sample is largest. Rewards are binary: a reward of exactly `1.0`
/// counts as a success and anything else as a failure, so continuous rewards
/// must be thresholded by the caller.
#[derive(Clone, Debug)]
pub struct ThompsonSampling {
    /// Beta alpha parameter per arm (prior 1 plus observed successes)
    successes: Vec<f64>,
    /// Beta beta parameter per arm (prior 1 plus observed failures)
    failures: Vec<f64>,
}

impl ThompsonSampling {
    /// Creates a new Thompson Sampling policy with uniform Beta(1,1) priors
    pub fn new(n_arms: usize) -> Result<Self> {
        check_n_arms(n_arms)?;
        log::debug!("thompson sampling policy: n_arms={n_arms}");
        Ok(Self {
            successes: vec![1.0; n_arms],
            failures: vec![1.0; n_arms],
        })
    }

    /// Beta alpha parameters, one per arm
    pub fn successes(&self) -> &[f64] {
        &self.successes
    }

    /// Beta beta parameters, one per arm
    pub fn failures(&self) -> &[f64] {
        &self.failures
    }

    fn sample<R: Rng + ?Sized>(&self, arm: usize, rng: &mut R) -> Result<f64> {
        let dist = Beta::new(self.successes[arm], self.failures[arm]).map_err(|e| {
            BanditError::NumericalError {
                message: format!("beta posterior for arm {arm}: {e}"),
            }
        })?;
        Ok(dist.sample(rng))
    }
}

impl Policy for ThompsonSampling {
    fn n_arms(&self) -> usize {
        self.successes.len()
    }

    fn select_action(
        &mut self,
        _context: &Context<'_>,
        rng: &mut dyn rand::RngCore,
    ) -> Result<usize> {
        let samples = (0..self.n_arms())
            .map(|arm| self.sample(arm, &mut *rng))
            .collect::<Result<Vec<_>>>()?;
        let action = argmax(samples).ok_or(BanditError::NoArmsAvailable)?;
        log::trace!("thompson sampling selected arm {action}");
        Ok(action)
    }

    fn update(&mut self, action: usize, _context: &[f64], reward: f64) -> Result<()> {
        check_arm(action, self.n_arms())?;
        if reward == 1.0 {
            self.successes[action] += 1.0;
        } else {
            self.failures[action] += 1.0;
        }
        log::trace!("thompson sampling update: arm={action} reward={reward}");
        Ok(())
    }

    /// Posterior means `s / (s + f)`
    fn expectations(&self, _context: &Context<'_>) -> Result<Vec<f64>> {
        Ok(self
            .successes
            .iter()
            .zip(&self.failures)
            .map(|(s, f)| s / (s + f))
            .collect())
    }

    fn reset_arm(&mut self, action: usize) -> Result<()> {
        check_arm(action, self.n_arms())?;
        self.successes[action] = 1.0;
        self.failures[action] = 1.0;
        Ok(())
    }

    fn reset(&mut self) {
        self.successes.fill(1.0);
        self.failures.fill(1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_thompson_starts_from_uniform_prior() {
        let policy = ThompsonSampling::new(3).unwrap();
        assert_eq!(policy.successes(), &[1.0; 3]);
        assert_eq!(policy.failures(), &[1.0; 3]);

        let expectations = policy.expectations(&Context::Empty).unwrap();
        for e in expectations {
            assert_abs_diff_eq!(e, 0.5, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_thompson_update_counts() {
        let mut policy = ThompsonSampling::new(2).unwrap();

        policy.update(0, &[], 1.0).unwrap();
        assert_eq!(policy.successes(), &[2.0, 1.0]);
        assert_eq!(policy.failures(), &[1.0, 1.0]);

        policy.update(0, &[], 0.0).unwrap();
        assert_eq!(policy.successes(), &[2.0, 1.0]);
        assert_eq!(policy.failures(), &[2.0, 1.0]);

        // Non-binary rewards count as failures
        policy.update(1, &[], 0.7).unwrap();
        assert_eq!(policy.failures(), &[2.0, 2.0]);
    }

    #[test]
    fn test_thompson_select_in_range() {
        let mut policy = ThompsonSampling::new(5).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let arm = policy.select_action(&Context::Empty, &mut rng).unwrap();
            assert!(arm < 5);
        }
    }

    #[test]
    fn test_thompson_favours_successful_arm() {
        let mut policy = ThompsonSampling::new(2).unwrap();
        for _ in 0..50 {
            policy.update(0, &[], 0.0).unwrap();
            policy.update(1, &[], 1.0).unwrap();
        }

        let mut rng = StdRng::seed_from_u64(42);
        let mut count_1 = 0;
        for _ in 0..100 {
            if policy.select_action(&Context::Empty, &mut rng).unwrap() == 1 {
                count_1 += 1;
            }
        }
        assert!(count_1 > 95);
    }

    #[test]
    fn test_thompson_reset() {
        let mut policy = ThompsonSampling::new(2).unwrap();
        policy.update(1, &[], 1.0).unwrap();
        policy.reset_arm(1).unwrap();
        assert_eq!(policy.successes(), &[1.0, 1.0]);

        policy.update(0, &[], 0.0).unwrap();
        policy.reset();
        assert_eq!(policy.failures(), &[1.0, 1.0]);
        assert!(policy.update(2, &[], 1.0).is_err());
    }
}
