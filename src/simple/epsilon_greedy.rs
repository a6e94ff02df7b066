use rand::Rng;

use crate::error::Result;
use crate::policy::{Context, Policy, check_arm, check_epsilon, check_n_arms};
use crate::simple::RunningMeans;

/// Default exploration probability
pub const DEFAULT_EPSILON: f64 = 0.1;

/// Epsilon-greedy policy - explores with probability epsilon, exploits otherwise
#[derive(Clone, Debug)]
pub struct EpsilonGreedy {
    epsilon: f64,
    stats: RunningMeans,
}

impl EpsilonGreedy {
    /// Creates a new EpsilonGreedy policy over `n_arms` arms
    ///
    /// # Errors
    /// `NoArmsAvailable` when `n_arms` is zero, `InvalidParameter` when
    /// `epsilon` is outside `[0, 1]`.
    pub fn new(n_arms: usize, epsilon: f64) -> Result<Self> {
        check_n_arms(n_arms)?;
        check_epsilon(epsilon)?;
        log::debug!("epsilon-greedy policy: n_arms={n_arms} epsilon={epsilon}");
        Ok(Self {
            epsilon,
            stats: RunningMeans::new(n_arms),
        })
    }

    /// Gets the epsilon value
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Running reward averages, one per arm
    pub fn q_values(&self) -> &[f64] {
        &self.stats.q_values
    }

    /// Number of updates applied to each arm
    pub fn action_counts(&self) -> &[u64] {
        &self.stats.action_counts
    }
}

impl Policy for EpsilonGreedy {
    fn n_arms(&self) -> usize {
        self.stats.len()
    }

    fn select_action(
        &mut self,
        _context: &Context<'_>,
        rng: &mut dyn rand::RngCore,
    ) -> Result<usize> {
        // Explore with probability epsilon
        let r: f64 = rng.random();
        let action = if r < self.epsilon {
            rng.random_range(0..self.n_arms())
        } else {
            self.stats.best_arm()?
        };
        log::trace!("epsilon-greedy selected arm {action}");
        Ok(action)
    }

    fn update(&mut self, action: usize, _context: &[f64], reward: f64) -> Result<()> {
        check_arm(action, self.n_arms())?;
        self.stats.record(action, reward);
        log::trace!("epsilon-greedy update: arm={action} reward={reward}");
        Ok(())
    }

    fn expectations(&self, _context: &Context<'_>) -> Result<Vec<f64>> {
        Ok(self.stats.q_values.clone())
    }

    fn reset_arm(&mut self, action: usize) -> Result<()> {
        check_arm(action, self.n_arms())?;
        self.stats.reset_arm(action);
        Ok(())
    }

    fn reset(&mut self) {
        self.stats.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_epsilon_greedy_pure_exploration() {
        let mut policy = EpsilonGreedy::new(3, 1.0).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        let mut seen = [false; 3];
        for _ in 0..200 {
            let choice = policy.select_action(&Context::Empty, &mut rng).unwrap();
            assert!(choice < 3);
            seen[choice] = true;
        }
        assert!(seen.iter().all(|s| *s));

        // No training data, every expectation is zero
        let expectations = policy.expectations(&Context::Empty).unwrap();
        assert_eq!(expectations, vec![0.0; 3]);
    }

    #[test]
    fn test_epsilon_greedy_pure_exploitation() {
        let mut policy = EpsilonGreedy::new(3, 0.0).unwrap();

        // Arm 1 has highest average
        policy.update(0, &[], 0.5).unwrap();
        policy.update(1, &[], 1.0).unwrap();
        policy.update(2, &[], 0.3).unwrap();
        policy.update(1, &[], 0.8).unwrap();

        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..10 {
            assert_eq!(policy.select_action(&Context::Empty, &mut rng).unwrap(), 1);
        }

        let expectations = policy.expectations(&Context::Empty).unwrap();
        assert_abs_diff_eq!(expectations[1], 0.9, epsilon = 1e-10);
        assert_abs_diff_eq!(expectations[0], 0.5, epsilon = 1e-10);
        assert_abs_diff_eq!(expectations[2], 0.3, epsilon = 1e-10);
    }

    #[test]
    fn test_epsilon_greedy_ties_break_to_lowest_index() {
        let mut policy = EpsilonGreedy::new(4, 0.0).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(policy.select_action(&Context::Empty, &mut rng).unwrap(), 0);

        policy.update(2, &[], 1.0).unwrap();
        policy.update(3, &[], 1.0).unwrap();
        assert_eq!(policy.select_action(&Context::Empty, &mut rng).unwrap(), 2);
    }

    #[test]
    fn test_incremental_mean() {
        let mut policy = EpsilonGreedy::new(2, 0.1).unwrap();
        policy.update(1, &[], 0.4).unwrap();
        assert_eq!(policy.q_values()[1], 0.4);
        assert_eq!(policy.action_counts()[1], 1);

        policy.update(1, &[], 1.0).unwrap();
        assert_abs_diff_eq!(policy.q_values()[1], 0.7, epsilon = 1e-12);
        assert_eq!(policy.action_counts(), &[0, 2]);
    }

    #[test]
    fn test_epsilon_greedy_reset() {
        let mut policy = EpsilonGreedy::new(3, 0.0).unwrap();
        policy.update(0, &[], 0.5).unwrap();
        policy.update(1, &[], 0.8).unwrap();

        policy.reset_arm(1).unwrap();
        assert_eq!(policy.q_values(), &[0.5, 0.0, 0.0]);
        assert_eq!(policy.action_counts(), &[1, 0, 0]);

        policy.reset();
        assert_eq!(policy.q_values(), &[0.0; 3]);
        assert!(policy.reset_arm(3).is_err());
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(EpsilonGreedy::new(0, 0.1).is_err());
        assert!(EpsilonGreedy::new(2, -0.1).is_err());
        assert!(EpsilonGreedy::new(2, 1.1).is_err());
        assert_eq!(EpsilonGreedy::new(2, 0.3).unwrap().epsilon(), 0.3);
    }

    #[test]
    fn test_update_out_of_range_leaves_state() {
        let mut policy = EpsilonGreedy::new(2, 0.1).unwrap();
        assert!(policy.update(2, &[], 1.0).is_err());
        assert_eq!(policy.action_counts(), &[0, 0]);
    }
}
