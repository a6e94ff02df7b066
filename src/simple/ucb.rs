use crate::error::{BanditError, Result};
use crate::policy::{Context, Policy, argmax, check_arm, check_n_arms, check_positive};
use crate::simple::RunningMeans;

/// Default exploration scale
pub const DEFAULT_ALPHA: f64 = 1.0;

/// Keeps the bonus finite for arms that have never been updated
const COUNT_OFFSET: f64 = 1e-5;

/// Upper Confidence Bound (UCB) policy
///
/// Selects the arm maximising `q[a] + alpha * sqrt(ln(t) / (n[a] + 1e-5))`,
/// where `t` counts calls to [`select_action`](Policy::select_action) and
/// `n[a]` counts updates of arm `a`. The step counter is advanced by selection,
/// not by update, so repeated selections without feedback widen every bonus.
#[derive(Clone, Debug)]
pub struct Ucb {
    /// Exploration scale
    alpha: f64,
    stats: RunningMeans,
    /// Total number of selection calls
    total_counts: u64,
}

impl Ucb {
    /// Creates a new UCB policy over `n_arms` arms
    ///
    /// # Arguments
    /// * `alpha` - Exploration scale; higher values encourage more exploration
    pub fn new(n_arms: usize, alpha: f64) -> Result<Self> {
        check_n_arms(n_arms)?;
        check_positive("alpha", alpha)?;
        log::debug!("ucb policy: n_arms={n_arms} alpha={alpha}");
        Ok(Self {
            alpha,
            stats: RunningMeans::new(n_arms),
            total_counts: 0,
        })
    }

    /// Gets the exploration scale
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Running reward averages, one per arm
    pub fn q_values(&self) -> &[f64] {
        &self.stats.q_values
    }

    /// Number of updates applied to each arm
    pub fn action_counts(&self) -> &[u64] {
        &self.stats.action_counts
    }

    /// Number of selection calls so far
    pub fn total_counts(&self) -> u64 {
        self.total_counts
    }

    /// Upper confidence bound of every arm at the current step count
    ///
    /// Before the first selection there is no exploration bonus and the
    /// values are the running means.
    pub fn ucb_values(&self) -> Vec<f64> {
        if self.total_counts == 0 {
            return self.stats.q_values.clone();
        }
        let log_t = (self.total_counts as f64).ln();
        self.stats
            .q_values
            .iter()
            .zip(&self.stats.action_counts)
            .map(|(q, &n)| q + self.alpha * (log_t / (n as f64 + COUNT_OFFSET)).sqrt())
            .collect()
    }
}

impl Policy for Ucb {
    fn n_arms(&self) -> usize {
        self.stats.len()
    }

    fn select_action(
        &mut self,
        _context: &Context<'_>,
        _rng: &mut dyn rand::RngCore,
    ) -> Result<usize> {
        self.total_counts += 1;
        let action = argmax(self.ucb_values()).ok_or(BanditError::NoArmsAvailable)?;
        log::trace!("ucb selected arm {action} at step {}", self.total_counts);
        Ok(action)
    }

    fn update(&mut self, action: usize, _context: &[f64], reward: f64) -> Result<()> {
        check_arm(action, self.n_arms())?;
        self.stats.record(action, reward);
        log::trace!("ucb update: arm={action} reward={reward}");
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
        self.total_counts = 0;
    }
}
