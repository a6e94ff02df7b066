//! Simple (non-contextual) bandit policies
//!
//! This module contains bandit algorithms that don't use contextual information.
//! Any context handed to them is ignored.

pub mod epsilon_greedy;
pub mod thompson;
pub mod ucb;

use crate::error::{BanditError, Result};
use crate::policy::argmax;

/// Sample-average reward estimates shared by epsilon-greedy and UCB
///
/// Keeps a running mean per arm, so no reward history is stored.
#[derive(Clone, Debug)]
pub(crate) struct RunningMeans {
    pub(crate) q_values: Vec<f64>,
    pub(crate) action_counts: Vec<u64>,
}

impl RunningMeans {
    pub(crate) fn new(n_arms: usize) -> Self {
        Self {
            q_values: vec![0.0; n_arms],
            action_counts: vec![0; n_arms],
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.q_values.len()
    }

    /// `q += (reward - q) / n`
    pub(crate) fn record(&mut self, action: usize, reward: f64) {
        self.action_counts[action] += 1;
        let step = 1.0 / self.action_counts[action] as f64;
        self.q_values[action] += step * (reward - self.q_values[action]);
    }

    pub(crate) fn best_arm(&self) -> Result<usize> {
        argmax(self.q_values.iter().copied()).ok_or(BanditError::NoArmsAvailable)
    }

    pub(crate) fn reset_arm(&mut self, action: usize) {
        self.q_values[action] = 0.0;
        self.action_counts[action] = 0;
    }

    pub(crate) fn reset(&mut self) {
        self.q_values.fill(0.0);
        self.action_counts.fill(0);
    }
}
