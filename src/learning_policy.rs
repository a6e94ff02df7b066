//! Declarative policy configuration.

use crate::contextual::lints::{DEFAULT_V, LinTs};
use crate::contextual::linucb::LinUcb;
use crate::error::Result;
use crate::policy::{
    Policy, check_context_dim, check_epsilon, check_n_arms, check_non_negative, check_positive,
};
use crate::simple::epsilon_greedy::{DEFAULT_EPSILON, EpsilonGreedy};
use crate::simple::thompson::ThompsonSampling;
use crate::simple::ucb::{DEFAULT_ALPHA, Ucb};

/// A learning policy together with its hyperparameters
///
/// Building one yields a boxed [`Policy`], so heterogeneous policies can be
/// constructed from configuration and held side by side.
///
/// # Examples
///
/// ```
/// use mabe::prelude::*;
///
/// let policies: Vec<Box<dyn Policy>> = [
///     LearningPolicy::EpsilonGreedy { epsilon: 0.1 },
///     LearningPolicy::Ucb { alpha: 1.0 },
///     LearningPolicy::ThompsonSampling,
/// ]
/// .iter()
/// .map(|lp| lp.build(3))
/// .collect::<Result<_>>()
/// .unwrap();
/// assert_eq!(policies.len(), 3);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LearningPolicy {
    /// Sample-average estimates with uniform exploration
    EpsilonGreedy { epsilon: f64 },
    /// Upper confidence bound over sample averages
    Ucb { alpha: f64 },
    /// Beta-Bernoulli Thompson sampling
    ThompsonSampling,
    /// Linear Thompson sampling over `context_dim` features
    LinTs { context_dim: usize, v: f64 },
    /// Linear UCB over `context_dim` features
    LinUcb { context_dim: usize, alpha: f64 },
}

impl Default for LearningPolicy {
    fn default() -> Self {
        LearningPolicy::EpsilonGreedy {
            epsilon: DEFAULT_EPSILON,
        }
    }
}

impl LearningPolicy {
    /// Epsilon-greedy with the default epsilon
    pub fn epsilon_greedy() -> Self {
        Self::default()
    }

    /// UCB with the default alpha
    pub fn ucb() -> Self {
        LearningPolicy::Ucb {
            alpha: DEFAULT_ALPHA,
        }
    }

    /// LinTS with the default posterior scale
    pub fn lints(context_dim: usize) -> Self {
        LearningPolicy::LinTs {
            context_dim,
            v: DEFAULT_V,
        }
    }

    /// LinUCB with the default alpha
    pub fn linucb(context_dim: usize) -> Self {
        LearningPolicy::LinUcb {
            context_dim,
            alpha: DEFAULT_ALPHA,
        }
    }

    /// Check the hyperparameters without building anything
    pub fn validate(&self) -> Result<()> {
        match *self {
            LearningPolicy::EpsilonGreedy { epsilon } => check_epsilon(epsilon),
            LearningPolicy::Ucb { alpha } => check_positive("alpha", alpha),
            LearningPolicy::ThompsonSampling => Ok(()),
            LearningPolicy::LinTs { context_dim, v } => {
                check_context_dim(context_dim)?;
                check_non_negative("v", v)
            }
            LearningPolicy::LinUcb { context_dim, alpha } => {
                check_context_dim(context_dim)?;
                check_non_negative("alpha", alpha)
            }
        }
    }

    /// Whether the configured policy needs a context vector
    pub fn requires_context(&self) -> bool {
        matches!(
            self,
            LearningPolicy::LinTs { .. } | LearningPolicy::LinUcb { .. }
        )
    }

    /// Construct the configured policy over `n_arms` arms
    pub fn build(&self, n_arms: usize) -> Result<Box<dyn Policy>> {
        check_n_arms(n_arms)?;
        self.validate()?;
        let policy: Box<dyn Policy> = match *self {
            LearningPolicy::EpsilonGreedy { epsilon } => {
                Box::new(EpsilonGreedy::new(n_arms, epsilon)?)
            }
            LearningPolicy::Ucb { alpha } => Box::new(Ucb::new(n_arms, alpha)?),
            LearningPolicy::ThompsonSampling => Box::new(ThompsonSampling::new(n_arms)?),
            LearningPolicy::LinTs { context_dim, v } => {
                Box::new(LinTs::new(n_arms, context_dim, v)?)
            }
            LearningPolicy::LinUcb { context_dim, alpha } => {
                Box::new(LinUcb::new(n_arms, context_dim, alpha)?)
            }
        };
        Ok(policy)
    }
}
