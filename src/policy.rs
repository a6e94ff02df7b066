//! Policy trait definition for multi-armed bandit algorithms

use std::fmt;

use crate::error::{BanditError, Result};

/// Context supplied to [`Policy::select_action`] and [`Policy::expectations`].
///
/// Non-contextual policies ignore it entirely. Linear policies need either one
/// feature vector shared by every arm or one feature vector per arm.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Context<'a> {
    /// No context (non-contextual policies)
    #[default]
    Empty,
    /// A single feature vector used identically for every arm
    Shared(&'a [f64]),
    /// One feature vector per arm, indexed by arm
    PerArm(&'a [Vec<f64>]),
}

impl<'a> Context<'a> {
    /// Feature vector associated with `arm`, if any
    pub fn arm(&self, arm: usize) -> Option<&'a [f64]> {
        match *self {
            Context::Empty => None,
            Context::Shared(x) => Some(x),
            Context::PerArm(xs) => xs.get(arm).map(Vec::as_slice),
        }
    }

    /// Whether no context was supplied
    pub fn is_empty(&self) -> bool {
        matches!(self, Context::Empty)
    }
}

impl<'a> From<&'a [f64]> for Context<'a> {
    fn from(x: &'a [f64]) -> Self {
        Context::Shared(x)
    }
}

impl<'a> From<&'a [Vec<f64>]> for Context<'a> {
    fn from(xs: &'a [Vec<f64>]) -> Self {
        Context::PerArm(xs)
    }
}

/// Unified trait for both contextual and non-contextual bandit policies
///
/// Arms are identified by their index in `[0, n_arms)`. Every step a driving
/// loop calls [`select_action`](Policy::select_action), plays the arm, then
/// calls [`update`](Policy::update) with the observed reward before the next
/// selection.
///
/// Note: the random source is passed as `dyn rand::RngCore` rather than a
/// generic parameter so that `Box<dyn Policy>` stays object safe and callers
/// can keep heterogeneous collections of policies.
pub trait Policy: fmt::Debug {
    /// Number of arms, fixed at construction
    fn n_arms(&self) -> usize;

    /// Select an arm given a context
    ///
    /// # Arguments
    /// - `context`: The current context (ignored by non-contextual policies)
    /// - `rng`: Random number generator for stochastic policies
    ///
    /// # Returns
    /// An arm index in `[0, n_arms)`
    fn select_action(&mut self, context: &Context<'_>, rng: &mut dyn rand::RngCore)
    -> Result<usize>;

    /// Update the policy with an observed reward for a single decision
    ///
    /// # Arguments
    /// - `action`: The arm that was played
    /// - `context`: The feature vector used for that arm (ignored by non-contextual policies)
    /// - `reward`: The observed reward
    fn update(&mut self, action: usize, context: &[f64], reward: f64) -> Result<()>;

    /// Expected reward of every arm under the current belief state, indexed by arm
    fn expectations(&self, context: &Context<'_>) -> Result<Vec<f64>>;

    /// Reset the statistics of a single arm back to its prior
    fn reset_arm(&mut self, action: usize) -> Result<()>;

    /// Reset all statistics
    fn reset(&mut self);

    /// Dimension of the context vectors, for contextual policies
    fn context_dim(&self) -> Option<usize> {
        None
    }

    /// Whether the policy needs a context to select an arm
    fn requires_context(&self) -> bool {
        self.context_dim().is_some()
    }
}

/// Index of the largest value, lowest index on ties. NaN never wins.
pub(crate) fn argmax<I>(values: I) -> Option<usize>
where
    I: IntoIterator<Item = f64>,
{
    let mut best: Option<(usize, f64)> = None;
    for (idx, value) in values.into_iter().enumerate() {
        let value = if value.is_nan() {
            f64::NEG_INFINITY
        } else {
            value
        };
        match best {
            Some((_, best_value)) if value <= best_value => {}
            _ => best = Some((idx, value)),
        }
    }
    best.map(|(idx, _)| idx)
}

pub(crate) fn check_arm(action: usize, n_arms: usize) -> Result<()> {
    if action >= n_arms {
        return Err(BanditError::ArmOutOfRange {
            arm: action,
            n_arms,
        });
    }
    Ok(())
}

pub(crate) fn check_n_arms(n_arms: usize) -> Result<()> {
    if n_arms == 0 {
        return Err(BanditError::NoArmsAvailable);
    }
    Ok(())
}

pub(crate) fn check_epsilon(epsilon: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&epsilon) {
        return Err(BanditError::InvalidParameter {
            message: format!("epsilon must be between 0 and 1, got {epsilon}"),
        });
    }
    Ok(())
}

pub(crate) fn check_positive(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(BanditError::InvalidParameter {
            message: format!("{name} must be positive, got {value}"),
        });
    }
    Ok(())
}

pub(crate) fn check_non_negative(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(BanditError::InvalidParameter {
            message: format!("{name} must be non-negative, got {value}"),
        });
    }
    Ok(())
}

pub(crate) fn check_context_dim(context_dim: usize) -> Result<()> {
    if context_dim == 0 {
        return Err(BanditError::InvalidParameter {
            message: "context dimension must be at least 1".to_string(),
        });
    }
    Ok(())
}
