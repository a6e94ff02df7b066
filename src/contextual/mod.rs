//! Contextual bandit policies
//!
//! This module contains bandit algorithms that use contextual information to make decisions.
//! Each arm keeps its own Bayesian linear regression over a `d`-dimensional feature vector.

pub mod lints;
pub mod linucb;

use crate::error::{BanditError, Result};
use crate::policy::{Context, check_arm, check_context_dim, check_n_arms};
use crate::regression::{LinearArm, Posterior, check_features};

/// Per-arm linear models shared by LinTS and LinUCB
#[derive(Debug, Clone)]
pub(crate) struct LinearModels {
    num_features: usize,
    arms: Vec<LinearArm>,
}

impl LinearModels {
    pub(crate) fn new(n_arms: usize, num_features: usize) -> Result<Self> {
        check_n_arms(n_arms)?;
        check_context_dim(num_features)?;
        Ok(Self {
            num_features,
            arms: (0..n_arms).map(|_| LinearArm::new(num_features)).collect(),
        })
    }

    pub(crate) fn n_arms(&self) -> usize {
        self.arms.len()
    }

    pub(crate) fn num_features(&self) -> usize {
        self.num_features
    }

    pub(crate) fn arm(&self, action: usize) -> Result<&LinearArm> {
        self.arms.get(action).ok_or(BanditError::ArmOutOfRange {
            arm: action,
            n_arms: self.arms.len(),
        })
    }

    /// Resolve one validated feature vector per arm
    pub(crate) fn contexts<'a>(&self, context: &Context<'a>) -> Result<Vec<&'a [f64]>> {
        if let Context::PerArm(xs) = context {
            if xs.len() != self.n_arms() {
                return Err(BanditError::DimensionMismatch {
                    message: format!(
                        "expected one context per arm ({}), got {}",
                        self.n_arms(),
                        xs.len()
                    ),
                });
            }
        }

        (0..self.n_arms())
            .map(|arm| -> Result<&'a [f64]> {
                let x = context.arm(arm).ok_or(BanditError::ContextRequired)?;
                check_features(x, self.num_features)?;
                Ok(x)
            })
            .collect()
    }

    /// Posterior of every arm, freshly inverted
    pub(crate) fn posteriors(&self) -> Result<Vec<Posterior>> {
        self.arms
            .iter()
            .enumerate()
            .map(|(arm, model)| {
                model.posterior().inspect_err(|e| {
                    log::warn!("posterior for arm {arm} failed: {e}");
                })
            })
            .collect()
    }

    /// Posterior mean reward of every arm
    pub(crate) fn expectations(&self, context: &Context<'_>) -> Result<Vec<f64>> {
        let contexts = self.contexts(context)?;
        Ok(self
            .posteriors()?
            .iter()
            .zip(contexts)
            .map(|(posterior, x)| posterior.predict(x))
            .collect())
    }

    pub(crate) fn update(&mut self, action: usize, x: &[f64], reward: f64) -> Result<()> {
        check_arm(action, self.n_arms())?;
        self.arms[action].update(x, reward)
    }

    pub(crate) fn reset_arm(&mut self, action: usize) -> Result<()> {
        check_arm(action, self.n_arms())?;
        self.arms[action].reset();
        Ok(())
    }

    pub(crate) fn reset(&mut self) {
        self.arms.iter_mut().for_each(LinearArm::reset);
    }
}
