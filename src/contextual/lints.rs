use crate::contextual::LinearModels;
use crate::error::{BanditError, Result};
use crate::policy::{Context, Policy, argmax, check_non_negative};
use crate::regression::LinearArm;

/// Default posterior scale
pub const DEFAULT_V: f64 = 1.0;

/// Linear Thompson Sampling (LinTS) policy for contextual bandits
///
/// Each arm keeps a design matrix `A` (starting at the identity) and a bias
/// vector `b`. To select, every arm draws coefficients from
/// `N(A⁻¹ b, v² A⁻¹)` and scores its own context vector with them; the
/// highest score wins.
///
/// `A⁻¹` is recomputed on every selection, which costs `O(d³)` per arm.
#[derive(Debug, Clone)]
pub struct LinTs {
    /// Posterior scale (controls exploration)
    v: f64,
    models: LinearModels,
}

impl LinTs {
    /// Create a new Linear Thompson Sampling policy
    ///
    /// # Arguments
    /// * `n_arms` - Number of arms
    /// * `context_dim` - Length of every context vector
    /// * `v` - Posterior scale (typically 1.0)
    pub fn new(n_arms: usize, context_dim: usize, v: f64) -> Result<Self> {
        check_non_negative("v", v)?;
        let models = LinearModels::new(n_arms, context_dim)?;
        log::debug!("lints policy: n_arms={n_arms} context_dim={context_dim} v={v}");
        Ok(Self { v, models })
    }

    /// Gets the posterior scale
    pub fn v(&self) -> f64 {
        self.v
    }

    /// Model of a single arm, exposing its design matrix and bias vector
    pub fn arm_model(&self, action: usize) -> Result<&LinearArm> {
        self.models.arm(action)
    }
}

impl Policy for LinTs {
    fn n_arms(&self) -> usize {
        self.models.n_arms()
    }

    fn select_action(
        &mut self,
        context: &Context<'_>,
        rng: &mut dyn rand::RngCore,
    ) -> Result<usize> {
        let contexts = self.models.contexts(context)?;
        let mut scores = Vec::with_capacity(contexts.len());
        for (posterior, x) in self.models.posteriors()?.iter().zip(contexts) {
            let theta = posterior
                .sample_coefficients(self.v, &mut *rng)
                .inspect_err(|e| log::warn!("lints sampling failed: {e}"))?;
            scores.push(theta.iter().zip(x).map(|(t, xi)| t * xi).sum::<f64>());
        }

        let action = argmax(scores).ok_or(BanditError::NoArmsAvailable)?;
        log::trace!("lints selected arm {action}");
        Ok(action)
    }

    fn update(&mut self, action: usize, context: &[f64], reward: f64) -> Result<()> {
        self.models.update(action, context, reward)?;
        log::trace!("lints update: arm={action} reward={reward}");
        Ok(())
    }

    /// Posterior mean reward, without sampling
    fn expectations(&self, context: &Context<'_>) -> Result<Vec<f64>> {
        self.models.expectations(context)
    }

    fn reset_arm(&mut self, action: usize) -> Result<()> {
        self.models.reset_arm(action)
    }

    fn reset(&mut self) {
        self.models.reset();
    }

    fn context_dim(&self) -> Option<usize> {
        Some(self.models.num_features())
    }
}
