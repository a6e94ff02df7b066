use crate::contextual::LinearModels;
use crate::error::{BanditError, Result};
use crate::policy::{Context, Policy, argmax, check_non_negative};
use crate::regression::LinearArm;

/// Linear Upper Confidence Bound (LinUCB) policy for contextual bandits
///
/// Shares its per-arm state and update rule with [`LinTs`](crate::contextual::lints::LinTs);
/// selection scores each arm deterministically with
/// `meanᵀ x + alpha * sqrt(xᵀ A⁻¹ x)`.
#[derive(Debug, Clone)]
pub struct LinUcb {
    /// Exploration parameter (controls confidence bound width)
    alpha: f64,
    models: LinearModels,
}

impl LinUcb {
    /// Create a new LinUCB policy
    ///
    /// # Arguments
    /// * `n_arms` - Number of arms
    /// * `context_dim` - Length of every context vector
    /// * `alpha` - Exploration parameter (typically between 0.1 and 2.0)
    pub fn new(n_arms: usize, context_dim: usize, alpha: f64) -> Result<Self> {
        check_non_negative("alpha", alpha)?;
        let models = LinearModels::new(n_arms, context_dim)?;
        log::debug!("linucb policy: n_arms={n_arms} context_dim={context_dim} alpha={alpha}");
        Ok(Self { alpha, models })
    }

    /// Gets the exploration parameter
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Model of a single arm, exposing its design matrix and bias vector
    pub fn arm_model(&self, action: usize) -> Result<&LinearArm> {
        self.models.arm(action)
    }

    /// Upper confidence bound of every arm for this context
    pub fn ucb_values(&self, context: &Context<'_>) -> Result<Vec<f64>> {
        let contexts = self.models.contexts(context)?;
        Ok(self
            .models
            .posteriors()?
            .iter()
            .zip(contexts)
            .map(|(posterior, x)| posterior.predict(x) + self.alpha * posterior.confidence_width(x))
            .collect())
    }
}

impl Policy for LinUcb {
    fn n_arms(&self) -> usize {
        self.models.n_arms()
    }

    fn select_action(
        &mut self,
        context: &Context<'_>,
        _rng: &mut dyn rand::RngCore,
    ) -> Result<usize> {
        let action = argmax(self.ucb_values(context)?).ok_or(BanditError::NoArmsAvailable)?;
        log::trace!("linucb selected arm {action}");
        Ok(action)
    }

    fn update(&mut self, action: usize, context: &[f64], reward: f64) -> Result<()> {
        self.models.update(action, context, reward)?;
        log::trace!("linucb update: arm={action} reward={reward}");
        Ok(())
    }

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
