use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use indexmap::IndexSet;

use crate::error::{BanditError, Result};
use crate::learning_policy::LearningPolicy;
use crate::policy::{Context, Policy};

/// A multi-armed bandit over labelled arms
///
/// The `Bandit` maps arbitrary hashable arm labels to the index space
/// `[0, n_arms)` used by its [`Policy`]. Arm order is insertion order, so
/// `arms()[i]` is the label the policy knows as arm `i`.
pub struct Bandit<A> {
    arms: IndexSet<A>,
    policy: Box<dyn Policy>,
}

impl<A: fmt::Debug> fmt::Debug for Bandit<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bandit")
            .field("arms", &self.arms)
            .field("policy", &self.policy)
            .finish()
    }
}

impl<A> Bandit<A>
where
    A: Clone + Eq + Hash,
{
    /// Creates a new bandit with the given arms and learning policy
    pub fn new<I>(arms: I, learning_policy: LearningPolicy) -> Result<Self>
    where
        I: IntoIterator<Item = A>,
    {
        let arms = collect_arms(arms)?;
        let policy = learning_policy.build(arms.len())?;
        Ok(Self { arms, policy })
    }

    /// Creates a new bandit around an already constructed policy
    ///
    /// The policy must have been built for exactly as many arms as given.
    pub fn with_policy<I>(arms: I, policy: Box<dyn Policy>) -> Result<Self>
    where
        I: IntoIterator<Item = A>,
    {
        let arms = collect_arms(arms)?;
        if arms.len() != policy.n_arms() {
            return Err(BanditError::DimensionMismatch {
                message: format!(
                    "Mismatched dimensions: arms={}, policy arms={}",
                    arms.len(),
                    policy.n_arms()
                ),
            });
        }
        Ok(Self { arms, policy })
    }

    /// Select an arm for the given context
    pub fn predict(&mut self, context: &Context<'_>, rng: &mut dyn rand::RngCore) -> Result<A> {
        let idx = self.policy.select_action(context, rng)?;
        self.arms
            .get_index(idx)
            .cloned()
            .ok_or(BanditError::ArmOutOfRange {
                arm: idx,
                n_arms: self.arms.len(),
            })
    }

    /// Select an arm without context for non-contextual policies
    pub fn predict_simple(&mut self, rng: &mut dyn rand::RngCore) -> Result<A> {
        self.predict(&Context::Empty, rng)
    }

    /// Record the reward observed for `arm`
    pub fn update(&mut self, arm: &A, context: &[f64], reward: f64) -> Result<()> {
        let idx = self.index_of(arm)?;
        self.policy.update(idx, context, reward)
    }

    /// Replay logged decisions (batch update)
    ///
    /// `contexts` is either empty, for non-contextual policies, or holds one
    /// feature vector per decision. Every label and context is validated
    /// before the first update is applied.
    pub fn fit(&mut self, decisions: &[A], contexts: &[Vec<f64>], rewards: &[f64]) -> Result<()> {
        if decisions.len() != rewards.len() {
            return Err(BanditError::DimensionMismatch {
                message: format!(
                    "Mismatched dimensions: decisions={}, rewards={}",
                    decisions.len(),
                    rewards.len()
                ),
            });
        }
        if contexts.is_empty() {
            if self.policy.requires_context() && !decisions.is_empty() {
                return Err(BanditError::ContextRequired);
            }
        } else if contexts.len() != decisions.len() {
            return Err(BanditError::DimensionMismatch {
                message: format!(
                    "Mismatched dimensions: decisions={}, contexts={}",
                    decisions.len(),
                    contexts.len()
                ),
            });
        }

        if let Some(expected) = self.policy.context_dim() {
            if let Some(bad) = contexts.iter().find(|x| x.len() != expected) {
                return Err(BanditError::InvalidContextDimensions {
                    expected,
                    got: bad.len(),
                });
            }
        }

        let indices = decisions
            .iter()
            .map(|arm| self.index_of(arm))
            .collect::<Result<Vec<_>>>()?;

        log::debug!("fitting {} logged decisions", indices.len());
        for (i, (idx, reward)) in indices.into_iter().zip(rewards).enumerate() {
            let context = contexts.get(i).map_or(&[][..], Vec::as_slice);
            self.policy.update(idx, context, *reward)?;
        }
        Ok(())
    }

    /// Replay logged decisions without context for non-contextual policies
    pub fn fit_simple(&mut self, decisions: &[A], rewards: &[f64]) -> Result<()> {
        self.fit(decisions, &[], rewards)
    }

    /// Get expected rewards per arm label
    pub fn predict_expectations(&self, context: &Context<'_>) -> Result<HashMap<A, f64>> {
        let expectations = self.policy.expectations(context)?;
        Ok(self.arms.iter().cloned().zip(expectations).collect())
    }

    /// Gets the available arms
    pub fn arms(&self) -> &IndexSet<A> {
        &self.arms
    }

    /// Number of arms
    pub fn n_arms(&self) -> usize {
        self.arms.len()
    }

    /// Check if an arm exists in the bandit
    pub fn has_arm(&self, arm: &A) -> bool {
        self.arms.contains(arm)
    }

    /// Gets a reference to the policy
    pub fn policy(&self) -> &dyn Policy {
        self.policy.as_ref()
    }

    /// Gets a mutable reference to the policy
    pub fn policy_mut(&mut self) -> &mut dyn Policy {
        self.policy.as_mut()
    }

    fn index_of(&self, arm: &A) -> Result<usize> {
        self.arms.get_index_of(arm).ok_or(BanditError::ArmNotFound)
    }
}

fn collect_arms<A, I>(arms: I) -> Result<IndexSet<A>>
where
    A: Eq + Hash,
    I: IntoIterator<Item = A>,
{
    let mut set = IndexSet::new();
    for arm in arms {
        if !set.insert(arm) {
            return Err(BanditError::ArmAlreadyExists);
        }
    }
    if set.is_empty() {
        return Err(BanditError::NoArmsAvailable);
    }
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simple::ucb::Ucb;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_bandit_creation() {
        let bandit = Bandit::new(vec![1, 2, 3], LearningPolicy::ThompsonSampling).unwrap();
        assert_eq!(bandit.n_arms(), 3);
        assert_eq!(bandit.policy().n_arms(), 3);
    }

    #[test]
    fn test_bandit_rejects_bad_arms() {
        assert!(matches!(
            Bandit::new(Vec::<i32>::new(), LearningPolicy::default()),
            Err(BanditError::NoArmsAvailable)
        ));
        assert!(matches!(
            Bandit::new(vec!["a", "a"], LearningPolicy::default()),
            Err(BanditError::ArmAlreadyExists)
        ));
    }

    #[test]
    fn test_with_policy_checks_arm_count() {
        let policy = Box::new(Ucb::new(2, 1.0).unwrap());
        assert!(matches!(
            Bandit::with_policy(vec!["a", "b", "c"], policy),
            Err(BanditError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_non_contextual_convenience_methods() {
        let mut bandit = Bandit::new(
            vec!["a", "b", "c"],
            LearningPolicy::EpsilonGreedy { epsilon: 0.0 },
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        bandit.fit_simple(&["a", "b"], &[0.5, 1.0]).unwrap();
        assert_eq!(bandit.predict_simple(&mut rng).unwrap(), "b");

        let expectations = bandit.predict_expectations(&Context::Empty).unwrap();
        assert_eq!(expectations.len(), 3);
        assert_eq!(expectations[&"b"], 1.0);
        assert_eq!(expectations[&"c"], 0.0);
    }

    #[test]
    fn test_update_unknown_arm() {
        let mut bandit = Bandit::new(vec![1, 2], LearningPolicy::ucb()).unwrap();
        assert!(matches!(
            bandit.update(&3, &[], 1.0),
            Err(BanditError::ArmNotFound)
        ));
        // Batch with an unknown label applies nothing
        assert!(bandit.fit_simple(&[1, 3], &[1.0, 1.0]).is_err());
        let expectations = bandit.predict_expectations(&Context::Empty).unwrap();
        assert_eq!(expectations[&1], 0.0);
    }

    #[test]
    fn test_fit_dimension_checks() {
        let mut bandit = Bandit::new(vec!["x", "y"], LearningPolicy::linucb(2)).unwrap();

        assert!(matches!(
            bandit.fit(&["x"], &[], &[1.0]),
            Err(BanditError::ContextRequired)
        ));
        assert!(matches!(
            bandit.fit(&["x", "y"], &[vec![1.0, 0.0]], &[1.0, 0.0]),
            Err(BanditError::DimensionMismatch { .. })
        ));
        assert!(matches!(
            bandit.fit(&["x"], &[vec![1.0]], &[1.0]),
            Err(BanditError::InvalidContextDimensions {
                expected: 2,
                got: 1
            })
        ));
        assert!(matches!(
            bandit.fit(&["x"], &[vec![1.0, 0.0]], &[]),
            Err(BanditError::DimensionMismatch { .. })
        ));

        bandit
            .fit(&["x", "y"], &[vec![1.0, 0.0], vec![0.0, 1.0]], &[1.0, 0.0])
            .unwrap();
        let expectations = bandit
            .predict_expectations(&Context::Shared(&[1.0, 0.0]))
            .unwrap();
        assert!(expectations[&"x"] > expectations[&"y"]);
    }
}
