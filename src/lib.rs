//! mabe: multi-armed bandit policies.
//!
//! Every policy shares one contract: [`Policy::select_action`] picks an arm
//! index, the caller plays it, and [`Policy::update`] feeds the reward back.
//! Non-contextual policies (epsilon-greedy, UCB, Thompson sampling) ignore the
//! context; the linear policies (LinTS, LinUCB) keep a Bayesian linear
//! regression per arm over a `d`-dimensional feature vector.
//!
//! Randomness is always injected by the caller, so a seeded RNG makes every
//! run reproducible.
//!
//! # Quick Start
//!
//! ```
//! use mabe::prelude::*;
//! use rand::SeedableRng;
//!
//! let mut policy = EpsilonGreedy::new(3, 0.1).unwrap();
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//!
//! let arm = policy.select_action(&Context::Empty, &mut rng).unwrap();
//! assert!(arm < 3);
//! policy.update(arm, &[], 1.0).unwrap();
//! ```
//!
//! Contextual policies take one feature vector per arm, or one shared vector:
//!
//! ```
//! use mabe::prelude::*;
//! use rand::SeedableRng;
//!
//! let mut policy = LinTs::new(2, 3, 1.0).unwrap();
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let contexts = vec![vec![1.0, 0.0, 0.5], vec![0.0, 1.0, 0.5]];
//!
//! let arm = policy
//!     .select_action(&Context::PerArm(&contexts), &mut rng)
//!     .unwrap();
//! policy.update(arm, &contexts[arm], 0.0).unwrap();
//! ```

mod bandit;
pub mod contextual;
mod error;
mod learning_policy;
mod policy;
pub mod regression;
pub mod simple;

// Re-export main types
pub use bandit::Bandit;
pub use contextual::lints::{DEFAULT_V, LinTs};
pub use contextual::linucb::LinUcb;
pub use error::{BanditError, Result};
pub use learning_policy::LearningPolicy;
pub use policy::{Context, Policy};
pub use simple::epsilon_greedy::{DEFAULT_EPSILON, EpsilonGreedy};
pub use simple::thompson::ThompsonSampling;
pub use simple::ucb::{DEFAULT_ALPHA, Ucb};

// Re-export IndexSet, the arm collection exposed by `Bandit::arms`
pub use indexmap::IndexSet;

/// Prelude module for convenient imports.
///
/// # Examples
///
/// ```
/// use mabe::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Bandit, BanditError, Context, EpsilonGreedy, LearningPolicy, LinTs, LinUcb, Policy,
        Result, ThompsonSampling, Ucb,
    };
    pub use indexmap::IndexSet;
}
