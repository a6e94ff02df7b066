//! Runs every policy against the same simulated environment and prints the
//! cumulative reward and regret of each.
//!
//! Set `RUST_LOG=mabe=debug` (or `trace`) to see the policies' log output.

use mabe::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const STEPS: usize = 2_000;
const CONTEXT_DIM: usize = 3;

/// Bernoulli arms whose success probability depends linearly on a feature vector
struct Environment {
    weights: Vec<Vec<f64>>,
}

impl Environment {
    fn new(n_arms: usize, rng: &mut StdRng) -> Self {
        let weights = (0..n_arms)
            .map(|_| (0..CONTEXT_DIM).map(|_| rng.random::<f64>() * 0.6).collect())
            .collect();
        Self { weights }
    }

    fn n_arms(&self) -> usize {
        self.weights.len()
    }

    fn contexts(&self, rng: &mut StdRng) -> Vec<Vec<f64>> {
        (0..self.n_arms())
            .map(|_| (0..CONTEXT_DIM).map(|_| rng.random::<f64>()).collect())
            .collect()
    }

    fn probability(&self, arm: usize, x: &[f64]) -> f64 {
        let p: f64 = self.weights[arm].iter().zip(x).map(|(w, xi)| w * xi).sum();
        p.clamp(0.0, 1.0)
    }
}

fn run(config: LearningPolicy, env: &Environment, seed: u64) -> Result<(f64, f64)> {
    let mut policy = config.build(env.n_arms())?;
    let mut rng = StdRng::seed_from_u64(seed);
    let mut total_reward = 0.0;
    let mut regret = 0.0;

    for _ in 0..STEPS {
        let contexts = env.contexts(&mut rng);
        let arm = policy.select_action(&Context::PerArm(&contexts), &mut rng)?;

        let best = (0..env.n_arms())
            .map(|a| env.probability(a, &contexts[a]))
            .fold(0.0, f64::max);
        let p = env.probability(arm, &contexts[arm]);
        let reward = if rng.random::<f64>() < p { 1.0 } else { 0.0 };

        policy.update(arm, &contexts[arm], reward)?;
        total_reward += reward;
        regret += best - p;
    }
    Ok((total_reward, regret))
}

fn main() -> Result<()> {
    env_logger::init();

    let mut rng = StdRng::seed_from_u64(2024);
    let env = Environment::new(5, &mut rng);

    let configs = [
        ("epsilon-greedy", LearningPolicy::epsilon_greedy()),
        ("ucb", LearningPolicy::ucb()),
        ("thompson", LearningPolicy::ThompsonSampling),
        ("lints", LearningPolicy::lints(CONTEXT_DIM)),
        ("linucb", LearningPolicy::linucb(CONTEXT_DIM)),
    ];

    println!("{:<16}{:>12}{:>12}", "policy", "reward", "regret");
    for (name, config) in configs {
        let (reward, regret) = run(config, &env, 7)?;
        println!("{name:<16}{reward:>12.0}{regret:>12.1}");
    }
    Ok(())
}
