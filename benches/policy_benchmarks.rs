use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use mabe::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::hint::black_box;

fn bench_simple_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("simple_select");

    for n_arms in [10, 100, 1000].iter() {
        let configs = [
            ("epsilon_greedy", LearningPolicy::epsilon_greedy()),
            ("ucb", LearningPolicy::ucb()),
            ("thompson", LearningPolicy::ThompsonSampling),
        ];
        for (name, config) in configs {
            group.bench_with_input(BenchmarkId::new(name, n_arms), n_arms, |b, &n| {
                let mut policy = config.build(n).unwrap();
                let mut rng = StdRng::seed_from_u64(42);

                // Train with some data
                for i in 0..100 {
                    policy.update(i % n, &[], (i % 2) as f64).unwrap();
                }

                b.iter(|| black_box(policy.select_action(&Context::Empty, &mut rng).unwrap()));
            });
        }
    }

    group.finish();
}

fn bench_linear_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("linear_select");
    let n_arms = 10;

    for context_dim in [2, 8, 32].iter() {
        let configs = [
            ("lints", LearningPolicy::lints(*context_dim)),
            ("linucb", LearningPolicy::linucb(*context_dim)),
        ];
        for (name, config) in configs {
            group.bench_with_input(
                BenchmarkId::new(name, context_dim),
                context_dim,
                |b, &d| {
                    let mut policy = config.build(n_arms).unwrap();
                    let mut rng = StdRng::seed_from_u64(42);
                    let contexts: Vec<Vec<f64>> = (0..n_arms)
                        .map(|_| (0..d).map(|_| rng.random::<f64>()).collect())
                        .collect();

                    for (arm, x) in contexts.iter().enumerate() {
                        policy.update(arm, x, 0.5).unwrap();
                    }

                    b.iter(|| {
                        black_box(
                            policy
                                .select_action(&Context::PerArm(&contexts), &mut rng)
                                .unwrap(),
                        )
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("update");

    for n_samples in [100, 1000, 10000].iter() {
        group.bench_with_input(
            BenchmarkId::new("epsilon_greedy_fit", n_samples),
            n_samples,
            |b, &n| {
                let arms = vec![1, 2, 3, 4, 5];
                let decisions: Vec<i32> = (0..n).map(|i| arms[i % arms.len()]).collect();
                let rewards: Vec<f64> = (0..n).map(|i| (i as f64) / (n as f64)).collect();

                b.iter_batched(
                    || Bandit::new(arms.clone(), LearningPolicy::epsilon_greedy()).unwrap(),
                    |mut bandit| {
                        bandit.fit_simple(&decisions, &rewards).unwrap();
                        black_box(())
                    },
                    criterion::BatchSize::SmallInput,
                );
            },
        );

        group.bench_with_input(
            BenchmarkId::new("linucb_fit", n_samples),
            n_samples,
            |b, &n| {
                let arms = vec![1, 2, 3, 4, 5];
                let decisions: Vec<i32> = (0..n).map(|i| arms[i % arms.len()]).collect();
                let contexts: Vec<Vec<f64>> = (0..n)
                    .map(|i| vec![(i % 7) as f64 / 7.0, (i % 3) as f64 / 3.0, 1.0])
                    .collect();
                let rewards: Vec<f64> = (0..n).map(|i| (i as f64) / (n as f64)).collect();

                b.iter_batched(
                    || Bandit::new(arms.clone(), LearningPolicy::linucb(3)).unwrap(),
                    |mut bandit| {
                        bandit.fit(&decisions, &contexts, &rewards).unwrap();
                        black_box(())
                    },
                    criterion::BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_simple_select,
    bench_linear_select,
    bench_update
);
criterion_main!(benches);
