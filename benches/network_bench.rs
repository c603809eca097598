use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use sortnet::{build_network, run, run_parallel, Family, Verifier, VerifierConfig};

fn random_input(n: usize, seed: u64) -> Vec<u32> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    (0..n).map(|_| rng.gen()).collect()
}

fn bench_build(c: &mut Criterion) {
    for family in Family::ALL {
        for n in [64usize, 1024] {
            c.bench_with_input(
                BenchmarkId::new(format!("build_{family}"), n),
                &n,
                |b, &n| b.iter(|| black_box(build_network(family, n).unwrap())),
            );
        }
    }
}

fn bench_run(c: &mut Criterion) {
    for n in [256usize, 4096] {
        let input = random_input(n, n as u64);
        let net = build_network(Family::BatcherOddEvenMerge, n).unwrap();
        c.bench_with_input(BenchmarkId::new("run_sequential", n), &input, |b, input| {
            b.iter(|| black_box(run(&net, input).unwrap()))
        });
        c.bench_with_input(BenchmarkId::new("run_parallel", n), &input, |b, input| {
            b.iter(|| black_box(run_parallel(&net, input).unwrap()))
        });
    }
}

fn bench_verify(c: &mut Criterion) {
    let verifier = Verifier::default();
    for family in [Family::Bitonic, Family::BatcherOddEvenMerge] {
        let net = build_network(family, 16).unwrap();
        c.bench_function(&format!("verify_exhaustive_{family}_16"), |b| {
            let mut rng = ChaCha20Rng::seed_from_u64(0);
            b.iter(|| black_box(verifier.verify(&net, None, &mut rng)))
        });
    }

    let sampler = Verifier::new(VerifierConfig::default().with_exhaustive_cutoff(8)).unwrap();
    let net = build_network(Family::BatcherOddEvenMerge, 256).unwrap();
    c.bench_function("verify_sampled_batcher_256", |b| {
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        b.iter(|| black_box(sampler.verify(&net, Some(1000), &mut rng)))
    });
}

criterion_group!(benches, bench_build, bench_run, bench_verify);
criterion_main!(benches);
