use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use merkle_chain::{BigTree, Tree};
use sha2::Sha256;

pub fn generate_random_digest() -> [u8; 32] {
    rand::random()
}

fn bench_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("Merkle Append");

    // Benchmark full-linkage tree append
    group.bench_function("Tree", |b| {
        let mut tree = Tree::<32, Sha256>::new();
        let digest = generate_random_digest();
        b.iter(|| tree.append(digest))
    });

    // Benchmark bounded tree append
    group.bench_function("BigTree", |b| {
        let mut tree = BigTree::<32, Sha256>::new(8);
        let digest = generate_random_digest();
        b.iter(|| tree.append(digest).unwrap())
    });

    // Benchmark bulk build of 4096 leaves
    group.bench_function("Build 4096", |b| {
        b.iter_batched(
            || (0..4096).map(|_| generate_random_digest()).collect::<Vec<_>>(),
            |digests| Tree::<32, Sha256>::from_digests(digests).unwrap(),
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(benches, bench_append);
criterion_main!(benches);
