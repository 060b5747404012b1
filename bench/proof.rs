use criterion::{black_box, criterion_group, criterion_main, Criterion};
use merkle_chain::{join_chains, verify_chain, Tree};
use sha2::Sha256;

fn setup_tree(count: usize) -> Tree<32, Sha256> {
    let mut tree = Tree::new();
    for _ in 0..count {
        tree.append(rand::random());
    }
    tree
}

fn bench_chain_extraction(c: &mut Criterion) {
    let tree = setup_tree(1 << 12);

    c.bench_function("Chain extraction", |b| {
        b.iter(|| tree.chain(black_box(1234)).unwrap())
    });

    c.bench_function("All chains (1024 leaves)", |b| {
        let small = setup_tree(1 << 10);
        b.iter(|| small.chains().unwrap())
    });
}

fn bench_chain_verification(c: &mut Criterion) {
    let tree = setup_tree(1 << 12);
    let root = tree.root().unwrap();
    let chain = tree.chain(1234).unwrap();

    c.bench_function("Chain verification", |b| {
        b.iter(|| verify_chain::<32, Sha256>(black_box(&chain), &root))
    });
}

fn bench_chain_join(c: &mut Criterion) {
    let low_tree = setup_tree(1 << 10);
    let mut high_tree = setup_tree(100);
    high_tree.append(low_tree.root().unwrap());
    let low = low_tree.chain(7).unwrap();
    let high = high_tree.chain(100).unwrap();

    c.bench_function("Chain join", |b| {
        b.iter(|| join_chains(black_box(&low), black_box(&high)).unwrap())
    });
}

criterion_group!(
    benches,
    bench_chain_extraction,
    bench_chain_verification,
    bench_chain_join
);
criterion_main!(benches);
