//! Properties that must hold between the tree engines and the chains they produce

use rand::{rngs::StdRng, Rng, SeedableRng};
use sha2::Sha256;

use crate::{join_chains, verify_chain, BigTree, ChainLink, Hasher, Tree, TreeError};

fn random_digests(rng: &mut StdRng, count: usize) -> Vec<[u8; 32]> {
    (0..count).map(|_| rng.gen()).collect()
}

#[test]
fn test_build_append_and_big_tree_agree() {
    let mut rng = StdRng::seed_from_u64(7);
    for count in [1, 2, 3, 5, 31, 32, 33, 100, 257] {
        let digests = random_digests(&mut rng, count);
        let built = Tree::<32, Sha256>::from_digests(digests.clone()).unwrap();

        let mut appended = Tree::<32, Sha256>::new();
        let mut big_trees: Vec<BigTree<32, Sha256>> =
            [0, 1, 3, 8, 20].into_iter().map(BigTree::new).collect();
        for digest in &digests {
            let root = appended.append(*digest);
            for big in big_trees.iter_mut() {
                assert_eq!(big.append(*digest).unwrap(), root);
            }
        }
        assert_eq!(built.root(), appended.root());
        for big in &big_trees {
            assert_eq!(big.root(), built.root());
            assert_eq!(big.len(), count as u64);
        }
    }
}

#[test]
fn test_every_chain_verifies() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut tree = Tree::<32, Sha256>::new();
    for _ in 0..70 {
        tree.append(rng.gen());
        let root = tree.root().unwrap();
        for chain in tree.chains().unwrap() {
            assert!(verify_chain::<32, Sha256>(&chain, &root));
        }
    }
}

#[test]
fn test_same_structure_after_append() {
    // chains carry the side of every node on the path, so equal chains
    // mean equal flags at every level
    let mut rng = StdRng::seed_from_u64(13);
    let digests = random_digests(&mut rng, 45);
    let mut appended = Tree::<32, Sha256>::new();
    for (count, digest) in digests.iter().enumerate() {
        appended.append(*digest);
        let built = Tree::<32, Sha256>::from_digests(digests[..=count].to_vec()).unwrap();
        assert_eq!(built.chains().unwrap(), appended.chains().unwrap());
    }
}

#[test]
fn test_tampered_chain_fails() {
    let mut rng = StdRng::seed_from_u64(17);
    let tree = Tree::<32, Sha256>::from_digests(random_digests(&mut rng, 21)).unwrap();
    let root = tree.root().unwrap();
    for index in 0..tree.len() {
        let chain = tree.chain(index).unwrap();
        let position = rng.gen_range(0..chain.len());
        let bit = rng.gen_range(0..256);
        let mut links = chain.clone().into_links();
        let mut digest = links[position].hash();
        digest[bit / 8] ^= 1 << (bit % 8);
        links[position] = ChainLink::new(digest, links[position].is_left_child());
        assert!(!verify_chain::<32, Sha256>(&links.into(), &root));

        // flipping a sibling's side swaps the hash order
        for position in 1..chain.len() - 1 {
            let mut links = chain.clone().into_links();
            links[position] =
                ChainLink::new(links[position].hash(), !links[position].is_left_child());
            assert!(!verify_chain::<32, Sha256>(&links.into(), &root));
        }
    }
}

#[test]
fn test_join_across_index_tree() {
    // split the data into sub-trees whose roots are the leaves of an index tree
    let mut rng = StdRng::seed_from_u64(19);
    let parts: Vec<Tree<32, Sha256>> = [4, 7, 1, 16, 9]
        .into_iter()
        .map(|count| Tree::from_digests(random_digests(&mut rng, count)).unwrap())
        .collect();
    let index = Tree::<32, Sha256>::from_digests(parts.iter().map(|part| part.root().unwrap()))
        .unwrap();
    let index_root = index.root().unwrap();

    for (j, part) in parts.iter().enumerate() {
        let high = index.chain(j).unwrap();
        for i in 0..part.len() {
            let low = part.chain(i).unwrap();
            let joined = join_chains(&low, &high).unwrap();
            assert_eq!(joined.len(), low.len() + high.len() - 2);
            assert_eq!(joined.leaf(), low.leaf());
            assert!(joined.verify::<Sha256>(&index_root));

            let other = index.chain((j + 1) % parts.len()).unwrap();
            assert_eq!(
                join_chains(&low, &other).unwrap_err(),
                TreeError::IncompatibleChains
            );
        }
    }
}

#[test]
fn test_big_tree_chains_until_reduced() {
    let mut rng = StdRng::seed_from_u64(23);
    let mut tree = BigTree::<32, Sha256>::new(5);
    let count = 100u64;
    for _ in 0..count {
        tree.append(rng.gen()).unwrap();
    }
    // 100 = 64 + 32 + 4, only the 4 newest leaves keep their interior
    assert_eq!(tree.stack_sizes(), vec![4, 32, 64]);
    let root = tree.root().unwrap();
    for index in 0..count {
        match tree.chain(index) {
            Ok(chain) => {
                assert!(index >= 96);
                assert!(chain.verify::<Sha256>(&root));
            }
            Err(err) => {
                assert!(index < 96);
                assert_eq!(err, TreeError::ReducedSubtree { index });
            }
        }
    }
}

#[test]
fn test_leaves_rebuild_same_tree() {
    let mut rng = StdRng::seed_from_u64(29);
    let mut tree = Tree::<32, Sha256>::from_digests(random_digests(&mut rng, 10)).unwrap();
    for _ in 0..6 {
        tree.append(rng.gen());
    }
    let leaves = tree.leaves();
    assert_eq!(leaves.len(), 16);
    let rebuilt = Tree::<32, Sha256>::from_leaves(leaves).unwrap();
    assert_eq!(rebuilt.root(), tree.root());
    assert_eq!(rebuilt.chains().unwrap(), tree.chains().unwrap());
}

#[test]
fn test_raw_data_is_hashed() {
    let data = ["x", "y", "z"];
    let from_data = Tree::<32, Sha256>::from_data(&data).unwrap();
    let from_digests =
        Tree::<32, Sha256>::from_digests(data.iter().map(|item| Sha256::hash(item.as_bytes())))
            .unwrap();
    assert_eq!(from_data.root(), from_digests.root());
}
