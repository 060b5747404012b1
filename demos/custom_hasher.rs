//! Example of implementing a custom hasher for the incremental Merkle tree
//!
//! This example demonstrates:
//! - Creating a custom hasher implementation
//! - Using it with the tree
//! - Basic tree operations with the custom hasher

use merkle_chain::{Hasher, Sha256Tree, Tree};
use sha2::{Digest, Sha256};

// Custom hasher that uses SHA256 but adds a prefix to the input
#[derive(Clone)]
struct PrefixedSha256;

impl Hasher<32> for PrefixedSha256 {
    fn hash(data: &[u8]) -> [u8; 32] {
        let mut hasher = Sha256::new();
        // Add a custom prefix to the input
        hasher.update(b"custom_prefix:");
        hasher.update(data);
        hasher.finalize().into()
    }
}

fn main() {
    // Create a new tree with our custom hasher
    let tree = Tree::<32, PrefixedSha256>::from_data(&[vec![1u8, 2, 3], vec![4u8, 5, 6]]).unwrap();
    let root = tree.root().unwrap();
    println!("Root hash with custom hasher: {}", hex::encode(root));

    // Chains are verified with the same hasher
    let chain = tree.chain(1).unwrap();
    println!("Chain verifies: {}", chain.verify::<PrefixedSha256>(&root));

    // Compare with standard SHA256
    let standard_tree = Sha256Tree::from_data(&[vec![1u8, 2, 3], vec![4u8, 5, 6]]).unwrap();
    println!(
        "Root hash with standard SHA256: {}",
        hex::encode(standard_tree.root().unwrap())
    );
    println!("Chain verifies with SHA256: {}", chain.verify::<Sha256>(&root));

    // Note that the hashes are different due to our custom prefix
    println!("\nThe hashes are different because our custom hasher adds a prefix to the input.");
}
