//! Example of the bounded-memory tree
//!
//! This example demonstrates:
//! - Appending many leaves while only complete subtree roots are kept
//! - Checking the root against a full tree
//! - Joining chains from a data tree and an index tree

use merkle_chain::{join_chains, Sha256BigTree, Sha256Tree};
use sha2::Sha256;

fn main() {
    env_logger::init();

    // Subtrees are reduced once they reach 2^8 leaves
    let mut big = Sha256BigTree::new(8);
    let mut full = Sha256Tree::new();
    for i in 0..10_000u32 {
        big.append_data(i.to_be_bytes()).unwrap();
        full.append_data(i.to_be_bytes());
    }
    println!("BigTree root: {}", hex::encode(big.root().unwrap()));
    println!("Tree root:    {}", hex::encode(full.root().unwrap()));
    println!("Stack sizes:  {:?}", big.stack_sizes());

    // Leaves in the newest, still detailed subtree can be proven
    let chain = big.chain(9_999).unwrap();
    println!("Newest leaf verifies: {}", chain.verify::<Sha256>(&big.root().unwrap()));
    println!("Oldest leaf: {}", big.chain(0).unwrap_err());

    // Roots of data trees become leaves of an index tree
    let data_tree = Sha256Tree::from_data(&["x", "y", "z"]).unwrap();
    let mut index_tree = Sha256Tree::from_data(&["genesis"]).unwrap();
    let index_root = index_tree.append(data_tree.root().unwrap());
    let joined = join_chains(&data_tree.chain(2).unwrap(), &index_tree.chain(1).unwrap()).unwrap();
    println!(
        "Joined chain of {} links verifies: {}",
        joined.len(),
        joined.verify::<Sha256>(&index_root)
    );
}
