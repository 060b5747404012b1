//! Basic example of using the incremental Merkle tree
//!
//! This example demonstrates:
//! - Building a tree from data
//! - Appending leaves
//! - Getting the root hash
//! - Extracting and verifying inclusion chains

use merkle_chain::{verify_chain, Sha256Tree};
use sha2::Sha256;

fn main() {
    env_logger::init();

    // Build a tree from four data items, each is hashed with SHA256
    let mut tree = Sha256Tree::from_data(&["a", "b", "c", "d"]).unwrap();
    println!("Root hash: {}", hex::encode(tree.root().unwrap()));

    // Append more leaves without rebuilding
    tree.append_data("e");
    let root = tree.append_data("f");
    println!("Root hash after append: {}", hex::encode(root));
    println!("Leaves: {}", tree.len());

    // Get the chain for leaf 4 and hand it to a verifier
    let chain = tree.chain(4).unwrap();
    println!("Chain length: {}", chain.len());
    println!("{}", chain);

    // The verifier only needs the chain and the root it trusts
    let valid = verify_chain::<32, Sha256>(&chain, &root);
    println!("Chain verification: {}", valid);
}
