use std::{fmt::Display, marker::PhantomData};

use super::{Hasher, LeafCount, Subtree};

/// A branch is a node that has exactly 2 children, the left one holding the
/// earlier leaves. It owns both children until the subtree is reduced.
#[derive(Debug, Clone)]
pub struct Branch<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> {
    left: Box<Subtree<HASH_SIZE, H>>,
    right: Box<Subtree<HASH_SIZE, H>>,
    leaf_count: LeafCount,
    node_hash: [u8; HASH_SIZE],
    _phantom: PhantomData<H>,
}
impl<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> Branch<HASH_SIZE, H> {
    /// Creates a new [`Branch`]. This function performs a hash and an addition.
    pub fn new(left: Subtree<HASH_SIZE, H>, right: Subtree<HASH_SIZE, H>) -> Self {
        let leaf_count = left.leaf_count() + right.leaf_count();
        let node_hash = H::combine(&left.hash(), &right.hash());

        Self {
            left: Box::new(left),
            right: Box::new(right),
            leaf_count,
            node_hash,
            _phantom: PhantomData,
        }
    }

    /// Returns the hash of the node. NO HASHING IS DONE HERE.
    pub fn hash(&self) -> [u8; HASH_SIZE] {
        self.node_hash
    }

    pub fn leaf_count(&self) -> LeafCount {
        self.leaf_count
    }

    /// Returns the left and right children of this branch.
    pub fn children(&self) -> (&Subtree<HASH_SIZE, H>, &Subtree<HASH_SIZE, H>) {
        (&self.left, &self.right)
    }

    /// Returns the left children of this branch.
    pub fn left(&self) -> &Subtree<HASH_SIZE, H> {
        &self.left
    }

    /// Returns the right children of this branch.
    pub fn right(&self) -> &Subtree<HASH_SIZE, H> {
        &self.right
    }
}
impl<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> Display for Branch<HASH_SIZE, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Branch {{ leaves: {}, hash: {} }}",
            self.leaf_count(),
            hex::encode(self.hash().as_slice())
        )
    }
}
