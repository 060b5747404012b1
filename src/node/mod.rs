mod branch;
mod linked;
mod reduced;

use sha2::{Digest, Sha256};
use std::fmt::Debug;
use std::fmt::Display;

pub use branch::Branch;
pub(crate) use linked::{LinkedNode, NodeId};
pub use reduced::ReducedNode;

impl Hasher<32> for Sha256 {
    fn hash(data: &[u8]) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(data);
        hasher.finalize().into()
    }
}

/// Thread safety marker trait
#[cfg(feature = "multi-thread")]
pub trait ThreadSafe: Send + Sync {}
#[cfg(feature = "multi-thread")]
impl<T: Send + Sync> ThreadSafe for T {}

#[cfg(not(feature = "multi-thread"))]
pub trait ThreadSafe {}
#[cfg(not(feature = "multi-thread"))]
impl<T> ThreadSafe for T {}

/// Number of leaves spanned by a node.
pub type LeafCount = u64;

/// Simple hash trait required to hash the nodes in the tree
///
/// # Type Parameters
/// * `HASH_SIZE` - The size of the hash digest in bytes
pub trait Hasher<const HASH_SIZE: usize> {
    fn hash(data: &[u8]) -> [u8; HASH_SIZE];

    /// Digest of a parent node: `hash(left || right)`.
    fn combine(left: &[u8; HASH_SIZE], right: &[u8; HASH_SIZE]) -> [u8; HASH_SIZE] {
        Self::hash([left.as_slice(), right.as_slice()].concat().as_slice())
    }
}

/// Root of a complete subtree held on the bounded tree's stack.
///
/// # Type Parameters
/// * `HASH_SIZE` - The size of the hash digest in bytes
/// * `H` - The hasher implementation used for this node
#[derive(Clone)]
pub enum Subtree<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> {
    /// A single appended digest
    Leaf([u8; HASH_SIZE]),
    /// A detailed subtree that still owns its children
    Branch(Branch<HASH_SIZE, H>),
    /// A subtree whose interior has been discarded
    Reduced(ReducedNode<HASH_SIZE>),
}
impl<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> Debug for Subtree<HASH_SIZE, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Leaf(digest) => write!(f, "Leaf {{ hash: {:?} }}", digest),
            Self::Branch(branch) => write!(
                f,
                "Branch {{ leaves: {}, hash: {:?} }}",
                branch.leaf_count(),
                branch.hash()
            ),
            Self::Reduced(reduced) => write!(
                f,
                "Reduced {{ leaves: {}, hash: {:?} }}",
                reduced.leaf_count(),
                reduced.hash()
            ),
        }
    }
}
impl<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> Display for Subtree<HASH_SIZE, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Leaf(digest) => write!(f, "Leaf {{ hash: {} }}", hex::encode(digest)),
            Self::Branch(branch) => write!(f, "{}", branch),
            Self::Reduced(reduced) => write!(f, "{}", reduced),
        }
    }
}

impl<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> Subtree<HASH_SIZE, H> {
    /// Joins two subtrees under a new parent, `left` holding the earlier leaves.
    /// Two reduced halves produce a reduced parent since neither has an interior to keep.
    pub fn merge(left: Self, right: Self) -> Self {
        if let (Self::Reduced(l), Self::Reduced(r)) = (&left, &right) {
            return Self::Reduced(ReducedNode::new(
                H::combine(&l.hash(), &r.hash()),
                l.leaf_count() + r.leaf_count(),
            ));
        }
        Self::Branch(Branch::new(left, right))
    }

    /// Discards the interior, keeping only the digest and the leaf count.
    pub fn reduce(self) -> Self {
        match self {
            Self::Reduced(_) => self,
            _ => Self::Reduced(ReducedNode::new(self.hash(), self.leaf_count())),
        }
    }

    /// Returns the hash of the node. NO HASHING IS DONE HERE.
    pub fn hash(&self) -> [u8; HASH_SIZE] {
        match self {
            Self::Leaf(digest) => *digest,
            Self::Branch(branch) => branch.hash(),
            Self::Reduced(reduced) => reduced.hash(),
        }
    }

    pub fn leaf_count(&self) -> LeafCount {
        match self {
            Self::Leaf(_) => 1,
            Self::Branch(branch) => branch.leaf_count(),
            Self::Reduced(reduced) => reduced.leaf_count(),
        }
    }

    pub fn is_reduced(&self) -> bool {
        matches!(self, Self::Reduced(_))
    }
}
