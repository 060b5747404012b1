//! Incremental Merkle tree implementation
//!
//! This crate computes the Merkle root of an ordered sequence of leaves and
//! keeps it up to date as leaves are appended, without rebuilding.
//!
//! The crate provides:
//! - [`Tree`], which keeps every node and produces inclusion chains
//! - [`BigTree`], which keeps only a stack of complete subtree roots and
//!   discards the interior of full subtrees, so memory stays bounded
//! - [`Chain`], verified with [`verify_chain`] and composed across tree
//!   levels with [`join_chains`]
//! - A [`Hasher`] seam, implemented for `sha2::Sha256`
//!
//! Both trees give the same root for the same leaves. When a level has an
//! odd number of nodes the last one is carried up unchanged, never hashed
//! with itself.

mod error;
mod node;
mod proof;
#[cfg(feature = "multi-thread")]
mod shared;
mod tree;

pub use error::TreeError;
pub use node::{Branch, Hasher, LeafCount, ReducedNode, Subtree, ThreadSafe};
pub use proof::{join_chains, verify_chain, Chain, ChainLink};
#[cfg(feature = "multi-thread")]
pub use shared::{SharedBigTree, SharedTree};
pub use tree::{BigTree, Leaves, Sha256BigTree, Sha256Tree, SubtreeStack, Tree};

#[cfg(test)]
mod tests;
