//! Inclusion chains and the operations on them.
//!
//! A chain starts with the committed leaf, continues with the sibling needed
//! at each level on the way up, and ends with the anchor (the root, or any
//! digest the verifier trusts). Each record carries the side its digest sits
//! on, so verification needs nothing but the chain and the hash function.
//!
//! Chains taken from a tree whose root is a leaf of a higher tree can be
//! joined into a single end-to-end chain.
use std::fmt::Display;

use crate::{Hasher, TreeError};

/// One record of a chain: a digest and whether it is the left child of its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainLink<const HASH_SIZE: usize> {
    digest: [u8; HASH_SIZE],
    is_left_child: bool,
}

impl<const HASH_SIZE: usize> ChainLink<HASH_SIZE> {
    pub fn new(digest: [u8; HASH_SIZE], is_left_child: bool) -> Self {
        Self {
            digest,
            is_left_child,
        }
    }

    pub fn hash(&self) -> [u8; HASH_SIZE] {
        self.digest
    }

    pub fn is_left_child(&self) -> bool {
        self.is_left_child
    }
}

impl<const HASH_SIZE: usize> Display for ChainLink<HASH_SIZE> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}",
            hex::encode(self.digest.as_slice()),
            if self.is_left_child { "left" } else { "right" }
        )
    }
}

/// An inclusion proof, from the leaf up to the anchor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Chain<const HASH_SIZE: usize> {
    links: Vec<ChainLink<HASH_SIZE>>,
}

impl<const HASH_SIZE: usize> Chain<HASH_SIZE> {
    /// Creates a new chain from a list of links.
    pub fn new(links: Vec<ChainLink<HASH_SIZE>>) -> Self {
        Self { links }
    }

    /// Returns the links in the chain.
    pub fn links(&self) -> &[ChainLink<HASH_SIZE>] {
        &self.links
    }

    pub fn into_links(self) -> Vec<ChainLink<HASH_SIZE>> {
        self.links
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// The committed leaf.
    pub fn leaf(&self) -> Option<&ChainLink<HASH_SIZE>> {
        self.links.first()
    }

    /// The endpoint the chain claims to reach.
    pub fn anchor(&self) -> Option<&ChainLink<HASH_SIZE>> {
        self.links.last()
    }

    /// Recomputes the endpoint from the leaf and the interior siblings.
    pub fn compute_anchor<H: Hasher<HASH_SIZE>>(&self) -> Option<[u8; HASH_SIZE]> {
        let (leaf, rest) = self.links.split_first()?;
        let interior = match rest.split_last() {
            Some((_, interior)) => interior,
            None => rest,
        };
        Some(interior.iter().fold(leaf.hash(), |link, sibling| {
            if sibling.is_left_child() {
                H::combine(&sibling.hash(), &link)
            } else {
                H::combine(&link, &sibling.hash())
            }
        }))
    }

    /// True if the interior of the chain reproduces its own last record.
    /// Whether that record can be trusted is up to the caller.
    pub fn is_consistent<H: Hasher<HASH_SIZE>>(&self) -> bool {
        match (self.compute_anchor::<H>(), self.anchor()) {
            (Some(computed), Some(anchor)) => computed == anchor.hash(),
            _ => false,
        }
    }

    /// True if the chain is consistent and ends at `expected`.
    pub fn verify<H: Hasher<HASH_SIZE>>(&self, expected: &[u8; HASH_SIZE]) -> bool {
        verify_chain::<HASH_SIZE, H>(self, expected)
    }

    /// Joins this chain with one from the tree one level up.
    pub fn join(&self, high: &Self) -> Result<Self, TreeError> {
        join_chains(self, high)
    }
}

impl<const HASH_SIZE: usize> From<Vec<ChainLink<HASH_SIZE>>> for Chain<HASH_SIZE> {
    fn from(links: Vec<ChainLink<HASH_SIZE>>) -> Self {
        Self::new(links)
    }
}

impl<const HASH_SIZE: usize> Display for Chain<HASH_SIZE> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, link) in self.links.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", link)?;
        }
        Ok(())
    }
}

/// Verify a chain against an anchor the caller trusts.
///
/// # Arguments
///
/// * `chain` - The chain to verify
/// * `expected` - The digest the chain must end at, usually a published root
///
/// # Returns
///
/// Returns `true` if walking the chain from its leaf reproduces its last
/// record and that record is `expected`. A mismatch is not an error.
pub fn verify_chain<const HASH_SIZE: usize, H: Hasher<HASH_SIZE>>(
    chain: &Chain<HASH_SIZE>,
    expected: &[u8; HASH_SIZE],
) -> bool {
    match chain.anchor() {
        Some(anchor) => anchor.hash() == *expected && chain.is_consistent::<H>(),
        None => false,
    }
}

/// Joins a chain from a lower tree with a chain from a higher tree whose leaf
/// is the lower tree's anchor. The shared record appears once in the result.
///
/// Neither input is modified.
pub fn join_chains<const HASH_SIZE: usize>(
    low: &Chain<HASH_SIZE>,
    high: &Chain<HASH_SIZE>,
) -> Result<Chain<HASH_SIZE>, TreeError> {
    let (Some((boundary, low_links)), Some((high_leaf, high_links))) =
        (low.links.split_last(), high.links.split_first())
    else {
        return Err(TreeError::IncompatibleChains);
    };
    if boundary.hash() != high_leaf.hash() {
        return Err(TreeError::IncompatibleChains);
    }
    Ok(Chain::new(
        low_links.iter().chain(high_links.iter()).copied().collect(),
    ))
}
