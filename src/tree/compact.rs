//! Bounded-memory Merkle tree
//!
//! Only the roots of the complete subtrees are kept, on a stack whose entry
//! sizes are the set bits of the leaf count. Appending a leaf works like
//! incrementing a binary counter: equal-sized subtrees are merged as long as
//! the carry propagates. Once a merged subtree spans the configured maximum
//! number of leaves its interior is discarded, so memory stays bounded no
//! matter how many leaves are appended. The root matches the one [`Tree`]
//! computes for the same leaves.
//!
//! [`Tree`]: crate::Tree

use std::fmt::Debug;

use log::{debug, error, trace};

use crate::{
    node::{Hasher, LeafCount, Subtree},
    Chain, ChainLink, TreeError,
};

use super::SubtreeStack;

/// Merkle tree holding only a stack of complete subtree roots.
/// * `HASH_SIZE` - size of the hash digest in bytes.
/// * `H` - Hasher that will be used to hash nodes.
#[derive(Clone)]
pub struct BigTree<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> {
    roots: SubtreeStack<Subtree<HASH_SIZE, H>>,
    max_power: u32,
    len: u64,
}

impl<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> Debug for BigTree<HASH_SIZE, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BigTree {{ leaves: {}, max_size: {}, stack: {:?} }}",
            self.len,
            self.max_size(),
            self.stack_sizes()
        )
    }
}

impl<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> BigTree<HASH_SIZE, H> {
    /// Creates an empty tree whose subtrees are reduced once they span
    /// `2^max_power` leaves.
    ///
    /// # Panics
    ///
    /// Panics if `max_power` is 64 or more.
    pub fn new(max_power: u32) -> Self {
        assert!(
            max_power < LeafCount::BITS,
            "max_power must be below {}",
            LeafCount::BITS
        );
        Self {
            roots: SubtreeStack::new(),
            max_power,
            len: 0,
        }
    }

    /// Maximum number of leaves a detailed subtree may span.
    pub fn max_size(&self) -> LeafCount {
        1 << self.max_power
    }

    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Leaf count of each stack entry, newest first.
    pub fn stack_sizes(&self) -> Vec<LeafCount> {
        self.roots.iter().map(Subtree::leaf_count).collect()
    }

    /// Stack entries, newest first.
    pub fn subtrees(&self) -> impl Iterator<Item = &Subtree<HASH_SIZE, H>> {
        self.roots.iter()
    }

    /// Appends a leaf and returns the new root.
    ///
    /// Fails only with [`TreeError::InvariantViolation`], which means the
    /// stack no longer decomposes the leaf count. The tree must then be
    /// discarded.
    pub fn append(&mut self, digest: [u8; HASH_SIZE]) -> Result<[u8; HASH_SIZE], TreeError> {
        let mut subtree = self.settle(Subtree::Leaf(digest));
        while let Some(top) = self.roots.peek() {
            let size = top.leaf_count() + subtree.leaf_count();
            if !size.is_power_of_two() {
                break;
            }
            if !(top.is_reduced() && subtree.is_reduced()) && size > self.max_size() {
                error!(
                    "merged subtree of {} leaves exceeds the maximum of {}",
                    size,
                    self.max_size()
                );
                return Err(TreeError::InvariantViolation {
                    size,
                    max: self.max_size(),
                });
            }
            let Some(top) = self.roots.pop() else {
                break;
            };
            subtree = self.settle(Subtree::merge(top, subtree));
        }
        let root = self
            .roots
            .iter()
            .fold(subtree.hash(), |acc, entry| H::combine(&entry.hash(), &acc));
        self.roots.push(subtree);
        self.len += 1;
        debug_assert_eq!(
            self.roots.iter().map(Subtree::leaf_count).sum::<LeafCount>(),
            self.len,
            "stack entries must span every appended leaf"
        );
        trace!("appended leaf {}, stack {:?}", self.len - 1, self.stack_sizes());
        Ok(root)
    }

    /// Hashes `data` and appends it as a leaf.
    pub fn append_data<T: AsRef<[u8]>>(&mut self, data: T) -> Result<[u8; HASH_SIZE], TreeError> {
        self.append(H::hash(data.as_ref()))
    }

    /// Root digest, `None` while the tree has no leaves.
    ///
    /// Every older subtree is the left sibling of everything appended after it.
    pub fn root(&self) -> Option<[u8; HASH_SIZE]> {
        let mut entries = self.roots.iter();
        let front = entries.next()?.hash();
        Some(entries.fold(front, |acc, entry| H::combine(&entry.hash(), &acc)))
    }

    /// Gets the chain from the leaf at `index` up to the root. Only leaves
    /// whose subtree has not been reduced can be proven.
    pub fn chain(&self, index: u64) -> Result<Chain<HASH_SIZE>, TreeError> {
        if index >= self.len {
            return Err(TreeError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        let entries: Vec<&Subtree<HASH_SIZE, H>> = self.roots.iter().collect();

        // entries cover the leaves back to front
        let mut end = self.len;
        let mut found = None;
        for (position, entry) in entries.iter().enumerate() {
            let start = end - entry.leaf_count();
            if index >= start {
                found = Some((position, index - start));
                break;
            }
            end = start;
        }
        let Some((position, offset)) = found else {
            unreachable!("The stack spans every appended leaf.");
        };

        let mut links = Self::subtree_links(entries[position], index, offset)?;
        if position > 0 {
            let newer = entries[1..position]
                .iter()
                .fold(entries[0].hash(), |acc, entry| H::combine(&entry.hash(), &acc));
            links.push(ChainLink::new(newer, false));
        }
        for older in &entries[position + 1..] {
            links.push(ChainLink::new(older.hash(), true));
        }
        if let Some(root) = self.root() {
            links.push(ChainLink::new(root, false));
        }

        // the leaf's own side follows from its first sibling
        let leaf_is_left = match links.get(1) {
            Some(sibling) if links.len() > 2 => !sibling.is_left_child(),
            _ => false,
        };
        links[0] = ChainLink::new(links[0].hash(), leaf_is_left);
        Ok(Chain::new(links))
    }

    /// Leaf record followed by the siblings inside one stack entry, bottom up.
    fn subtree_links(
        entry: &Subtree<HASH_SIZE, H>,
        index: u64,
        mut offset: u64,
    ) -> Result<Vec<ChainLink<HASH_SIZE>>, TreeError> {
        let mut siblings = Vec::new();
        let mut span = entry.leaf_count();
        let mut current = entry;
        let leaf = loop {
            match current {
                Subtree::Leaf(digest) => break *digest,
                Subtree::Branch(branch) => {
                    span /= 2;
                    if offset < span {
                        siblings.push(ChainLink::new(branch.right().hash(), false));
                        current = branch.left();
                    } else {
                        siblings.push(ChainLink::new(branch.left().hash(), true));
                        offset -= span;
                        current = branch.right();
                    }
                }
                Subtree::Reduced(_) => return Err(TreeError::ReducedSubtree { index }),
            }
        };
        let mut links = Vec::with_capacity(siblings.len() + 1);
        links.push(ChainLink::new(leaf, false));
        links.extend(siblings.into_iter().rev());
        Ok(links)
    }

    /// Reduces a detailed subtree that reached the maximum size.
    fn settle(&self, subtree: Subtree<HASH_SIZE, H>) -> Subtree<HASH_SIZE, H> {
        if !subtree.is_reduced() && subtree.leaf_count() == self.max_size() {
            debug!(
                "reducing subtree of {} leaves after leaf {}",
                subtree.leaf_count(),
                self.len
            );
            return subtree.reduce();
        }
        subtree
    }
}
