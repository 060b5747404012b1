//! Full-linkage Merkle tree with incremental append and chain extraction

use std::{fmt::Debug, marker::PhantomData};

use log::{debug, trace};

use crate::{
    node::{Hasher, LinkedNode, NodeId},
    Chain, ChainLink, Leaves, TreeError,
};

use super::highest_power_of_two;

/// Merkle tree that keeps every node and its links.
/// * `HASH_SIZE` - size of the hash digest in bytes.
/// * `H` - Hasher that will be used to hash nodes.
///
/// Nodes live in an arena owned by the tree. Children are referenced from
/// their parent and parents are referenced back from their children, so
/// the tree can be walked in both directions without shared ownership.
#[derive(Clone)]
pub struct Tree<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> {
    nodes: Vec<LinkedNode<HASH_SIZE>>,
    // slots of interior nodes dropped by an append, reused first
    free: Vec<NodeId>,
    leaves: Vec<NodeId>,
    root: Option<NodeId>,
    _phantom: PhantomData<H>,
}

impl<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> Default for Tree<HASH_SIZE, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> Debug for Tree<HASH_SIZE, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Tree {{ leaves: {}, root: {:?} }}",
            self.len(),
            self.root().map(hex::encode)
        )
    }
}

impl<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> Tree<HASH_SIZE, H> {
    /// Creates an empty tree. The first appended leaf becomes the root.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            leaves: Vec::new(),
            root: None,
            _phantom: PhantomData,
        }
    }

    /// Builds a tree when the digests of all leaves are known.
    pub fn from_digests(
        digests: impl IntoIterator<Item = [u8; HASH_SIZE]>,
    ) -> Result<Self, TreeError> {
        let mut tree = Self::new();
        for digest in digests {
            let leaf = tree.alloc(LinkedNode::new_leaf(digest));
            tree.leaves.push(leaf);
        }
        tree.build()?;
        Ok(tree)
    }

    /// Builds a tree when the data of all leaves is known. Each item is hashed.
    pub fn from_data<T: AsRef<[u8]>>(data: &[T]) -> Result<Self, TreeError> {
        Self::from_digests(data.iter().map(|item| H::hash(item.as_ref())))
    }

    /// Rebuilds a tree from persisted leaves.
    pub fn from_leaves(leaves: Leaves<HASH_SIZE>) -> Result<Self, TreeError> {
        Self::from_digests(leaves.into_digests())
    }

    /// Root digest, `None` while the tree has no leaves.
    pub fn root(&self) -> Option<[u8; HASH_SIZE]> {
        self.root.map(|root| self.node(root).hash())
    }

    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Digest of the leaf at `index`.
    pub fn leaf(&self, index: usize) -> Option<[u8; HASH_SIZE]> {
        self.leaves.get(index).map(|&leaf| self.node(leaf).hash())
    }

    /// All leaf digests in append order.
    pub fn leaves(&self) -> Leaves<HASH_SIZE> {
        self.leaves.iter().map(|&leaf| self.node(leaf).hash()).collect()
    }

    /// Appends a leaf and returns the new root. Only one node per complete
    /// subtree is touched, the rest of the tree is left as is.
    pub fn append(&mut self, digest: [u8; HASH_SIZE]) -> [u8; HASH_SIZE] {
        let leaf = self.alloc(LinkedNode::new_leaf(digest));
        let Some(root) = self.root else {
            self.leaves.push(leaf);
            self.root = Some(leaf);
            return digest;
        };
        let (subtrees, spine) = self.whole_subtrees(root);
        self.leaves.push(leaf);

        // fold the new leaf into the subtrees, smallest first
        let mut carry = leaf;
        for &subtree in subtrees.iter().rev() {
            carry = self.join(subtree, carry);
        }
        self.free.extend(spine);
        self.root = Some(carry);
        trace!(
            "appended leaf {} across {} subtrees",
            self.leaves.len() - 1,
            subtrees.len()
        );
        self.node(carry).hash()
    }

    /// Hashes `data` and appends it as a leaf.
    pub fn append_data<T: AsRef<[u8]>>(&mut self, data: T) -> [u8; HASH_SIZE] {
        self.append(H::hash(data.as_ref()))
    }

    /// Gets the chain from the leaf at `index` up to the root.
    pub fn chain(&self, index: usize) -> Result<Chain<HASH_SIZE>, TreeError> {
        let (Some(&leaf), Some(root)) = (self.leaves.get(index), self.root) else {
            return Err(TreeError::IndexOutOfRange {
                index: index as u64,
                len: self.len() as u64,
            });
        };
        let mut links = vec![self.link(leaf)];
        let mut current = leaf;
        while let Some(parent) = self.node(current).parent() {
            let Some((left, right)) = self.node(parent).children() else {
                unreachable!("A parent always has two children.");
            };
            let sibling = if self.node(current).is_left_child() {
                right
            } else {
                left
            };
            links.push(self.link(sibling));
            current = parent;
        }
        links.push(self.link(root));
        Ok(Chain::new(links))
    }

    /// Gets the chain of every leaf, in leaf order.
    pub fn chains(&self) -> Result<Vec<Chain<HASH_SIZE>>, TreeError> {
        (0..self.len()).map(|index| self.chain(index)).collect()
    }

    /// Pairs the current leaves level by level until one node remains.
    /// An odd node at the end of a level is carried up as is.
    fn build(&mut self) -> Result<[u8; HASH_SIZE], TreeError> {
        if self.leaves.is_empty() {
            return Err(TreeError::EmptyInput);
        }
        let mut layer = self.leaves.clone();
        while layer.len() > 1 {
            let mut next = Vec::with_capacity(layer.len().div_ceil(2));
            for pair in layer.chunks(2) {
                match *pair {
                    [left, right] => next.push(self.join(left, right)),
                    [odd] => next.push(odd),
                    _ => unreachable!("chunks(2) yields one or two nodes"),
                }
            }
            layer = next;
        }
        let root = layer[0];
        self.root = Some(root);
        debug!("built tree of {} leaves", self.leaves.len());
        Ok(self.node(root).hash())
    }

    /// Roots of the complete subtrees that make up the tree, largest first,
    /// along with the interior spine nodes that sit above them.
    fn whole_subtrees(&self, root: NodeId) -> (Vec<NodeId>, Vec<NodeId>) {
        let mut subtrees = Vec::new();
        let mut spine = Vec::new();
        let mut loose = self.leaves.len() - highest_power_of_two(self.leaves.len());
        let mut current = root;
        while loose != 0 {
            let Some((left, right)) = self.node(current).children() else {
                unreachable!("Loose leaves always hang under a branch.");
            };
            subtrees.push(left);
            spine.push(current);
            current = right;
            loose -= highest_power_of_two(loose);
        }
        subtrees.push(current);
        (subtrees, spine)
    }

    /// Creates the parent of `left` and `right` and links both to it.
    fn join(&mut self, left: NodeId, right: NodeId) -> NodeId {
        let digest = H::combine(&self.node(left).hash(), &self.node(right).hash());
        let parent = self.alloc(LinkedNode::new_parent(digest, left, right));
        self.node_mut(left).attach(parent, true);
        self.node_mut(right).attach(parent, false);
        parent
    }

    fn alloc(&mut self, node: LinkedNode<HASH_SIZE>) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.nodes[id.index()] = node;
                id
            }
            None => {
                self.nodes.push(node);
                NodeId::new(self.nodes.len() - 1)
            }
        }
    }

    fn node(&self, id: NodeId) -> &LinkedNode<HASH_SIZE> {
        &self.nodes[id.index()]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut LinkedNode<HASH_SIZE> {
        &mut self.nodes[id.index()]
    }

    fn link(&self, id: NodeId) -> ChainLink<HASH_SIZE> {
        let node = self.node(id);
        ChainLink::new(node.hash(), node.is_left_child())
    }
}

impl<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> TryFrom<Leaves<HASH_SIZE>>
    for Tree<HASH_SIZE, H>
{
    type Error = TreeError;

    fn try_from(leaves: Leaves<HASH_SIZE>) -> Result<Self, Self::Error> {
        Self::from_leaves(leaves)
    }
}
