use std::fmt::Display;

/// Position of a node in the tree's arena. Used for parent back-references,
/// never for ownership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }
    pub(crate) fn index(self) -> usize {
        self.0
    }
}

/// A node of the full-linkage tree. Either a leaf or an internal node with
/// exactly two children. The digest is fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LinkedNode<const HASH_SIZE: usize> {
    digest: [u8; HASH_SIZE],
    is_left_child: bool,
    parent: Option<NodeId>,
    children: Option<(NodeId, NodeId)>,
}

impl<const HASH_SIZE: usize> LinkedNode<HASH_SIZE> {
    pub(crate) fn new_leaf(digest: [u8; HASH_SIZE]) -> Self {
        Self {
            digest,
            is_left_child: false,
            parent: None,
            children: None,
        }
    }

    pub(crate) fn new_parent(digest: [u8; HASH_SIZE], left: NodeId, right: NodeId) -> Self {
        Self {
            digest,
            is_left_child: false,
            parent: None,
            children: Some((left, right)),
        }
    }

    pub(crate) fn hash(&self) -> [u8; HASH_SIZE] {
        self.digest
    }

    /// Meaningless for the root.
    pub(crate) fn is_left_child(&self) -> bool {
        self.is_left_child
    }

    pub(crate) fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub(crate) fn children(&self) -> Option<(NodeId, NodeId)> {
        self.children
    }

    pub(crate) fn attach(&mut self, parent: NodeId, is_left_child: bool) {
        self.parent = Some(parent);
        self.is_left_child = is_left_child;
    }
}

impl<const HASH_SIZE: usize> Display for LinkedNode<HASH_SIZE> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{ digest: {}, left: {} }}",
            hex::encode(self.digest.as_slice()),
            self.is_left_child
        )
    }
}
