use std::fmt::Display;

use super::LeafCount;

/// A reduced node. Stands in for a complete subtree whose interior was
/// discarded, so it can still be combined but never walked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReducedNode<const HASH_SIZE: usize> {
    node_hash: [u8; HASH_SIZE],
    leaf_count: LeafCount,
}
impl<const HASH_SIZE: usize> ReducedNode<HASH_SIZE> {
    pub fn new(node_hash: [u8; HASH_SIZE], leaf_count: LeafCount) -> Self {
        Self {
            node_hash,
            leaf_count,
        }
    }
    /// Returns the hash of the node.
    pub fn hash(&self) -> [u8; HASH_SIZE] {
        self.node_hash
    }
    /// Returns the number of leaves the node stood for.
    pub fn leaf_count(&self) -> LeafCount {
        self.leaf_count
    }
}

impl<const HASH_SIZE: usize> Display for ReducedNode<HASH_SIZE> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Reduced {{ leaves: {}, hash: {} }}",
            self.leaf_count(),
            hex::encode(self.hash().as_slice())
        )
    }
}

#[cfg(test)]
mod test {
    use super::ReducedNode;
    use hex_literal::hex;
    #[test]
    fn test_reduced_node_new() {
        let reduced = ReducedNode::new(
            hex!("0000000000000000000000000000000000000000000000000000000000000000"),
            256,
        );
        assert_eq!(
            reduced.hash(),
            hex!("0000000000000000000000000000000000000000000000000000000000000000")
        );
        assert_eq!(reduced.leaf_count(), 256);
    }

    #[test]
    fn test_reduced_node_display() {
        let reduced = ReducedNode::new(
            hex!("0000000000000000000000000000000000000000000000000000000000000000"),
            1,
        );
        assert_eq!(format!("{}", reduced), "Reduced { leaves: 1, hash: 0000000000000000000000000000000000000000000000000000000000000000 }");
    }
}
