//! Error types for the incremental Merkle tree

use std::error::Error;
use std::fmt::Display;

/// Error type for tree and chain operations
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum TreeError {
    /// A tree was built from zero leaves
    EmptyInput,
    /// A chain was requested for a leaf that does not exist
    IndexOutOfRange { index: u64, len: u64 },
    /// The anchor of the lower chain is not the leaf of the higher chain
    IncompatibleChains,
    /// A detailed bounded subtree grew past the configured maximum.
    /// The append is aborted and the tree must be discarded.
    InvariantViolation { size: u64, max: u64 },
    /// The leaf lives in a subtree whose interior has been discarded
    ReducedSubtree { index: u64 },
}

impl Display for TreeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TreeError::EmptyInput => write!(f, "No leaves to build"),
            TreeError::IndexOutOfRange { index, len } => {
                write!(f, "Leaf index {} out of range for {} leaves", index, len)
            }
            TreeError::IncompatibleChains => write!(f, "Chains are not compatible"),
            TreeError::InvariantViolation { size, max } => write!(
                f,
                "Bounded subtree of {} leaves exceeds the maximum of {}",
                size, max
            ),
            TreeError::ReducedSubtree { index } => {
                write!(f, "Leaf {} is inside a reduced subtree", index)
            }
        }
    }
}

impl Error for TreeError {}
