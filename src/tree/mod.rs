mod compact;
mod leaves;
mod regular;
mod stack;

use sha2::Sha256;

pub use compact::BigTree;
pub use leaves::Leaves;
pub use regular::Tree;
pub use stack::SubtreeStack;

/// Full-linkage tree over SHA-256.
pub type Sha256Tree = Tree<32, Sha256>;
/// Bounded-memory tree over SHA-256.
pub type Sha256BigTree = BigTree<32, Sha256>;

/// Largest power of two that is `<= size`. `size` must be non-zero.
pub(crate) fn highest_power_of_two(size: usize) -> usize {
    debug_assert!(size > 0);
    1 << (usize::BITS - 1 - size.leading_zeros())
}
