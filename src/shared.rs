//! Trees behind a lock, for instances shared between threads.
//!
//! Every operation holds the instance's single mutex for its whole duration,
//! so appends, roots and chains on one instance are serialized. Distinct
//! instances never contend.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::{BigTree, Chain, Hasher, Leaves, ThreadSafe, Tree, TreeError};

/// A [`Tree`] that can be cloned and shared across threads.
pub struct SharedTree<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone + ThreadSafe> {
    inner: Arc<Mutex<Tree<HASH_SIZE, H>>>,
}

impl<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone + ThreadSafe> Clone
    for SharedTree<HASH_SIZE, H>
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone + ThreadSafe> Default
    for SharedTree<HASH_SIZE, H>
{
    fn default() -> Self {
        Self::new(Tree::new())
    }
}

impl<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone + ThreadSafe> SharedTree<HASH_SIZE, H> {
    pub fn new(tree: Tree<HASH_SIZE, H>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(tree)),
        }
    }

    pub fn append(&self, digest: [u8; HASH_SIZE]) -> [u8; HASH_SIZE] {
        self.inner.lock().append(digest)
    }

    pub fn append_data<T: AsRef<[u8]>>(&self, data: T) -> [u8; HASH_SIZE] {
        self.inner.lock().append_data(data)
    }

    pub fn root(&self) -> Option<[u8; HASH_SIZE]> {
        self.inner.lock().root()
    }

    pub fn chain(&self, index: usize) -> Result<Chain<HASH_SIZE>, TreeError> {
        self.inner.lock().chain(index)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn leaves(&self) -> Leaves<HASH_SIZE> {
        self.inner.lock().leaves()
    }

    /// Runs `f` with the lock held, for reads that must see one consistent state.
    pub fn with<R>(&self, f: impl FnOnce(&Tree<HASH_SIZE, H>) -> R) -> R {
        f(&self.inner.lock())
    }
}

/// A [`BigTree`] that can be cloned and shared across threads.
pub struct SharedBigTree<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone + ThreadSafe> {
    inner: Arc<Mutex<BigTree<HASH_SIZE, H>>>,
}

impl<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone + ThreadSafe> Clone
    for SharedBigTree<HASH_SIZE, H>
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone + ThreadSafe>
    SharedBigTree<HASH_SIZE, H>
{
    pub fn new(tree: BigTree<HASH_SIZE, H>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(tree)),
        }
    }

    pub fn append(&self, digest: [u8; HASH_SIZE]) -> Result<[u8; HASH_SIZE], TreeError> {
        self.inner.lock().append(digest)
    }

    pub fn append_data<T: AsRef<[u8]>>(&self, data: T) -> Result<[u8; HASH_SIZE], TreeError> {
        self.inner.lock().append_data(data)
    }

    pub fn root(&self) -> Option<[u8; HASH_SIZE]> {
        self.inner.lock().root()
    }

    pub fn chain(&self, index: u64) -> Result<Chain<HASH_SIZE>, TreeError> {
        self.inner.lock().chain(index)
    }

    pub fn len(&self) -> u64 {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Runs `f` with the lock held, for reads that must see one consistent state.
    pub fn with<R>(&self, f: impl FnOnce(&BigTree<HASH_SIZE, H>) -> R) -> R {
        f(&self.inner.lock())
    }
}

#[cfg(test)]
mod test {
    use std::thread;

    use super::{SharedBigTree, SharedTree};
    use crate::{BigTree, Tree};
    use sha2::Sha256;

    #[test]
    fn test_shared_appends_from_threads() {
        let tree = SharedTree::<32, Sha256>::default();
        let big = SharedBigTree::new(BigTree::<32, Sha256>::new(4));
        let handles: Vec<_> = (0..4u8)
            .map(|worker| {
                let tree = tree.clone();
                let big = big.clone();
                thread::spawn(move || {
                    for i in 0..50u8 {
                        tree.append_data([worker, i]);
                        big.append_data([worker, i]).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(tree.len(), 200);
        assert_eq!(big.len(), 200);

        // the interleaving differs between the two trees, the leaf set does not
        let rebuilt = Tree::<32, Sha256>::from_leaves(tree.leaves()).unwrap();
        assert_eq!(rebuilt.root(), tree.root());
        let root = tree.root().unwrap();
        tree.with(|inner| {
            for index in 0..inner.len() {
                assert!(inner.chain(index).unwrap().verify::<Sha256>(&root));
            }
        });
    }

    #[test]
    fn test_shared_big_tree_chain() {
        let big = SharedBigTree::new(BigTree::<32, Sha256>::new(16));
        for i in 0..9u8 {
            big.append_data([i]).unwrap();
        }
        let root = big.root().unwrap();
        assert!(big.chain(8).unwrap().verify::<Sha256>(&root));
        assert!(big.with(|inner| inner.stack_sizes()) == vec![1, 8]);
        assert!(!big.is_empty());
    }
}
