/// Ordered leaf digests of a tree, the form a tree is persisted and rebuilt
/// from. Encoding them is left to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Leaves<const HASH_SIZE: usize> {
    digests: Vec<[u8; HASH_SIZE]>,
}

impl<const HASH_SIZE: usize> Leaves<HASH_SIZE> {
    pub fn new(digests: Vec<[u8; HASH_SIZE]>) -> Self {
        Self { digests }
    }

    /// Number of leaves.
    pub fn len(&self) -> usize {
        self.digests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digests.is_empty()
    }

    pub fn digests(&self) -> &[[u8; HASH_SIZE]] {
        &self.digests
    }

    pub fn into_digests(self) -> Vec<[u8; HASH_SIZE]> {
        self.digests
    }
}

impl<const HASH_SIZE: usize> From<Vec<[u8; HASH_SIZE]>> for Leaves<HASH_SIZE> {
    fn from(digests: Vec<[u8; HASH_SIZE]>) -> Self {
        Self::new(digests)
    }
}

impl<const HASH_SIZE: usize> FromIterator<[u8; HASH_SIZE]> for Leaves<HASH_SIZE> {
    fn from_iter<I: IntoIterator<Item = [u8; HASH_SIZE]>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
