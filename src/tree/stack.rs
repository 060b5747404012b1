/// Stack of complete subtree roots.
///
/// The front is the most recently pushed entry. Iteration runs from the front
/// to the back, which for the bounded tree means from the smallest, newest
/// subtree to the largest, oldest one.
#[derive(Debug, Clone)]
pub struct SubtreeStack<T> {
    // front of the stack is the end of the vec
    entries: Vec<T>,
}

impl<T> Default for SubtreeStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SubtreeStack<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, entry: T) {
        self.entries.push(entry);
    }

    pub fn pop(&mut self) -> Option<T> {
        self.entries.pop()
    }

    pub fn peek(&self) -> Option<&T> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates from the front (newest) to the back (oldest).
    pub fn iter(&self) -> std::iter::Rev<std::slice::Iter<'_, T>> {
        self.entries.iter().rev()
    }
}

impl<'a, T> IntoIterator for &'a SubtreeStack<T> {
    type Item = &'a T;
    type IntoIter = std::iter::Rev<std::slice::Iter<'a, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
