//! Ordered entity pool
//!
//! Iteration order is insertion order, and removal is a stable filter, so
//! trails render correctly and runs stay reproducible.

use serde::Serialize;

/// A collection of one kind of transient entity
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct Pool<T> {
    items: Vec<T>,
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> Pool<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, entity: T) {
        self.items.push(entity);
    }

    /// Mutate every entity in order; entities for which `f` returns `false`
    /// are removed and handed back (in their original order).
    pub fn tick_all<F>(&mut self, mut f: F) -> Vec<T>
    where
        F: FnMut(&mut T) -> bool,
    {
        let mut removed = Vec::new();
        let mut kept = Vec::with_capacity(self.items.len());
        for mut item in self.items.drain(..) {
            if f(&mut item) {
                kept.push(item);
            } else {
                removed.push(item);
            }
        }
        self.items = kept;
        removed
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T> Extend<T> for Pool<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<'a, T> IntoIterator for &'a Pool<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
