//! Owning, index-addressable entity storage
//!
//! One store per entity kind. The store tracks its own logical capacity so
//! that "room left" is a property of the game (the asteroid store doubles as
//! the spawn cap) rather than of the allocator.

use crate::config::GrowthPolicy;

/// Growable sequence that owns its entities
#[derive(Debug, Clone)]
pub struct EntityStore<T> {
    items: Vec<T>,
    capacity: usize,
    growth: GrowthPolicy,
}

impl<T> EntityStore<T> {
    /// Empty store with the given starting capacity, doubling on overflow
    pub fn new(capacity: usize) -> Self {
        Self::with_growth(capacity, GrowthPolicy::Doubling)
    }

    pub fn with_growth(capacity: usize, growth: GrowthPolicy) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
            growth,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// True while an append would not need to grow
    #[inline]
    pub fn has_room(&self) -> bool {
        self.items.len() < self.capacity
    }

    /// Take ownership of `entity`, growing first if the store is full
    pub fn append(&mut self, entity: T) {
        if self.items.len() == self.capacity {
            let new_capacity = self.growth.grow(self.capacity);
            log::debug!("EntityStore growing {} -> {}", self.capacity, new_capacity);
            self.items.reserve_exact(new_capacity - self.items.len());
            self.capacity = new_capacity;
        }
        self.items.push(entity);
    }

    /// Drop the entity at `index` and close the gap, keeping the order of the rest.
    ///
    /// Indices below `index` stay valid; indices above it shift down by one.
    /// Panics if `index >= len()`.
    pub fn remove_at(&mut self, index: usize) {
        assert!(
            index < self.items.len(),
            "remove_at index {index} out of bounds (len {})",
            self.items.len()
        );
        drop(self.items.remove(index));
    }

    /// Remove a batch of indices, highest first, so every index refers to the
    /// element it named before the batch started. Duplicates are ignored.
    pub fn remove_descending<I>(&mut self, indices: I)
    where
        I: IntoIterator<Item = usize>,
    {
        let mut indices: Vec<usize> = indices.into_iter().collect();
        indices.sort_unstable_by(|a, b| b.cmp(a));
        indices.dedup();
        for index in indices {
            self.remove_at(index);
        }
    }

    /// Drop every entity. Capacity is kept.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T> std::ops::Index<usize> for EntityStore<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<T> std::ops::IndexMut<usize> for EntityStore<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.items[index]
    }
}

impl<'a, T> IntoIterator for &'a EntityStore<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
