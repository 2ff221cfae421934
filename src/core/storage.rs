use std::collections::BTreeMap;
use crate::core::BodyHandle;
use crate::error::SimError;
use crate::Result;

/// Storage for simulation bodies.
///
/// Iteration is in ascending handle order, which the world relies on to
/// process bodies deterministically.
#[derive(Debug, Clone)]
pub struct BodyStorage<T> {
    items: BTreeMap<BodyHandle, T>,
    next_id: u32,
}

impl<T> Default for BodyStorage<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BodyStorage<T> {
    /// Creates a new empty storage
    pub fn new() -> Self {
        Self {
            items: BTreeMap::new(),
            next_id: 1, // Start at 1, so 0 can represent invalid handle
        }
    }

    /// Adds an item to the storage and returns its handle
    pub fn add(&mut self, item: T) -> BodyHandle {
        let handle = BodyHandle(self.next_id);
        self.next_id += 1;
        self.items.insert(handle, item);
        handle
    }

    pub fn get(&self, handle: BodyHandle) -> Option<&T> {
        self.items.get(&handle)
    }

    pub fn get_mut(&mut self, handle: BodyHandle) -> Option<&mut T> {
        self.items.get_mut(&handle)
    }

    pub fn remove(&mut self, handle: BodyHandle) -> Option<T> {
        self.items.remove(&handle)
    }

    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.items.contains_key(&handle)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Clears all items. Handles already issued are not reused.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns all handles in ascending order
    pub fn handles(&self) -> Vec<BodyHandle> {
        self.items.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyHandle, &T)> + '_ {
        self.items.iter().map(|(h, item)| (*h, item))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (BodyHandle, &mut T)> + '_ {
        self.items.iter_mut().map(|(h, item)| (*h, item))
    }

    /// Gets a body by its handle, returning an error if not found
    pub fn get_body(&self, handle: BodyHandle) -> Result<&T> {
        self.get(handle)
            .ok_or_else(|| SimError::ResourceNotFound(format!("Body with handle {:?} not found", handle)))
    }

    /// Gets a mutable reference to a body by its handle, returning an error if not found
    pub fn get_body_mut(&mut self, handle: BodyHandle) -> Result<&mut T> {
        self.get_mut(handle)
            .ok_or_else(|| SimError::ResourceNotFound(format!("Body with handle {:?} not found", handle)))
    }

    /// Removes a body by its handle, returning an error if not found
    pub fn remove_body(&mut self, handle: BodyHandle) -> Result<T> {
        self.remove(handle)
            .ok_or_else(|| SimError::ResourceNotFound(format!("Body with handle {:?} not found", handle)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_are_not_reused() {
        let mut storage = BodyStorage::new();
        let a = storage.add("a");
        storage.remove(a);
        let b = storage.add("b");
        assert!(b > a);
        assert!(storage.get_body(a).is_err());
    }

    #[test]
    fn iterates_in_handle_order() {
        let mut storage = BodyStorage::new();
        let handles: Vec<_> = (0..16).map(|i| storage.add(i)).collect();
        let seen: Vec<_> = storage.iter().map(|(h, _)| h).collect();
        assert_eq!(seen, handles);
    }
}
