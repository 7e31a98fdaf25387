use std::any::Any;

use crate::entity::Entity;

/// Typed sparse set storing components of type T.
///
/// Uses a sparse array (entity index → dense index) and a dense array
/// (contiguous component data + owning entity) for O(1) insert/remove/get
/// and cache-friendly iteration.
///
/// Iteration follows dense order. Dense order is insertion order until a
/// removal swaps the last element into the freed slot.
pub struct SparseSet<T: 'static> {
    /// Sparse array: `entity_index -> dense_index`.
    sparse: Vec<Option<u32>>,
    /// Dense array of component values.
    dense: Vec<T>,
    /// Owning entity of each dense element.
    entities: Vec<Entity>,
}

impl<T: 'static> SparseSet<T> {
    pub fn new() -> Self {
        Self {
            sparse: Vec::new(),
            dense: Vec::new(),
            entities: Vec::new(),
        }
    }

    /// Inserts a component for the given entity, returning the value it replaced.
    pub fn insert(&mut self, entity: Entity, value: T) -> Option<T> {
        let idx = entity.index() as usize;

        if idx >= self.sparse.len() {
            self.sparse.resize(idx + 1, None);
        }

        if let Some(dense_idx) = self.sparse[idx] {
            let di = dense_idx as usize;
            self.entities[di] = entity;
            Some(std::mem::replace(&mut self.dense[di], value))
        } else {
            self.sparse[idx] = Some(self.dense.len() as u32);
            self.dense.push(value);
            self.entities.push(entity);
            None
        }
    }

    /// Removes the component stored for `entity`'s slot.
    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        let idx = entity.index() as usize;
        let dense_idx = (*self.sparse.get(idx)?)? as usize;
        if self.entities[dense_idx] != entity {
            return None;
        }
        self.sparse[idx] = None;

        let last_dense = self.dense.len() - 1;
        if dense_idx != last_dense {
            // Swap-remove: move last element into the removed slot
            let swapped = self.entities[last_dense];
            self.sparse[swapped.index() as usize] = Some(dense_idx as u32);
        }

        self.entities.swap_remove(dense_idx);
        Some(self.dense.swap_remove(dense_idx))
    }

    pub fn get(&self, entity: Entity) -> Option<&T> {
        let dense_idx = self.dense_index(entity)?;
        Some(&self.dense[dense_idx])
    }

    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        let dense_idx = self.dense_index(entity)?;
        Some(&mut self.dense[dense_idx])
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.dense_index(entity).is_some()
    }

    pub fn len(&self) -> usize {
        self.dense.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }

    /// Iterates over `(entity, &component)` pairs in dense order.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.entities.iter().copied().zip(self.dense.iter())
    }

    /// Iterates over `(entity, &mut component)` pairs in dense order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut T)> {
        self.entities.iter().copied().zip(self.dense.iter_mut())
    }

    /// Owning entities in dense order.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    fn dense_index(&self, entity: Entity) -> Option<usize> {
        let dense_idx = (*self.sparse.get(entity.index() as usize)?)? as usize;
        (self.entities[dense_idx] == entity).then_some(dense_idx)
    }
}

impl<T: 'static> Default for SparseSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

type RemoveFn = fn(&mut dyn Any, Entity) -> bool;

/// A type-erased sparse set holding components of a single type.
///
/// Used internally by [`World`](crate::World).
pub(crate) struct ComponentStorage {
    inner: Box<dyn Any>,
    /// Human-readable type name for error messages.
    type_name: &'static str,
    /// Type-erased remove operation for despawn.
    remove_fn: RemoveFn,
}

impl ComponentStorage {
    pub fn new<T: 'static>() -> Self {
        Self {
            inner: Box::new(SparseSet::<T>::new()),
            type_name: std::any::type_name::<T>(),
            remove_fn: |any, entity| {
                any.downcast_mut::<SparseSet<T>>()
                    .and_then(|set| set.remove(entity))
                    .is_some()
            },
        }
    }

    pub fn typed<T: 'static>(&self) -> Option<&SparseSet<T>> {
        self.inner.downcast_ref::<SparseSet<T>>()
    }

    pub fn typed_mut<T: 'static>(&mut self) -> Option<&mut SparseSet<T>> {
        self.inner.downcast_mut::<SparseSet<T>>()
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Removes the entity's component (type-erased). Returns true if removed.
    pub fn remove_untyped(&mut self, entity: Entity) -> bool {
        (self.remove_fn)(self.inner.as_mut(), entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn e(index: u32) -> Entity {
        Entity::new(index, 0)
    }

    #[test]
    fn insert_get_replace() {
        let mut set = SparseSet::new();
        assert_eq!(set.insert(e(3), 10), None);
        assert_eq!(set.get(e(3)), Some(&10));
        assert_eq!(set.insert(e(3), 11), Some(10));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn swap_remove_keeps_lookup_consistent() {
        let mut set = SparseSet::new();
        set.insert(e(0), "a");
        set.insert(e(1), "b");
        set.insert(e(2), "c");

        assert_eq!(set.remove(e(0)), Some("a"));
        assert_eq!(set.get(e(2)), Some(&"c"));
        assert_eq!(set.get(e(1)), Some(&"b"));
        assert_eq!(set.entities(), &[e(2), e(1)]);
    }

    #[test]
    fn dense_order_is_insertion_order() {
        let mut set = SparseSet::new();
        for i in [5, 1, 9] {
            set.insert(e(i), i);
        }
        let order: Vec<_> = set.iter().map(|(ent, _)| ent.index()).collect();
        assert_eq!(order, vec![5, 1, 9]);
    }

    #[test]
    fn stale_generation_is_not_found() {
        let mut set = SparseSet::new();
        set.insert(Entity::new(0, 1), 1.0);
        assert!(set.get(Entity::new(0, 0)).is_none());
        assert!(set.remove(Entity::new(0, 0)).is_none());
        assert!(set.contains(Entity::new(0, 1)));
    }

    #[test]
    fn type_erased_remove() {
        let mut storage = ComponentStorage::new::<u8>();
        if let Some(set) = storage.typed_mut::<u8>() {
            set.insert(e(0), 7);
        }
        assert!(storage.remove_untyped(e(0)));
        assert!(!storage.remove_untyped(e(0)));
        assert!(storage.typed::<u16>().is_none());
        assert!(storage.type_name().contains("u8"));
    }
}
