use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;

use crate::error::ResourceError;

/// Marker for values that can be stored as a world resource.
///
/// Implemented for every `'static` type.
pub trait Resource: Any {}

impl<T: Any> Resource for T {}

/// A single type-erased resource.
struct ResourceEntry {
    value: Box<dyn Any>,
    type_name: &'static str,
}

/// Container for typed singleton resources, one instance per type.
///
/// The frame loop is single-threaded and systems receive `&mut World`, so
/// ordinary borrows are enough to make access exclusive.
pub(crate) struct Resources {
    entries: HashMap<TypeId, ResourceEntry>,
}

impl Resources {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Inserts a resource that must not already exist.
    pub fn insert<T: Resource>(&mut self, value: T) -> Result<&mut T, ResourceError> {
        use std::collections::hash_map::Entry;

        match self.entries.entry(TypeId::of::<T>()) {
            Entry::Occupied(_) => Err(ResourceError::AlreadyRegistered {
                type_name: type_name::<T>(),
            }),
            Entry::Vacant(slot) => {
                let entry = slot.insert(ResourceEntry {
                    value: Box::new(value),
                    type_name: type_name::<T>(),
                });
                entry
                    .value
                    .downcast_mut::<T>()
                    .ok_or(ResourceError::ResourceMissing {
                        type_name: type_name::<T>(),
                    })
            }
        }
    }

    /// Inserts or overwrites a resource, returning the previous value.
    pub fn replace<T: Resource>(&mut self, value: T) -> Option<T> {
        let previous = self.entries.insert(
            TypeId::of::<T>(),
            ResourceEntry {
                value: Box::new(value),
                type_name: type_name::<T>(),
            },
        )?;
        previous.value.downcast::<T>().ok().map(|boxed| *boxed)
    }

    pub fn remove<T: Resource>(&mut self) -> Option<T> {
        let entry = self.entries.remove(&TypeId::of::<T>())?;
        entry.value.downcast::<T>().ok().map(|boxed| *boxed)
    }

    pub fn contains<T: Resource>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<T>())
    }

    pub fn get<T: Resource>(&self) -> Result<&T, ResourceError> {
        self.entries
            .get(&TypeId::of::<T>())
            .and_then(|entry| entry.value.downcast_ref::<T>())
            .ok_or(ResourceError::ResourceMissing {
                type_name: type_name::<T>(),
            })
    }

    pub fn get_mut<T: Resource>(&mut self) -> Result<&mut T, ResourceError> {
        self.entries
            .get_mut(&TypeId::of::<T>())
            .and_then(|entry| entry.value.downcast_mut::<T>())
            .ok_or(ResourceError::ResourceMissing {
                type_name: type_name::<T>(),
            })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Type names of all registered resources.
    pub fn type_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.values().map(|entry| entry.type_name)
    }
}
