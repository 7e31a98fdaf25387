use std::any::{TypeId, type_name};
use std::collections::HashMap;

use crate::entity::{Entity, EntityAllocator};
use crate::error::{ComponentError, ResourceError};
use crate::resource::{Resource, Resources};
use crate::sparse_set::{ComponentStorage, SparseSet};

/// The container of entities, components and resources every system runs against.
///
/// # Example
///
/// ```
/// use orbit_ecs::World;
///
/// struct Position { x: f32, y: f32 }
/// struct Gravity(f32);
///
/// let mut world = World::new();
/// world.insert_resource(Gravity(9.8)).unwrap();
///
/// let entity = world.spawn();
/// world.insert(entity, Position { x: 0.0, y: 0.0 }).unwrap();
///
/// let g = world.resource::<Gravity>().unwrap().0;
/// for (_, pos) in world.storage::<Position>().unwrap().iter() {
///     println!("({}, {}) under {}", pos.x, pos.y, g);
/// }
/// ```
pub struct World {
    entities: EntityAllocator,
    components: HashMap<TypeId, ComponentStorage>,
    resources: Resources,
}

impl World {
    /// Creates a new empty world.
    pub fn new() -> Self {
        Self {
            entities: EntityAllocator::new(),
            components: HashMap::new(),
            resources: Resources::new(),
        }
    }

    // ---- Entity management ----

    /// Spawns a new entity and returns its ID.
    pub fn spawn(&mut self) -> Entity {
        self.entities.allocate()
    }

    /// Despawns an entity, dropping all its components.
    ///
    /// Returns `false` if the entity was already dead.
    pub fn despawn(&mut self, entity: Entity) -> bool {
        if !self.entities.deallocate(entity) {
            return false;
        }
        for storage in self.components.values_mut() {
            storage.remove_untyped(entity);
        }
        true
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.is_alive(entity)
    }

    pub fn entity_count(&self) -> u32 {
        self.entities.count()
    }

    /// Iterates over all currently alive entities.
    pub fn iter_entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.iter_alive()
    }

    /// Returns the live entity occupying slot `index`.
    pub fn entity_at(&self, index: u32) -> Option<Entity> {
        self.entities.resolve(index)
    }

    // ---- Components ----

    /// Creates empty storage for `T` so it can be queried before first insert.
    pub fn register_component<T: 'static>(&mut self) {
        self.components
            .entry(TypeId::of::<T>())
            .or_insert_with(ComponentStorage::new::<T>);
    }

    /// Attaches a component, replacing any previous value of the same type.
    ///
    /// Storage for `T` is created on first use.
    pub fn insert<T: 'static>(
        &mut self,
        entity: Entity,
        component: T,
    ) -> Result<(), ComponentError> {
        if !self.entities.is_alive(entity) {
            return Err(ComponentError::DeadEntity {
                entity,
                type_name: type_name::<T>(),
            });
        }

        self.register_component::<T>();
        if let Some(set) = self.storage_mut::<T>() {
            set.insert(entity, component);
        }
        Ok(())
    }

    /// Detaches a component, returning it if the entity had one.
    pub fn remove<T: 'static>(&mut self, entity: Entity) -> Option<T> {
        self.storage_mut::<T>()?.remove(entity)
    }

    pub fn get<T: 'static>(&self, entity: Entity) -> Option<&T> {
        self.storage::<T>()?.get(entity)
    }

    pub fn get_mut<T: 'static>(&mut self, entity: Entity) -> Option<&mut T> {
        self.storage_mut::<T>()?.get_mut(entity)
    }

    /// Like [`get`](World::get), reporting why the component is unavailable.
    pub fn component<T: 'static>(&self, entity: Entity) -> Result<&T, ComponentError> {
        if !self.is_alive(entity) {
            return Err(ComponentError::DeadEntity {
                entity,
                type_name: type_name::<T>(),
            });
        }
        self.get::<T>(entity).ok_or(ComponentError::Missing {
            entity,
            type_name: type_name::<T>(),
        })
    }

    /// Like [`get_mut`](World::get_mut), reporting why the component is unavailable.
    pub fn component_mut<T: 'static>(&mut self, entity: Entity) -> Result<&mut T, ComponentError> {
        if !self.is_alive(entity) {
            return Err(ComponentError::DeadEntity {
                entity,
                type_name: type_name::<T>(),
            });
        }
        self.get_mut::<T>(entity).ok_or(ComponentError::Missing {
            entity,
            type_name: type_name::<T>(),
        })
    }

    pub fn has<T: 'static>(&self, entity: Entity) -> bool {
        self.storage::<T>().is_some_and(|set| set.contains(entity))
    }

    /// All components of type `T`, or `None` if `T` was never stored.
    pub fn storage<T: 'static>(&self) -> Option<&SparseSet<T>> {
        self.components.get(&TypeId::of::<T>())?.typed::<T>()
    }

    pub fn storage_mut<T: 'static>(&mut self) -> Option<&mut SparseSet<T>> {
        self.components.get_mut(&TypeId::of::<T>())?.typed_mut::<T>()
    }

    /// Entities carrying `T`, in the storage's dense order.
    pub fn entities_with<T: 'static>(&self) -> Vec<Entity> {
        self.storage::<T>()
            .map(|set| set.entities().to_vec())
            .unwrap_or_default()
    }

    /// Type names of every component type with storage.
    pub fn component_type_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.components.values().map(ComponentStorage::type_name)
    }

    // ---- Resources ----

    /// Installs a new singleton resource.
    ///
    /// # Errors
    ///
    /// [`ResourceError::AlreadyRegistered`] if `T` already has an instance.
    pub fn insert_resource<T: Resource>(&mut self, value: T) -> Result<&mut T, ResourceError> {
        let result = self.resources.insert(value);
        if result.is_ok() {
            log::debug!("Resource `{}` registered", type_name::<T>());
        }
        result
    }

    /// Installs or overwrites a resource, returning the previous instance.
    pub fn replace_resource<T: Resource>(&mut self, value: T) -> Option<T> {
        self.resources.replace(value)
    }

    /// Inserts `T::default()` if the resource is absent.
    pub fn init_resource<T: Resource + Default>(&mut self) -> Result<&mut T, ResourceError> {
        if !self.resources.contains::<T>() {
            self.resources.replace(T::default());
        }
        self.resources.get_mut::<T>()
    }

    pub fn remove_resource<T: Resource>(&mut self) -> Option<T> {
        self.resources.remove::<T>()
    }

    pub fn contains_resource<T: Resource>(&self) -> bool {
        self.resources.contains::<T>()
    }

    /// Borrows a resource.
    ///
    /// # Errors
    ///
    /// [`ResourceError::ResourceMissing`] if `T` was never registered.
    pub fn resource<T: Resource>(&self) -> Result<&T, ResourceError> {
        self.resources.get::<T>()
    }

    /// Mutably borrows a resource.
    pub fn resource_mut<T: Resource>(&mut self) -> Result<&mut T, ResourceError> {
        self.resources.get_mut::<T>()
    }

    /// Lifts `T` out of the world for the duration of `f`.
    ///
    /// Gives `f` a mutable resource and the rest of the world at the same
    /// time. Inside `f` the resource is absent from `world`. It is put back
    /// afterwards even if `f` re-inserted another instance of `T`.
    pub fn resource_scope<T: Resource, R>(
        &mut self,
        f: impl FnOnce(&mut World, &mut T) -> R,
    ) -> Result<R, ResourceError> {
        let mut value = self
            .resources
            .remove::<T>()
            .ok_or(ResourceError::ResourceMissing {
                type_name: type_name::<T>(),
            })?;
        let result = f(self, &mut value);
        self.resources.replace(value);
        Ok(result)
    }

    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    /// Type names of every registered resource.
    pub fn resource_type_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.resources.type_names()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
