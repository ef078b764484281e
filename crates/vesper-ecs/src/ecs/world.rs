// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The central container for all entities and components.

use crate::ecs::{
    AnyStore, Component, ComponentStore, EcsError, Entity, EntityAllocator, Filter, SparseSet,
};
use std::any::{type_name, TypeId};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic source of per-world identities, used to bind filters to the
/// world that created them.
static NEXT_WORLD_ID: AtomicU64 = AtomicU64::new(0);

/// The central container of the ECS: owns the entity allocator, the liveness
/// set, and one lazily created [`ComponentStore`] per component type.
///
/// The `World` is the sole authority for entity and component lifecycle.
/// Component stores are registered on the first `add_component` call for a
/// type and live as long as the world; the registry is keyed by `TypeId`, the
/// stable type key that is chosen once per concrete type and never reused for
/// a different shape.
pub struct World {
    /// Identity stamp handed to filters created by this world.
    id: u64,
    /// Issues and recycles entity indices.
    allocator: EntityAllocator,
    /// The set of currently alive entity ids.
    alive: SparseSet<()>,
    /// One type-erased component store per registered component type.
    stores: HashMap<TypeId, Box<dyn AnyStore>>,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Creates a new, empty world.
    pub fn new() -> Self {
        Self {
            id: NEXT_WORLD_ID.fetch_add(1, Ordering::Relaxed),
            allocator: EntityAllocator::new(),
            alive: SparseSet::new(),
            stores: HashMap::new(),
        }
    }

    /// The identity stamp of this world instance.
    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    /// Creates a new entity with zero components attached.
    pub fn new_entity(&mut self) -> Entity {
        let entity = self.allocator.allocate();
        self.alive.insert(entity, ());
        entity
    }

    /// Returns true if `entity` is currently alive in this world.
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.alive.contains(entity)
    }

    /// Returns the number of currently alive entities.
    pub fn entity_count(&self) -> usize {
        self.alive.len()
    }

    /// Despawns an entity, removing it from every registered component store
    /// and returning its id to the free pool.
    ///
    /// The scrub visits every store that was ever registered, so the cost is
    /// proportional to the number of distinct component types in the world,
    /// not to the entity's actual component count — an accepted trade-off
    /// that keeps the per-entity bookkeeping at zero.
    ///
    /// Fails with [`EcsError::EntityNotFound`] for a dead or never-allocated
    /// id; the free list is untouched in that case.
    pub fn despawn_entity(&mut self, entity: Entity) -> Result<(), EcsError> {
        if self.alive.remove(entity).is_none() {
            log::warn!("despawn of dead or unknown entity id {}", entity.index);
            return Err(EcsError::EntityNotFound { entity });
        }
        // Every store must be scrubbed before the id goes back to the pool,
        // or a recycled handle could observe the previous entity's data.
        for store in self.stores.values_mut() {
            store.remove_entity(entity);
        }
        self.allocator.free(entity)
    }

    /// Attaches a component value to an entity, overwriting any value of the
    /// same type already present.
    ///
    /// The store for `T` is created lazily on the first use of the type.
    /// Fails with [`EcsError::EntityNotFound`] if `entity` is not alive.
    pub fn add_component<T: Component>(
        &mut self,
        entity: Entity,
        value: T,
    ) -> Result<(), EcsError> {
        if !self.alive.contains(entity) {
            return Err(EcsError::EntityNotFound { entity });
        }
        self.store_mut::<T>().insert(entity, value);
        Ok(())
    }

    /// Attaches `T::default()` to an entity.
    ///
    /// Convenience form of [`World::add_component`] for default-constructible
    /// component types.
    pub fn add_default_component<T: Component + Default>(
        &mut self,
        entity: Entity,
    ) -> Result<(), EcsError> {
        self.add_component(entity, T::default())
    }

    /// Detaches a component of type `T` from an entity.
    ///
    /// Silent no-op if the entity does not carry `T`, if `T` was never
    /// registered, or if the entity is dead; removal is idempotent.
    pub fn remove_component<T: Component>(&mut self, entity: Entity) {
        if let Some(store) = self.stores.get_mut(&TypeId::of::<T>()) {
            store.remove_entity(entity);
        }
    }

    /// Returns a reference to the `T` component of an entity.
    ///
    /// Fails with [`EcsError::EntityNotFound`] if the entity is not alive,
    /// and with [`EcsError::ComponentNotFound`] if the entity lacks `T` or
    /// `T` was never registered with this world.
    pub fn get_component<T: Component>(&self, entity: Entity) -> Result<&T, EcsError> {
        if !self.alive.contains(entity) {
            return Err(EcsError::EntityNotFound { entity });
        }
        self.typed_store::<T>()
            .and_then(|store| store.get(entity))
            .ok_or(EcsError::ComponentNotFound {
                entity,
                component: type_name::<T>(),
            })
    }

    /// Returns a mutable reference to the `T` component of an entity.
    ///
    /// Same failure contract as [`World::get_component`].
    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Result<&mut T, EcsError> {
        if !self.alive.contains(entity) {
            return Err(EcsError::EntityNotFound { entity });
        }
        self.typed_store_mut::<T>()
            .and_then(|store| store.get_mut(entity))
            .ok_or(EcsError::ComponentNotFound {
                entity,
                component: type_name::<T>(),
            })
    }

    /// Returns true if `entity` is alive and carries a `T` component.
    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        self.stores
            .get(&TypeId::of::<T>())
            .is_some_and(|store| store.has_entity(entity))
    }

    /// Creates a new [`Filter`] bound to this world.
    ///
    /// The filter starts stale: its cached result is empty until the first
    /// include or explicit update.
    pub fn create_filter(&self) -> Filter {
        Filter::new(self.id)
    }

    /// Looks up the type-erased store registered under `type_id`.
    ///
    /// This is the membership surface the [`Filter`] reads during a
    /// recompute; only entity-id-set operations are exposed through it.
    pub(crate) fn store(&self, type_id: TypeId) -> Option<&dyn AnyStore> {
        self.stores.get(&type_id).map(|store| &**store)
    }

    /// Downcasts the store for `T`, if `T` was ever registered.
    fn typed_store<T: Component>(&self) -> Option<&ComponentStore<T>> {
        self.stores
            .get(&TypeId::of::<T>())?
            .as_any()
            .downcast_ref::<ComponentStore<T>>()
    }

    /// Downcasts the store for `T` mutably, if `T` was ever registered.
    fn typed_store_mut<T: Component>(&mut self) -> Option<&mut ComponentStore<T>> {
        self.stores
            .get_mut(&TypeId::of::<T>())?
            .as_any_mut()
            .downcast_mut::<ComponentStore<T>>()
    }

    /// Returns the store for `T`, creating and registering it on first use.
    fn store_mut<T: Component>(&mut self) -> &mut ComponentStore<T> {
        let store = self.stores.entry(TypeId::of::<T>()).or_insert_with(|| {
            log::debug!("registering component store for {}", type_name::<T>());
            Box::new(ComponentStore::<T>::new())
        });
        // The registry maps TypeId::of::<T>() to ComponentStore<T> by
        // construction, so the downcast cannot fail.
        store
            .as_any_mut()
            .downcast_mut::<ComponentStore<T>>()
            .expect("store registered under a foreign type key")
    }
}
