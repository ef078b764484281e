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

//! Per-component-type storage and its type-erased capability surface.

use crate::ecs::{Entity, SparseSet};
use std::any::Any;

/// A marker trait for types that can be used as components in the ECS.
///
/// This trait must be implemented for any struct you wish to attach to an
/// entity. The `'static` lifetime ensures that the component type does not
/// contain any non-static references, and `Send + Sync` allow a caller to
/// move the world across threads behind their own synchronization.
pub trait Component: 'static + Send + Sync {}

/// Storage for a single concrete component type, keyed by entity id.
///
/// One store exists per component type that has ever been attached to an
/// entity; the [`World`](crate::ecs::World) creates it lazily on first use
/// and owns it exclusively for its whole lifetime.
#[derive(Debug)]
pub struct ComponentStore<T: Component> {
    set: SparseSet<T>,
}

impl<T: Component> ComponentStore<T> {
    /// Creates an empty store.
    pub(crate) fn new() -> Self {
        Self {
            set: SparseSet::new(),
        }
    }

    /// Inserts or overwrites the component value for `entity`.
    pub fn insert(&mut self, entity: Entity, value: T) {
        self.set.insert(entity, value);
    }

    /// Removes the component value for `entity`, if present.
    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        self.set.remove(entity)
    }

    /// Returns a reference to the component value for `entity`.
    pub fn get(&self, entity: Entity) -> Option<&T> {
        self.set.get(entity)
    }

    /// Returns a mutable reference to the component value for `entity`.
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        self.set.get_mut(entity)
    }

    /// Returns true if `entity` has a value in this store.
    pub fn contains(&self, entity: Entity) -> bool {
        self.set.contains(entity)
    }

    /// Iterates over `(entity, value)` pairs in dense order.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.set.iter()
    }
}

/// An internal helper trait exposing membership operations on a type-erased
/// `Box<dyn AnyStore>`.
///
/// This is the dynamic dispatch seam that lets the [`World`](crate::ecs::World)
/// keep one `ComponentStore<T>` per concrete type in a single `TypeId`-indexed
/// map, and lets the [`Filter`](crate::ecs::Filter) read membership without
/// knowing concrete component types. Only entity-id-set operations cross this
/// boundary; component data is never copied through it.
pub(crate) trait AnyStore {
    /// The number of entities present in this store.
    fn len(&self) -> usize;

    /// Returns true if `entity` has a value in this store.
    fn has_entity(&self, entity: Entity) -> bool;

    /// The dense id array of this store.
    fn entities(&self) -> &[Entity];

    /// Removes `entity` from this store if present; no-op otherwise.
    fn remove_entity(&mut self, entity: Entity);

    /// Casts the trait object to `&dyn Any` for downcasting to the concrete
    /// `ComponentStore<T>`.
    fn as_any(&self) -> &dyn Any;

    /// Casts the trait object to `&mut dyn Any`.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component> AnyStore for ComponentStore<T> {
    fn len(&self) -> usize {
        self.set.len()
    }

    fn has_entity(&self, entity: Entity) -> bool {
        self.set.contains(entity)
    }

    fn entities(&self) -> &[Entity] {
        self.set.entities()
    }

    fn remove_entity(&mut self, entity: Entity) {
        self.set.remove(entity);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
