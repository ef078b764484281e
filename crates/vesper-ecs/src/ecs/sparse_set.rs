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

//! Implements the sparse set, the storage backbone of the ECS.

use crate::ecs::Entity;

/// Sentinel marking an absent entry in the sparse indirection array.
const ABSENT: usize = usize::MAX;

/// An O(1)-amortized membership container over a sparse entity id space.
///
/// Layout:
/// - `sparse[id]` holds the dense slot of `id`, or [`ABSENT`];
/// - `entities` is the gap-free dense array of present ids (for iteration);
/// - `values` is the parallel dense array of payloads (zero-sized for
///   `SparseSet<()>`, which is then a pure id set).
///
/// Invariant: whenever `sparse[id]` is a valid slot,
/// `entities[sparse[id]] == id`.
///
/// Removal swap-removes with the last dense element, so dense order is NOT
/// stable across removals. That is an explicit non-guarantee of this
/// container, not something callers may rely on between mutations.
#[derive(Debug)]
pub struct SparseSet<T> {
    sparse: Vec<usize>,
    entities: Vec<Entity>,
    values: Vec<T>,
}

impl<T> Default for SparseSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SparseSet<T> {
    /// Creates a new, empty set.
    pub fn new() -> Self {
        Self {
            sparse: Vec::new(),
            entities: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Inserts or overwrites the value for `entity`.
    ///
    /// Growing the sparse array to cover a new id makes this O(1) amortized.
    /// Inserting an already-present id overwrites its value without
    /// duplicating the dense entry.
    pub fn insert(&mut self, entity: Entity, value: T) {
        let index = entity.index as usize;
        if index >= self.sparse.len() {
            self.sparse.resize(index + 1, ABSENT);
        }
        let slot = self.sparse[index];
        if slot != ABSENT {
            self.values[slot] = value;
        } else {
            self.sparse[index] = self.entities.len();
            self.entities.push(entity);
            self.values.push(value);
        }
    }

    /// Removes the value for `entity`, returning it if it was present.
    ///
    /// O(1) via swap-remove: the last dense element is moved into the freed
    /// slot and its sparse entry is re-pointed.
    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        let index = entity.index as usize;
        if index >= self.sparse.len() || self.sparse[index] == ABSENT {
            return None;
        }
        let slot = self.sparse[index];
        let value = self.values.swap_remove(slot);
        self.entities.swap_remove(slot);
        // The element that was last now lives at `slot` (unless we removed
        // the last element itself).
        if let Some(moved) = self.entities.get(slot) {
            self.sparse[moved.index as usize] = slot;
        }
        self.sparse[index] = ABSENT;
        Some(value)
    }

    /// Removes every id in `entities` that is present, in one pass.
    ///
    /// Used to subtract one store's whole membership from another set.
    pub fn remove_all(&mut self, entities: &[Entity]) {
        for &entity in entities {
            self.remove(entity);
        }
    }

    /// Returns true if `entity` is present. O(1), bounds-checked.
    pub fn contains(&self, entity: Entity) -> bool {
        self.sparse
            .get(entity.index as usize)
            .is_some_and(|&slot| slot != ABSENT)
    }

    /// Returns a reference to the value for `entity`, or `None` if absent.
    pub fn get(&self, entity: Entity) -> Option<&T> {
        let slot = *self.sparse.get(entity.index as usize)?;
        if slot == ABSENT {
            return None;
        }
        Some(&self.values[slot])
    }

    /// Returns a mutable reference to the value for `entity`, or `None` if
    /// absent.
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        let slot = *self.sparse.get(entity.index as usize)?;
        if slot == ABSENT {
            return None;
        }
        Some(&mut self.values[slot])
    }

    /// The live, contiguous sequence of present ids.
    ///
    /// Order is stable only between mutations; any `remove` may reorder it.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Iterates over `(entity, value)` pairs in dense order.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.entities.iter().copied().zip(self.values.iter())
    }

    /// Returns the number of present ids.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns true if no id is present.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Removes every entry, keeping allocated capacity.
    pub fn clear(&mut self) {
        for entity in self.entities.drain(..) {
            self.sparse[entity.index as usize] = ABSENT;
        }
        self.values.clear();
    }
}
