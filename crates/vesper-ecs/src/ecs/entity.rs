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

//! Defines the entity handle type.

use serde::{Deserialize, Serialize};

/// A unique identifier for an entity in the world.
///
/// An entity is a bare integer id: it carries no data and no behavior of its
/// own. Components are attached to it through the [`World`](crate::ecs::World),
/// which is also the sole authority over its lifetime.
///
/// Freed indices are recycled. Safe recycling is guaranteed by the despawn
/// protocol rather than by a generation counter: the `World` removes a
/// despawned id from every component store before the id can be handed out
/// again, so a recycled handle never observes a previous entity's data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entity {
    /// The index of this entity, used directly by the sparse-set storage.
    pub index: u32,
}

impl Entity {
    /// Creates an entity handle from a raw index.
    ///
    /// Handles are normally obtained from
    /// [`World::new_entity`](crate::ecs::World::new_entity); constructing one
    /// by hand is only useful in tests and tooling.
    pub const fn from_index(index: u32) -> Self {
        Self { index }
    }
}
