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

//! Defines the error types for the ECS runtime.

use crate::ecs::Entity;
use thiserror::Error;

/// An error produced by the ECS runtime.
///
/// Accessor-style lookups fail loudly with one of these variants; returning a
/// silent default would mask logic errors in calling code. Mutator-style
/// operations (`add`/`remove`) are idempotent no-ops on redundant calls and
/// never produce `ComponentNotFound`. There are no transient failure modes
/// and therefore no retry semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EcsError {
    /// An operation was attempted on a despawned or never-allocated entity.
    #[error("entity {entity:?} is not alive in this world")]
    EntityNotFound {
        /// The handle that failed the liveness check.
        entity: Entity,
    },

    /// A component accessor found no value for the given type/entity pair,
    /// either because the entity lacks the component or because the type was
    /// never registered with the world.
    #[error("entity {entity:?} has no '{component}' component")]
    ComponentNotFound {
        /// The entity that was probed.
        entity: Entity,
        /// The component type name, as reported by `std::any::type_name`.
        component: &'static str,
    },

    /// An id that is not currently allocated was handed back to the
    /// allocator. The free list is left untouched when this is reported.
    #[error("entity id {entity:?} is not currently allocated and cannot be freed")]
    InvalidFreeId {
        /// The handle that was rejected.
        entity: Entity,
    },
}
