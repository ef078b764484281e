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

//! Entity id allocation and recycling.

use crate::ecs::{EcsError, Entity};

/// Issues and recycles integer entity identifiers.
///
/// Freed indices are kept in a free list and reused in LIFO order, enabling
/// O(1) allocation for previously despawned entities. When the free list is
/// empty, a monotonically increasing counter provides fresh indices. An id is
/// never aliased to two simultaneously live entities.
#[derive(Debug, Default)]
pub struct EntityAllocator {
    /// The next index that has never been handed out.
    next_index: u32,
    /// Indices available for reuse.
    freed: Vec<u32>,
}

impl EntityAllocator {
    /// Creates a new allocator with no ids issued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a new unique entity id.
    ///
    /// Reuses a freed index when one is available, otherwise advances the
    /// high-water counter.
    pub fn allocate(&mut self) -> Entity {
        let index = self.freed.pop().unwrap_or_else(|| {
            let index = self.next_index;
            self.next_index += 1;
            index
        });
        Entity { index }
    }

    /// Returns an id to the free pool.
    ///
    /// Handing back an id that is not currently allocated (a double free, or
    /// an index that was never issued) is a logic error in the caller. The
    /// allocator reports it as [`EcsError::InvalidFreeId`] and leaves the
    /// free list untouched, so the pool can never hand the same id to two
    /// live entities.
    pub fn free(&mut self, entity: Entity) -> Result<(), EcsError> {
        // The linear scan only runs on the defensive path of an API misuse
        // check; the World verifies liveness before calling `free`.
        if entity.index >= self.next_index || self.freed.contains(&entity.index) {
            log::warn!(
                "rejected free of entity id {} that is not currently allocated",
                entity.index
            );
            return Err(EcsError::InvalidFreeId { entity });
        }
        self.freed.push(entity.index);
        Ok(())
    }

    /// Returns the number of ids currently live (issued and not freed).
    pub fn live_count(&self) -> usize {
        self.next_index as usize - self.freed.len()
    }
}
