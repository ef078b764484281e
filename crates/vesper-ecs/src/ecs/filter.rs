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

//! The archetype query object: include/exclude type sets over a cached
//! result.

use crate::ecs::{AnyStore, Component, Entity, SparseSet, World};
use std::any::TypeId;

/// A query over a [`World`]: the set of entities present in every included
/// component store and absent from every excluded one.
///
/// A filter is created by [`World::create_filter`] and is permanently bound
/// to that world; every operation that reads stores takes the world by
/// reference and debug-asserts the binding, so a filter can never read
/// ambient or foreign state.
///
/// # Refresh contract
///
/// The cached result is refreshed only on demand. The filter starts *stale*
/// (empty result) and becomes *computed* after any [`Filter::update_filter`]
/// run, reflecting the criteria and world contents as of that call. There is
/// no dirty-tracking: mutating the world afterwards does NOT invalidate the
/// cache, and the filter will keep reporting the previous result until the
/// next recompute.
///
/// [`Filter::include`] always triggers a full recompute. [`Filter::exclude`]
/// does NOT: it only subtracts the excluded store's current members from the
/// cached result, and ignores entities added to that store later. This
/// asymmetry is a deliberately preserved quirk of the legacy contract (see
/// `patch_cache_for_exclude`); call [`Filter::update_filter`] to force a
/// consistent result.
pub struct Filter {
    /// Identity of the world this filter was created by.
    world_id: u64,
    /// Ordered list of component types a matching entity must carry.
    include: Vec<TypeId>,
    /// Ordered list of component types a matching entity must not carry.
    exclude: Vec<TypeId>,
    /// The cached set of matching entity ids.
    matched: SparseSet<()>,
}

impl Filter {
    /// Creates a stale filter bound to the world with identity `world_id`.
    pub(crate) fn new(world_id: u64) -> Self {
        Self {
            world_id,
            include: Vec::new(),
            exclude: Vec::new(),
            matched: SparseSet::new(),
        }
    }

    /// Adds `T` to the included types and unconditionally recomputes the
    /// result, even if `T` was already included. Chainable.
    pub fn include<T: Component>(&mut self, world: &World) -> &mut Self {
        let key = TypeId::of::<T>();
        if !self.include.contains(&key) {
            self.include.push(key);
        }
        self.update_filter(world);
        self
    }

    /// Adds `T` to the excluded types and subtracts the entities presently
    /// in its store from the cached result. Chainable.
    ///
    /// Unlike [`Filter::include`] this does NOT recompute: entities that gain
    /// a `T` component after this call stay in the cache until the next
    /// [`Filter::update_filter`].
    pub fn exclude<T: Component>(&mut self, world: &World) -> &mut Self {
        let key = TypeId::of::<T>();
        if !self.exclude.contains(&key) {
            self.exclude.push(key);
        }
        self.patch_cache_for_exclude(world, key);
        self
    }

    /// Returns true if `T` is part of the criteria, included or excluded.
    pub fn exists<T: Component>(&self) -> bool {
        let key = TypeId::of::<T>();
        self.include.contains(&key) || self.exclude.contains(&key)
    }

    /// Authoritative recompute of the cached result against the current
    /// world contents.
    ///
    /// The dense entity list of the FIRST included type (the "driver" store)
    /// is the candidate superset; a candidate matches when every other
    /// included store also contains it, and matches are then stripped of
    /// every excluded store's membership.
    ///
    /// Two faithfully reproduced edge cases of the legacy algorithm:
    /// - fewer than two included types leave the result empty, so a
    ///   single-include filter never matches anything;
    /// - if any non-driver included type has no registered store, the whole
    ///   scan is abandoned (no candidate can match).
    pub fn update_filter(&mut self, world: &World) {
        self.assert_bound(world);
        self.matched.clear();
        if self.include.len() < 2 {
            return;
        }
        let Some(driver) = world.store(self.include[0]) else {
            return;
        };
        let mut peers = Vec::with_capacity(self.include.len() - 1);
        for &key in &self.include[1..] {
            match world.store(key) {
                Some(store) => peers.push(store),
                // An included type with no registered store: no entity
                // anywhere carries it, so nothing can match.
                None => return,
            }
        }
        for &entity in driver.entities() {
            let hits = peers.iter().filter(|peer| peer.has_entity(entity)).count();
            if hits == peers.len() {
                self.matched.insert(entity, ());
            }
        }
        for &key in &self.exclude {
            if let Some(store) = world.store(key) {
                self.matched.remove_all(store.entities());
            }
        }
        log::trace!(
            "filter recomputed: {} included, {} excluded, {} matched",
            self.include.len(),
            self.exclude.len(),
            self.matched.len()
        );
    }

    /// The raw backing dense array of the cached result.
    ///
    /// No defensive copy is made and no ordering is guaranteed. The borrow
    /// rules already forbid retaining this slice across further filter
    /// mutation.
    pub fn entities(&self) -> &[Entity] {
        self.matched.entities()
    }

    /// The size of the cached result.
    pub fn count_entities(&self) -> usize {
        self.matched.len()
    }

    /// Legacy cache patch for a newly excluded type: removes the entities
    /// presently in that store from the cached result, nothing more.
    ///
    /// This is the isolated half of the include/exclude asymmetry. It exists
    /// as its own method so the quirky contract stays in one place and a
    /// consistent mode (exclude followed by [`Filter::update_filter`]) can
    /// live alongside it without touching this behavior.
    fn patch_cache_for_exclude(&mut self, world: &World, key: TypeId) {
        self.assert_bound(world);
        if let Some(store) = world.store(key) {
            self.matched.remove_all(store.entities());
        }
    }

    /// Debug check that `world` is the world this filter was created by.
    fn assert_bound(&self, world: &World) {
        debug_assert_eq!(
            self.world_id,
            world.id(),
            "filter used with a world it was not created by"
        );
    }
}
