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

use super::{Component, EcsError, Entity, EntityAllocator, SparseSet, World};

// --- DUMMY COMPONENTS FOR TESTING ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Position(i32);
impl Component for Position {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Weapon;
impl Component for Weapon {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Health(i32);
impl Component for Health {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Player;
impl Component for Player {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DeadStatus;
impl Component for DeadStatus {}

fn entity(index: u32) -> Entity {
    Entity::from_index(index)
}

/// Sorted copy of an id slice, for order-insensitive comparisons.
fn sorted(ids: &[Entity]) -> Vec<u32> {
    let mut indices: Vec<u32> = ids.iter().map(|e| e.index).collect();
    indices.sort_unstable();
    indices
}

// --- SPARSE SET ---

#[test]
fn sparse_set_tracks_membership_across_add_remove_sequences() {
    let mut set = SparseSet::new();

    // An id is contained iff it was inserted more recently than any removal.
    set.insert(entity(3), "a");
    set.insert(entity(7), "b");
    assert!(set.contains(entity(3)));
    assert!(set.contains(entity(7)));
    assert!(!set.contains(entity(0)));
    assert!(!set.contains(entity(100)), "probe beyond capacity is safe");

    assert_eq!(set.remove(entity(3)), Some("a"));
    assert!(!set.contains(entity(3)));
    assert!(set.contains(entity(7)));

    set.insert(entity(3), "c");
    assert!(set.contains(entity(3)));
    assert_eq!(set.get(entity(3)), Some(&"c"));

    // Removing an absent id reports absence and changes nothing.
    assert_eq!(set.remove(entity(42)), None);
    assert_eq!(set.len(), 2);
}

#[test]
fn sparse_set_insert_overwrites_without_duplicating_dense_entry() {
    let mut set = SparseSet::new();

    set.insert(entity(5), 10);
    set.insert(entity(5), 20);

    assert_eq!(set.len(), 1, "overwrite must not grow the dense array");
    assert_eq!(set.get(entity(5)), Some(&20));
    assert_eq!(set.entities(), &[entity(5)]);
}

#[test]
fn sparse_set_swap_remove_keeps_dense_arrays_gap_free() {
    let mut set = SparseSet::new();
    for index in 0..5 {
        set.insert(entity(index), index * 100);
    }

    // Remove a middle element: length drops by exactly one and the removed
    // id never reappears in the dense sequence.
    set.remove(entity(1));
    assert_eq!(set.len(), 4);
    assert!(!set.entities().contains(&entity(1)));

    // Every surviving id still resolves through the indirection array, even
    // though swap-remove reordered the dense arrays.
    for index in [0u32, 2, 3, 4] {
        assert_eq!(set.get(entity(index)), Some(&(index * 100)));
    }
    assert_eq!(sorted(set.entities()), vec![0, 2, 3, 4]);

    // Removing the last dense element is the no-move special case.
    let last = *set.entities().last().unwrap();
    set.remove(last);
    assert_eq!(set.len(), 3);
    assert!(!set.entities().contains(&last));
}

#[test]
fn sparse_set_remove_all_subtracts_a_membership_list() {
    let mut set = SparseSet::new();
    for index in 0..6 {
        set.insert(entity(index), ());
    }

    set.remove_all(&[entity(0), entity(2), entity(4), entity(9)]);

    assert_eq!(sorted(set.entities()), vec![1, 3, 5]);
}

#[test]
fn sparse_set_iter_pairs_ids_with_values() {
    let mut set = SparseSet::new();
    set.insert(entity(2), 20);
    set.insert(entity(4), 40);

    let mut pairs: Vec<(u32, i32)> = set.iter().map(|(e, v)| (e.index, *v)).collect();
    pairs.sort_unstable();
    assert_eq!(pairs, vec![(2, 20), (4, 40)]);
}

#[test]
fn sparse_set_clear_forgets_every_entry() {
    let mut set = SparseSet::new();
    set.insert(entity(1), ());
    set.insert(entity(8), ());

    set.clear();

    assert!(set.is_empty());
    assert!(!set.contains(entity(1)));
    assert!(!set.contains(entity(8)));

    // The sparse array must have been reset too, or a stale slot would
    // resurface here.
    set.insert(entity(8), ());
    assert_eq!(set.len(), 1);
}

// --- ENTITY ALLOCATOR ---

#[test]
fn allocator_recycles_freed_ids_before_growing() {
    let mut allocator = EntityAllocator::new();

    let a = allocator.allocate();
    let b = allocator.allocate();
    assert_ne!(a, b);
    assert_eq!(allocator.live_count(), 2);

    allocator.free(a).unwrap();
    assert_eq!(allocator.live_count(), 1);

    // The freed index comes back before the counter advances.
    let c = allocator.allocate();
    assert_eq!(c, a);
    assert_eq!(allocator.live_count(), 2);

    let d = allocator.allocate();
    assert_eq!(d.index, 2, "fresh index only once the pool is drained");
}

#[test]
fn allocator_rejects_invalid_frees_without_corrupting_the_pool() {
    let mut allocator = EntityAllocator::new();
    let a = allocator.allocate();

    // Never-allocated index.
    assert_eq!(
        allocator.free(entity(99)),
        Err(EcsError::InvalidFreeId { entity: entity(99) })
    );

    // Double free.
    allocator.free(a).unwrap();
    assert_eq!(
        allocator.free(a),
        Err(EcsError::InvalidFreeId { entity: a })
    );

    // The pool still holds exactly one copy of the freed index.
    assert_eq!(allocator.allocate(), a);
    assert_ne!(allocator.allocate(), a);
}

// --- WORLD LIFECYCLE ---

#[test]
fn component_value_round_trips_until_overwritten_or_removed() {
    let mut world = World::new();
    let e = world.new_entity();

    world.add_component(e, Position(7)).unwrap();
    assert_eq!(world.get_component::<Position>(e), Ok(&Position(7)));
    assert!(world.has_component::<Position>(e));

    // Overwrite through add, then through the mutable accessor.
    world.add_component(e, Position(8)).unwrap();
    assert_eq!(world.get_component::<Position>(e), Ok(&Position(8)));
    world.get_component_mut::<Position>(e).unwrap().0 = 9;
    assert_eq!(world.get_component::<Position>(e), Ok(&Position(9)));

    world.remove_component::<Position>(e);
    assert_eq!(
        world.get_component::<Position>(e),
        Err(EcsError::ComponentNotFound {
            entity: e,
            component: std::any::type_name::<Position>(),
        })
    );
}

#[test]
fn accessors_fail_loudly_while_mutators_stay_idempotent() {
    let mut world = World::new();
    let e = world.new_entity();

    // Accessor on a type that was never registered anywhere.
    assert!(matches!(
        world.get_component::<Health>(e),
        Err(EcsError::ComponentNotFound { .. })
    ));

    // Removing an absent component is a silent no-op, repeatedly.
    world.remove_component::<Health>(e);
    world.remove_component::<Health>(e);
    assert!(!world.has_component::<Health>(e));

    // Accessor and mutator on a dead entity.
    world.despawn_entity(e).unwrap();
    assert_eq!(
        world.get_component::<Health>(e),
        Err(EcsError::EntityNotFound { entity: e })
    );
    assert_eq!(
        world.add_component(e, Health(1)),
        Err(EcsError::EntityNotFound { entity: e })
    );
}

#[test]
fn despawn_scrubs_every_registered_store() {
    let mut world = World::new();

    let e = world.new_entity();
    let other = world.new_entity();
    world.add_component(e, Position(1)).unwrap();
    world.add_component(e, Health(10)).unwrap();
    world.add_component(e, Weapon).unwrap();
    world.add_component(other, Health(5)).unwrap();

    world.despawn_entity(e).unwrap();

    assert!(!world.is_alive(e));
    assert!(!world.has_component::<Position>(e));
    assert!(!world.has_component::<Health>(e));
    assert!(!world.has_component::<Weapon>(e));
    // Unrelated entities keep their data.
    assert_eq!(world.get_component::<Health>(other), Ok(&Health(5)));

    // The recycled id starts from a clean slate.
    let recycled = world.new_entity();
    assert_eq!(recycled, e);
    assert!(!world.has_component::<Health>(recycled));
    assert!(matches!(
        world.get_component::<Health>(recycled),
        Err(EcsError::ComponentNotFound { .. })
    ));
}

#[test]
fn despawning_a_dead_entity_fails_and_leaves_the_pool_intact() {
    let mut world = World::new();
    let e = world.new_entity();

    world.despawn_entity(e).unwrap();
    assert_eq!(
        world.despawn_entity(e),
        Err(EcsError::EntityNotFound { entity: e })
    );

    // The double despawn must not have pushed a second copy of the index.
    let a = world.new_entity();
    let b = world.new_entity();
    assert_eq!(a, e);
    assert_ne!(b, e);
    assert_eq!(world.entity_count(), 2);
}

#[test]
fn add_default_component_uses_the_default_value() {
    let mut world = World::new();
    let e = world.new_entity();

    world.add_default_component::<Player>(e).unwrap();

    assert!(world.has_component::<Player>(e));
    assert_eq!(world.get_component::<Player>(e), Ok(&Player));
}

// --- FILTER ---

/// Builds the canonical three-entity scenario:
/// A{Weapon, Health, Player}, B{Weapon, Health}, C{Health, Player}.
fn spawn_squad(world: &mut World) -> (Entity, Entity, Entity) {
    let a = world.new_entity();
    world.add_component(a, Weapon).unwrap();
    world.add_component(a, Health(100)).unwrap();
    world.add_component(a, Player).unwrap();

    let b = world.new_entity();
    world.add_component(b, Weapon).unwrap();
    world.add_component(b, Health(80)).unwrap();

    let c = world.new_entity();
    world.add_component(c, Health(60)).unwrap();
    world.add_component(c, Player).unwrap();

    (a, b, c)
}

#[test]
fn filter_matches_entities_carrying_all_included_types() {
    let mut world = World::new();
    let (a, _b, c) = spawn_squad(&mut world);

    let mut filter = world.create_filter();
    filter.include::<Health>(&world).include::<Player>(&world);

    assert_eq!(filter.count_entities(), 2);
    assert_eq!(sorted(filter.entities()), sorted(&[a, c]));
}

#[test]
fn single_include_filter_never_matches() {
    let mut world = World::new();
    spawn_squad(&mut world);

    let mut filter = world.create_filter();
    filter.include::<Health>(&world);

    // Quirk of the recompute algorithm, kept for compatibility: with fewer
    // than two included types the result is cleared and left empty, no
    // matter what the world contains.
    assert_eq!(filter.count_entities(), 0);
}

#[test]
fn including_a_type_nobody_carries_empties_the_result() {
    let mut world = World::new();
    spawn_squad(&mut world);

    let mut filter = world.create_filter();
    filter.include::<Health>(&world).include::<Player>(&world);
    assert_eq!(filter.count_entities(), 2);

    // DeadStatus has no registered store, so the scan is abandoned.
    filter.include::<DeadStatus>(&world);
    assert_eq!(filter.count_entities(), 0);
}

#[test]
fn computed_filter_ignores_world_mutation_until_updated() {
    let mut world = World::new();
    let (a, _b, c) = spawn_squad(&mut world);

    let mut filter = world.create_filter();
    filter.include::<Health>(&world).include::<Player>(&world);
    assert_eq!(sorted(filter.entities()), sorted(&[a, c]));

    // A brand-new matching entity appears... and the cache does not move.
    let d = world.new_entity();
    world.add_component(d, Health(50)).unwrap();
    world.add_component(d, Player).unwrap();
    assert_eq!(sorted(filter.entities()), sorted(&[a, c]));
    assert_eq!(filter.count_entities(), 2);

    // Only the explicit recompute picks it up.
    filter.update_filter(&world);
    assert_eq!(sorted(filter.entities()), sorted(&[a, c, d]));
}

#[test]
fn exclude_removes_current_members_from_the_cache() {
    let mut world = World::new();
    let (a, _b, c) = spawn_squad(&mut world);

    let mut filter = world.create_filter();
    filter.include::<Health>(&world).include::<Player>(&world);
    assert_eq!(sorted(filter.entities()), sorted(&[a, c]));

    // A carries a Weapon; C does not.
    filter.exclude::<Weapon>(&world);
    assert_eq!(filter.entities(), &[c]);
    assert!(filter.exists::<Weapon>());
}

#[test]
fn exclude_does_not_track_later_additions_to_the_excluded_store() {
    let mut world = World::new();
    let (_a, _b, c) = spawn_squad(&mut world);

    let mut filter = world.create_filter();
    filter.include::<Health>(&world).include::<Player>(&world);
    filter.exclude::<Weapon>(&world);
    assert_eq!(filter.entities(), &[c]);

    // C picks up a Weapon after the exclude: the cache patch already ran, so
    // C stays in the result. This is the documented include/exclude
    // asymmetry, not a reactive query.
    world.add_component(c, Weapon).unwrap();
    assert_eq!(filter.entities(), &[c]);

    // The authoritative recompute applies the exclusion consistently.
    filter.update_filter(&world);
    assert_eq!(filter.count_entities(), 0);
}

#[test]
fn excluding_an_unregistered_type_patches_nothing() {
    let mut world = World::new();
    let (a, _b, c) = spawn_squad(&mut world);

    let mut filter = world.create_filter();
    filter.include::<Health>(&world).include::<Player>(&world);
    filter.exclude::<DeadStatus>(&world);

    assert_eq!(sorted(filter.entities()), sorted(&[a, c]));
    assert!(filter.exists::<DeadStatus>());
}

#[test]
fn update_filter_applies_exclusions_after_the_scan() {
    let mut world = World::new();
    let (_a, _b, c) = spawn_squad(&mut world);

    let mut filter = world.create_filter();
    filter.include::<Health>(&world).include::<Player>(&world);
    filter.exclude::<Weapon>(&world);
    assert_eq!(filter.entities(), &[c]);

    // A fresh recompute re-derives the same answer from scratch.
    filter.update_filter(&world);
    assert_eq!(filter.entities(), &[c]);
}

#[test]
fn filter_reflects_despawns_only_after_recompute() {
    let mut world = World::new();
    let (a, _b, c) = spawn_squad(&mut world);

    let mut filter = world.create_filter();
    filter.include::<Health>(&world).include::<Player>(&world);
    assert_eq!(filter.count_entities(), 2);

    world.despawn_entity(a).unwrap();
    // Stale by design until the caller refreshes.
    assert_eq!(filter.count_entities(), 2);

    filter.update_filter(&world);
    assert_eq!(filter.entities(), &[c]);
}

#[test]
fn exists_reports_both_criteria_lists() {
    let world = World::new();
    let mut filter = world.create_filter();

    assert!(!filter.exists::<Health>());
    filter.include::<Health>(&world);
    filter.exclude::<Weapon>(&world);

    assert!(filter.exists::<Health>());
    assert!(filter.exists::<Weapon>());
    assert!(!filter.exists::<Player>());
}
