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

//! The sparse-set Entity-Component-System runtime.
//!
//! Entities are bare integer handles issued by the [`World`]; components are
//! plain data records stored in one [`SparseSet`]-backed store per concrete
//! type, keyed by entity id. A [`Filter`] enumerates the entities that carry
//! all of an ordered include set of component types and none of an exclude
//! set, against a cached result that is refreshed only on demand.
//!
//! The runtime is single-threaded and synchronous. It performs no locking and
//! no defensive copying; callers that need concurrent access must serialize
//! all mutation and query calls themselves.
//!
//! The primary entry point for interacting with the ECS is the [`World`]
//! struct.

mod allocator;
mod entity;
mod error;
mod filter;
mod sparse_set;
mod store;
mod world;

pub use allocator::EntityAllocator;
pub use entity::Entity;
pub use error::EcsError;
pub use filter::Filter;
pub use sparse_set::SparseSet;
pub use store::{Component, ComponentStore};
pub use world::World;

pub(crate) use store::AnyStore;

#[cfg(test)]
mod tests;
