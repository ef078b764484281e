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

//! # Vesper ECS
//!
//! A small, single-threaded Entity-Component-System runtime built on
//! sparse sets: integer entity handles, typed plain-data components, and
//! an explicitly refreshed [`ecs::Filter`] query engine.
//!
//! The primary entry point is [`ecs::World`].

#![warn(missing_docs)]

pub mod ecs;

pub use ecs::{Component, EcsError, Entity, Filter, World};
