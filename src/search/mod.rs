// Copyright © ismcts 2024-present
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//   https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The four ISMCTS phases plus the Legal-Action Generator they all share.
//!
//! Each phase is a free function over a `(adapter, tree, node, driver)`
//! tuple rather than a method on some `SearchContext` type — there is no
//! shared mutable struct to thread besides the tree and the one driver
//! instance the engine loop constructs per iteration.

pub mod backprop;
pub mod expansion;
pub mod legal_actions;
pub mod selection;
pub mod simulation;
