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

//! A game-agnostic Information Set Monte Carlo Tree Search (ISMCTS) engine
//! for multi-player imperfect-information sequential games.
//!
//! Given a player's [`adapter::GameAdapter::Observation`] — their private
//! hand plus public history — [`engine::decide`] chooses an action that
//! empirically maximizes that player's terminal reward under repeated
//! randomized completions ("determinizations") of the hidden state.
//!
//! The engine knows nothing about any particular game. Everything
//! game-specific is supplied through one [`adapter::GameAdapter`]
//! implementation: candidate action generation, a [`adapter::Driver`] to
//! validate and apply moves, determinization, and terminal/timeout reward
//! accessors. See that trait's documentation for the full contract.
//!
//! ```text
//! observation
//!   ⇒ build empty root
//!   ⇒ repeat N times {
//!         sample determinization
//!         ⇒ selection ⇒ expansion ⇒ simulation ⇒ backpropagation
//!     }
//!   ⇒ return argmax-visits child action
//! ```
//!
//! This crate does not persist a search tree between separate calls to
//! `decide`, does not learn weights offline, and does not perform opponent
//! modeling beyond uniform sampling of hidden state consistent with an
//! observation — see DESIGN.md for the full list of scoped-out concerns.

pub mod adapter;
pub mod config;
pub mod determinize;
pub mod engine;
pub mod error;
pub mod fixture;
pub mod orchestrator;
pub mod search;
pub mod tree;

pub use adapter::{Driver, GameAdapter, Resumption};
pub use config::EngineConfig;
pub use engine::{decide, decide_with_fallback};
pub use error::EngineError;
