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

//! The Legal-Action Generator: candidate generation followed by
//! driver-backed validation. The validation step is the authority on
//! legality — the adapter's generator may over-approximate.
//!
//! This same candidate-then-validate procedure backs every legal-action
//! query the engine makes, not only the top-level one from an observation:
//! selection's compatibility filter, expansion's untried-action filter and
//! simulation's per-step enumeration all call [`validated_legal_actions`]
//! against whatever full state they currently hold.

use enumset::EnumSet;
use tracing::warn;

use crate::adapter::{Driver, GameAdapter};
use crate::config::debug_legal_actions_enabled;
use crate::error::EngineError;

/// Asks the adapter for candidate actions against `state`, then validates
/// each by enqueueing it on a throw-away driver built over a clone of
/// `state`. Only validated actions are returned; validation never mutates
/// `state` itself.
///
/// A candidate whose validation fails (the driver rejects it) is discarded,
/// not propagated — one bad candidate must not abort the whole call. An
/// empty result is a valid, non-error return.
pub fn validated_legal_actions<A: GameAdapter>(
    adapter: &A,
    state: &A::FullState,
    player: A::PlayerId,
    expected: EnumSet<A::ResponseType>,
) -> Vec<A::Action> {
    let candidates = adapter.generate_candidates(state, player, expected);
    let mut validated = Vec::with_capacity(candidates.len());
    for candidate in &candidates {
        let mut probe_driver = adapter.create_driver(state.clone(), Vec::new());
        // Bring the throw-away driver to a genuine waiting state before
        // offering it the candidate: `enqueue_response`'s precondition is
        // that the driver is currently waiting on `player`.
        probe_driver.resume();
        if probe_driver.enqueue_response(player, candidate.clone()).is_ok() {
            validated.push(candidate.clone());
        }
    }

    if debug_legal_actions_enabled() {
        eprintln!(
            "DEBUG_LEGAL_ACTIONS: candidates={} validated={} expected={:?}",
            candidates.len(),
            validated.len(),
            expected
        );
    }

    validated
}

/// The top-level form of [`validated_legal_actions`]: validates against a
/// full state reconstructed from `observation` (hidden fields filled with
/// empty placeholders) rather than a live determinization. Used once per
/// [`crate::engine::decide`] call, before any iteration runs.
///
/// Returns [`EngineError::NoLegalActions`] when the validated set is empty.
pub fn legal_actions_for_observation<A: GameAdapter>(
    adapter: &A,
    observation: &A::Observation,
    player: A::PlayerId,
    expected: EnumSet<A::ResponseType>,
) -> Result<Vec<A::Action>, EngineError> {
    let state = adapter.reconstruct_full_state(observation);
    let actions = validated_legal_actions(adapter, &state, player, expected);
    if actions.is_empty() {
        warn!("no legal actions available for acting player");
        return Err(EngineError::NoLegalActions);
    }
    Ok(actions)
}
