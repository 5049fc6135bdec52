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

//! Drives a [`Driver`] between waiting and non-waiting states.
//!
//! This is the thinnest layer in the crate: it exists so the search phases
//! never call `Driver::resume`/`enqueue_response` directly, keeping the
//! waiting ⇄ non-waiting alternation invariant in one place.

use enumset::EnumSet;

use crate::adapter::{Driver, GameAdapter, Resumption};
use crate::error::EngineError;

/// Advances `driver` until it pauses awaiting a response or completes.
/// Returns `Some(expected)` if waiting, `None` if the round ended. Never
/// invokes a handler — the driver was constructed with an empty handler
/// list precisely so this yields control back to the caller.
pub fn advance_to_decision<A: GameAdapter>(
    driver: &mut A::Driver,
) -> Result<Option<EnumSet<A::ResponseType>>, EngineError> {
    match driver.resume() {
        Resumption::Waiting { expected } => Ok(Some(expected)),
        Resumption::Terminal => Ok(None),
    }
}

/// Applies `action` as `player`'s response to the current waiting point.
///
/// Precondition: the driver is currently waiting on `player` (callers only
/// reach this after [`advance_to_decision`] returned `Some`). Returns
/// [`EngineError::ValidationFailure`] if the simulator rejects the action —
/// that error is iteration-local; callers must not treat it as a hard
/// failure.
pub fn apply_action<A: GameAdapter>(
    driver: &mut A::Driver,
    player: A::PlayerId,
    action: A::Action,
) -> Result<(), EngineError> {
    driver.enqueue_response(player, action)
}
