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

use std::fmt::Debug;
use std::hash::Hash;

use enumset::EnumSetType;
use rand::RngCore;

use crate::error::EngineError;

/// The bundle of game-specific capabilities the engine needs. This is the
/// sole source of game-specific knowledge inside the engine; everything else
/// in this crate is generic over `A: GameAdapter`.
///
/// Implementors own exactly one game's rules. The engine never constructs an
/// `Action`, a `FullState`, or an `Observation` itself — it only asks the
/// adapter to produce and judge them.
pub trait GameAdapter: Sized {
    /// Identifies one of the game's players. Small enough to live in an
    /// [`enumset::EnumSet`].
    type PlayerId: EnumSetType + Debug;

    /// A single legal move. Treated as a value type: siblings in the search
    /// tree are distinguished by structural equality on this type, so
    /// adapters must give it a canonical `Eq`/`Hash` (field-wise compare is
    /// sufficient; there is no need for a stable serialization).
    type Action: Eq + Clone + Hash + Debug;

    /// A symbolic category of action the simulator is currently requesting
    /// (e.g. "play a card", "respond to an attack"). Small enough to live in
    /// an [`enumset::EnumSet`].
    type ResponseType: EnumSetType + Debug;

    /// A player's partial view of the game: their own hand, public history,
    /// and per-controller public fields. Immutable once obtained.
    type Observation: Clone + Debug;

    /// `Observation` plus every hidden field the simulator needs to run:
    /// other players' hands, deck residue, and so on. Treated as a value
    /// inside the engine — cloned before any what-if application.
    type FullState: Clone + Debug;

    /// A running simulator instance wrapping one `FullState`.
    type Driver: Driver<Self>;

    /// A decision strategy pluggable into a live [`Driver`] via
    /// [`GameAdapter::create_handler`]. The engine itself never constructs
    /// handlers for its own iterations (it always drives with an empty
    /// handler list, per [`GameAdapter::create_driver`]); this exists so
    /// hosts can build real gameplay loops with the same adapter.
    type Strategy;

    /// The simulator-compatible callback produced from a [`Self::Strategy`].
    type Handler;

    /// Returns a super-set of the legal actions for `player` given
    /// `expected`, reading only information visible in `state`. Duplicates
    /// are permitted; the Legal-Action Generator (see
    /// [`crate::search::legal_actions`]) is the authority that filters this
    /// down to genuinely legal moves via a validating driver.
    ///
    /// The same method backs both top-level candidate generation (where
    /// `state` was built by [`GameAdapter::reconstruct_full_state`] from an
    /// observation) and in-tree legal-action queries during selection,
    /// expansion and simulation (where `state` is a live determinization).
    /// Implementations must only read fields that would also be visible from
    /// `player`'s observation of `state`, even though the full state in hand
    /// may contain more.
    fn generate_candidates(
        &self,
        state: &Self::FullState,
        player: Self::PlayerId,
        expected: enumset::EnumSet<Self::ResponseType>,
    ) -> Vec<Self::Action>;

    /// Instantiates a fresh simulator around a state clone. The engine
    /// always passes an empty `handlers` list when constructing drivers for
    /// its own use (validation and iteration); non-empty handler lists are
    /// for hosts driving real play outside the search.
    fn create_driver(&self, state: Self::FullState, handlers: Vec<Self::Handler>) -> Self::Driver;

    /// Fabricates a runnable state from a player's observation by filling
    /// hidden fields with empty placeholders. Used only for validating
    /// candidate actions, never for iteration (hidden fields are not
    /// sampled, so the result is not a valid determinization).
    fn reconstruct_full_state(&self, observation: &Self::Observation) -> Self::FullState;

    /// The player whose decision `observation` was captured for. The
    /// observation's public fields already encode who is acting (per the
    /// data model in the design notes); this accessor exposes that without
    /// the engine needing to parse the observation's internal shape.
    fn observation_player(&self, observation: &Self::Observation) -> Self::PlayerId;

    /// Samples a full state whose public fields equal `observation`'s and
    /// whose hidden fields are drawn uniformly from the configurations
    /// consistent with public constraints. Used for one ISMCTS iteration.
    fn determinize(&self, observation: &Self::Observation, rng: &mut dyn RngCore) -> Self::FullState;

    /// Terminal detector.
    fn is_round_ended(&self, state: &Self::FullState) -> bool;

    /// Reward for `player`, defined only when [`GameAdapter::is_round_ended`]
    /// holds. Convention: 1 ≈ win, 0 ≈ loss; games may use graded rewards.
    fn round_reward(&self, state: &Self::FullState, player: Self::PlayerId) -> f64;

    /// Reward for `player` used when simulation hits the depth cap without
    /// termination.
    fn timeout_reward(&self, state: &Self::FullState, player: Self::PlayerId) -> f64;

    /// Playout bias for weighted simulation sampling. Default 1.0 (uniform).
    /// Adapters with "pass"-like moves (end-turn, retreat) should return a
    /// low weight such as 0.25 for them to keep playouts from stalling on
    /// no-ops.
    fn action_weight(&self, _action: &Self::Action) -> f64 {
        1.0
    }

    /// Wraps a decision strategy into a simulator-compatible callback that,
    /// at each waiting point, queries the strategy (seeing only the current
    /// observation and expected types) and enqueues its response. Not called
    /// by the search engine itself; provided for hosts that drive real
    /// gameplay with the same adapter.
    fn create_handler(&self, strategy: Self::Strategy) -> Self::Handler;
}

/// A running simulator instance, constructed by
/// [`GameAdapter::create_driver`].
///
/// The engine treats a driver as an opaque, synchronous, blocking state
/// machine: `resume` advances it until it needs a response or finishes;
/// `enqueue_response` is the only way to feed it one. A driver is never
/// shared between concurrent callers.
pub trait Driver<A: GameAdapter> {
    /// Advances the simulator until it pauses awaiting a response or
    /// completes. Must not invoke any handler — test and validation drivers
    /// are always constructed with an empty handler list precisely so this
    /// yields control back to the caller instead of resolving the decision
    /// itself.
    fn resume(&mut self) -> Resumption<A>;

    /// Enqueues `action` as `player`'s response to the current waiting
    /// point and drives the simulator past it to the next non-waiting
    /// state. Precondition: the driver is currently waiting on `player`.
    /// Returns [`EngineError::ValidationFailure`] if the simulator rejects
    /// the action.
    fn enqueue_response(&mut self, player: A::PlayerId, action: A::Action) -> Result<(), EngineError>;

    /// The player whose response the driver is currently waiting on.
    /// Only meaningful directly after `resume` returns
    /// [`Resumption::Waiting`].
    fn current_player(&self) -> A::PlayerId;

    /// A read-only view of the state the driver currently wraps.
    fn state(&self) -> &A::FullState;

    /// Consumes the driver, yielding the state it wraps.
    fn into_state(self) -> A::FullState;
}

/// The result of calling [`Driver::resume`].
pub enum Resumption<A: GameAdapter> {
    /// The simulator is paused awaiting a response from `expected`'s
    /// current player, requesting one of the categories in `expected`.
    Waiting { expected: enumset::EnumSet<A::ResponseType> },
    /// The round has ended; no further responses will be requested.
    Terminal,
}

impl<A: GameAdapter> Debug for Resumption<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resumption::Waiting { expected } => {
                f.debug_struct("Waiting").field("expected", expected).finish()
            }
            Resumption::Terminal => write!(f, "Terminal"),
        }
    }
}
