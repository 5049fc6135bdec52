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

//! The ISMCTS driver loop: the single operation hosts call.
//!
//! ```text
//! tree ← fresh root
//! for i in 1..N:
//!     try:
//!         det ← adapter.determinize(observation)
//!         (leaf, waitingState, types) ← selection(tree, det)
//!         if terminal(waitingState):
//!             backprop(leaf, reward from perspective of observation's player)
//!             continue
//!         res ← expansion(leaf, waitingState, types)
//!         if res is nothing:
//!             backprop(leaf, reward from current leaf state)
//!             continue
//!         (child, postState) ← res
//!         r ← simulation(postState, maxDepth)
//!         backprop(child, r)
//!     except ValidationFailure | other:
//!         continue
//! best ← argmax(child.visits for child in tree.children)
//! return best.lastAction or null if none
//! ```

use enumset::EnumSet;
use rand::rngs::OsRng;
use rand::{RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use tracing::{debug, warn};

use crate::adapter::{Driver, GameAdapter};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::search::legal_actions::legal_actions_for_observation;
use crate::search::{backprop, expansion, selection, simulation};
use crate::tree::ucb::best_child_by_visits;
use crate::tree::new_tree;

/// Runs one ISMCTS decision and returns the action with the most root-child
/// visits, or `None` if either there were no legal actions to begin with, the
/// observation is already terminal, or every iteration failed
/// (`EngineExhaustion`, per the design — represented here as `Ok(None)`
/// rather than a thrown error).
///
/// The only error this can return is [`EngineError::IllegalPrecondition`]: a
/// programmer error that must not be silently swallowed the way
/// per-iteration [`EngineError::ValidationFailure`]/[`EngineError::AdapterFailure`]
/// are.
pub fn decide<A: GameAdapter>(
    adapter: &A,
    observation: &A::Observation,
    expected: EnumSet<A::ResponseType>,
    config: &EngineConfig,
) -> Result<Option<A::Action>, EngineError> {
    let player = adapter.observation_player(observation);

    let probe = adapter.reconstruct_full_state(observation);
    if adapter.is_round_ended(&probe) {
        debug!("observation is already terminal, no iterations run");
        return Ok(None);
    }

    match legal_actions_for_observation(adapter, observation, player, expected) {
        Ok(_) => {}
        Err(EngineError::NoLegalActions) => return Ok(None),
        Err(e) => return Err(e),
    }

    let mut rng: Xoshiro256PlusPlus = match config.seed {
        Some(seed) => Xoshiro256PlusPlus::seed_from_u64(seed),
        None => Xoshiro256PlusPlus::from_rng(OsRng).expect("OS RNG is available"),
    };

    let (mut tree, root) = new_tree::<A::PlayerId, A::Action>();
    let mut discarded = 0u32;

    for _ in 0..config.iterations {
        let outcome = run_iteration(adapter, &mut tree, root, observation, player, config.max_depth, &mut rng);
        match outcome {
            Ok(()) => {}
            Err(e) if e.is_iteration_local() => {
                warn!(error = %e, "discarding ISMCTS iteration");
                discarded += 1;
            }
            Err(e) => return Err(e),
        }
    }

    let chosen = best_child_by_visits(&tree, root).map(|(_, action)| action);
    debug!(
        iterations = config.iterations,
        discarded,
        chosen = chosen.is_some(),
        "ISMCTS decision complete"
    );
    Ok(chosen)
}

/// `decide`, wrapped with the random-action fallback described in §7: if the
/// search returns `None` for any reason (no legal actions, terminal
/// observation, or exhaustion), a uniformly random validated action is
/// returned instead so the hosting game cannot deadlock. Returns `None` only
/// when there is truly no legal action for the acting player to take.
pub fn decide_with_fallback<A: GameAdapter>(
    adapter: &A,
    observation: &A::Observation,
    expected: EnumSet<A::ResponseType>,
    config: &EngineConfig,
) -> Option<A::Action> {
    match decide(adapter, observation, expected, config) {
        Ok(Some(action)) => return Some(action),
        Ok(None) => {}
        Err(e) => warn!(error = %e, "ISMCTS decide failed, falling back to a random legal action"),
    }

    let player = adapter.observation_player(observation);
    let fallback_actions = legal_actions_for_observation(adapter, observation, player, expected).ok()?;
    let mut rng = Xoshiro256PlusPlus::from_rng(OsRng).expect("OS RNG is available");
    let idx = (rng.next_u32() as usize) % fallback_actions.len();
    Some(fallback_actions[idx].clone())
}

/// One selection → (terminal backprop | expansion → simulation →
/// backprop) cycle, run against a freshly sampled determinization and its
/// own driver instance.
fn run_iteration<A: GameAdapter>(
    adapter: &A,
    tree: &mut crate::tree::SearchTree<A::PlayerId, A::Action>,
    root: petgraph::graph::NodeIndex,
    observation: &A::Observation,
    decision_maker: A::PlayerId,
    max_depth: u32,
    rng: &mut Xoshiro256PlusPlus,
) -> Result<(), EngineError> {
    let determinization = adapter.determinize(observation, rng);
    let mut driver = adapter.create_driver(determinization, Vec::new());

    let (leaf, expected) = selection::run(adapter, tree, root, &mut driver, rng)?;

    let Some(expected) = expected else {
        let reward = adapter.round_reward(driver.state(), decision_maker);
        backprop::run(tree, leaf, decision_maker, reward);
        return Ok(());
    };

    match expansion::run(adapter, tree, leaf, &mut driver, expected, rng)? {
        None => {
            let reward = if adapter.is_round_ended(driver.state()) {
                adapter.round_reward(driver.state(), decision_maker)
            } else {
                adapter.timeout_reward(driver.state(), decision_maker)
            };
            backprop::run(tree, leaf, decision_maker, reward);
        }
        Some(child) => {
            let reward = simulation::run(adapter, &mut driver, max_depth, decision_maker, rng)?;
            backprop::run(tree, child, decision_maker, reward);
        }
    }

    Ok(())
}
