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

//! Simulation: a (optionally weighted) random playout from a non-waiting
//! state to a terminal state or a depth cap.

use rand::distributions::WeightedIndex;
use rand::prelude::Distribution;
use rand::RngCore;

use crate::adapter::{Driver, GameAdapter};
use crate::error::EngineError;
use crate::orchestrator;
use crate::search::legal_actions::validated_legal_actions;

/// Plays `driver` forward from its current state until terminal or until
/// `max_depth` actions have been applied, returning the reward from
/// `decision_maker`'s perspective.
///
/// Action choice is weighted by [`GameAdapter::action_weight`] when the
/// adapter overrides it (uniform, weight 1.0, otherwise); this is where a
/// "pass"-like action's low weight keeps the playout from stalling on
/// no-ops. An empty legal-action set for a waiting state is a broken
/// adapter, not a dead end to quietly accept — it raises
/// [`EngineError::AdapterFailure`], which the iteration loop treats as
/// iteration-local.
pub fn run<A: GameAdapter>(
    adapter: &A,
    driver: &mut A::Driver,
    max_depth: u32,
    decision_maker: A::PlayerId,
    rng: &mut dyn RngCore,
) -> Result<f64, EngineError> {
    let mut depth = 0u32;
    loop {
        let expected = match orchestrator::advance_to_decision::<A>(driver)? {
            None => return Ok(adapter.round_reward(driver.state(), decision_maker)),
            Some(expected) => expected,
        };

        if depth >= max_depth {
            return Ok(adapter.timeout_reward(driver.state(), decision_maker));
        }

        let player = driver.current_player();
        let candidates = validated_legal_actions(adapter, driver.state(), player, expected);
        if candidates.is_empty() {
            return Err(EngineError::AdapterFailure(
                "no legal actions for the waiting player during simulation".to_string(),
            ));
        }

        let chosen = choose_weighted(adapter, &candidates, rng);
        orchestrator::apply_action::<A>(driver, player, chosen)?;
        depth += 1;
    }
}

/// Samples one action from `candidates` proportional to
/// [`GameAdapter::action_weight`]. Falls back to a uniform pick if every
/// weight is zero (a misbehaving adapter should not hang the playout).
fn choose_weighted<A: GameAdapter>(adapter: &A, candidates: &[A::Action], rng: &mut dyn RngCore) -> A::Action {
    let weights: Vec<f64> = candidates.iter().map(|a| adapter.action_weight(a)).collect();
    match WeightedIndex::new(&weights) {
        Ok(dist) => candidates[dist.sample(rng)].clone(),
        Err(_) => {
            let idx = (rng.next_u32() as usize) % candidates.len();
            candidates[idx].clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq)]
    struct FakeAction(u8);

    fn weight_of(action: &FakeAction) -> f64 {
        if action.0 == 0 {
            0.25
        } else {
            1.0
        }
    }

    #[test]
    fn weighted_choice_respects_bias_over_many_samples() {
        use rand::SeedableRng;
        use rand_xoshiro::Xoshiro256PlusPlus;

        let candidates = vec![FakeAction(0), FakeAction(1)];
        let weights: Vec<f64> = candidates.iter().map(weight_of).collect();
        let dist = WeightedIndex::new(&weights).unwrap();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);

        let mut pass_count = 0;
        let trials = 20_000;
        for _ in 0..trials {
            if dist.sample(&mut rng) == 0 {
                pass_count += 1;
            }
        }
        let proportion = pass_count as f64 / trials as f64;
        // weight 0.25 vs 1.0 => expected proportion 0.25 / 1.25 = 0.2
        assert!((proportion - 0.2).abs() < 0.02, "proportion was {proportion}");
    }
}
