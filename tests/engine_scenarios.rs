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

//! Decision-level scenarios from the design's testable-properties section,
//! run against the deterministic duel fixture rather than a real game
//! rulebook (out of scope per the design notes).

use enumset::EnumSet;
use ismcts::fixture::{DuelAction, DuelAdapter, DuelPlayer, DuelResponse, DuelState};
use ismcts::EngineConfig;

fn config(iterations: u32, seed: u64) -> EngineConfig {
    EngineConfig { iterations, max_depth: 15, seed: Some(seed) }
}

/// Scenario 3: a terminal observation returns `None` immediately.
#[test]
fn terminal_observation_returns_none() {
    let adapter = DuelAdapter;
    let state = DuelState::new(vec![], vec![], DuelPlayer::North);
    let observation = state.observation_for(DuelPlayer::North);

    let result =
        ismcts::decide(&adapter, &observation, EnumSet::only(DuelResponse::PlayCard), &config(50, 1)).unwrap();

    assert!(result.is_none());
}

/// Scenario 4: a single-candidate decision point always resolves to that
/// candidate, independent of iteration count.
#[test]
fn single_candidate_hand_is_forced() {
    let adapter = DuelAdapter;
    let state = DuelState::new(vec![4], vec![2], DuelPlayer::North);
    let observation = state.observation_for(DuelPlayer::North);

    let action = ismcts::decide(&adapter, &observation, EnumSet::only(DuelResponse::PlayCard), &config(20, 2))
        .unwrap()
        .unwrap();

    assert_eq!(action, DuelAction(4));
}

/// Scenario 1 in spirit: with an overwhelming card advantage, the search
/// should prefer the immediately winning play over a clearly worse one.
#[test]
fn prefers_the_winning_card_when_one_is_available() {
    let adapter = DuelAdapter;
    // North holds a 5 (beats anything) and a 1 (loses to anything but a 1).
    // South has already led a 3 this trick; it's North's turn to respond.
    let mut state = DuelState::new(vec![5, 1], vec![2, 4], DuelPlayer::North);
    state.current_trick = vec![(DuelPlayer::South, 3)];
    let observation = state.observation_for(DuelPlayer::North);

    let action = ismcts::decide(&adapter, &observation, EnumSet::only(DuelResponse::PlayCard), &config(200, 3))
        .unwrap()
        .unwrap();

    assert_eq!(action, DuelAction(5));
}

/// `decide` never returns an action outside the candidate set for the
/// initial observation (testable property 5).
#[test]
fn decide_never_returns_an_uncandidate_action() {
    let adapter = DuelAdapter;
    let state = DuelState::new(vec![1, 2, 3], vec![4, 5, 1], DuelPlayer::North);
    let observation = state.observation_for(DuelPlayer::North);

    let action = ismcts::decide(&adapter, &observation, EnumSet::only(DuelResponse::PlayCard), &config(100, 4))
        .unwrap()
        .unwrap();

    assert!(observation.hand.contains(&action.0));
}

/// Determinism: fixing the seed, adapter, and observation yields a
/// byte-identical chosen action across repeated calls.
#[test]
fn same_seed_yields_same_decision() {
    let adapter = DuelAdapter;
    let state = DuelState::new(vec![1, 3, 5], vec![2, 4, 5], DuelPlayer::North);
    let observation = state.observation_for(DuelPlayer::North);

    let first = ismcts::decide(&adapter, &observation, EnumSet::only(DuelResponse::PlayCard), &config(100, 99))
        .unwrap();
    let second = ismcts::decide(&adapter, &observation, EnumSet::only(DuelResponse::PlayCard), &config(100, 99))
        .unwrap();

    assert_eq!(first, second);
}

/// `decide_with_fallback` never returns `None` while a legal action exists.
#[test]
fn fallback_always_returns_an_action_when_one_exists() {
    let adapter = DuelAdapter;
    let state = DuelState::new(vec![2], vec![3], DuelPlayer::North);
    let observation = state.observation_for(DuelPlayer::North);

    let action =
        ismcts::decide_with_fallback(&adapter, &observation, EnumSet::only(DuelResponse::PlayCard), &config(10, 5));

    assert_eq!(action, Some(DuelAction(2)));
}

/// The engine never installs its own subscriber (design §6, "Logging") — a
/// host is free to install one and see the `debug`/`warn` events `decide`
/// emits at decision boundaries.
#[test]
fn decide_runs_cleanly_under_a_host_installed_subscriber() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let adapter = DuelAdapter;
    let state = DuelState::new(vec![1, 2, 3], vec![4, 5, 1], DuelPlayer::North);
    let observation = state.observation_for(DuelPlayer::North);

    let action = ismcts::decide(&adapter, &observation, EnumSet::only(DuelResponse::PlayCard), &config(50, 7))
        .unwrap();

    assert!(action.is_some());
}
