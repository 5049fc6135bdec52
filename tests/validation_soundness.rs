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

//! Validation soundness (design §8): every action returned by the
//! Legal-Action Generator is accepted by a fresh validating driver, checked
//! as a property over many generated observations rather than a handful of
//! fixed cases.

use enumset::EnumSet;
use ismcts::fixture::{DuelAdapter, DuelPlayer, DuelResponse, DuelState};
use ismcts::{Driver, GameAdapter};
use proptest::prelude::*;

fn hand_strategy() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(1u8..=5, 0..6)
}

proptest! {
    /// Any candidate the adapter generates for North's hand is accepted by a
    /// fresh driver built over the same state, for arbitrary hand contents.
    #[test]
    fn validated_actions_are_accepted_by_a_fresh_driver(
        north_hand in hand_strategy(),
        south_hand in hand_strategy(),
    ) {
        let adapter = DuelAdapter;
        let state = DuelState::new(north_hand, south_hand, DuelPlayer::North);
        let observation = state.observation_for(DuelPlayer::North);
        let full_state = adapter.reconstruct_full_state(&observation);

        let candidates = adapter.generate_candidates(
            &full_state,
            DuelPlayer::North,
            EnumSet::only(DuelResponse::PlayCard),
        );

        for candidate in candidates {
            let mut probe = adapter.create_driver(full_state.clone(), Vec::new());
            probe.resume();
            prop_assert!(probe.enqueue_response(DuelPlayer::North, candidate).is_ok());
        }
    }
}
