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

//! Selection: descend the existing tree under the current determinization,
//! stopping at the first node with an untried legal action, a childless
//! node, or a terminal state.

use std::collections::HashSet;

use enumset::EnumSet;
use rand::RngCore;

use petgraph::graph::NodeIndex;

use crate::adapter::{Driver, GameAdapter};
use crate::error::EngineError;
use crate::orchestrator;
use crate::search::legal_actions::validated_legal_actions;
use crate::tree::ucb::best_child_by_ucb;
use crate::tree::{existing_actions, SearchTree};

/// Runs selection starting at `node` against `driver`'s current
/// determinization. Returns the node selection stopped at, together with
/// `Some(expected)` if that node's state is waiting, or `None` if it is
/// terminal.
pub fn run<A: GameAdapter>(
    adapter: &A,
    tree: &mut SearchTree<A::PlayerId, A::Action>,
    mut node: NodeIndex,
    driver: &mut A::Driver,
    _rng: &mut dyn RngCore,
) -> Result<(NodeIndex, Option<EnumSet<A::ResponseType>>), EngineError> {
    loop {
        let expected = match orchestrator::advance_to_decision::<A>(driver)? {
            None => return Ok((node, None)),
            Some(expected) => expected,
        };

        let player = driver.current_player();
        let legal = validated_legal_actions(adapter, driver.state(), player, expected);
        let existing: HashSet<A::Action> = existing_actions(tree, node).into_iter().collect();
        let has_untried = legal.iter().any(|a| !existing.contains(a));

        if has_untried || tree.edges(node).count() == 0 {
            return Ok((node, Some(expected)));
        }

        let legal_set: HashSet<A::Action> = legal.into_iter().collect();
        match best_child_by_ucb(tree, node, &legal_set) {
            Some((child, action)) => {
                orchestrator::apply_action::<A>(driver, player, action)?;
                node = child;
            }
            None => return Ok((node, Some(expected))),
        }
    }
}
