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

//! Expansion: add one child for an unexplored legal action.

use std::collections::HashSet;

use enumset::EnumSet;
use rand::seq::SliceRandom;
use rand::RngCore;

use petgraph::graph::NodeIndex;

use crate::adapter::{Driver, GameAdapter};
use crate::error::EngineError;
use crate::orchestrator;
use crate::search::legal_actions::validated_legal_actions;
use crate::tree::node::SearchEdge;
use crate::tree::{existing_actions, SearchNode, SearchTree};

/// Attempts to expand `node`, whose state is `driver`'s current waiting
/// state with response types `expected`. Picks one untried legal action
/// uniformly at random, applies it, and attaches a fresh child.
///
/// Returns `None` (nothing to expand) when `expected` is empty or every
/// legal action is already a child. Terminal states are handled by the
/// caller before expansion is ever invoked.
pub fn run<A: GameAdapter>(
    adapter: &A,
    tree: &mut SearchTree<A::PlayerId, A::Action>,
    node: NodeIndex,
    driver: &mut A::Driver,
    expected: EnumSet<A::ResponseType>,
    rng: &mut dyn RngCore,
) -> Result<Option<NodeIndex>, EngineError> {
    if expected.is_empty() {
        return Ok(None);
    }

    let player = driver.current_player();
    let legal = validated_legal_actions(adapter, driver.state(), player, expected);
    let existing: HashSet<A::Action> = existing_actions(tree, node).into_iter().collect();
    let untried: Vec<A::Action> = legal.into_iter().filter(|a| !existing.contains(a)).collect();

    let Some(action) = untried.choose(rng).cloned() else {
        return Ok(None);
    };

    orchestrator::apply_action::<A>(driver, player, action.clone())?;

    let child = tree.add_node(SearchNode::child(player, action.clone()));
    tree.add_edge(node, child, SearchEdge { action });
    Ok(Some(child))
}
