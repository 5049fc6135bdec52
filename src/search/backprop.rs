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

//! Backpropagation: walk parent pointers from a leaf to the root, combining
//! the reward into each node's statistics from that node's mover's
//! perspective.

use petgraph::graph::NodeIndex;
use petgraph::Direction;

use crate::tree::SearchTree;

/// Propagates `reward` — already expressed from `decision_maker`'s
/// perspective — from `leaf` up to the root.
///
/// The root only accumulates `visits`. Every other node combines the reward
/// via `f(r, mover, self) = r` when `mover == decision_maker`, else `1 - r`:
/// the scalar two-party zero-sum convention this crate implements (see
/// DESIGN.md for why the vector-reward generalization for 3+ players was not
/// pursued).
pub fn run<P: PartialEq + Copy, Act>(
    tree: &mut SearchTree<P, Act>,
    mut node: NodeIndex,
    decision_maker: P,
    reward: f64,
) {
    loop {
        let is_root = tree[node].is_root();
        tree[node].visits += 1;
        if !is_root {
            let mover = tree[node].last_player.expect("non-root node always has a mover");
            tree[node].total_reward += if mover == decision_maker { reward } else { 1.0 - reward };
        }

        match tree.neighbors_directed(node, Direction::Incoming).next() {
            Some(parent) => node = parent,
            None => break,
        }
    }
}
