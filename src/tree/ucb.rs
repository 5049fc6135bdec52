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

//! UCB1 child scoring and best-child selection, with no exploration-constant
//! tuning knob per the design: `Q(c)/N(c) + sqrt(2 ln N(p) / N(c))`, and
//! `+inf` for an unvisited child so every child is tried at least once.

use std::collections::HashSet;
use std::hash::Hash;

use petgraph::prelude::EdgeRef;
use petgraph::graph::NodeIndex;

use crate::tree::SearchTree;

/// UCB1 score for a child with `child_visits` visits and `child_total_reward`
/// accumulated reward, given its parent has `parent_visits` visits.
pub fn ucb1(parent_visits: u32, child_visits: u32, child_total_reward: f64) -> f64 {
    if child_visits == 0 {
        return f64::INFINITY;
    }
    let exploitation = child_total_reward / f64::from(child_visits);
    let exploration = f64::sqrt(2.0 * f64::ln(f64::from(parent_visits)) / f64::from(child_visits));
    exploitation + exploration
}

/// Picks the child of `node` with the highest UCB1 score, restricted to
/// children whose edge action is a member of `legal` (the compatibility
/// filter: children encoding actions illegal under the current
/// determinization are skipped but remain in the tree). Ties are broken by
/// insertion order — the first child encountered at the maximum score wins.
///
/// Returns `None` if `node` has no children, or none of them are legal.
pub fn best_child_by_ucb<P, Act: Clone + Eq + Hash>(
    tree: &SearchTree<P, Act>,
    node: NodeIndex,
    legal: &HashSet<Act>,
) -> Option<(NodeIndex, Act)> {
    let parent_visits = tree[node].visits;
    let mut best: Option<(NodeIndex, Act, f64)> = None;
    for edge in tree.edges(node) {
        let action = &edge.weight().action;
        if !legal.contains(action) {
            continue;
        }
        let child = &tree[edge.target()];
        let score = ucb1(parent_visits, child.visits, child.total_reward);
        let is_better = match &best {
            None => true,
            // `>=`, not `>`: petgraph prepends on `add_edge`, so `edges()`
            // yields the most recently inserted edge first. A tie must be
            // won by the edge encountered later in this iteration order —
            // the actually-earlier insertion — to honor "ties broken by
            // insertion order".
            Some((_, _, best_score)) => score >= *best_score,
        };
        if is_better {
            best = Some((edge.target(), action.clone(), score));
        }
    }
    best.map(|(idx, action, _)| (idx, action))
}

/// Picks the child of `node` with the highest visit count, ties broken by
/// insertion order. Used once at the end of the search to emit the chosen
/// action — unlike [`best_child_by_ucb`] this is not restricted to a legal
/// subset, since it runs against the root after the search has finished.
pub fn best_child_by_visits<P, Act: Clone>(
    tree: &SearchTree<P, Act>,
    node: NodeIndex,
) -> Option<(NodeIndex, Act)> {
    let mut best: Option<(NodeIndex, Act, u32)> = None;
    for edge in tree.edges(node) {
        let child = &tree[edge.target()];
        let is_better = match &best {
            None => true,
            // See the matching comment in `best_child_by_ucb`: iteration
            // order is newest-edge-first, so `>=` is required for a tie to
            // resolve to the earliest-inserted child.
            Some((_, _, best_visits)) => child.visits >= *best_visits,
        };
        if is_better {
            best = Some((edge.target(), edge.weight().action.clone(), child.visits));
        }
    }
    best.map(|(idx, action, _)| (idx, action))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{new_tree, SearchEdge, SearchNode};

    #[test]
    fn unvisited_child_has_infinite_score() {
        assert_eq!(ucb1(10, 0, 0.0), f64::INFINITY);
    }

    #[test]
    fn best_child_by_ucb_prefers_unvisited() {
        let (mut tree, root) = new_tree::<u8, u8>();
        tree[root].visits = 4;
        let seen = tree.add_node(SearchNode { visits: 2, total_reward: 1.0, last_player: Some(1u8), last_action: Some(1u8) });
        tree.add_edge(root, seen, SearchEdge { action: 1u8 });
        let unseen = tree.add_node(SearchNode { visits: 0, total_reward: 0.0, last_player: Some(1u8), last_action: Some(2u8) });
        tree.add_edge(root, unseen, SearchEdge { action: 2u8 });

        let legal: HashSet<u8> = [1u8, 2u8].into_iter().collect();
        let (idx, action) = best_child_by_ucb(&tree, root, &legal).unwrap();
        assert_eq!(idx, unseen);
        assert_eq!(action, 2u8);
    }

    #[test]
    fn best_child_by_ucb_skips_illegal_children() {
        let (mut tree, root) = new_tree::<u8, u8>();
        tree[root].visits = 4;
        let a = tree.add_node(SearchNode { visits: 3, total_reward: 2.0, last_player: Some(1u8), last_action: Some(1u8) });
        tree.add_edge(root, a, SearchEdge { action: 1u8 });
        let b = tree.add_node(SearchNode { visits: 1, total_reward: 1.0, last_player: Some(1u8), last_action: Some(2u8) });
        tree.add_edge(root, b, SearchEdge { action: 2u8 });

        let legal: HashSet<u8> = [2u8].into_iter().collect();
        let (idx, action) = best_child_by_ucb(&tree, root, &legal).unwrap();
        assert_eq!(idx, b);
        assert_eq!(action, 2u8);
    }

    #[test]
    fn best_child_by_visits_breaks_ties_by_insertion_order() {
        let (mut tree, root) = new_tree::<u8, u8>();
        let first = tree.add_node(SearchNode { visits: 5, total_reward: 0.0, last_player: Some(1u8), last_action: Some(1u8) });
        tree.add_edge(root, first, SearchEdge { action: 1u8 });
        let second = tree.add_node(SearchNode { visits: 5, total_reward: 0.0, last_player: Some(1u8), last_action: Some(2u8) });
        tree.add_edge(root, second, SearchEdge { action: 2u8 });

        let (idx, _) = best_child_by_visits(&tree, root).unwrap();
        assert_eq!(idx, first);
    }
}
