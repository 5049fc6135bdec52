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

use petgraph::graph::NodeIndex;
use petgraph::Graph;

/// One node of the per-decision search tree.
///
/// The root is the node with `last_player == None` / `last_action == None`;
/// it accumulates `visits` but never `total_reward`. Every other node was
/// created by `last_player` playing `last_action` to reach it.
#[derive(Debug, Clone)]
pub struct SearchNode<P, Act> {
    pub visits: u32,
    pub total_reward: f64,
    pub last_player: Option<P>,
    pub last_action: Option<Act>,
}

impl<P, Act> SearchNode<P, Act> {
    pub fn root() -> Self {
        SearchNode { visits: 0, total_reward: 0.0, last_player: None, last_action: None }
    }

    pub fn child(last_player: P, last_action: Act) -> Self {
        SearchNode { visits: 0, total_reward: 0.0, last_player: Some(last_player), last_action: Some(last_action) }
    }

    pub fn is_root(&self) -> bool {
        self.last_player.is_none()
    }
}

/// The edge to a child carries the action that was applied to reach it. This
/// duplicates `child.last_action` but keeps selection's UCB scan working
/// purely off `petgraph`'s edge iterators without indexing into node weights
/// first.
#[derive(Debug, Clone)]
pub struct SearchEdge<Act> {
    pub action: Act,
}

/// An arena of [`SearchNode`]s connected by [`SearchEdge`]s. Rooted at the
/// caller's decision point, discarded after the engine returns; never
/// persisted across separate calls to [`crate::engine::decide`].
pub type SearchTree<P, Act> = Graph<SearchNode<P, Act>, SearchEdge<Act>>;

/// Creates a fresh tree containing only a root node, returning the tree and
/// the root's index.
pub fn new_tree<P, Act>() -> (SearchTree<P, Act>, NodeIndex) {
    let mut tree = SearchTree::new();
    let root = tree.add_node(SearchNode::root());
    (tree, root)
}

/// Actions already attached as children of `node`, for filtering candidate
/// actions down to the untried set.
pub fn existing_actions<P, Act: Clone>(tree: &SearchTree<P, Act>, node: NodeIndex) -> Vec<Act> {
    tree.edges(node).map(|edge| edge.weight().action.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_has_no_mover() {
        let (tree, root) = new_tree::<u8, u8>();
        assert!(tree[root].is_root());
    }

    #[test]
    fn child_carries_mover_and_action() {
        let (mut tree, root) = new_tree::<u8, u8>();
        let child = tree.add_node(SearchNode::child(1u8, 7u8));
        tree.add_edge(root, child, SearchEdge { action: 7u8 });
        assert_eq!(existing_actions(&tree, root), vec![7u8]);
        assert!(!tree[child].is_root());
    }
}
