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

//! The per-decision search tree: an arena of statistics nodes connected by
//! action-labeled edges, plus the UCB1 selection policy over it.

pub mod node;
pub mod ucb;

pub use node::{existing_actions, new_tree, SearchEdge, SearchNode, SearchTree};
