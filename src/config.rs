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

use serde::{Deserialize, Serialize};

/// Tunable knobs for one [`crate::engine::decide`] call.
///
/// Serializable so hosts can load it from whatever configuration file or CLI
/// flags they already use, matching the teacher crate's convention of
/// serde-derived agent configuration structs (`AgentConfig` in
/// `ai_core::core::agent_config`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Number of selection→expansion→simulation→backpropagation cycles run
    /// per decision. Default 100.
    pub iterations: u32,

    /// Simulation depth cap: the number of actions a single playout will
    /// apply before falling back to [`crate::adapter::GameAdapter::timeout_reward`]
    /// instead of playing to a true terminal state. Default 15.
    pub max_depth: u32,

    /// Optional PRNG seed. Fixing it, together with fixing the observation
    /// and adapter, makes `decide` deterministic across runs. `None` seeds
    /// from entropy.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig { iterations: 100, max_depth: 15, seed: None }
    }
}

/// Reads the `DEBUG_LEGAL_ACTIONS` environment variable. When set to
/// `"true"`, the Legal-Action Generator emits candidate and validated action
/// counts and types to standard error. No other environment state is read
/// by this crate.
pub fn debug_legal_actions_enabled() -> bool {
    std::env::var("DEBUG_LEGAL_ACTIONS").map(|v| v == "true").unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec() {
        let config = EngineConfig::default();
        assert_eq!(config.iterations, 100);
        assert_eq!(config.max_depth, 15);
        assert!(config.seed.is_none());
    }
}
