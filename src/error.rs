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

use thiserror::Error;

/// Reasons a single search iteration, or the engine as a whole, can fail.
///
/// `NoLegalActions` and `EngineExhaustion` from the design are not variants
/// here: the former is only ever raised at the top of [`crate::engine::decide`]
/// and the latter is represented by `decide` returning `None`, not by a thrown
/// error. [`IllegalPrecondition`](EngineError::IllegalPrecondition) is the one
/// kind that is a programmer error rather than a recoverable per-iteration
/// condition; callers that swallow [`EngineError`] during the search loop must
/// not swallow this one.
#[derive(Debug, Error)]
pub enum EngineError {
    /// No legal action exists for the acting player given the current
    /// observation. Raised before any iteration runs.
    #[error("no legal actions available for the acting player")]
    NoLegalActions,

    /// A driver rejected an action during `applyAction`. The iteration that
    /// produced this error is discarded; the search loop continues.
    #[error("action rejected by driver: {0}")]
    ValidationFailure(String),

    /// A search phase was invoked on a state that violates its precondition
    /// (e.g. expansion called on a non-waiting state). These indicate a bug
    /// in the engine or the adapter and must not be silently discarded.
    #[error("illegal precondition: {0}")]
    IllegalPrecondition(String),

    /// An adapter method failed (determinizer, reward accessor, or action
    /// generator). The iteration that produced this error is discarded.
    #[error("adapter failure: {0}")]
    AdapterFailure(String),
}

impl EngineError {
    /// Whether this error should cause the current search iteration to be
    /// discarded (statistics not updated) rather than propagated to the
    /// caller of [`crate::engine::decide`].
    pub fn is_iteration_local(&self) -> bool {
        matches!(self, EngineError::ValidationFailure(_) | EngineError::AdapterFailure(_))
    }
}
