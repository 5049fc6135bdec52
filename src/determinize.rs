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

//! The shuffle-subtract-deal procedure behind determinization.
//!
//! Sampling a determinization is an adapter responsibility (it alone knows
//! which fields are public versus hidden), but the *mechanics* of "take a
//! card universe, remove what's already known, shuffle the remainder, deal
//! fixed-size hands from it" are game-agnostic over the element type. This
//! module is that reusable mechanic; adapters call into it rather than
//! reimplementing per game.

use std::collections::HashMap;
use std::hash::Hash;

use rand::seq::SliceRandom;
use rand::RngCore;

/// Removes one occurrence of each element of `known` from `universe`
/// (multiset subtraction — two `3`s in `known` remove two `3`s from
/// `universe`, not all of them), returning the remainder.
///
/// Panics if `known` contains an element, or more occurrences of one, than
/// `universe` has — that indicates a bug in the caller's public/hidden
/// partitioning, not a recoverable condition.
pub fn subtract<T: Eq + Hash + Clone>(universe: &[T], known: &[T]) -> Vec<T> {
    let mut to_remove: HashMap<&T, usize> = HashMap::new();
    for k in known {
        *to_remove.entry(k).or_insert(0) += 1;
    }
    let mut remainder = Vec::with_capacity(universe.len());
    for item in universe {
        match to_remove.get_mut(item) {
            Some(count) if *count > 0 => {
                *count -= 1;
            }
            _ => remainder.push(item.clone()),
        }
    }
    let still_owed: usize = to_remove.values().sum();
    assert_eq!(still_owed, 0, "known elements not present in universe");
    remainder
}

/// Shuffles `remainder` and deals it out into hands of the given `counts`,
/// in order. Returns `None` if `remainder` does not have exactly enough
/// elements to fill every requested count (a determinizer calling this with
/// an inconsistent count is the game-rule-constraint failure described in
/// the design notes on determinization, not this helper's concern to
/// diagnose further).
pub fn deal<T: Clone>(mut remainder: Vec<T>, counts: &[usize], rng: &mut dyn RngCore) -> Option<Vec<Vec<T>>> {
    if remainder.len() != counts.iter().sum::<usize>() {
        return None;
    }
    remainder.shuffle(rng);
    let mut hands = Vec::with_capacity(counts.len());
    let mut rest = remainder.as_slice();
    for &count in counts {
        let (hand, tail) = rest.split_at(count);
        hands.push(hand.to_vec());
        rest = tail;
    }
    Some(hands)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    #[test]
    fn subtract_removes_multiset_occurrences() {
        let universe = vec![1, 1, 2, 3, 3, 3];
        let known = vec![1, 3];
        let remainder = subtract(&universe, &known);
        let mut sorted = remainder.clone();
        sorted.sort();
        assert_eq!(sorted, vec![1, 3, 3]);
    }

    #[test]
    fn deal_preserves_total_multiset() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
        let remainder = vec![1, 2, 3, 4, 5, 6];
        let hands = deal(remainder.clone(), &[2, 4], &mut rng).unwrap();
        assert_eq!(hands.len(), 2);
        assert_eq!(hands[0].len(), 2);
        assert_eq!(hands[1].len(), 4);
        let mut all: Vec<i32> = hands.into_iter().flatten().collect();
        all.sort();
        let mut expected = remainder;
        expected.sort();
        assert_eq!(all, expected);
    }

    #[test]
    fn deal_rejects_mismatched_counts() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
        assert!(deal(vec![1, 2, 3], &[1, 1], &mut rng).is_none());
    }
}
