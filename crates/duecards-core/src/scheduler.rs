// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::cmp::Ordering;

use crate::sm2::FIRST_INTERVAL_DAYS;
use crate::sm2::Quality;
use crate::sm2::next_easiness;
use crate::sm2::next_interval;
use crate::types::mastery::MasteryLevel;
use crate::types::mastery::MasteryThresholds;
use crate::types::review_state::ReviewState;
use crate::types::timestamp::Timestamp;

/// The state of an item after reviewing it at `now` with the given rating.
///
/// The input state is not modified. The easiness factor is adjusted on every
/// review; a failed review additionally resets the success streak and
/// reschedules the item for tomorrow.
pub fn apply_review(state: &ReviewState, quality: Quality, now: Timestamp) -> ReviewState {
    let easiness = next_easiness(state.easiness_factor, quality);
    let (repetition, interval_days) = if quality.is_passing() {
        let repetition = state.repetition + 1;
        (
            repetition,
            next_interval(repetition, state.interval_days, easiness),
        )
    } else {
        (0, FIRST_INTERVAL_DAYS)
    };
    ReviewState {
        item_id: state.item_id.clone(),
        last_reviewed_at: Some(now),
        next_review_at: Some(now.plus_days(interval_days)),
        review_count: state.review_count + 1,
        correct_count: state.correct_count + u32::from(quality.is_passing()),
        easiness_factor: easiness,
        repetition,
        interval_days,
        is_favorite: state.is_favorite,
    }
}

/// The states due for review at `now`, in their original order.
pub fn select_due(states: &[ReviewState], now: Timestamp) -> Vec<ReviewState> {
    states
        .iter()
        .filter(|state| state.is_due(now))
        .cloned()
        .collect()
}

/// The states due for review at `now`, ordered by the given comparator.
pub fn select_due_sorted(
    states: &[ReviewState],
    now: Timestamp,
    compare: impl FnMut(&ReviewState, &ReviewState) -> Ordering,
) -> Vec<ReviewState> {
    let mut due = select_due(states, now);
    due.sort_by(compare);
    due
}

/// Orders states so that the longest-waiting ones come first. Items that were
/// never scheduled sort before everything else; ties break on the item id so
/// the order is stable across runs.
pub fn most_overdue_first(a: &ReviewState, b: &ReviewState) -> Ordering {
    a.next_review_at
        .cmp(&b.next_review_at)
        .then_with(|| a.item_id.cmp(&b.item_id))
}

/// The states classified at the given mastery level, in their original order.
pub fn filter_by_mastery(
    states: &[ReviewState],
    thresholds: &MasteryThresholds,
    level: MasteryLevel,
) -> Vec<ReviewState> {
    states
        .iter()
        .filter(|state| thresholds.level_for(state) == level)
        .cloned()
        .collect()
}
