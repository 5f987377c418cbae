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

use crate::types::mastery::MasteryLevel;
use crate::types::mastery::MasteryThresholds;
use crate::types::review_state::ReviewState;
use crate::types::timestamp::Timestamp;

/// Aggregate progress numbers over a set of review states.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProgressSummary {
    /// The number of states summarized.
    pub tracked: usize,
    /// Count of items at each mastery level.
    pub new: usize,
    pub learning: usize,
    pub review: usize,
    pub mastered: usize,
    /// The number of items due at the time of the summary.
    pub due: usize,
    /// The number of items whose scheduled review time has passed.
    pub overdue: usize,
    pub favorites: usize,
    /// Reviews across all items.
    pub total_reviews: u64,
    /// Successful reviews across all items.
    pub total_correct: u64,
}

impl ProgressSummary {
    /// Overall recall accuracy, or 0.0 when nothing was reviewed yet.
    pub fn accuracy(&self) -> f64 {
        if self.total_reviews == 0 {
            0.0
        } else {
            self.total_correct as f64 / self.total_reviews as f64
        }
    }
}

/// Summarizes a set of review states as of `now`.
pub fn summarize(
    states: &[ReviewState],
    thresholds: &MasteryThresholds,
    now: Timestamp,
) -> ProgressSummary {
    let mut summary = ProgressSummary {
        tracked: states.len(),
        ..ProgressSummary::default()
    };
    for state in states {
        match thresholds.level_for(state) {
            MasteryLevel::New => summary.new += 1,
            MasteryLevel::Learning => summary.learning += 1,
            MasteryLevel::Review => summary.review += 1,
            MasteryLevel::Mastered => summary.mastered += 1,
        }
        if state.is_due(now) {
            summary.due += 1;
        }
        if state.is_overdue(now) {
            summary.overdue += 1;
        }
        if state.is_favorite {
            summary.favorites += 1;
        }
        summary.total_reviews += u64::from(state.review_count);
        summary.total_correct += u64::from(state.correct_count);
    }
    summary
}
