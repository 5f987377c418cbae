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

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::fail;
use crate::types::review_state::ReviewState;

/// Highest consecutive-success count at which an item still counts as
/// learning.
pub const DEFAULT_LEARNING_MAX_REPETITION: u32 = 2;

/// Consecutive-success count an item must exceed to count as mastered.
pub const DEFAULT_REVIEW_MAX_REPETITION: u32 = 6;

/// Interval, in days, an item must reach to count as mastered.
pub const DEFAULT_MASTERED_MIN_INTERVAL_DAYS: i64 = 30;

/// How well an item is known, derived from its review state.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum MasteryLevel {
    /// Never reviewed successfully since the last failure.
    New,
    /// In the first few consecutive successes.
    Learning,
    /// Past the learning phase, but not yet mastered.
    Review,
    /// Long streak of successes at a long interval.
    Mastered,
}

impl MasteryLevel {
    pub fn as_str(&self) -> &str {
        match self {
            MasteryLevel::New => "new",
            MasteryLevel::Learning => "learning",
            MasteryLevel::Review => "review",
            MasteryLevel::Mastered => "mastered",
        }
    }
}

impl TryFrom<String> for MasteryLevel {
    type Error = ErrorReport;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "new" => Ok(MasteryLevel::New),
            "learning" => Ok(MasteryLevel::Learning),
            "review" => Ok(MasteryLevel::Review),
            "mastered" => Ok(MasteryLevel::Mastered),
            _ => fail(format!("invalid mastery level: '{value}'.")),
        }
    }
}

fn default_learning_max_repetition() -> u32 {
    DEFAULT_LEARNING_MAX_REPETITION
}

fn default_review_max_repetition() -> u32 {
    DEFAULT_REVIEW_MAX_REPETITION
}

fn default_mastered_min_interval_days() -> i64 {
    DEFAULT_MASTERED_MIN_INTERVAL_DAYS
}

/// The cutoffs used to classify review states into mastery levels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MasteryThresholds {
    #[serde(default = "default_learning_max_repetition")]
    pub learning_max_repetition: u32,
    #[serde(default = "default_review_max_repetition")]
    pub review_max_repetition: u32,
    #[serde(default = "default_mastered_min_interval_days")]
    pub mastered_min_interval_days: i64,
}

impl Default for MasteryThresholds {
    fn default() -> Self {
        Self {
            learning_max_repetition: DEFAULT_LEARNING_MAX_REPETITION,
            review_max_repetition: DEFAULT_REVIEW_MAX_REPETITION,
            mastered_min_interval_days: DEFAULT_MASTERED_MIN_INTERVAL_DAYS,
        }
    }
}

impl MasteryThresholds {
    /// Classifies a review state. Every state maps to exactly one level.
    pub fn level_for(&self, state: &ReviewState) -> MasteryLevel {
        if state.repetition == 0 {
            MasteryLevel::New
        } else if state.repetition <= self.learning_max_repetition {
            MasteryLevel::Learning
        } else if state.repetition > self.review_max_repetition
            && state.interval_days >= self.mastered_min_interval_days
        {
            MasteryLevel::Mastered
        } else {
            MasteryLevel::Review
        }
    }
}
