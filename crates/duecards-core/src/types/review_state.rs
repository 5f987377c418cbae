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

use crate::sm2::FIRST_INTERVAL_DAYS;
use crate::sm2::INITIAL_EASINESS;
use crate::sm2::MIN_EASINESS;
use crate::sm2::MIN_INTERVAL_DAYS;
use crate::types::item_id::ItemId;
use crate::types::timestamp::Timestamp;

fn default_easiness() -> f64 {
    INITIAL_EASINESS
}

fn default_interval() -> i64 {
    FIRST_INTERVAL_DAYS
}

/// The scheduling state of a single learning item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReviewState {
    /// The item this state belongs to.
    pub item_id: ItemId,
    /// When the item was last reviewed. Absent for new items.
    #[serde(default)]
    pub last_reviewed_at: Option<Timestamp>,
    /// When the item is next due. Absent means due immediately.
    #[serde(default)]
    pub next_review_at: Option<Timestamp>,
    /// The number of times the item has been reviewed.
    #[serde(default)]
    pub review_count: u32,
    /// The number of successful reviews.
    #[serde(default)]
    pub correct_count: u32,
    /// The SM-2 easiness factor.
    #[serde(default = "default_easiness")]
    pub easiness_factor: f64,
    /// The number of consecutive successful reviews since the last failure.
    #[serde(default)]
    pub repetition: u32,
    /// The current review interval in days.
    #[serde(default = "default_interval")]
    pub interval_days: i64,
    /// Whether the user has flagged the item as a favorite.
    #[serde(default)]
    pub is_favorite: bool,
}

impl ReviewState {
    /// The state of an item that has never been reviewed.
    pub fn new(item_id: ItemId) -> Self {
        Self {
            item_id,
            last_reviewed_at: None,
            next_review_at: None,
            review_count: 0,
            correct_count: 0,
            easiness_factor: INITIAL_EASINESS,
            repetition: 0,
            interval_days: FIRST_INTERVAL_DAYS,
            is_favorite: false,
        }
    }

    /// Whether the item should be reviewed at `now`. Items that were never
    /// scheduled are always due.
    pub fn is_due(&self, now: Timestamp) -> bool {
        match self.next_review_at {
            None => true,
            Some(next) => next <= now,
        }
    }

    /// Whether the item's scheduled review time has already passed. Unlike
    /// `is_due`, this is false for items that were never scheduled and for
    /// items due exactly at `now`.
    pub fn is_overdue(&self, now: Timestamp) -> bool {
        match self.next_review_at {
            None => false,
            Some(next) => next < now,
        }
    }

    /// The fraction of reviews that were successful, or 0.0 for an item that
    /// was never reviewed.
    pub fn accuracy(&self) -> f64 {
        if self.review_count == 0 {
            0.0
        } else {
            f64::from(self.correct_count) / f64::from(self.review_count)
        }
    }

    /// Checks the internal consistency of this state, returning a description
    /// of each violated invariant. An empty vector means the state is sound.
    pub fn check_invariants(&self) -> Vec<String> {
        let mut violations = vec![];
        // NaN fails every ordered comparison.
        if self.easiness_factor < MIN_EASINESS || self.easiness_factor.is_nan() {
            violations.push(format!(
                "easiness factor {} is below the minimum {}",
                self.easiness_factor, MIN_EASINESS
            ));
        }
        if self.interval_days < MIN_INTERVAL_DAYS {
            violations.push(format!(
                "interval of {} day(s) is below the minimum {}",
                self.interval_days, MIN_INTERVAL_DAYS
            ));
        }
        if self.correct_count > self.review_count {
            violations.push(format!(
                "correct count {} exceeds review count {}",
                self.correct_count, self.review_count
            ));
        }
        if self.repetition > self.correct_count {
            violations.push(format!(
                "repetition count {} exceeds correct count {}",
                self.repetition, self.correct_count
            ));
        }
        if self.review_count > 0 && self.last_reviewed_at.is_none() {
            violations.push(format!(
                "item has {} review(s) but no last-reviewed timestamp",
                self.review_count
            ));
        }
        if self.review_count == 0 && self.last_reviewed_at.is_some() {
            violations.push("item has a last-reviewed timestamp but no reviews".to_string());
        }
        if let (Some(last), Some(next)) = (self.last_reviewed_at, self.next_review_at) {
            if next < last {
                violations.push(format!(
                    "next review at {next} is before the last review at {last}"
                ));
            }
        }
        violations
    }
}
