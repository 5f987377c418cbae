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

/// Easiness factor assigned to an item before its first review.
pub const INITIAL_EASINESS: f64 = 2.5;

/// Lower bound on the easiness factor.
pub const MIN_EASINESS: f64 = 1.3;

/// Interval after the first successful review, and after a failed review.
pub const FIRST_INTERVAL_DAYS: i64 = 1;

/// Interval after the second consecutive successful review.
pub const SECOND_INTERVAL_DAYS: i64 = 6;

/// Lower bound on any computed interval.
pub const MIN_INTERVAL_DAYS: i64 = 1;

/// Lowest rating that counts as a successful recall.
pub const PASSING_QUALITY: u8 = 3;

/// A self-assessed recall rating on the 0-5 SM-2 scale.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Quality {
    /// 0: no recall at all.
    Blackout,
    /// 1: wrong, but the answer was recognized once revealed.
    Wrong,
    /// 2: wrong, but the answer felt within reach.
    NearMiss,
    /// 3: correct, with serious difficulty.
    Difficult,
    /// 4: correct, after some hesitation.
    Hesitant,
    /// 5: correct, instantly.
    Perfect,
}

impl From<Quality> for u8 {
    fn from(q: Quality) -> u8 {
        match q {
            Quality::Blackout => 0,
            Quality::Wrong => 1,
            Quality::NearMiss => 2,
            Quality::Difficult => 3,
            Quality::Hesitant => 4,
            Quality::Perfect => 5,
        }
    }
}

impl From<Quality> for f64 {
    fn from(q: Quality) -> f64 {
        f64::from(u8::from(q))
    }
}

impl Quality {
    pub fn as_str(&self) -> &str {
        match self {
            Quality::Blackout => "blackout",
            Quality::Wrong => "wrong",
            Quality::NearMiss => "near-miss",
            Quality::Difficult => "difficult",
            Quality::Hesitant => "hesitant",
            Quality::Perfect => "perfect",
        }
    }

    /// Whether this rating counts as a successful recall.
    pub fn is_passing(self) -> bool {
        u8::from(self) >= PASSING_QUALITY
    }
}

impl TryFrom<u8> for Quality {
    type Error = ErrorReport;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Quality::Blackout),
            1 => Ok(Quality::Wrong),
            2 => Ok(Quality::NearMiss),
            3 => Ok(Quality::Difficult),
            4 => Ok(Quality::Hesitant),
            5 => Ok(Quality::Perfect),
            _ => fail(format!("invalid quality rating: '{value}' (expected 0 to 5).")),
        }
    }
}

impl TryFrom<String> for Quality {
    type Error = ErrorReport;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "blackout" => Ok(Quality::Blackout),
            "wrong" => Ok(Quality::Wrong),
            "near-miss" => Ok(Quality::NearMiss),
            "difficult" => Ok(Quality::Difficult),
            "hesitant" => Ok(Quality::Hesitant),
            "perfect" => Ok(Quality::Perfect),
            _ => match value.parse::<u8>() {
                Ok(n) => Quality::try_from(n),
                Err(_) => fail(format!("invalid quality rating: '{value}'.")),
            },
        }
    }
}

/// The updated easiness factor after a review. Applied on every review,
/// successful or not, and clamped to `MIN_EASINESS`.
pub fn next_easiness(easiness: f64, quality: Quality) -> f64 {
    let miss = 5.0 - f64::from(quality);
    let updated = easiness + (0.1 - miss * (0.08 + miss * 0.02));
    updated.max(MIN_EASINESS)
}

/// The interval, in days, until the next review of an item whose
/// consecutive-success count after this review is `repetition`. The easiness
/// factor is the updated one.
pub fn next_interval(repetition: u32, previous_interval_days: i64, easiness: f64) -> i64 {
    let days = match repetition {
        0 | 1 => FIRST_INTERVAL_DAYS,
        2 => SECOND_INTERVAL_DAYS,
        _ => ((previous_interval_days as f64) * easiness).round() as i64,
    };
    days.max(MIN_INTERVAL_DAYS)
}
