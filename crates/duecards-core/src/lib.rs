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

//! duecards-core: Core library for the duecards spaced repetition system.
//!
//! This library provides I/O-free types and algorithms for:
//! - The SM-2 scheduling algorithm and its 0-5 quality scale
//! - Per-item review state and the derived mastery levels
//! - Due-date queries used to build review queues
//! - In-memory review sessions with undo and failure requeueing
//! - Aggregate progress statistics

pub mod catalog;
pub mod error;
pub mod scheduler;
pub mod session;
pub mod sm2;
pub mod stats;
pub mod store;
pub mod types;

// Re-exports for convenience
pub use catalog::{ContentCatalog, StaticCatalog};
pub use error::{ErrorReport, Fallible, fail};
pub use scheduler::{
    apply_review, filter_by_mastery, most_overdue_first, select_due, select_due_sorted,
};
pub use session::{ReviewSession, SessionOptions, SessionSummary};
pub use sm2::Quality;
pub use stats::{ProgressSummary, summarize};
pub use store::{MemoryStore, ProgressStore};
pub use types::item_id::ItemId;
pub use types::mastery::{MasteryLevel, MasteryThresholds};
pub use types::review_state::ReviewState;
pub use types::timestamp::Timestamp;
