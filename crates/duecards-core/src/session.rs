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

use std::collections::HashMap;
use std::collections::HashSet;

use crate::error::Fallible;
use crate::error::fail;
use crate::scheduler::apply_review;
use crate::sm2::Quality;
use crate::types::item_id::ItemId;
use crate::types::review_state::ReviewState;
use crate::types::timestamp::Timestamp;

/// A minimal, completely insecure PRNG for shuffling the review queue.
struct ShuffleRng {
    state: u64,
}

const A: u64 = 6364136223846793005;
const C: u64 = 1442695040888963407;

impl ShuffleRng {
    fn from_seed(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Generate a random index in range [0, len). `len` must be nonzero.
    fn next_index(&mut self, len: usize) -> usize {
        let new = self.state.wrapping_mul(A).wrapping_add(C);
        self.state = new;
        ((new >> 32) as usize) % len
    }
}

fn shuffle(mut states: Vec<ReviewState>, seed: u64) -> Vec<ReviewState> {
    let mut rng = ShuffleRng::from_seed(seed);
    for i in 0..states.len() {
        let j = rng.next_index(states.len());
        states.swap(i, j);
    }
    states
}

/// How a review session presents its queue.
#[derive(Clone, Copy, Debug)]
pub struct SessionOptions {
    /// When set, the queue is shuffled deterministically from this seed.
    /// When unset, items are presented in the order given.
    pub shuffle_seed: Option<u64>,
    /// Whether failed items are put back at the end of the queue for another
    /// attempt within the same session.
    pub requeue_failed: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            shuffle_seed: None,
            requeue_failed: true,
        }
    }
}

struct AnswerRecord {
    queue_index: usize,
    previous: ReviewState,
    quality: Quality,
    requeued: bool,
}

/// Aggregate numbers describing a session so far.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SessionSummary {
    /// The number of answers given, counting repeat attempts.
    pub answered: usize,
    /// The number of answers that were successful recalls.
    pub correct: usize,
    /// The number of distinct items answered at least once.
    pub unique_items: usize,
    /// The number of queue entries not yet answered.
    pub remaining: usize,
}

/// An in-memory run through a queue of due items. The session owns the
/// working copies of the states; callers persist the results of `outcomes`
/// when the session ends.
pub struct ReviewSession {
    queue: Vec<ReviewState>,
    position: usize,
    history: Vec<AnswerRecord>,
    requeue_failed: bool,
}

impl ReviewSession {
    pub fn new(states: Vec<ReviewState>, options: SessionOptions) -> Self {
        let queue = match options.shuffle_seed {
            Some(seed) => shuffle(states, seed),
            None => states,
        };
        Self {
            queue,
            position: 0,
            history: vec![],
            requeue_failed: options.requeue_failed,
        }
    }

    /// The item currently being reviewed, or None when the queue is finished.
    pub fn current(&self) -> Option<&ReviewState> {
        self.queue.get(self.position)
    }

    pub fn is_complete(&self) -> bool {
        self.position >= self.queue.len()
    }

    /// Answers the current item and advances the queue. Returns the updated
    /// state. Failed answers requeue the item when the session is configured
    /// to do so.
    pub fn answer(&mut self, quality: Quality, now: Timestamp) -> Fallible<ReviewState> {
        let previous = match self.queue.get(self.position) {
            Some(state) => state.clone(),
            None => return fail("the session is already complete."),
        };
        let updated = apply_review(&previous, quality, now);
        self.queue[self.position] = updated.clone();
        let requeued = self.requeue_failed && !quality.is_passing();
        if requeued {
            self.queue.push(updated.clone());
        }
        self.history.push(AnswerRecord {
            queue_index: self.position,
            previous,
            quality,
            requeued,
        });
        self.position += 1;
        Ok(updated)
    }

    /// Reverts the most recent answer, restoring the item so it can be
    /// answered again. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some(record) => {
                if record.requeued {
                    self.queue.pop();
                }
                self.queue[record.queue_index] = record.previous;
                self.position = record.queue_index;
                true
            }
            None => false,
        }
    }

    /// The latest state of every item answered during the session, in the
    /// order the items were first answered. These are the states to persist.
    pub fn outcomes(&self) -> Vec<ReviewState> {
        let mut order: Vec<ItemId> = vec![];
        let mut latest: HashMap<ItemId, ReviewState> = HashMap::new();
        for record in &self.history {
            let state = self.queue[record.queue_index].clone();
            if !latest.contains_key(&state.item_id) {
                order.push(state.item_id.clone());
            }
            latest.insert(state.item_id.clone(), state);
        }
        order.into_iter().filter_map(|id| latest.remove(&id)).collect()
    }

    pub fn summary(&self) -> SessionSummary {
        let unique: HashSet<&ItemId> = self
            .history
            .iter()
            .map(|record| &record.previous.item_id)
            .collect();
        SessionSummary {
            answered: self.history.len(),
            correct: self
                .history
                .iter()
                .filter(|record| record.quality.is_passing())
                .count(),
            unique_items: unique.len(),
            remaining: self.queue.len() - self.position,
        }
    }
}
