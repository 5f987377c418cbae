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
use std::sync::Mutex;
use std::sync::MutexGuard;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::types::item_id::ItemId;
use crate::types::review_state::ReviewState;

/// Persistence of review states, keyed by item id. The scheduler itself never
/// performs I/O; callers load states, transform them, and save them back
/// through this trait.
pub trait ProgressStore {
    /// The stored state for an item, if any.
    fn load(&self, item_id: &ItemId) -> Fallible<Option<ReviewState>>;

    /// Stores a state, replacing any previous state for the same item.
    fn save(&self, state: &ReviewState) -> Fallible<()>;

    /// Removes the state for an item. Returns whether a state was removed.
    fn delete(&self, item_id: &ItemId) -> Fallible<bool>;

    /// Removes all stored states.
    fn clear(&self) -> Fallible<()>;

    /// All stored states, ordered by item id.
    fn load_all(&self) -> Fallible<Vec<ReviewState>>;
}

/// A `ProgressStore` backed by a map. Used in tests and embedding contexts
/// that bring their own persistence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    states: Mutex<HashMap<ItemId, ReviewState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> Fallible<MutexGuard<'_, HashMap<ItemId, ReviewState>>> {
        self.states
            .lock()
            .map_err(|_| ErrorReport::new("progress store lock poisoned."))
    }
}

impl ProgressStore for MemoryStore {
    fn load(&self, item_id: &ItemId) -> Fallible<Option<ReviewState>> {
        Ok(self.guard()?.get(item_id).cloned())
    }

    fn save(&self, state: &ReviewState) -> Fallible<()> {
        self.guard()?.insert(state.item_id.clone(), state.clone());
        Ok(())
    }

    fn delete(&self, item_id: &ItemId) -> Fallible<bool> {
        Ok(self.guard()?.remove(item_id).is_some())
    }

    fn clear(&self) -> Fallible<()> {
        self.guard()?.clear();
        Ok(())
    }

    fn load_all(&self) -> Fallible<Vec<ReviewState>> {
        let mut states: Vec<ReviewState> = self.guard()?.values().cloned().collect();
        states.sort_by(|a, b| a.item_id.cmp(&b.item_id));
        Ok(states)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;

    fn item(id: &str) -> ItemId {
        ItemId::new(id).unwrap()
    }

    #[test]
    fn test_load_missing() -> Fallible<()> {
        let store = MemoryStore::new();
        assert_eq!(store.load(&item("a"))?, None);
        Ok(())
    }

    #[test]
    fn test_save_and_load() -> Fallible<()> {
        let store = MemoryStore::new();
        let state = ReviewState::new(item("a"));
        store.save(&state)?;
        assert_eq!(store.load(&item("a"))?, Some(state));
        Ok(())
    }

    #[test]
    fn test_save_replaces() -> Fallible<()> {
        let store = MemoryStore::new();
        let mut state = ReviewState::new(item("a"));
        store.save(&state)?;
        state.review_count = 3;
        state.correct_count = 3;
        store.save(&state)?;
        assert_eq!(store.load(&item("a"))?, Some(state));
        assert_eq!(store.load_all()?.len(), 1);
        Ok(())
    }

    #[test]
    fn test_delete() -> Fallible<()> {
        let store = MemoryStore::new();
        store.save(&ReviewState::new(item("a")))?;
        assert!(store.delete(&item("a"))?);
        assert!(!store.delete(&item("a"))?);
        assert_eq!(store.load(&item("a"))?, None);
        Ok(())
    }

    #[test]
    fn test_clear() -> Fallible<()> {
        let store = MemoryStore::new();
        store.save(&ReviewState::new(item("a")))?;
        store.save(&ReviewState::new(item("b")))?;
        store.clear()?;
        assert!(store.load_all()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_load_all_ordered() -> Fallible<()> {
        let store = MemoryStore::new();
        for id in ["delta", "alpha", "charlie", "bravo"] {
            store.save(&ReviewState::new(item(id)))?;
        }
        let ids: Vec<String> = store
            .load_all()?
            .into_iter()
            .map(|s| s.item_id.to_string())
            .collect();
        assert_eq!(ids, vec!["alpha", "bravo", "charlie", "delta"]);
        Ok(())
    }
}
