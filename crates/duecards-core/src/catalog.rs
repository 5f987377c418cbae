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

use std::collections::HashSet;

use crate::error::Fallible;
use crate::types::item_id::ItemId;

/// The source of the item identifiers that need scheduling. The scheduler
/// knows nothing about item content; the catalog is the only link between it
/// and the learning material.
pub trait ContentCatalog {
    /// The identifiers of every item in the catalog, in catalog order.
    fn item_ids(&self) -> Fallible<Vec<ItemId>>;
}

/// A catalog over a fixed list of identifiers. Duplicates are dropped,
/// keeping the first occurrence.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    ids: Vec<ItemId>,
}

impl StaticCatalog {
    pub fn new(ids: Vec<ItemId>) -> Self {
        let mut seen = HashSet::new();
        let ids = ids.into_iter().filter(|id| seen.insert(id.clone())).collect();
        Self { ids }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl ContentCatalog for StaticCatalog {
    fn item_ids(&self) -> Fallible<Vec<ItemId>> {
        Ok(self.ids.clone())
    }
}
