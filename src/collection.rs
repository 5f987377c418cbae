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

use std::env::current_dir;
use std::path::PathBuf;

use log::info;

use duecards_core::ContentCatalog;
use duecards_core::Fallible;
use duecards_core::ItemId;
use duecards_core::ProgressStore;
use duecards_core::ReviewState;
use duecards_core::fail;

use crate::config::CollectionConfig;
use crate::db::DB_FILE_NAME;
use crate::db::Database;
use crate::decks::DeckCatalog;

/// A collection directory: deck files, an optional configuration file, and
/// the progress database.
pub struct Collection {
    pub directory: PathBuf,
    pub catalog: DeckCatalog,
    pub config: CollectionConfig,
    pub db: Database,
}

impl Collection {
    /// Opens the collection in the given directory, defaulting to the
    /// current working directory.
    pub fn new(directory: Option<String>) -> Fallible<Self> {
        let directory = match directory {
            Some(directory) => PathBuf::from(directory),
            None => current_dir()?,
        };
        if !directory.is_dir() {
            return fail("directory does not exist.");
        }
        let config = CollectionConfig::load(&directory)?;
        let catalog = DeckCatalog::scan(&directory)?;
        let db = Database::open(&directory.join(DB_FILE_NAME))?;
        info!(
            "opened collection at {} ({} deck(s))",
            directory.display(),
            catalog.decks().len()
        );
        Ok(Self {
            directory,
            catalog,
            config,
            db,
        })
    }

    /// Whether the item appears in any deck of the collection.
    pub fn contains(&self, item_id: &ItemId) -> Fallible<bool> {
        Ok(self.catalog.item_ids()?.contains(item_id))
    }

    /// The review state of every catalog item, substituting the initial
    /// state for items that have never been reviewed. States are joined to
    /// the catalog by item id only; orphaned states are not included.
    pub fn catalog_states(&self) -> Fallible<Vec<ReviewState>> {
        let mut states = vec![];
        for item_id in self.catalog.item_ids()? {
            let state = match self.db.load(&item_id)? {
                Some(state) => state,
                None => ReviewState::new(item_id),
            };
            states.push(state);
        }
        Ok(states)
    }
}
