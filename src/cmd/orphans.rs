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

use duecards_core::ContentCatalog;
use duecards_core::Fallible;
use duecards_core::ItemId;
use duecards_core::ProgressStore;
use duecards_core::ReviewState;

use crate::collection::Collection;

/// A progress record is an orphan when its item id no longer appears in any
/// deck file, usually because the item was removed or renamed.
fn orphan_states(collection: &Collection) -> Fallible<Vec<ReviewState>> {
    let catalog_ids: HashSet<ItemId> = collection.catalog.item_ids()?.into_iter().collect();
    Ok(collection
        .db
        .load_all()?
        .into_iter()
        .filter(|state| !catalog_ids.contains(&state.item_id))
        .collect())
}

/// Prints the ids of all orphan progress records.
pub fn list_orphans(directory: Option<String>) -> Fallible<()> {
    let collection = Collection::new(directory)?;
    let orphans = orphan_states(&collection)?;
    if orphans.is_empty() {
        println!("No orphan progress records.");
        return Ok(());
    }
    for state in orphans {
        println!("{}", state.item_id);
    }
    Ok(())
}

/// Removes all orphan progress records from the database.
pub fn delete_orphans(directory: Option<String>) -> Fallible<()> {
    let collection = Collection::new(directory)?;
    let orphans = orphan_states(&collection)?;
    for state in &orphans {
        collection.db.delete(&state.item_id)?;
    }
    println!("Deleted {} orphan progress record(s).", orphans.len());
    Ok(())
}
