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

use duecards_core::Fallible;
use duecards_core::ItemId;
use duecards_core::ProgressStore;

use crate::collection::Collection;

/// Deletes the stored progress of one item, returning it to the never-
/// reviewed state. Works for orphaned records too.
pub fn reset_item(item: String, directory: Option<String>) -> Fallible<()> {
    let item_id = ItemId::new(item)?;
    let collection = Collection::new(directory)?;
    if collection.db.delete(&item_id)? {
        println!("Progress for {item_id} has been reset.");
    } else {
        println!("No progress recorded for {item_id}.");
    }
    Ok(())
}

/// Deletes the stored progress of the whole collection.
pub fn reset_all(directory: Option<String>) -> Fallible<()> {
    let collection = Collection::new(directory)?;
    collection.db.clear()?;
    println!("All progress has been reset.");
    Ok(())
}
