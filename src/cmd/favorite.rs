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
use duecards_core::ReviewState;
use duecards_core::fail;

use crate::collection::Collection;

/// Sets or clears the favorite flag of an item. The scheduling fields are
/// left untouched.
pub fn favorite_item(item: String, unset: bool, directory: Option<String>) -> Fallible<()> {
    let item_id = ItemId::new(item)?;
    let collection = Collection::new(directory)?;
    if !collection.contains(&item_id)? {
        return fail(format!("item '{item_id}' is not in any deck."));
    }
    let mut state = match collection.db.load(&item_id)? {
        Some(state) => state,
        None => ReviewState::new(item_id),
    };
    state.is_favorite = !unset;
    collection.db.save(&state)?;
    if unset {
        println!("{} is no longer a favorite.", state.item_id);
    } else {
        println!("{} is now a favorite.", state.item_id);
    }
    Ok(())
}
