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
use duecards_core::Quality;
use duecards_core::ReviewState;
use duecards_core::Timestamp;
use duecards_core::apply_review;
use duecards_core::fail;

use crate::collection::Collection;

/// Records a review of an item at the current time: loads the stored state
/// (or the initial state for a first review), applies the rating, and saves
/// the result.
pub fn rate_item(item: String, quality: String, directory: Option<String>) -> Fallible<()> {
    let item_id = ItemId::new(item)?;
    let quality = Quality::try_from(quality)?;
    let collection = Collection::new(directory)?;
    if !collection.contains(&item_id)? {
        return fail(format!("item '{item_id}' is not in any deck."));
    }
    let state = match collection.db.load(&item_id)? {
        Some(state) => state,
        None => ReviewState::new(item_id),
    };
    let updated = apply_review(&state, quality, Timestamp::now());
    collection.db.save(&updated)?;
    if let Some(next) = updated.next_review_at {
        println!(
            "{}: {} ({}/5). Next review in {} day(s), at {}.",
            updated.item_id,
            quality.as_str(),
            u8::from(quality),
            updated.interval_days,
            next
        );
    }
    Ok(())
}
