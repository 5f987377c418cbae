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
use duecards_core::MasteryLevel;
use duecards_core::Timestamp;
use duecards_core::filter_by_mastery;
use duecards_core::most_overdue_first;
use duecards_core::select_due;
use duecards_core::select_due_sorted;

use crate::collection::Collection;

/// Prints the ids of the items due for review, one per line. Items that were
/// never reviewed are due immediately.
pub fn list_due(
    directory: Option<String>,
    overdue_first: bool,
    mastery: Option<String>,
) -> Fallible<()> {
    let mastery = mastery.map(MasteryLevel::try_from).transpose()?;
    let collection = Collection::new(directory)?;
    let now = Timestamp::now();
    let states = collection.catalog_states()?;
    let due = if overdue_first {
        select_due_sorted(&states, now, most_overdue_first)
    } else {
        select_due(&states, now)
    };
    let due = match mastery {
        Some(level) => filter_by_mastery(&due, &collection.config.mastery, level),
        None => due,
    };
    if due.is_empty() {
        println!("No items due.");
        return Ok(());
    }
    for state in due {
        println!("{}", state.item_id);
    }
    Ok(())
}
