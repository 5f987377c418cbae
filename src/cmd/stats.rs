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
use std::fmt::Display;
use std::fmt::Formatter;

use clap::ValueEnum;
use serde_json::json;

use duecards_core::ContentCatalog;
use duecards_core::Fallible;
use duecards_core::ItemId;
use duecards_core::ProgressStore;
use duecards_core::Timestamp;
use duecards_core::summarize;

use crate::collection::Collection;

#[derive(ValueEnum, Clone, Copy, PartialEq, Eq)]
pub enum StatsFormat {
    Table,
    Json,
}

impl Display for StatsFormat {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            StatsFormat::Table => write!(f, "table"),
            StatsFormat::Json => write!(f, "json"),
        }
    }
}

/// Prints progress statistics over the whole collection. Catalog items that
/// were never reviewed count at their initial state; orphaned progress
/// records are reported separately.
pub fn print_stats(directory: Option<String>, format: StatsFormat) -> Fallible<()> {
    let collection = Collection::new(directory)?;
    let catalog_ids = collection.catalog.item_ids()?;
    let stored = collection.db.load_all()?;
    let catalog_set: HashSet<&ItemId> = catalog_ids.iter().collect();
    let stored_set: HashSet<&ItemId> = stored.iter().map(|s| &s.item_id).collect();
    let untracked = catalog_ids
        .iter()
        .filter(|id| !stored_set.contains(id))
        .count();
    let orphans = stored
        .iter()
        .filter(|s| !catalog_set.contains(&s.item_id))
        .count();
    let states = collection.catalog_states()?;
    let summary = summarize(&states, &collection.config.mastery, Timestamp::now());
    match format {
        StatsFormat::Table => {
            println!("collection:     {}", collection.directory.display());
            println!("items:          {}", summary.tracked);
            println!("  never seen:   {untracked}");
            println!("  new:          {}", summary.new);
            println!("  learning:     {}", summary.learning);
            println!("  review:       {}", summary.review);
            println!("  mastered:     {}", summary.mastered);
            println!("due now:        {}", summary.due);
            println!("  overdue:      {}", summary.overdue);
            println!("favorites:      {}", summary.favorites);
            println!(
                "reviews:        {} ({} correct, {:.1}% accuracy)",
                summary.total_reviews,
                summary.total_correct,
                summary.accuracy() * 100.0
            );
            if orphans > 0 {
                println!("orphans:        {orphans} (see `duecards orphans list`)");
            }
        }
        StatsFormat::Json => {
            let value = json!({
                "items": summary.tracked,
                "untracked": untracked,
                "orphans": orphans,
                "new": summary.new,
                "learning": summary.learning,
                "review": summary.review,
                "mastered": summary.mastered,
                "due": summary.due,
                "overdue": summary.overdue,
                "favorites": summary.favorites,
                "total_reviews": summary.total_reviews,
                "total_correct": summary.total_correct,
                "accuracy": summary.accuracy(),
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }
    Ok(())
}
