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

use clap::Parser;
use clap::Subcommand;

use duecards_core::Fallible;

use crate::cmd::check::check_collection;
use crate::cmd::due::list_due;
use crate::cmd::export::export_progress;
use crate::cmd::favorite::favorite_item;
use crate::cmd::orphans::delete_orphans;
use crate::cmd::orphans::list_orphans;
use crate::cmd::rate::rate_item;
use crate::cmd::reset::reset_all;
use crate::cmd::reset::reset_item;
use crate::cmd::stats::StatsFormat;
use crate::cmd::stats::print_stats;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// List the items that are due for review.
    Due {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Sort the listing with the longest-waiting items first.
        #[arg(long)]
        overdue_first: bool,
        /// Only list items at this mastery level: new, learning, review, or mastered.
        #[arg(long)]
        mastery: Option<String>,
    },
    /// Record a review of an item.
    Rate {
        /// The id of the item to rate.
        item: String,
        /// The quality of the recall, from 0 to 5, by name or number.
        quality: String,
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
    },
    /// Mark an item as a favorite.
    Favorite {
        /// The id of the item.
        item: String,
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Remove the favorite flag instead of setting it.
        #[arg(long)]
        unset: bool,
    },
    /// Print collection statistics.
    Stats {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Which output format to use.
        #[arg(long, default_value_t = StatsFormat::Table)]
        format: StatsFormat,
    },
    /// Check the integrity of a collection.
    Check {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
    },
    /// Commands relating to orphan progress records.
    Orphans {
        #[command(subcommand)]
        command: OrphanCommand,
    },
    /// Export the review progress of a collection.
    Export {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Optional path to the output file. By default, the output is printed to stdout.
        #[arg(long)]
        output: Option<String>,
    },
    /// Commands for resetting review progress.
    Reset {
        #[command(subcommand)]
        command: ResetCommand,
    },
}

#[derive(Subcommand)]
enum OrphanCommand {
    /// List the ids of all orphan progress records in the collection.
    List {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
    },
    /// Remove all orphan progress records from the database.
    Delete {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
    },
}

#[derive(Subcommand)]
enum ResetCommand {
    /// Reset the progress of a single item.
    Item {
        /// The id of the item.
        item: String,
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
    },
    /// Reset the progress of every item in the collection.
    All {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
    },
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Due {
            directory,
            overdue_first,
            mastery,
        } => list_due(directory, overdue_first, mastery),
        Command::Rate {
            item,
            quality,
            directory,
        } => rate_item(item, quality, directory),
        Command::Favorite {
            item,
            directory,
            unset,
        } => favorite_item(item, unset, directory),
        Command::Stats { directory, format } => print_stats(directory, format),
        Command::Check { directory } => check_collection(directory),
        Command::Orphans { command } => match command {
            OrphanCommand::List { directory } => list_orphans(directory),
            OrphanCommand::Delete { directory } => delete_orphans(directory),
        },
        Command::Export { directory, output } => export_progress(directory, output),
        Command::Reset { command } => match command {
            ResetCommand::Item { item, directory } => reset_item(item, directory),
            ResetCommand::All { directory } => reset_all(directory),
        },
    }
}
