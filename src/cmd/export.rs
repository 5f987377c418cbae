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

use std::fs::write;

use duecards_core::Fallible;
use duecards_core::ProgressStore;

use crate::collection::Collection;

/// Exports all stored review states as pretty-printed JSON, to stdout or to
/// a file.
pub fn export_progress(directory: Option<String>, output: Option<String>) -> Fallible<()> {
    let collection = Collection::new(directory)?;
    let states = collection.db.load_all()?;
    let json = serde_json::to_string_pretty(&states)?;
    match output {
        Some(path) => {
            write(&path, json)?;
            println!("Exported {} state(s) to {}.", states.len(), path);
        }
        None => println!("{json}"),
    }
    Ok(())
}
