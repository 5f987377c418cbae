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
use duecards_core::ProgressStore;
use duecards_core::fail;

use crate::collection::Collection;

/// Checks every stored review state against the scheduling invariants.
/// Violations are printed one per line, and any violation makes the command
/// fail.
pub fn check_collection(directory: Option<String>) -> Fallible<()> {
    let collection = Collection::new(directory)?;
    let states = collection.db.load_all()?;
    let mut violations = 0;
    for state in &states {
        for violation in state.check_invariants() {
            println!("{}: {}", state.item_id, violation);
            violations += 1;
        }
    }
    if violations > 0 {
        return fail(format!("{violations} invariant violation(s) found."));
    }
    println!(
        "OK: {} stored state(s) checked in {}.",
        states.len(),
        collection.directory.display()
    );
    Ok(())
}
