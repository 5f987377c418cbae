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
use std::fs::read_to_string;
use std::path::Path;
use std::path::PathBuf;

use log::debug;
use serde::Deserialize;
use walkdir::WalkDir;

use duecards_core::ContentCatalog;
use duecards_core::ErrorReport;
use duecards_core::Fallible;
use duecards_core::ItemId;
use duecards_core::fail;

use crate::config::CONFIG_FILE_NAME;

/// The on-disk form of a deck file.
#[derive(Deserialize)]
struct DeckFile {
    name: Option<String>,
    items: Vec<String>,
}

/// A named group of items declared by one deck file.
#[derive(Clone, Debug)]
pub struct Deck {
    pub name: String,
    pub items: Vec<ItemId>,
}

/// The decks of a collection, found by recursively scanning the collection
/// directory for `*.toml` files (the configuration file is skipped). Deck
/// order follows the sorted file paths so listings are stable.
#[derive(Clone, Debug)]
pub struct DeckCatalog {
    decks: Vec<Deck>,
}

impl DeckCatalog {
    pub fn scan(directory: &Path) -> Fallible<Self> {
        let mut paths: Vec<PathBuf> = vec![];
        for entry in WalkDir::new(directory) {
            let entry = entry.map_err(|e| {
                ErrorReport::new(format!("failed to scan collection directory: {e}"))
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("toml") {
                continue;
            }
            if entry.file_name().to_str() == Some(CONFIG_FILE_NAME) {
                continue;
            }
            paths.push(path.to_path_buf());
        }
        paths.sort();
        let mut decks = vec![];
        for path in paths {
            decks.push(load_deck(&path)?);
        }
        debug!(
            "found {} deck file(s) in {}",
            decks.len(),
            directory.display()
        );
        Ok(Self { decks })
    }

    pub fn decks(&self) -> &[Deck] {
        &self.decks
    }
}

impl ContentCatalog for DeckCatalog {
    fn item_ids(&self) -> Fallible<Vec<ItemId>> {
        let mut seen = HashSet::new();
        let mut ids = vec![];
        for deck in &self.decks {
            for id in &deck.items {
                if seen.insert(id.clone()) {
                    ids.push(id.clone());
                }
            }
        }
        Ok(ids)
    }
}

fn load_deck(path: &Path) -> Fallible<Deck> {
    let text = read_to_string(path)?;
    let file: DeckFile = toml::from_str(&text).map_err(|e| {
        ErrorReport::new(format!("failed to parse deck file {}: {e}", path.display()))
    })?;
    let name = match file.name {
        Some(name) => name,
        None => path
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_default(),
    };
    let mut items = vec![];
    for id in file.items {
        if id.trim().is_empty() {
            return fail(format!(
                "deck file {} contains a blank item id.",
                path.display()
            ));
        }
        items.push(ItemId::new(id)?);
    }
    Ok(Deck { name, items })
}
