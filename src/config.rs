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

use std::fs::read_to_string;
use std::path::Path;

use log::debug;
use serde::Deserialize;

use duecards_core::ErrorReport;
use duecards_core::Fallible;
use duecards_core::MasteryThresholds;

/// Name of the optional configuration file in a collection directory.
pub const CONFIG_FILE_NAME: &str = "duecards.toml";

/// Collection-level configuration.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CollectionConfig {
    /// Overrides for the mastery classification cutoffs.
    #[serde(default)]
    pub mastery: MasteryThresholds,
}

impl CollectionConfig {
    /// Loads the configuration file from the given directory. A missing file
    /// means the defaults apply.
    pub fn load(directory: &Path) -> Fallible<Self> {
        let path = directory.join(CONFIG_FILE_NAME);
        if !path.is_file() {
            return Ok(Self::default());
        }
        let text = read_to_string(&path)?;
        let config: Self = toml::from_str(&text).map_err(|e| {
            ErrorReport::new(format!("failed to parse {CONFIG_FILE_NAME}: {e}"))
        })?;
        debug!("loaded configuration from {}", path.display());
        Ok(config)
    }
}
