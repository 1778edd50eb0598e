// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

pub mod homopolymers;
pub mod overlap_index;

/// Deserialize a YAML or JSON file, chosen by extension (JSON unless `.yaml`/`.yml`).
pub fn read_config<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let path = path.as_ref();
    let reader = BufReader::new(
        File::open(path).with_context(|| format!("unable to open {}", path.display()))?,
    );
    let is_yaml = path
        .extension()
        .map_or(false, |ext| ext == "yaml" || ext == "yml");
    let value = if is_yaml {
        serde_yaml::from_reader(reader)
            .with_context(|| format!("invalid YAML in {}", path.display()))?
    } else {
        serde_json::from_reader(reader)
            .with_context(|| format!("invalid JSON in {}", path.display()))?
    };
    Ok(value)
}
