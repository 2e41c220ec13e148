// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::Path;

use crate::error::ConfigError;

use super::model::FeedConfig;

/// Parse feed configuration from TOML text
///
/// Missing sections and keys are not an error, they default to empty values.
pub fn parse_config(text: &str) -> Result<FeedConfig, toml::de::Error> {
    toml::from_str(text)
}

/// Read and parse the feed configuration file
pub async fn load_config(path: &Path) -> Result<FeedConfig, ConfigError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

    parse_config(&text).map_err(|e| ConfigError::ParseFailed {
        path: path.to_path_buf(),
        source: e,
    })
}
