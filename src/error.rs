// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Errors that can occur when loading the feed configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Errors that can occur when probing an audio file's duration
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("Failed to run {tool} on {path}: {source}, do you have ffmpeg installed?")]
    Spawn {
        tool: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} exited with {status} for {path}: {stderr}")]
    Failed {
        tool: String,
        path: PathBuf,
        status: ExitStatus,
        stderr: String,
    },

    #[error("Unparsable duration '{output}' for {path}")]
    InvalidOutput { path: PathBuf, output: String },
}

/// Errors that can occur while enriching a single episode
#[derive(Error, Debug)]
pub enum EnrichError {
    #[error("Failed to read audio file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Probe error: {0}")]
    Probe(#[from] ProbeError),

    #[error("Failed to parse date '{date}': {reason}")]
    DateFormat { date: String, reason: String },
}

/// Errors that can occur when rendering the feed or index page
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Episode '{title}' has no generated values, it was never enriched")]
    MissingDerived { title: String },

    #[error("Failed to write RSS document: {0}")]
    Write(#[from] rss::Error),
}

/// Top-level errors for feed generation
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Episode '{title}': {source}")]
    Episode {
        title: String,
        #[source]
        source: EnrichError,
    },

    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}
