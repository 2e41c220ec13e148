// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

mod feed;
mod index;

pub use feed::render_feed;
pub use index::render_index;

use crate::config::{EpisodeConfig, EpisodeDerived};
use crate::error::RenderError;

/// Derived values of an episode, or an error if it was never enriched
fn derived_values(episode: &EpisodeConfig) -> Result<&EpisodeDerived, RenderError> {
    episode
        .derived
        .as_ref()
        .ok_or_else(|| RenderError::MissingDerived {
            title: episode.title.clone(),
        })
}

/// `None` for empty config strings, so optional elements are left out
fn non_empty(value: &str) -> Option<String> {
    Some(value.to_string()).filter(|s| !s.is_empty())
}
