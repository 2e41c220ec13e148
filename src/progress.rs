// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::sync::Arc;

/// Events emitted during feed generation for progress reporting
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Configuration file is being read
    LoadingConfig { path: String },

    /// An episode's audio file is about to be probed
    EpisodeProbing {
        episode_title: String,
        /// Index of this episode in declaration order
        episode_index: usize,
        total_episodes: usize,
    },

    /// All derived values of an episode are known
    EpisodeEnriched {
        episode_title: String,
        episode_index: usize,
        /// Duration in whole seconds as stored in the feed
        duration: String,
    },

    /// The enriched configuration is being rendered
    Rendering { episodes: usize },

    /// Generation completed successfully
    FeedGenerated { episodes: usize, bytes: usize },
}

/// Trait for reporting progress events during feed generation.
///
/// Implementations can use this to display spinners, log messages,
/// or collect statistics.
pub trait ProgressReporter: Send + Sync {
    /// Report a progress event
    fn report(&self, event: ProgressEvent);
}

/// A shared reference to a progress reporter
pub type SharedProgressReporter = Arc<dyn ProgressReporter>;

/// A no-op progress reporter that silently ignores all events.
/// Useful for tests or quiet mode.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn report(&self, _event: ProgressEvent) {
        // Intentionally empty
    }
}

impl NoopReporter {
    /// Create a new NoopReporter wrapped in an Arc
    pub fn shared() -> SharedProgressReporter {
        Arc::new(Self)
    }
}

/// Reporter that forwards events to `tracing`, used once the server runs
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl ProgressReporter for TracingReporter {
    fn report(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::LoadingConfig { path } => {
                tracing::info!(%path, "loading feed configuration");
            }
            ProgressEvent::EpisodeProbing {
                episode_title,
                episode_index,
                total_episodes,
            } => {
                tracing::debug!(
                    episode = %episode_title,
                    "probing episode {}/{}",
                    episode_index + 1,
                    total_episodes
                );
            }
            ProgressEvent::EpisodeEnriched {
                episode_title,
                duration,
                ..
            } => {
                tracing::debug!(
                    episode = %episode_title,
                    %duration,
                    "episode enriched"
                );
            }
            ProgressEvent::Rendering { episodes } => {
                tracing::debug!(episodes, "rendering feed");
            }
            ProgressEvent::FeedGenerated { episodes, bytes } => {
                tracing::info!(episodes, bytes, "feed generated");
            }
        }
    }
}

impl TracingReporter {
    /// Create a new TracingReporter wrapped in an Arc
    pub fn shared() -> SharedProgressReporter {
        Arc::new(Self)
    }
}
