// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

pub mod cache;
pub mod config;
pub mod episode;
pub mod error;
pub mod generate;
pub mod link;
pub mod probe;
pub mod progress;
pub mod render;
pub mod server;

// Re-export main types for convenience
pub use cache::{FeedCache, GeneratedFeed};
pub use config::{EpisodeConfig, EpisodeDerived, FeedConfig, GeneralConfig, load_config};
pub use error::{ConfigError, EnrichError, GenerateError, ProbeError, RenderError};
pub use generate::{GenerateOptions, generate_feed, generate_from_file, regenerate};
pub use probe::{AudioMetadata, DurationProbe, FfprobeProbe, mime_type_for, probe_audio};
pub use progress::{
    NoopReporter, ProgressEvent, ProgressReporter, SharedProgressReporter, TracingReporter,
};
pub use render::{render_feed, render_index};
pub use server::{FeedServer, ShutdownHandle};
