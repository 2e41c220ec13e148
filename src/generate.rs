// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cache::{FeedCache, GeneratedFeed};
use crate::config::{FeedConfig, load_config};
use crate::episode::enrich_config;
use crate::error::GenerateError;
use crate::probe::DurationProbe;
use crate::progress::{ProgressEvent, SharedProgressReporter};
use crate::render::render_feed;

/// Audio directory used when nothing else is configured
pub const DEFAULT_AUDIO_DIR: &str = "static/download/audio";

/// Options for feed generation
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Directory holding one audio file per episode
    pub audio_dir: PathBuf,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            audio_dir: PathBuf::from(DEFAULT_AUDIO_DIR),
        }
    }
}

/// Enrich a loaded configuration and render it into a feed
///
/// Any failure aborts the whole pipeline: there is no partial feed.
pub async fn generate_feed<P: DurationProbe + ?Sized>(
    config: FeedConfig,
    options: &GenerateOptions,
    probe: &P,
    reporter: &SharedProgressReporter,
) -> Result<GeneratedFeed, GenerateError> {
    let config = enrich_config(config, &options.audio_dir, probe, reporter).await?;

    reporter.report(ProgressEvent::Rendering {
        episodes: config.episodes.len(),
    });

    let document = render_feed(&config)?;

    reporter.report(ProgressEvent::FeedGenerated {
        episodes: config.episodes.len(),
        bytes: document.len(),
    });

    Ok(GeneratedFeed { document, config })
}

/// Load the configuration file and generate a feed from it
pub async fn generate_from_file<P: DurationProbe + ?Sized>(
    config_path: &Path,
    options: &GenerateOptions,
    probe: &P,
    reporter: &SharedProgressReporter,
) -> Result<GeneratedFeed, GenerateError> {
    reporter.report(ProgressEvent::LoadingConfig {
        path: config_path.display().to_string(),
    });

    let config = load_config(config_path).await?;
    generate_feed(config, options, probe, reporter).await
}

/// Regenerate while serving, replacing the cached feed only on success
///
/// On failure the error is logged and returned, and the cache keeps
/// serving the previous feed.
pub async fn regenerate<P: DurationProbe + ?Sized>(
    cache: &FeedCache,
    config_path: &Path,
    options: &GenerateOptions,
    probe: &P,
    reporter: &SharedProgressReporter,
) -> Result<Arc<GeneratedFeed>, GenerateError> {
    match generate_from_file(config_path, options, probe, reporter).await {
        Ok(feed) => {
            cache.set(feed);
            tracing::info!(path = %config_path.display(), "feed regenerated");
            Ok(cache.get())
        }
        Err(e) => {
            tracing::error!(
                path = %config_path.display(),
                error = %e,
                "feed regeneration failed, keeping previous feed"
            );
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EnrichError;
    use crate::probe::testing::MockProbe;
    use crate::progress::NoopReporter;
    use tempfile::{TempDir, tempdir};

    const CONFIG: &str = r#"
[GeneralConfig]
URL = "example.org"
Method = "https"
Title = "Test Podcast"

[[Episode]]
EpisodeTitle = "Episode 1"
EpisodeDescription = "<p>First</p>"
Audio = "ep1.mp3"
PubDate = "3 Jan 2023"

[[Episode]]
EpisodeTitle = "Episode 2"
Audio = "ep2.ogg"
PubDate = "10 Feb 2023"
"#;

    /// Temp site with a config file and both audio files
    fn make_site() -> (TempDir, PathBuf, GenerateOptions) {
        let dir = tempdir().unwrap();
        let audio_dir = dir.path().join("audio");
        std::fs::create_dir_all(&audio_dir).unwrap();
        std::fs::write(audio_dir.join("ep1.mp3"), vec![0u8; 123456]).unwrap();
        std::fs::write(audio_dir.join("ep2.ogg"), vec![0u8; 10]).unwrap();

        let config_path = dir.path().join("config.toml");
        std::fs::write(&config_path, CONFIG).unwrap();

        (dir, config_path, GenerateOptions { audio_dir })
    }

    #[tokio::test]
    async fn generate_from_file_renders_all_episodes() {
        let (_dir, config_path, options) = make_site();

        let feed = generate_from_file(
            &config_path,
            &options,
            &MockProbe::new("185.23\n"),
            &NoopReporter::shared(),
        )
        .await
        .unwrap();

        let xml = String::from_utf8(feed.document.to_vec()).unwrap();
        assert_eq!(xml.matches("<item>").count(), 2);
        assert!(xml.contains("<itunes:duration>185</itunes:duration>"));

        let first = feed.config.episodes[0].derived.as_ref().unwrap();
        assert_eq!(first.file_size, "123456");
        assert_eq!(first.pub_date_readable, "3. Jan 2023");
    }

    #[tokio::test]
    async fn generate_from_file_missing_config_is_config_error() {
        let (dir, _config_path, options) = make_site();

        let result = generate_from_file(
            &dir.path().join("nonexistent.toml"),
            &options,
            &MockProbe::new("1"),
            &NoopReporter::shared(),
        )
        .await;

        assert!(matches!(result, Err(GenerateError::Config(_))));
    }

    #[tokio::test]
    async fn regenerate_swaps_cache_on_success() {
        let (_dir, config_path, options) = make_site();
        let cache = FeedCache::new(GeneratedFeed {
            document: bytes::Bytes::from_static(b"old"),
            config: FeedConfig::default(),
        });

        let feed = regenerate(
            &cache,
            &config_path,
            &options,
            &MockProbe::new("1"),
            &NoopReporter::shared(),
        )
        .await
        .unwrap();

        assert_eq!(feed.config.episodes.len(), 2);
        assert_eq!(cache.get().config.episodes.len(), 2);
        assert_ne!(cache.get().document, "old");
    }

    #[tokio::test]
    async fn regenerate_keeps_previous_feed_on_failure() {
        let (dir, config_path, options) = make_site();
        std::fs::remove_file(dir.path().join("audio").join("ep2.ogg")).unwrap();

        let cache = FeedCache::new(GeneratedFeed {
            document: bytes::Bytes::from_static(b"old"),
            config: FeedConfig::default(),
        });

        let result = regenerate(
            &cache,
            &config_path,
            &options,
            &MockProbe::new("1"),
            &NoopReporter::shared(),
        )
        .await;

        match result.unwrap_err() {
            GenerateError::Episode { title, source } => {
                assert_eq!(title, "Episode 2");
                assert!(matches!(source, EnrichError::Io { .. }));
            }
            other => panic!("Expected Episode error, got {other:?}"),
        }
        assert_eq!(cache.get().document, "old");
    }

    #[tokio::test]
    async fn regenerate_keeps_previous_feed_on_bad_date() {
        let (_dir, config_path, options) = make_site();
        std::fs::write(&config_path, CONFIG.replace("10 Feb 2023", "2023-02-10")).unwrap();

        let cache = FeedCache::new(GeneratedFeed {
            document: bytes::Bytes::from_static(b"old"),
            config: FeedConfig::default(),
        });

        let result = regenerate(
            &cache,
            &config_path,
            &options,
            &MockProbe::new("1"),
            &NoopReporter::shared(),
        )
        .await;

        assert!(matches!(
            result,
            Err(GenerateError::Episode {
                source: EnrichError::DateFormat { .. },
                ..
            })
        ));
        assert_eq!(cache.get().document, "old");
    }
}
