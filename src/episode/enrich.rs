// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::Path;

use crate::config::{EpisodeConfig, EpisodeDerived, FeedConfig, GeneralConfig};
use crate::error::{EnrichError, GenerateError};
use crate::probe::{DurationProbe, probe_audio};
use crate::progress::{ProgressEvent, SharedProgressReporter};

use super::date::{parse_pub_date, readable_date, rfc2822_date};

/// Compute all derived values for one episode
///
/// The audio file is resolved inside `audio_dir`. The description is carried
/// over verbatim: it is trusted HTML and is never sanitized.
pub async fn enrich_episode<P: DurationProbe + ?Sized>(
    general: &GeneralConfig,
    episode: &EpisodeConfig,
    audio_dir: &Path,
    probe: &P,
) -> Result<EpisodeDerived, EnrichError> {
    let link = general.download_url(&["audio", episode.audio.as_str()]);

    let audio = probe_audio(&audio_dir.join(&episode.audio), probe).await?;

    let pub_date = parse_pub_date(&episode.pub_date)?;

    Ok(EpisodeDerived {
        link,
        file_size: audio.size_bytes.to_string(),
        mime_type: audio.mime_type.to_string(),
        duration: audio.duration_secs.to_string(),
        description_trusted: episode.description.clone(),
        pub_date_readable: readable_date(pub_date),
        pub_date_rfc2822: rfc2822_date(pub_date),
    })
}

/// Enrich every episode in declaration order and derive the image URL
///
/// Stops at the first failing episode, so a partially enriched config is
/// never returned.
pub async fn enrich_config<P: DurationProbe + ?Sized>(
    mut config: FeedConfig,
    audio_dir: &Path,
    probe: &P,
    reporter: &SharedProgressReporter,
) -> Result<FeedConfig, GenerateError> {
    config.general.derive_image_url();

    let total_episodes = config.episodes.len();

    for (episode_index, episode) in config.episodes.iter_mut().enumerate() {
        reporter.report(ProgressEvent::EpisodeProbing {
            episode_title: episode.title.clone(),
            episode_index,
            total_episodes,
        });

        let derived = enrich_episode(&config.general, episode, audio_dir, probe)
            .await
            .map_err(|e| GenerateError::Episode {
                title: episode.title.clone(),
                source: e,
            })?;

        reporter.report(ProgressEvent::EpisodeEnriched {
            episode_title: episode.title.clone(),
            episode_index,
            duration: derived.duration.clone(),
        });

        episode.derived = Some(derived);
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::testing::MockProbe;
    use crate::progress::NoopReporter;
    use tempfile::tempdir;

    fn make_general() -> GeneralConfig {
        GeneralConfig {
            url: "example.org".to_string(),
            method: "https".to_string(),
            title: "Test Podcast".to_string(),
            ..Default::default()
        }
    }

    fn make_episode(title: &str, audio: &str, pub_date: &str) -> EpisodeConfig {
        EpisodeConfig {
            title: title.to_string(),
            description: "<p>Hello <b>world</b></p>".to_string(),
            audio: audio.to_string(),
            pub_date: pub_date.to_string(),
            itunes_season: "1".to_string(),
            itunes_episode: "2".to_string(),
            derived: None,
        }
    }

    #[tokio::test]
    async fn enrich_episode_fills_all_fields() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("ep1.mp3"), vec![0u8; 123456]).unwrap();

        let derived = enrich_episode(
            &make_general(),
            &make_episode("Episode 1", "ep1.mp3", "3 Jan 2023"),
            dir.path(),
            &MockProbe::new("185.23\n"),
        )
        .await
        .unwrap();

        assert_eq!(derived.link, "https://example.org/download/audio/ep1.mp3");
        assert_eq!(derived.file_size, "123456");
        assert_eq!(derived.mime_type, "audio/mpeg");
        assert_eq!(derived.duration, "185");
        assert_eq!(derived.description_trusted, "<p>Hello <b>world</b></p>");
        assert_eq!(derived.pub_date_readable, "3. Jan 2023");
    }

    #[tokio::test]
    async fn enrich_episode_does_not_escape_link() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("folge #1.ogg"), b"data").unwrap();

        let derived = enrich_episode(
            &make_general(),
            &make_episode("Episode 1", "folge #1.ogg", "3 Jan 2023"),
            dir.path(),
            &MockProbe::new("1"),
        )
        .await
        .unwrap();

        assert_eq!(derived.link, "https://example.org/download/audio/folge #1.ogg");
        assert_eq!(derived.mime_type, "audio/ogg");
    }

    #[tokio::test]
    async fn enrich_episode_rejects_bad_date() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("ep1.mp3"), b"data").unwrap();

        let result = enrich_episode(
            &make_general(),
            &make_episode("Episode 1", "ep1.mp3", "2023-01-03"),
            dir.path(),
            &MockProbe::new("1"),
        )
        .await;

        assert!(matches!(result, Err(EnrichError::DateFormat { .. })));
    }

    #[tokio::test]
    async fn enrich_episode_missing_audio_is_io_error() {
        let dir = tempdir().unwrap();

        let result = enrich_episode(
            &make_general(),
            &make_episode("Episode 1", "missing.mp3", "3 Jan 2023"),
            dir.path(),
            &MockProbe::new("1"),
        )
        .await;

        assert!(matches!(result, Err(EnrichError::Io { .. })));
    }

    #[tokio::test]
    async fn enrich_config_enriches_in_order() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("a.mp3"), b"aaaa").unwrap();
        std::fs::write(dir.path().join("b.wav"), b"bb").unwrap();

        let config = FeedConfig {
            general: make_general(),
            episodes: vec![
                make_episode("A", "a.mp3", "1 Mar 2023"),
                make_episode("B", "b.wav", "2 Mar 2023"),
            ],
        };

        let enriched = enrich_config(
            config,
            dir.path(),
            &MockProbe::new("60.9"),
            &NoopReporter::shared(),
        )
        .await
        .unwrap();

        assert_eq!(
            enriched.general.image_url.as_deref(),
            Some("https://example.org/download/image.jpg")
        );
        let sizes: Vec<_> = enriched
            .episodes
            .iter()
            .map(|e| e.derived.as_ref().unwrap().file_size.as_str())
            .collect();
        assert_eq!(sizes, vec!["4", "2"]);
        assert_eq!(
            enriched.episodes[1].derived.as_ref().unwrap().mime_type,
            "audio/vnd.wav"
        );
    }

    #[tokio::test]
    async fn enrich_config_fails_on_first_bad_episode() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("a.mp3"), b"aaaa").unwrap();

        let config = FeedConfig {
            general: make_general(),
            episodes: vec![
                make_episode("A", "a.mp3", "1 Mar 2023"),
                make_episode("B", "missing.mp3", "2 Mar 2023"),
            ],
        };

        let result = enrich_config(
            config,
            dir.path(),
            &MockProbe::new("60"),
            &NoopReporter::shared(),
        )
        .await;

        match result.unwrap_err() {
            GenerateError::Episode { title, source } => {
                assert_eq!(title, "B");
                assert!(matches!(source, EnrichError::Io { .. }));
            }
            other => panic!("Expected Episode error, got {other:?}"),
        }
    }
}
