// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde::Deserialize;

use crate::link::build_url;

/// Complete feed configuration: channel metadata plus the ordered episode list
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    #[serde(rename = "GeneralConfig")]
    pub general: GeneralConfig,
    /// Episodes in declaration order, which is also the feed item order
    #[serde(rename = "Episode")]
    pub episodes: Vec<EpisodeConfig>,
}

/// Channel-level metadata from the `[GeneralConfig]` section
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Host plus optional base path, without a scheme
    #[serde(rename = "URL")]
    pub url: String,
    /// Delivery scheme, e.g. `https`
    #[serde(rename = "Method")]
    pub method: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Link")]
    pub link: String,
    #[serde(rename = "ImageTitle")]
    pub image_title: String,
    #[serde(rename = "Copyright")]
    pub copyright: String,
    #[serde(rename = "Language")]
    pub language: String,
    #[serde(rename = "ITunesAuthor")]
    pub itunes_author: String,
    #[serde(rename = "ITunesType")]
    pub itunes_type: String,
    #[serde(rename = "ITunesAuthorName")]
    pub itunes_author_name: String,
    #[serde(rename = "ITunesAuthorEmail")]
    pub itunes_author_email: String,
    #[serde(rename = "ITunesExplicit")]
    pub itunes_explicit: String,
    #[serde(rename = "ITunesCategory")]
    pub itunes_category: String,
    #[serde(rename = "ITunesSubcategory")]
    pub itunes_subcategory: String,

    /// Absolute image URL, set by [`GeneralConfig::derive_image_url`]
    #[serde(skip)]
    pub image_url: Option<String>,
}

impl GeneralConfig {
    /// Absolute URL of the site root
    pub fn site_url(&self) -> String {
        build_url(&self.method, &[self.url.as_str()])
    }

    /// Absolute URL of a file served below `/download`
    pub fn download_url(&self, segments: &[&str]) -> String {
        let mut parts = vec![self.url.as_str(), "download"];
        parts.extend_from_slice(segments);
        build_url(&self.method, &parts)
    }

    /// Compute and store the channel image URL
    pub fn derive_image_url(&mut self) -> &str {
        let url = self.download_url(&["image.jpg"]);
        self.image_url.insert(url)
    }
}

/// A single `[[Episode]]` entry
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EpisodeConfig {
    #[serde(rename = "EpisodeTitle")]
    pub title: String,
    /// Raw description, may embed HTML markup
    #[serde(rename = "EpisodeDescription")]
    pub description: String,
    /// Audio file name inside the audio directory
    #[serde(rename = "Audio")]
    pub audio: String,
    /// Publish date in the form `3 Jan 2023`
    #[serde(rename = "PubDate")]
    pub pub_date: String,
    #[serde(rename = "ITunesSeason")]
    pub itunes_season: String,
    #[serde(rename = "ITunesEpisode")]
    pub itunes_episode: String,

    /// Values computed by the enricher, never read from the config file
    #[serde(skip)]
    pub derived: Option<EpisodeDerived>,
}

/// Values computed for an episode from its audio file and configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeDerived {
    /// Absolute download link for the audio file
    pub link: String,
    /// File size in bytes as a decimal string
    pub file_size: String,
    pub mime_type: String,
    /// Duration in whole seconds as a decimal string
    pub duration: String,
    /// The raw description, rendered without escaping.
    ///
    /// Feed authors are trusted: this value is never sanitized.
    pub description_trusted: String,
    /// Publish date for humans, e.g. `3. Jan 2023`
    pub pub_date_readable: String,
    /// Publish date in RFC 2822 form for `<pubDate>`
    pub pub_date_rfc2822: String,
}
