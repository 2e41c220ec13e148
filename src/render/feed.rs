// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use bytes::Bytes;
use rss::extension::itunes::{
    ITunesCategory, ITunesCategoryBuilder, ITunesChannelExtension, ITunesChannelExtensionBuilder,
    ITunesItemExtensionBuilder, ITunesOwnerBuilder,
};
use rss::{ChannelBuilder, EnclosureBuilder, GuidBuilder, ImageBuilder, Item, ItemBuilder};

use crate::config::{EpisodeConfig, FeedConfig, GeneralConfig};
use crate::error::RenderError;

use super::{derived_values, non_empty};

/// Render an enriched configuration into an RSS 2.0 document
///
/// Output is deterministic: the same config always yields the same bytes.
pub fn render_feed(config: &FeedConfig) -> Result<Bytes, RenderError> {
    let items = config
        .episodes
        .iter()
        .map(episode_to_item)
        .collect::<Result<Vec<_>, _>>()?;

    let general = &config.general;
    let link = channel_link(general);

    let image = general.image_url.as_ref().map(|url| {
        ImageBuilder::default()
            .url(url.clone())
            .title(general.image_title.clone())
            .link(link.clone())
            .build()
    });

    let channel = ChannelBuilder::default()
        .title(general.title.clone())
        .link(link)
        .description(general.description.clone())
        .language(non_empty(&general.language))
        .copyright(non_empty(&general.copyright))
        .image(image)
        .itunes_ext(Some(itunes_channel(general)))
        .items(items)
        .build();

    let xml = channel.pretty_write_to(Vec::new(), b' ', 2)?;
    Ok(Bytes::from(xml))
}

/// Channel link from the config, falling back to the site root
fn channel_link(general: &GeneralConfig) -> String {
    non_empty(&general.link).unwrap_or_else(|| general.site_url())
}

fn itunes_channel(general: &GeneralConfig) -> ITunesChannelExtension {
    let owner = (!general.itunes_author_name.is_empty() || !general.itunes_author_email.is_empty())
        .then(|| {
            ITunesOwnerBuilder::default()
                .name(non_empty(&general.itunes_author_name))
                .email(non_empty(&general.itunes_author_email))
                .build()
        });

    let categories: Vec<ITunesCategory> = non_empty(&general.itunes_category)
        .map(|text| {
            let subcategory = non_empty(&general.itunes_subcategory).map(|sub| {
                Box::new(ITunesCategoryBuilder::default().text(sub).build())
            });
            ITunesCategoryBuilder::default()
                .text(text)
                .subcategory(subcategory)
                .build()
        })
        .into_iter()
        .collect();

    ITunesChannelExtensionBuilder::default()
        .author(non_empty(&general.itunes_author))
        .r#type(non_empty(&general.itunes_type))
        .owner(owner)
        .explicit(non_empty(&general.itunes_explicit))
        .image(general.image_url.clone())
        .categories(categories)
        .build()
}

fn episode_to_item(episode: &EpisodeConfig) -> Result<Item, RenderError> {
    let derived = derived_values(episode)?;

    let enclosure = EnclosureBuilder::default()
        .url(derived.link.clone())
        .length(derived.file_size.clone())
        .mime_type(derived.mime_type.clone())
        .build();

    let guid = GuidBuilder::default()
        .value(derived.link.clone())
        .permalink(true)
        .build();

    let itunes = ITunesItemExtensionBuilder::default()
        .season(non_empty(&episode.itunes_season))
        .episode(non_empty(&episode.itunes_episode))
        .duration(Some(derived.duration.clone()))
        .build();

    Ok(ItemBuilder::default()
        .title(Some(episode.title.clone()))
        .link(Some(derived.link.clone()))
        .description(Some(derived.description_trusted.clone()))
        .enclosure(Some(enclosure))
        .guid(Some(guid))
        .pub_date(Some(derived.pub_date_rfc2822.clone()))
        .itunes_ext(Some(itunes))
        .build())
}
