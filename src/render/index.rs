// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

use crate::config::FeedConfig;
use crate::error::RenderError;

use super::derived_values;

/// Render the HTML index page listing every episode
///
/// Titles and channel fields are escaped. Episode descriptions are inserted
/// as trusted HTML without escaping.
pub fn render_index(config: &FeedConfig) -> Result<String, RenderError> {
    let general = &config.general;
    let lang = if general.language.is_empty() {
        "en"
    } else {
        general.language.as_str()
    };

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n");
    html.push_str(&format!("<html lang=\"{}\">\n", attr(lang)));
    html.push_str("<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>{}</title>\n", text(&general.title)));
    html.push_str(&format!(
        "<link rel=\"alternate\" type=\"application/rss+xml\" title=\"{}\" href=\"/rss\">\n",
        attr(&general.title)
    ));
    html.push_str("<link rel=\"stylesheet\" href=\"/static/style.css\">\n");
    html.push_str("</head>\n<body>\n<header>\n");

    if let Some(image_url) = &general.image_url {
        html.push_str(&format!(
            "<img class=\"cover\" src=\"{}\" alt=\"{}\">\n",
            attr(image_url),
            attr(&general.image_title)
        ));
    }
    html.push_str(&format!("<h1>{}</h1>\n", text(&general.title)));
    if !general.description.is_empty() {
        html.push_str(&format!("<p>{}</p>\n", text(&general.description)));
    }
    html.push_str("<a class=\"feed\" href=\"/rss\">RSS</a>\n</header>\n<main>\n");

    for episode in &config.episodes {
        let derived = derived_values(episode)?;

        html.push_str("<article class=\"episode\">\n");
        html.push_str(&format!("<h2>{}</h2>\n", text(&episode.title)));
        html.push_str(&format!(
            "<time>{}</time>\n",
            text(&derived.pub_date_readable)
        ));
        html.push_str(&format!(
            "<div class=\"description\">{}</div>\n",
            derived.description_trusted
        ));
        html.push_str(&format!(
            "<audio controls preload=\"none\" src=\"{}\"></audio>\n",
            attr(&derived.link)
        ));
        html.push_str(&format!(
            "<a class=\"download\" href=\"{}\" download>Download</a>\n",
            attr(&derived.link)
        ));
        html.push_str("</article>\n");
    }

    html.push_str("</main>\n</body>\n</html>\n");
    Ok(html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::testing::{enriched_config, enriched_episode};

    #[test]
    fn render_index_lists_episodes_in_order() {
        let config = enriched_config(&["First", "Second"]);
        let html = render_index(&config).unwrap();

        assert_eq!(html.matches("<article class=\"episode\">").count(), 2);
        assert!(html.find("<h2>First</h2>").unwrap() < html.find("<h2>Second</h2>").unwrap());
        assert!(html.contains("<time>3. Jan 2023</time>"));
    }

    #[test]
    fn render_index_keeps_description_html() {
        let config = enriched_config(&["First"]);
        let html = render_index(&config).unwrap();

        assert!(html.contains("<div class=\"description\"><p>About <b>First</b></p></div>"));
    }

    #[test]
    fn render_index_escapes_titles() {
        let mut config = enriched_config(&[]);
        config.episodes.push(enriched_episode("Q&A <live>", 1));

        let html = render_index(&config).unwrap();
        assert!(html.contains("<h2>Q&amp;A &lt;live&gt;</h2>"));
    }

    #[test]
    fn render_index_rejects_unenriched_episode() {
        let mut config = enriched_config(&["First"]);
        config.episodes[0].derived = None;

        assert!(matches!(
            render_index(&config),
            Err(RenderError::MissingDerived { .. })
        ));
    }
}
