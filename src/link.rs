// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/// Join path segments with `/` the way a slash-separated path is cleaned.
///
/// Empty segments and `.` are dropped, `..` removes the previous segment.
/// Nothing is percent-encoded: reserved characters in file names end up in
/// the link verbatim.
pub fn join_path(segments: &[&str]) -> String {
    let mut parts: Vec<&str> = Vec::new();

    for part in segments.iter().flat_map(|s| s.split('/')) {
        match part {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            _ => parts.push(part),
        }
    }

    parts.join("/")
}

/// Build an absolute URL from a scheme and host/path segments
pub fn build_url(scheme: &str, segments: &[&str]) -> String {
    format!("{}://{}", scheme, join_path(segments))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_path_collapses_separators() {
        assert_eq!(
            join_path(&["example.org/", "/download", "audio/"]),
            "example.org/download/audio"
        );
    }

    #[test]
    fn join_path_resolves_dot_segments() {
        assert_eq!(join_path(&["a", "./b", "../c"]), "a/c");
    }

    #[test]
    fn build_url_does_not_escape() {
        assert_eq!(
            build_url("https", &["example.org", "download", "audio", "a b#1?.mp3"]),
            "https://example.org/download/audio/a b#1?.mp3"
        );
    }
}
