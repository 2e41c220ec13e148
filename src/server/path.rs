// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use percent_encoding::percent_decode_str;

/// Strip the query string from a request URL
pub fn url_path(url: &str) -> &str {
    url.split(['?', '#']).next().unwrap_or(url)
}

/// Resolve a URL path below `prefix` to a file inside `root`
///
/// Returns `None` for anything outside the root: `..` segments, symlinks
/// escaping it, directories and missing files.
pub fn resolve_path(path: &str, prefix: &str, root: &Path) -> Option<PathBuf> {
    let rest = path.strip_prefix(prefix)?;

    let decoded = percent_decode_str(rest)
        .decode_utf8()
        .map(Cow::into_owned)
        .ok()?;

    let relative = decoded.trim_matches('/');
    if relative.is_empty() || relative.split('/').any(|s| s == "..") {
        return None;
    }

    let canonical = root.join(relative).canonicalize().ok()?;
    let root_canonical = root.canonicalize().ok()?;

    (canonical.starts_with(&root_canonical) && canonical.is_file()).then_some(canonical)
}

/// Content type for a served file, guessed from its extension
pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js") => "text/javascript; charset=utf-8",
        Some("txt") => "text/plain; charset=utf-8",
        Some("json") => "application/json",
        Some("xml") => "application/xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("webp") => "image/webp",
        Some("mp3") => "audio/mpeg",
        Some("ogg") => "audio/ogg",
        Some("wav") => "audio/wav",
        Some("woff2") => "font/woff2",
        _ => "application/octet-stream",
    }
}
