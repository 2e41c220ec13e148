// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::Path;

/// MIME type used for audio files with an unrecognised extension
pub const UNKNOWN_MIME_TYPE: &str = "?";

/// Classify an audio file by the extension of its name.
///
/// This is a best-effort lookup, the file content is never inspected.
pub fn mime_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/vnd.wav",
        Some("ogg") => "audio/ogg",
        _ => UNKNOWN_MIME_TYPE,
    }
}
