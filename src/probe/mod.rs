// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

mod duration;
mod mime;

pub use duration::{
    DEFAULT_FFPROBE, DurationProbe, FfprobeProbe, parse_duration_output, whole_seconds,
};
pub use mime::{UNKNOWN_MIME_TYPE, mime_type_for};

use std::path::Path;

use crate::error::EnrichError;

/// Everything the feed needs to know about an audio file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioMetadata {
    pub size_bytes: u64,
    pub mime_type: &'static str,
    pub duration_secs: u64,
}

/// Stat the audio file, classify it and probe its duration
///
/// The size check runs first, so a missing file is reported as an I/O
/// error rather than a probe failure.
pub async fn probe_audio<P: DurationProbe + ?Sized>(
    path: &Path,
    probe: &P,
) -> Result<AudioMetadata, EnrichError> {
    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|e| EnrichError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

    let mime_type = mime_type_for(path);
    let seconds = probe.probe_duration(path).await?;

    Ok(AudioMetadata {
        size_bytes: metadata.len(),
        mime_type,
        duration_secs: whole_seconds(seconds),
    })
}
