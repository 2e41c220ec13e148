// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::Path;

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::ProbeError;

/// Default external probing tool
pub const DEFAULT_FFPROBE: &str = "ffprobe";

/// Duration lookup abstraction, so the subprocess can be swapped out
#[async_trait]
pub trait DurationProbe: Send + Sync {
    /// Container duration of the audio file in seconds
    async fn probe_duration(&self, path: &Path) -> Result<f64, ProbeError>;
}

/// Duration probe backed by an `ffprobe` subprocess
#[derive(Debug, Clone)]
pub struct FfprobeProbe {
    tool: String,
}

impl FfprobeProbe {
    /// Create a probe that runs `ffprobe` from `PATH`
    pub fn new() -> Self {
        Self::with_tool(DEFAULT_FFPROBE)
    }

    /// Create a probe that runs a specific executable
    pub fn with_tool(tool: impl Into<String>) -> Self {
        Self { tool: tool.into() }
    }

    pub fn tool(&self) -> &str {
        &self.tool
    }
}

impl Default for FfprobeProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DurationProbe for FfprobeProbe {
    async fn probe_duration(&self, path: &Path) -> Result<f64, ProbeError> {
        let output = Command::new(&self.tool)
            .arg("-i")
            .arg(path)
            .args(["-show_entries", "format=duration", "-v", "quiet", "-of", "csv=p=0"])
            .output()
            .await
            .map_err(|e| ProbeError::Spawn {
                tool: self.tool.clone(),
                path: path.to_path_buf(),
                source: e,
            })?;

        if !output.status.success() {
            return Err(ProbeError::Failed {
                tool: self.tool.clone(),
                path: path.to_path_buf(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        parse_duration_output(&String::from_utf8_lossy(&output.stdout), path)
    }
}

/// Parse the plain decimal seconds printed by the probe tool
pub fn parse_duration_output(output: &str, path: &Path) -> Result<f64, ProbeError> {
    let invalid = || ProbeError::InvalidOutput {
        path: path.to_path_buf(),
        output: output.to_string(),
    };

    let seconds: f64 = output.trim().parse().map_err(|_| invalid())?;
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(invalid());
    }

    Ok(seconds)
}

/// Truncate fractional seconds toward zero
pub fn whole_seconds(seconds: f64) -> u64 {
    seconds.trunc() as u64
}
