// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP response helpers.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use tiny_http::{Header, Request, Response, StatusCode};

use super::path::content_type_for;

pub const RSS: &str = "application/rss+xml";
pub const HTML: &str = "text/html; charset=utf-8";
pub const PLAIN: &str = "text/plain; charset=utf-8";

fn make_header(key: &str, value: &str) -> Result<Header> {
    Header::from_bytes(key.as_bytes(), value.as_bytes())
        .map_err(|()| anyhow!("invalid header {key}: {value}"))
}

/// Respond with an in-memory body
pub fn send_body(request: Request, status: u16, content_type: &str, body: &[u8]) -> Result<()> {
    let response = Response::from_data(body)
        .with_status_code(StatusCode(status))
        .with_header(make_header("Content-Type", content_type)?);
    request.respond(response)?;
    Ok(())
}

pub fn respond_not_found(request: Request) -> Result<()> {
    send_body(request, 404, PLAIN, b"404 Not Found")
}

pub fn respond_method_not_allowed(request: Request) -> Result<()> {
    let response = Response::from_data(&b"405 Method Not Allowed"[..])
        .with_status_code(StatusCode(405))
        .with_header(make_header("Content-Type", PLAIN)?)
        .with_header(make_header("Allow", "GET, HEAD")?);
    request.respond(response)?;
    Ok(())
}

pub fn respond_error(request: Request) -> Result<()> {
    send_body(request, 500, PLAIN, b"500 Internal Server Error")
}

/// Respond with a file from disk, honouring a single `Range` header
pub fn respond_file(request: Request, path: &Path) -> Result<()> {
    let content_type = content_type_for(path);
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let file_size = file.metadata()?.len();

    if let Some(range) = range_header(&request) {
        return match parse_range(&range, file_size) {
            Some((start, end)) => respond_range(request, file, content_type, start, end, file_size),
            None => {
                let response = Response::empty(StatusCode(416))
                    .with_header(make_header("Content-Range", &format!("bytes */{file_size}"))?);
                request.respond(response)?;
                Ok(())
            }
        };
    }

    let response = Response::from_file(file)
        .with_header(make_header("Content-Type", content_type)?)
        .with_header(make_header("Accept-Ranges", "bytes")?);
    request.respond(response)?;
    Ok(())
}

fn respond_range(
    request: Request,
    mut file: File,
    content_type: &str,
    start: u64,
    end: u64,
    file_size: u64,
) -> Result<()> {
    let length = end - start + 1;
    file.seek(SeekFrom::Start(start))?;

    let response = Response::new(
        StatusCode(206),
        vec![
            make_header("Content-Type", content_type)?,
            make_header("Content-Range", &format!("bytes {start}-{end}/{file_size}"))?,
            make_header("Accept-Ranges", "bytes")?,
        ],
        file.take(length),
        Some(usize::try_from(length)?),
        None,
    );
    request.respond(response)?;
    Ok(())
}

fn range_header(request: &Request) -> Option<String> {
    request
        .headers()
        .iter()
        .find(|h| h.field.equiv("Range"))
        .map(|h| h.value.to_string())
}

/// Parse `bytes=start-end` into an inclusive byte range within the file
///
/// Only single ranges are supported. Returns `None` when the range cannot
/// be satisfied.
pub fn parse_range(header: &str, file_size: u64) -> Option<(u64, u64)> {
    let ranges = header.trim().strip_prefix("bytes=")?;
    if ranges.contains(',') || file_size == 0 {
        return None;
    }

    let (start, end) = ranges.split_once('-')?;
    let (start, end) = match (start.trim(), end.trim()) {
        ("", "") => return None,
        ("", suffix) => {
            let suffix: u64 = suffix.parse().ok()?;
            if suffix == 0 {
                return None;
            }
            (file_size.saturating_sub(suffix), file_size - 1)
        }
        (start, "") => (start.parse().ok()?, file_size - 1),
        (start, end) => {
            let end: u64 = end.parse().ok()?;
            (start.parse().ok()?, end.min(file_size - 1))
        }
    };

    (start <= end && start < file_size).then_some((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_range_specific() {
        assert_eq!(parse_range("bytes=0-499", 1000), Some((0, 499)));
        assert_eq!(parse_range("bytes=500-5000", 1000), Some((500, 999)));
    }

    #[test]
    fn parse_range_open_and_suffix() {
        assert_eq!(parse_range("bytes=100-", 1000), Some((100, 999)));
        assert_eq!(parse_range("bytes=-200", 1000), Some((800, 999)));
        assert_eq!(parse_range("bytes=-2000", 1000), Some((0, 999)));
    }

    #[test]
    fn parse_range_rejects_unsatisfiable() {
        assert_eq!(parse_range("bytes=1000-", 1000), None);
        assert_eq!(parse_range("bytes=500-100", 1000), None);
        assert_eq!(parse_range("bytes=0-1,5-6", 1000), None);
        assert_eq!(parse_range("bytes=-0", 1000), None);
        assert_eq!(parse_range("items=0-1", 1000), None);
        assert_eq!(parse_range("bytes=0-", 0), None);
    }
}
