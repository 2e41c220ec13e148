// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP server for the feed, the index page and static files.

mod path;
mod response;

pub use path::{content_type_for, resolve_path, url_path};
pub use response::parse_range;

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

use anyhow::{Result, anyhow};
use tiny_http::{Method, Request, Server};

use crate::cache::FeedCache;
use crate::render::render_index;

/// Bound server ready to accept requests
pub struct FeedServer {
    server: Arc<Server>,
    addr: SocketAddr,
    workers: usize,
    cache: Arc<FeedCache>,
    static_dir: PathBuf,
}

impl FeedServer {
    /// Bind the listening socket
    ///
    /// Requests are served from `static_dir` (under `/static/`) and its
    /// `download` subdirectory (under `/download/`).
    pub fn bind(
        addr: SocketAddr,
        workers: usize,
        cache: Arc<FeedCache>,
        static_dir: PathBuf,
    ) -> Result<Self> {
        let server =
            Server::http(addr).map_err(|e| anyhow!("Failed to bind HTTP server on {addr}: {e}"))?;
        let addr = server.server_addr().to_ip().unwrap_or(addr);

        Ok(Self {
            server: Arc::new(server),
            addr,
            workers: workers.max(1),
            cache,
            static_dir,
        })
    }

    /// Get the bound address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            server: Arc::clone(&self.server),
            workers: self.workers,
        }
    }

    /// Serve requests on the worker threads until shut down (blocking)
    pub fn run(self) -> Result<()> {
        tracing::info!(addr = %self.addr, workers = self.workers, "serving feed");

        let handles: Vec<_> = (0..self.workers)
            .map(|worker| {
                let server = Arc::clone(&self.server);
                let cache = Arc::clone(&self.cache);
                let static_dir = self.static_dir.clone();

                thread::Builder::new()
                    .name(format!("http-{worker}"))
                    .spawn(move || {
                        for request in server.incoming_requests() {
                            let url = request.url().to_string();
                            if let Err(e) = handle_request(request, &cache, &static_dir) {
                                tracing::warn!(%url, error = %e, "request failed");
                            }
                        }
                    })
            })
            .collect::<Result<_, _>>()?;

        for handle in handles {
            handle
                .join()
                .map_err(|_| anyhow!("HTTP worker thread panicked"))?;
        }
        Ok(())
    }
}

/// Handle that stops a running [`FeedServer`]
#[derive(Clone)]
pub struct ShutdownHandle {
    server: Arc<Server>,
    workers: usize,
}

impl ShutdownHandle {
    /// Unblock every worker waiting for a request, making `run` return
    pub fn shutdown(&self) {
        for _ in 0..self.workers {
            self.server.unblock();
        }
    }
}

/// Route a single request
fn handle_request(request: Request, cache: &FeedCache, static_dir: &Path) -> Result<()> {
    if !matches!(request.method(), Method::Get | Method::Head) {
        return response::respond_method_not_allowed(request);
    }

    let path = url_path(request.url()).to_string();
    tracing::debug!(method = %request.method(), %path, "request");

    match path.as_str() {
        "/rss" => {
            let feed = cache.get();
            response::send_body(request, 200, response::RSS, &feed.document)
        }
        "/" => {
            let feed = cache.get();
            match render_index(&feed.config) {
                Ok(html) => response::send_body(request, 200, response::HTML, html.as_bytes()),
                Err(e) => {
                    tracing::error!(error = %e, "failed to render index page");
                    response::respond_error(request)
                }
            }
        }
        _ => {
            let download_dir = static_dir.join("download");
            let file = resolve_path(&path, "/download/", &download_dir)
                .or_else(|| resolve_path(&path, "/static/", static_dir));

            match file {
                Some(file) => response::respond_file(request, &file),
                None => response::respond_not_found(request),
            }
        }
    }
}
