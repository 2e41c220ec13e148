// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::sync::Arc;

use arc_swap::ArcSwap;
use bytes::Bytes;

use crate::config::FeedConfig;

/// A rendered feed together with the enriched config it came from
#[derive(Debug, Clone)]
pub struct GeneratedFeed {
    /// The RSS document
    pub document: Bytes,
    pub config: FeedConfig,
}

/// Holds the current feed for the serving layer
///
/// Readers get a snapshot `Arc`; `set` swaps the pointer atomically, so a
/// reader sees either the old or the new feed, never a mix.
#[derive(Debug)]
pub struct FeedCache {
    current: ArcSwap<GeneratedFeed>,
}

impl FeedCache {
    /// Create a cache holding an initial feed
    pub fn new(feed: GeneratedFeed) -> Self {
        Self {
            current: ArcSwap::from_pointee(feed),
        }
    }

    /// Current feed snapshot
    pub fn get(&self) -> Arc<GeneratedFeed> {
        self.current.load_full()
    }

    /// Replace the current feed
    pub fn set(&self, feed: GeneratedFeed) {
        self.current.store(Arc::new(feed));
    }
}
