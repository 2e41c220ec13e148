// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

mod date;
mod enrich;

pub use date::{parse_pub_date, readable_date, rfc2822_date};
pub use enrich::{enrich_config, enrich_episode};
