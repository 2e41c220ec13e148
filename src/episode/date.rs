// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chrono::{NaiveDate, NaiveTime};

use crate::error::EnrichError;

/// Format of the `PubDate` config value, e.g. `3 Jan 2023`
const PUB_DATE_FORMAT: &str = "%d %b %Y";

/// Format shown on the index page, e.g. `3. Jan 2023`
const READABLE_FORMAT: &str = "%-d. %b %Y";

/// Parse a configured publish date of the form `D Mon YYYY`
///
/// The day may have one or two digits, the month must be a three-letter
/// English abbreviation and the year must have exactly four digits.
pub fn parse_pub_date(date: &str) -> Result<NaiveDate, EnrichError> {
    let invalid = |reason: &str| EnrichError::DateFormat {
        date: date.to_string(),
        reason: reason.to_string(),
    };

    let parts: Vec<&str> = date.split(' ').collect();
    let [day, month, year] = parts.as_slice() else {
        return Err(invalid("expected 'D Mon YYYY'"));
    };

    if day.is_empty() || day.len() > 2 || !day.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid("day must have one or two digits"));
    }
    if month.len() != 3 {
        return Err(invalid("month must be a three-letter abbreviation"));
    }
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid("year must have four digits"));
    }

    NaiveDate::parse_from_str(date, PUB_DATE_FORMAT).map_err(|e| invalid(&e.to_string()))
}

/// Human-readable display form of a publish date
pub fn readable_date(date: NaiveDate) -> String {
    date.format(READABLE_FORMAT).to_string()
}

/// RFC 2822 form at midnight UTC, as RSS `<pubDate>` requires
pub fn rfc2822_date(date: NaiveDate) -> String {
    date.and_time(NaiveTime::MIN).and_utc().to_rfc2822()
}
