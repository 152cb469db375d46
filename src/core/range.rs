/*
 * SPDX-FileCopyrightText: 2020 Stalwart Labs LLC <hello@stalw.art>
 *
 * SPDX-License-Identifier: Apache-2.0 OR MIT
 */

use std::fmt;

use mail_parser::DateTime;

use crate::{matchers::date::in_range, DateRange};

impl DateRange {
    pub fn new(start: i64, end: i64) -> Self {
        DateRange { start, end }
    }

    /// Builds a range from two RFC 3339 timestamps.
    pub fn parse_rfc3339(start: &str, end: &str) -> Option<Self> {
        Some(DateRange {
            start: parse_rfc3339(start)?,
            end: parse_rfc3339(end)?,
        })
    }

    /// Returns `true` if `timestamp` lies strictly between both bounds.
    pub fn contains(&self, timestamp: i64) -> bool {
        in_range(timestamp, self.start, self.end)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {})",
            DateTime::from_timestamp(self.start).to_rfc3339(),
            DateTime::from_timestamp(self.end).to_rfc3339()
        )
    }
}

pub(crate) fn parse_rfc3339(value: &str) -> Option<i64> {
    DateTime::parse_rfc3339(value.trim()).map(|dt| dt.to_timestamp())
}
