/*
 * SPDX-FileCopyrightText: 2020 Stalwart Labs LLC <hello@stalw.art>
 *
 * SPDX-License-Identifier: Apache-2.0 OR MIT
 */

use std::path::PathBuf;

use crate::{DateRange, Error, Layout, Mode, ParsedMessage, Result, SearchConfig};

use super::{mode::parse_bool, range::parse_rfc3339};

pub const TARGETS_VAR: &str = "MAILBOX_SEARCH_TARGETS";
pub const MODE_VAR: &str = "MAILBOX_SEARCH_MODE";
pub const IS_SENT_VAR: &str = "MAILBOX_SEARCH_IS_SENT";
pub const DOMAIN_VAR: &str = "MAILBOX_SEARCH_DOMAIN";
pub const START_DATE_VAR: &str = "MAILBOX_SEARCH_START_DATE";
pub const END_DATE_VAR: &str = "MAILBOX_SEARCH_END_DATE";

impl SearchConfig {
    /// Creates a configuration scanning flat directories in listing order.
    pub fn new(
        targets: Vec<String>,
        domain: impl Into<String>,
        range: DateRange,
        mode: Mode,
    ) -> Self {
        SearchConfig {
            targets,
            domain: domain.into(),
            range,
            mode,
            layout: Layout::Flat,
            sorted: false,
            directories: Vec::new(),
        }
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Visit the files of each directory in file name order.
    pub fn with_sorted(mut self, sorted: bool) -> Self {
        self.sorted = sorted;
        self
    }

    pub fn with_directories(mut self, directories: impl IntoIterator<Item = PathBuf>) -> Self {
        self.directories = directories.into_iter().collect();
        self
    }

    /// Evaluates the configured mode against a parsed message.
    pub fn matches(&self, message: &ParsedMessage) -> bool {
        self.mode
            .matches(message, &self.targets, &self.domain, &self.range)
    }
}

/// Unvalidated configuration values, as read from flags or the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigValues {
    pub targets: Option<String>,
    pub mode: Option<String>,
    pub is_sent: Option<String>,
    pub domain: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl ConfigValues {
    /// Validates every value and builds the run configuration.
    ///
    /// Values are checked in a fixed order (targets, mode, domain, start date,
    /// end date) and the first problem found is returned.
    pub fn into_config(self) -> Result<SearchConfig> {
        let targets = parse_targets(&require(TARGETS_VAR, self.targets)?);
        let mode = resolve_mode(self.mode.as_deref(), self.is_sent.as_deref())?;
        let domain = require(DOMAIN_VAR, self.domain)?;
        let start = parse_date(START_DATE_VAR, require(START_DATE_VAR, self.start_date)?)?;
        let end = parse_date(END_DATE_VAR, require(END_DATE_VAR, self.end_date)?)?;

        Ok(SearchConfig::new(
            targets,
            domain,
            DateRange::new(start, end),
            mode,
        ))
    }
}

/// Splits a comma separated target list, dropping blank entries.
pub fn parse_targets(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|target| !target.is_empty())
        .map(String::from)
        .collect()
}

/// An explicit mode name wins over the legacy `IS_SENT` switch.
pub fn resolve_mode(mode: Option<&str>, is_sent: Option<&str>) -> Result<Mode> {
    match (non_empty(mode), non_empty(is_sent)) {
        (Some(mode), _) => mode.parse(),
        (None, Some(is_sent)) => parse_bool(is_sent)
            .map(Mode::from_sent_flag)
            .ok_or_else(|| Error::InvalidBool {
                var: IS_SENT_VAR,
                value: is_sent.to_string(),
            }),
        (None, None) => Err(Error::MissingConfig { var: MODE_VAR }),
    }
}

fn require(var: &'static str, value: Option<String>) -> Result<String> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(Error::MissingConfig { var }),
    }
}

fn parse_date(var: &'static str, value: String) -> Result<i64> {
    parse_rfc3339(&value).ok_or(Error::InvalidDate { var, value })
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}
