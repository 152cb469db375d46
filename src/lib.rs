/*
 * SPDX-FileCopyrightText: 2020 Stalwart Labs LLC <hello@stalw.art>
 *
 * SPDX-License-Identifier: Apache-2.0 OR MIT
 */

//! # mailbox-search
//!
//! _mailbox-search_ scans directories of individually stored e-mail messages (one RFC 5322 message
//! per file, as found in Maildir folders or `.eml` exports) and reports the absolute path of every
//! message that matches a set of recipient criteria and a date range.
//!
//! Three search modes are supported:
//!
//! - **normal**: any of the target addresses appears in the `To`, `Cc` or `Bcc` header fields.
//! - **sent**: the message is an outgoing message where exactly one address of the configured
//!   domain appears across `To`, `Cc` and `Bcc`, and that address is one of the targets.
//! - **normal_malform**: a target appears literally in the raw recipient header text but does not
//!   match any structurally parsed address, which finds messages whose address fields are broken.
//!
//! In all modes the `Date` header must fall strictly between the configured start and end dates.
//!
//! Header parsing is delegated to [mail-parser](https://crates.io/crates/mail-parser). Address and
//! date fields that fail to parse never abort a search: a malformed address list is treated as empty
//! and a malformed date as the zero timestamp, so such messages simply do not match.
//!
//! ## Usage Example
//!
//! ```
//!    use mailbox_search::*;
//!
//!    let config = SearchConfig::new(
//!        vec!["jane@example.com".to_string()],
//!        "@example.com",
//!        DateRange::parse_rfc3339("2021-01-01T00:00:00Z", "2022-01-01T00:00:00Z").unwrap(),
//!        Mode::ListMatch,
//!    );
//!
//!    let message = ParsedMessage::parse(concat!(
//!        "From: Art Vandelay <art@vandelay.com>\n",
//!        "To: Jane <jane@example.com>\n",
//!        "Date: Sat, 20 Nov 2021 14:22:01 -0800\n",
//!        "\n",
//!        "Hello\n",
//!    ).as_bytes())
//!    .unwrap();
//!
//!    assert!(config.matches(&message));
//! ```

pub mod cli;
mod core;
pub mod error;
pub mod mailbox;
pub mod matchers;
pub mod parsers;
pub mod search;

use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use crate::core::config::{parse_targets, ConfigValues};
pub use crate::error::{Error, Result};
pub use crate::search::{PathReporter, ScanSummary, Scanner};

/// Unix timestamp of `0001-01-01T00:00:00Z`, the value assigned to messages
/// with a missing or unparseable `Date` header.
pub const ZERO_TIMESTAMP: i64 = -62_135_596_800;

/// Search mode, fixed for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Mode {
    /// Any target is listed in To, Cc or Bcc (`normal`).
    #[cfg_attr(feature = "serde", serde(rename = "normal"))]
    ListMatch,
    /// A target is the only address of the domain across To, Cc and Bcc (`sent`).
    #[cfg_attr(feature = "serde", serde(rename = "sent"))]
    SentOnly,
    /// A target appears in the raw recipient headers but not as a parsed address (`normal_malform`).
    #[cfg_attr(feature = "serde", serde(rename = "normal_malform"))]
    ListMatchMalformed,
}

/// How the files of a scanned directory are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Layout {
    /// Every regular file directly inside the directory is a message.
    #[default]
    Flat,
    /// The directory is a Maildir folder, messages live in `cur` and `new`.
    Maildir,
}

/// A date range with both bounds exclusive, as Unix timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DateRange {
    pub start: i64,
    pub end: i64,
}

/// Immutable configuration of a search run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchConfig {
    pub targets: Vec<String>,
    pub domain: String,
    pub range: DateRange,
    pub mode: Mode,
    #[cfg_attr(feature = "serde", serde(default))]
    pub layout: Layout,
    #[cfg_attr(feature = "serde", serde(default))]
    pub sorted: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    pub directories: Vec<PathBuf>,
}

/// The header view of a single message file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMessage {
    /// Addr-specs of the first To field, empty when the field is absent or malformed.
    pub to: Vec<String>,
    pub cc: Vec<String>,
    pub bcc: Vec<String>,
    /// Raw text of every To, Cc and Bcc field, one field per line.
    pub raw_recipients: String,
    /// Unix timestamp of the Date header, [`ZERO_TIMESTAMP`] when absent or malformed.
    pub date: i64,
}
