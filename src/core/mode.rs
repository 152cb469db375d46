/*
 * SPDX-FileCopyrightText: 2020 Stalwart Labs LLC <hello@stalw.art>
 *
 * SPDX-License-Identifier: Apache-2.0 OR MIT
 */

use std::{fmt, str::FromStr};

use crate::{Error, Mode};

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::ListMatch => "normal",
            Mode::SentOnly => "sent",
            Mode::ListMatchMalformed => "normal_malform",
        }
    }

    /// Maps the legacy boolean `IS_SENT` switch to a mode.
    pub fn from_sent_flag(is_sent: bool) -> Self {
        if is_sent {
            Mode::SentOnly
        } else {
            Mode::ListMatch
        }
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(Mode::ListMatch),
            "sent" => Ok(Mode::SentOnly),
            "normal_malform" => Ok(Mode::ListMatchMalformed),
            _ => Err(Error::UnknownMode(s.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a boolean the way the original `IS_SENT` switch was parsed.
pub(crate) fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}
