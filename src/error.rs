/*
 * SPDX-FileCopyrightText: 2020 Stalwart Labs LLC <hello@stalw.art>
 *
 * SPDX-License-Identifier: Apache-2.0 OR MIT
 */

use std::{io, path::PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Environment variable {var} is not set")]
    MissingConfig { var: &'static str },

    #[error("Unknown search mode '{0}', expected one of: normal, sent, normal_malform")]
    UnknownMode(String),

    #[error("Unable to parse date '{value}' in {var}. Expected an RFC 3339 timestamp such as 2016-12-31T12:00:00Z")]
    InvalidDate { var: &'static str, value: String },

    #[error("Invalid boolean '{value}' in {var}")]
    InvalidBool { var: &'static str, value: String },

    #[error("Failed to read directory {}: {source}", path.display())]
    ReadDirectory { path: PathBuf, source: io::Error },

    #[error("Failed to read message {}: {source}", path.display())]
    ReadMessage { path: PathBuf, source: io::Error },

    #[error("Failed to parse message {}", path.display())]
    ParseMessage { path: PathBuf },

    #[error("Failed to write search results: {0}")]
    Output(#[from] io::Error),
}

impl Error {
    /// Configuration errors are reported before any directory is scanned.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Error::MissingConfig { .. }
                | Error::UnknownMode(_)
                | Error::InvalidDate { .. }
                | Error::InvalidBool { .. }
        )
    }

    /// Only directory listing failures are recovered from during a scan.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::ReadDirectory { .. })
    }
}
