/*
 * SPDX-FileCopyrightText: 2020 Stalwart Labs LLC <hello@stalw.art>
 *
 * SPDX-License-Identifier: Apache-2.0 OR MIT
 */

use std::path::PathBuf;

use clap::Parser;

use crate::{ConfigValues, Layout, Result, SearchConfig};

/// Print the paths of stored e-mail messages matching recipient and date criteria.
///
/// Every option can also be set through the environment variable shown next to it.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Cli {
    /// Directories to scan; files inside are read as one message each (not recursive)
    #[arg(value_name = "DIRECTORY")]
    pub directories: Vec<PathBuf>,

    /// Comma separated list of target addresses
    #[arg(long, env = "MAILBOX_SEARCH_TARGETS")]
    pub targets: Option<String>,

    /// Search mode: normal, sent or normal_malform
    #[arg(long, env = "MAILBOX_SEARCH_MODE")]
    pub mode: Option<String>,

    /// Legacy mode switch used when no mode is given: true selects sent, false selects normal
    #[arg(long = "sent", value_name = "BOOL", env = "MAILBOX_SEARCH_IS_SENT")]
    pub is_sent: Option<String>,

    /// Address suffix identifying internal addresses, e.g. @example.com
    #[arg(long, env = "MAILBOX_SEARCH_DOMAIN")]
    pub domain: Option<String>,

    /// Exclusive lower bound of the Date header (RFC 3339)
    #[arg(long, value_name = "RFC3339", env = "MAILBOX_SEARCH_START_DATE")]
    pub start_date: Option<String>,

    /// Exclusive upper bound of the Date header (RFC 3339)
    #[arg(long, value_name = "RFC3339", env = "MAILBOX_SEARCH_END_DATE")]
    pub end_date: Option<String>,

    /// Treat each directory as a Maildir folder and scan its cur and new sub-directories
    #[arg(long, env = "MAILBOX_SEARCH_MAILDIR")]
    pub maildir: bool,

    /// Visit the files of each directory in file name order
    #[arg(long)]
    pub sort: bool,

    /// Increase log verbosity on stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Parse CLI arguments from process args.
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Default log filter for the requested verbosity.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }

    /// Validates the configuration values and builds the search configuration.
    pub fn into_config(self) -> Result<SearchConfig> {
        let values = ConfigValues {
            targets: self.targets,
            mode: self.mode,
            is_sent: self.is_sent,
            domain: self.domain,
            start_date: self.start_date,
            end_date: self.end_date,
        };

        Ok(values
            .into_config()?
            .with_layout(if self.maildir {
                Layout::Maildir
            } else {
                Layout::Flat
            })
            .with_sorted(self.sort)
            .with_directories(self.directories))
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, FromArgMatches};

    use crate::{Error, Layout, Mode};

    use super::Cli;

    const REQUIRED: [&str; 9] = [
        "mailbox-search",
        "--targets=a@x.com,b@y.com",
        "--domain=@x.com",
        "--start-date=2021-01-01T00:00:00Z",
        "--end-date=2022-01-01T00:00:00Z",
        "--maildir",
        "--sort",
        "/var/mail/a",
        "/var/mail/b",
    ];

    /// Parses the required arguments plus `extra`, ignoring any
    /// `MAILBOX_SEARCH_*` variables set in the environment.
    fn parse<'a>(extra: impl IntoIterator<Item = &'a str>) -> Cli {
        let matches = Cli::command()
            .mut_args(|arg| arg.env(None::<&'static str>))
            .try_get_matches_from(REQUIRED.iter().copied().chain(extra))
            .unwrap();
        Cli::from_arg_matches(&matches).unwrap()
    }

    #[test]
    fn parse_arguments() {
        let cli = parse(["--mode", "sent", "-vv"]);
        assert_eq!(cli.log_level(), "debug");

        let config = cli.into_config().unwrap();
        assert_eq!(config.targets, ["a@x.com", "b@y.com"]);
        assert_eq!(config.domain, "@x.com");
        assert_eq!(config.mode, Mode::SentOnly);
        assert_eq!(config.layout, Layout::Maildir);
        assert!(config.sorted);
        assert_eq!(
            config.directories,
            [
                std::path::PathBuf::from("/var/mail/a"),
                std::path::PathBuf::from("/var/mail/b")
            ]
        );
    }

    #[test]
    fn legacy_sent_flag() {
        let cli = parse(["--sent", "false"]);
        assert_eq!(cli.log_level(), "warn");
        assert_eq!(cli.into_config().unwrap().mode, Mode::ListMatch);
    }

    #[test]
    fn missing_mode() {
        assert!(matches!(
            parse([] as [&str; 0]).into_config(),
            Err(Error::MissingConfig {
                var: "MAILBOX_SEARCH_MODE"
            })
        ));
    }

    #[test]
    fn unknown_mode() {
        let cli = parse(["--mode", "everything"]);
        assert!(matches!(cli.into_config(), Err(Error::UnknownMode(_))));
    }
}
