/*
 * SPDX-FileCopyrightText: 2020 Stalwart Labs LLC <hello@stalw.art>
 *
 * SPDX-License-Identifier: Apache-2.0 OR MIT
 */

use std::{io::Write, path::Path};

use log::{debug, info, warn};

use crate::{mailbox::MessageIterator, Error, ParsedMessage, Result, SearchConfig};

/// Writes the absolute path of every matching message, one per line.
pub struct PathReporter<W: Write> {
    writer: W,
    count: usize,
}

/// Totals of a completed search.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanSummary {
    pub directories: usize,
    pub skipped_directories: usize,
    pub messages: usize,
    pub matches: usize,
}

/// Runs a search over the directories of a [`SearchConfig`].
pub struct Scanner<'x> {
    config: &'x SearchConfig,
}

impl<W: Write> PathReporter<W> {
    pub fn new(writer: W) -> Self {
        PathReporter { writer, count: 0 }
    }

    /// Resolves `path` against the working directory and prints it.
    pub fn report(&mut self, path: &Path) -> Result<()> {
        let path = std::path::absolute(path)?;
        writeln!(self.writer, "{}", path.display())?;
        self.count += 1;
        Ok(())
    }

    /// Number of paths reported so far.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().map_err(Error::from)
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<'x> Scanner<'x> {
    pub fn new(config: &'x SearchConfig) -> Self {
        Scanner { config }
    }

    /// Scans every configured directory in order.
    ///
    /// Directories that cannot be listed are logged and skipped. Any error
    /// reading or parsing a message file stops the search.
    pub fn scan<W: Write>(&self, reporter: &mut PathReporter<W>) -> Result<ScanSummary> {
        let mut summary = ScanSummary::default();

        info!(
            "Searching {} directories for {} targets in {} mode, date range {}",
            self.config.directories.len(),
            self.config.targets.len(),
            self.config.mode,
            self.config.range
        );

        for directory in &self.config.directories {
            self.scan_directory(directory, reporter, &mut summary)?;
        }
        reporter.flush()?;

        info!(
            "Found {} matches in {} messages ({} directories, {} skipped)",
            summary.matches, summary.messages, summary.directories, summary.skipped_directories
        );

        Ok(summary)
    }

    /// Scans the message files of a single directory.
    pub fn scan_directory<W: Write>(
        &self,
        directory: &Path,
        reporter: &mut PathReporter<W>,
        summary: &mut ScanSummary,
    ) -> Result<()> {
        let messages =
            match MessageIterator::new(directory, self.config.layout, self.config.sorted) {
                Ok(messages) => messages,
                Err(err) if err.is_recoverable() => {
                    warn!("{}, skipping.", err);
                    summary.skipped_directories += 1;
                    return Ok(());
                }
                Err(err) => return Err(err),
            };
        summary.directories += 1;

        debug!(
            "Scanning {} files in {}",
            messages.remaining(),
            directory.display()
        );

        for file in messages {
            let file = file?;
            let message = ParsedMessage::parse(file.contents()).ok_or_else(|| {
                Error::ParseMessage {
                    path: file.path().to_path_buf(),
                }
            })?;
            summary.messages += 1;

            if self.config.matches(&message) {
                debug!("{}: match", file.path().display());
                reporter.report(file.path())?;
                summary.matches += 1;
            } else {
                debug!("{}: no match", file.path().display());
            }
        }

        Ok(())
    }
}
