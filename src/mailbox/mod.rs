/*
 * SPDX-FileCopyrightText: 2020 Stalwart Labs LLC <hello@stalw.art>
 *
 * SPDX-License-Identifier: Apache-2.0 OR MIT
 */

pub mod directory;
pub mod maildir;

use std::{
    fs,
    path::{Path, PathBuf},
    vec,
};

use crate::{Error, Layout, Result};

/// Message iterator over the files of a single directory.
///
/// The directory is listed when the iterator is created, message contents are
/// read one file at a time as the iterator advances.
pub struct MessageIterator {
    paths: vec::IntoIter<PathBuf>,
}

/// Message file contents and location
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct MessageFile {
    contents: Vec<u8>,
    path: PathBuf,
}

impl MessageIterator {
    /// Lists the message files of `path` according to `layout`.
    /// When `sorted` is set, files are visited in file name order.
    pub fn new(path: impl AsRef<Path>, layout: Layout, sorted: bool) -> Result<MessageIterator> {
        let path = path.as_ref();
        let paths = match layout {
            Layout::Flat => directory::list_files(path, sorted),
            Layout::Maildir => maildir::list_files(path, sorted),
        }
        .map_err(|source| Error::ReadDirectory {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(MessageIterator {
            paths: paths.into_iter(),
        })
    }

    /// Number of files left to visit.
    pub fn remaining(&self) -> usize {
        self.paths.len()
    }
}

impl Iterator for MessageIterator {
    type Item = Result<MessageFile>;

    fn next(&mut self) -> Option<Self::Item> {
        let path = self.paths.next()?;
        Some(match fs::read(&path) {
            Ok(contents) => Ok(MessageFile { contents, path }),
            Err(source) => Err(Error::ReadMessage { path, source }),
        })
    }
}

impl MessageFile {
    /// Returns the path to the message file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the message contents
    pub fn contents(&self) -> &[u8] {
        &self.contents
    }
}

pub(crate) fn sort_by_name(paths: &mut [PathBuf]) {
    paths.sort_unstable_by(|a, b| a.file_name().cmp(&b.file_name()));
}
