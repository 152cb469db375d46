/*
 * SPDX-FileCopyrightText: 2020 Stalwart Labs LLC <hello@stalw.art>
 *
 * SPDX-License-Identifier: Apache-2.0 OR MIT
 */

use std::{
    io,
    path::{Path, PathBuf},
};

use super::directory::list_files_;

/// Lists the messages of a Maildir folder: the files in `cur` followed by the
/// files in `new`. Hidden files are skipped and sub-folders are not visited.
pub fn list_files(path: &Path, sorted: bool) -> io::Result<Vec<PathBuf>> {
    let cur_path = path.join("cur");
    if !cur_path.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            "Invalid Maildir format, 'cur' directory not found.",
        ));
    }
    let new_path = path.join("new");
    if !new_path.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            "Invalid Maildir format, 'new' directory not found.",
        ));
    }

    let mut files = list_files_(&cur_path, sorted, true)?;
    files.extend(list_files_(&new_path, sorted, true)?);
    Ok(files)
}
