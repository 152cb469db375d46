/*
 * SPDX-FileCopyrightText: 2020 Stalwart Labs LLC <hello@stalw.art>
 *
 * SPDX-License-Identifier: Apache-2.0 OR MIT
 */

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use super::sort_by_name;

/// Lists the regular files directly inside `path`, without descending into
/// sub-directories. Any listing error fails the whole directory.
pub fn list_files(path: &Path, sorted: bool) -> io::Result<Vec<PathBuf>> {
    list_files_(path, sorted, false)
}

pub(crate) fn list_files_(path: &Path, sorted: bool, skip_hidden: bool) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(path)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        if skip_hidden
            && path
                .file_name()
                .and_then(|name| name.to_str())
                .map_or(true, |name| name.starts_with('.'))
        {
            continue;
        }
        files.push(path);
    }

    if sorted {
        sort_by_name(&mut files);
    }

    Ok(files)
}
