//! Content loading backend
//!
//! Turns matched paths into a VirtualFileSystem. Reads are independent, so
//! with the `parallel` feature they run on the rayon pool; either way every
//! read finishes before anything is rendered and the matcher's order is kept.

use log::debug;
use std::fs;
use std::path::Path;

use crate::backends::scan::match_file_paths;
use crate::core::error::{Result, VfsError};
use crate::core::model::{FileEntry, RelativePath, VirtualFileSystem};
use crate::core::options::VfsOptions;
use crate::core::paths::join_normalized;

/// Match files and load them into a VirtualFileSystem
///
/// Formats that never inline content get path-only entries and no file is
/// opened.
pub fn load_virtual_file_system(opts: &VfsOptions) -> Result<VirtualFileSystem> {
    let paths = match_file_paths(opts)?;
    load_entries(&opts.dir_path, paths, opts.content_format.needs_content())
}

/// Build entries for `paths` (relative to `root`), reading bytes if asked
pub fn load_entries(
    root: &Path,
    paths: Vec<RelativePath>,
    with_content: bool,
) -> Result<VirtualFileSystem> {
    if !with_content {
        return Ok(paths.into_iter().map(FileEntry::reference).collect());
    }

    #[cfg(feature = "parallel")]
    let entries = {
        use rayon::prelude::*;
        paths
            .into_par_iter()
            .map(|path| read_entry(root, path))
            .collect::<Result<Vec<_>>>()?
    };

    #[cfg(not(feature = "parallel"))]
    let entries = paths
        .into_iter()
        .map(|path| read_entry(root, path))
        .collect::<Result<Vec<_>>>()?;

    Ok(entries.into_iter().collect())
}

fn read_entry(root: &Path, path: RelativePath) -> Result<FileEntry> {
    let full_path = join_normalized(root, &path);
    let bytes = fs::read(&full_path).map_err(|e| VfsError::io(&full_path, e))?;
    debug!("Read {} ({} bytes)", path, bytes.len());
    Ok(FileEntry::with_bytes(path, bytes))
}
