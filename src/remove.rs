//! `rm` for scripts that cannot rely on a POSIX shell.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RemoveOptions {
    /// Remove directories and their contents; missing paths are not an error
    pub recursive: bool,
    /// Ignore every per-path error and keep going
    pub force: bool,
}

#[derive(Error, Debug)]
pub enum RemoveError {
    #[error("{} is a directory", .path.display())]
    IsDirectory { path: PathBuf },

    #[error("failed to remove {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
}

/// Remove a single path, ignoring `options.force`.
pub fn remove_path(path: &Path, options: RemoveOptions) -> Result<(), RemoveError> {
    let io_err = |source| RemoveError::Io {
        path: path.to_path_buf(),
        source,
    };

    // symlink_metadata so a link to a directory is unlinked, never followed
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound && options.recursive => return Ok(()),
        Err(e) => return Err(io_err(e)),
    };

    if metadata.is_dir() {
        if !options.recursive {
            return Err(RemoveError::IsDirectory {
                path: path.to_path_buf(),
            });
        }
        fs::remove_dir_all(path).map_err(io_err)
    } else {
        fs::remove_file(path).map_err(io_err)
    }
}

/// Remove every path in order.
///
/// Without `force` the first failure aborts; with it failures are logged and
/// skipped. Returns how many paths failed and were skipped.
pub fn remove_paths<P: AsRef<Path>>(
    paths: &[P],
    options: RemoveOptions,
) -> Result<usize, RemoveError> {
    let mut skipped = 0;

    for path in paths {
        let path = path.as_ref();
        match remove_path(path, options) {
            Ok(()) => tracing::debug!(path = %path.display(), "removed"),
            Err(e) if options.force => {
                tracing::debug!(path = %path.display(), error = %e, "skipped");
                skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    Ok(skipped)
}
