//! Input acquisition and output sinks shared by the subcommands.

use std::fs;
use std::io::{self, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IoError {
    #[error("failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to read stdin: {0}")]
    Stdin(#[source] io::Error),

    #[error("failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("failed to write stdout: {0}")]
    Stdout(#[source] io::Error),
}

/// Read all of stdin when something is piped in.
///
/// Returns `None` when stdin is an interactive terminal (it is never read, so
/// a tool cannot block on the keyboard) or when it yields no bytes, as with
/// the `/dev/null` stdin of most CI runners.
pub fn read_piped_stdin() -> Result<Option<Vec<u8>>, IoError> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut buf = Vec::new();
    stdin.lock().read_to_end(&mut buf).map_err(IoError::Stdin)?;
    if buf.is_empty() {
        return Ok(None);
    }
    Ok(Some(buf))
}

/// Read a whole file as bytes.
pub fn read_file(path: &Path) -> Result<Vec<u8>, IoError> {
    fs::read(path).map_err(|source| IoError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Where a tool's result goes. No trailing newline is ever added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputSink {
    Stdout,
    /// Create or truncate the file in place, like a shell `>` redirect
    Truncate(PathBuf),
    /// Replace the file atomically (tempfile + fsync + rename)
    Replace(PathBuf),
}

impl OutputSink {
    pub fn write_all(&self, content: &[u8]) -> Result<(), IoError> {
        match self {
            OutputSink::Stdout => {
                let mut stdout = io::stdout().lock();
                stdout
                    .write_all(content)
                    .and_then(|()| stdout.flush())
                    .map_err(IoError::Stdout)
            }
            OutputSink::Truncate(path) => {
                fs::write(path, content).map_err(|source| IoError::Write {
                    path: path.clone(),
                    source,
                })
            }
            OutputSink::Replace(path) => {
                atomic_write(path, content).map_err(|source| IoError::Write {
                    path: path.clone(),
                    source,
                })
            }
        }
    }
}

/// Atomic file write: tempfile + fsync + rename.
///
/// Either the full write lands or the destination is left untouched.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    // Create tempfile in same directory to ensure same filesystem
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        Some(_) => Path::new("."),
        None => {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "Path has no parent directory",
            ))
        }
    };

    let mut temp = tempfile::NamedTempFile::new_in(parent)?;
    temp.write_all(content)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;

    Ok(())
}
