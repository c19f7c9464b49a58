use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EmbedError {
    #[error("resource directory {} does not exist", .0.display())]
    MissingSourceDir(PathBuf),

    #[error("destination {} would overwrite its own header", .0.display())]
    DestinationIsHeader(PathBuf),

    #[error("files {first} and {second} both map to identifier {identifier}")]
    DuplicateIdentifier {
        identifier: String,
        first: String,
        second: String,
    },

    #[error("failed to walk resource directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}
