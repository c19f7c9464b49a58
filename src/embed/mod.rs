//! Embedding a directory of resources as C/C++ byte arrays.
//!
//! Every file under the resource directory becomes three definitions inside
//! `namespace <NS>::StaticResources`: its path as a string constant, its
//! length, and its bytes. Declarations go to a header written next to the
//! requested source file.

pub mod errors;
pub mod generator;

pub use errors::EmbedError;
pub use generator::{c_identifier, generate, GeneratedSources, Layout, Resource};

use crate::io::atomic_write;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedOptions {
    /// Directory holding the files to embed
    pub source_dir: PathBuf,
    /// Source file to write; the header lands beside it with a `.h` extension
    pub destination: PathBuf,
    pub namespace: String,
    pub string_type: String,
}

/// What `embed_directory` wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedReport {
    pub source_path: PathBuf,
    pub header_path: PathBuf,
    pub resources: usize,
}

/// Source and header paths for a destination.
///
/// The source keeps the destination's extension; the header swaps it for `.h`.
pub fn output_paths(destination: &Path) -> (PathBuf, PathBuf) {
    (destination.to_path_buf(), destination.with_extension("h"))
}

/// Read every file under `dir`, in lexical order, skipping directories.
pub fn collect_resources(dir: &Path) -> Result<Vec<Resource>, EmbedError> {
    if !dir.exists() {
        return Err(EmbedError::MissingSourceDir(dir.to_path_buf()));
    }

    let mut resources = Vec::new();
    let mut seen: HashMap<String, String> = HashMap::new();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_dir() {
            continue;
        }

        let data = fs::read(entry.path()).map_err(|source| EmbedError::Io {
            path: entry.path().to_path_buf(),
            source,
        })?;
        let resource = Resource::new(slash_path(entry.path()), data);

        // Each resource defines `<id>`, `<id>_path` and `<id>_len`; none of
        // them may coincide with a name another resource already defines.
        let identifier = resource.identifier();
        let names = [
            format!("{identifier}_path"),
            format!("{identifier}_len"),
            identifier,
        ];
        if let Some((name, first)) = names
            .iter()
            .find_map(|name| seen.get(name).map(|first| (name, first)))
        {
            return Err(EmbedError::DuplicateIdentifier {
                identifier: name.clone(),
                first: first.clone(),
                second: resource.path,
            });
        }
        for name in names {
            seen.insert(name, resource.path.clone());
        }

        tracing::debug!(path = %resource.path, bytes = resource.data.len(), "embedding resource");
        resources.push(resource);
    }

    Ok(resources)
}

/// Walk `options.source_dir` and write the generated source and header.
pub fn embed_directory(options: &EmbedOptions) -> Result<EmbedReport, EmbedError> {
    let (source_path, header_path) = output_paths(&options.destination);
    if source_path == header_path {
        return Err(EmbedError::DestinationIsHeader(source_path));
    }

    let resources = collect_resources(&options.source_dir)?;

    let stem = header_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let layout = Layout {
        stem,
        namespace: options.namespace.clone(),
        string_type: options.string_type.clone(),
    };
    let generated = generate(&resources, &layout);

    for (path, content) in [
        (&header_path, &generated.header),
        (&source_path, &generated.source),
    ] {
        atomic_write(path, content.as_bytes()).map_err(|source| EmbedError::Io {
            path: path.clone(),
            source,
        })?;
    }

    Ok(EmbedReport {
        source_path,
        header_path,
        resources: resources.len(),
    })
}

fn slash_path(path: &Path) -> String {
    let path = path.to_string_lossy();
    if std::path::MAIN_SEPARATOR == '/' {
        path.into_owned()
    } else {
        path.replace(std::path::MAIN_SEPARATOR, "/")
    }
}
