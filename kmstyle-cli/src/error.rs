//! Error types emitted by the kmstyle CLI.

use std::sync::Arc;

use camino::Utf8PathBuf;
use kmstyle_core::{BuildError, TagError};
use thiserror::Error;

/// Errors emitted by the kmstyle CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// A language or flavor in a list option could not be parsed.
    #[error("invalid value in --{field}: {source}")]
    InvalidTag {
        field: &'static str,
        #[source]
        source: TagError,
    },
    /// A list option resolved to no values.
    #[error("--{field} must name at least one value")]
    EmptySelection { field: &'static str },
    /// The base layer directory does not exist or is not a directory.
    #[error("{field} path {path:?} is not a directory")]
    NotADirectory {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectPath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Creating the output directory failed.
    #[error("failed to create output directory {path:?}: {source}")]
    CreateOutputDir {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Building one of the styles failed; the run is aborted.
    #[error(transparent)]
    Build(#[from] BuildError),
    /// Serialising a style or the index failed.
    #[error("failed to serialise {name}: {source}")]
    Serialise {
        name: String,
        #[source]
        source: serde_json::Error,
    },
    /// Writing an output file failed.
    #[error("failed to write {path:?}: {source}")]
    WriteOutput {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Listing the output directory failed.
    #[error("failed to list styles in {path:?}: {source}")]
    ListOutputDir {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CliError {
    pub(crate) fn serialise(name: &str, source: serde_json::Error) -> Self {
        Self::Serialise {
            name: name.to_owned(),
            source,
        }
    }
}
