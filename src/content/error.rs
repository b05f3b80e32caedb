//! Content loading errors

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use super::schema::SchemaValidationError;

/// Failure to load a collection. A load never returns partial results.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unknown collection `{name}` (available: {available})")]
    UnknownCollection { name: String, available: String },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error(transparent)]
    Schema(#[from] SchemaValidationError),

    #[error(
        "duplicate slug `{slug}` in collection `{collection}`: {} and {}",
        .first.display(),
        .second.display()
    )]
    DuplicateSlug {
        collection: String,
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },
}
