//! Error type for vfs generation
//!
//! Every failure the library can produce surfaces as a [`VfsError`]. Nothing is
//! logged or recovered here; the caller decides how to report it.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VfsError {
    /// Both an extension list and a custom match predicate were supplied
    #[error("cannot provide both extensions and a file match predicate")]
    InvalidArguments,

    /// A reference-producing format was requested without a target path
    #[error("a target path is required when using content format `{format}`")]
    MissingTargetPath { format: String },

    /// Format name outside the known set
    #[error("unknown content format: {0}")]
    UnknownContentFormat(String),

    /// Known format that is not implemented yet
    #[error("content format `{0}` is not yet implemented")]
    UnsupportedFormat(String),

    /// Two relative paths sanitize to the same generated identifier
    #[error("paths `{first}` and `{second}` both map to identifier `{identifier}`")]
    DuplicateIdentifier {
        identifier: String,
        first: String,
        second: String,
    },

    /// An inlining format met a path-only entry
    #[error("no content loaded for `{path}`")]
    MissingContent { path: String },

    /// Reading a matched file failed
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The target or root path could not be made absolute
    #[error("could not resolve path `{}`", path.display())]
    Resolve {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Walking the root directory failed
    #[error(transparent)]
    Walk(#[from] walkdir::Error),
}

impl VfsError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        VfsError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn resolve(path: impl Into<PathBuf>, source: io::Error) -> Self {
        VfsError::Resolve {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, VfsError>;
