//! Error types for override resolution.
//!
//! All fallible functions in this crate return [`Result<T>`], which uses [`Error`]
//! as the error type. External error types (`std::io::Error`, `serde_json::Error`,
//! `toml::de::Error`) are automatically converted via `From` impls.
//!
//! Most failure modes of the resolution engine are not errors at all: a stale
//! override is reported as [`Interception::Stale`](crate::Interception::Stale), a
//! missing preview as [`Preview::Missing`](crate::Preview::Missing). Only I/O and
//! parsing at the edges of the crate produce an [`Error`].

use camino::Utf8PathBuf;
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading packages, settings or definitions.
#[derive(Error, Debug)]
pub enum Error {
    /// Filesystem I/O failed (reading textures, settings, manifests).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse or serialize JSON (settings, manifests, definition catalogs).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to parse the TOML configuration file.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A source was asked for an asset it does not provide.
    #[error("Asset '{path}' not found in source '{source_id}'")]
    AssetMissing { source_id: String, path: String },

    /// A source id does not match any loaded source.
    #[error("Unknown content source: {0}")]
    UnknownSource(String),

    /// A package directory is missing or malformed.
    #[error("Invalid package directory: {0}")]
    InvalidPackage(Utf8PathBuf),

    /// The configuration file contains an unusable value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Catch-all for errors from host collaborators.
    #[error("{0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}
