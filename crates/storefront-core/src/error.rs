//! Catalog error types.
//!
//! Only the catalog boundary can fail. The variant engine itself degrades
//! malformed input to "cannot select" instead of returning errors.

use thiserror::Error;

/// Errors that can occur while loading or querying a catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(u64),

    /// Brand not found.
    #[error("Brand not found: {0}")]
    BrandNotFound(u64),

    /// Catalog dump could not be decoded.
    #[error("Failed to decode {what}: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Catalog dump could not be read.
    #[error("Failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl CatalogError {
    pub(crate) fn decode(what: &'static str, source: serde_json::Error) -> Self {
        CatalogError::Decode { what, source }
    }

    /// Wrap an I/O failure for the given path.
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        CatalogError::Io {
            path: path.into(),
            source,
        }
    }
}
