//! Contract between the loader core and the downstream package parser.

use std::path::Path;
use std::sync::Arc;

use memmap2::Mmap;

use crate::bundle::ModuleBundle;

/// Validated failure reasons a [`PackageParser`] can report.
///
/// Anything else (I/O, mmap) is the loader core's concern and never reaches
/// the parser.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The magic number at the head of the mapped region did not match what
    /// the request declared, or the payload otherwise fails structural
    /// validation.
    #[error("data package is malformed or magic number mismatch")]
    Malformed,
    /// The package parsed but is self-consistently unusable (e.g. a version
    /// the downstream engine does not support).
    #[error("data package rejected: {0}")]
    Rejected(String),
}

/// Builds a [`ModuleBundle`] out of a memory-mapped data package.
///
/// Implementations take ownership of the mapping so the returned bundle can
/// keep it alive for as long as any consumer holds a reference to it.
pub trait PackageParser: Send + Sync {
    /// Parses `mapping`, the full contents of `source`, into a module bundle.
    ///
    /// `magic_number` is the caller-declared expected header, checked by the
    /// parser before it trusts the rest of the mapping.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the mapping does not look like a valid
    /// package for `magic_number`.
    fn parse(
        &self,
        mapping: Mmap,
        source: &Path,
        magic_number: &[u8],
    ) -> Result<Arc<dyn ModuleBundle>, ParseError>;
}
