//! Contract for the parsed, mmap-backed runtime view produced by a data
//! package.

/// Version and filename metadata extracted from a parsed data package.
///
/// Mirrors the downstream `DataManager::GetDataVersion()` /
/// `DataManager::GetFilename()` accessors; the core never inspects anything
/// else a bundle carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataManagerInfo {
    pub data_version: String,
    pub filename: Option<String>,
}

/// Opaque bundle of runtime modules (dictionary, connector, segmenter, ...)
/// produced by a [`crate::parser::PackageParser`] from a validated,
/// memory-mapped byte region.
///
/// The core only ever reads [`Self::data_manager`]; every other module the
/// bundle carries is meaningful solely to the downstream engine that
/// ultimately consumes it after a hot-swap.
pub trait ModuleBundle: Send + Sync {
    fn data_manager(&self) -> &DataManagerInfo;
}
