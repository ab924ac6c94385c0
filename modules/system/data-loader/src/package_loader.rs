//! Blocking filesystem work: optional install-copy, then mmap + parse.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use data_loader_sdk::{ModuleBundle, PackageParser, ParseError, Request};
use memmap2::Mmap;

/// Outcome of [`PackageLoader::load`], split out so the orchestrator can map
/// each case to the right [`data_loader_sdk::ResponseStatus`].
pub enum LoadOutcome {
    Ready(Arc<dyn ModuleBundle>),
    Broken(ParseError),
    MmapFailed(std::io::Error),
    InstallFailed(std::io::Error),
}

/// Runs the blocking half of a build: copy-to-install-location (if
/// requested), memory-map the resulting file, and hand it to `parser`.
pub struct PackageLoader {
    parser: Arc<dyn PackageParser>,
}

impl PackageLoader {
    #[must_use]
    pub fn new(parser: Arc<dyn PackageParser>) -> Self {
        Self { parser }
    }

    /// Performs the synchronous load described by `request`.
    ///
    /// Intended to run inside `tokio::task::spawn_blocking`.
    #[must_use]
    pub fn load(&self, request: &Request) -> LoadOutcome {
        let source = match &request.install_location {
            Some(install_location) => {
                if let Err(err) = Self::install(&request.file_path, install_location) {
                    return LoadOutcome::InstallFailed(err);
                }
                install_location.as_path()
            }
            None => request.file_path.as_path(),
        };

        let mapping = match Self::mmap(source) {
            Ok(mapping) => mapping,
            Err(err) => return LoadOutcome::MmapFailed(err),
        };

        match self.parser.parse(mapping, source, &request.magic_number) {
            Ok(bundle) => LoadOutcome::Ready(bundle),
            Err(err) => LoadOutcome::Broken(err),
        }
    }

    fn install(source: &Path, destination: &Path) -> std::io::Result<()> {
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(source, destination)?;
        Ok(())
    }

    fn mmap(path: &Path) -> std::io::Result<Mmap> {
        let file = fs::File::open(path)?;
        // SAFETY: the mapped region is only read; the loader does not assume
        // the backing file stays unmodified for the mapping's lifetime, same
        // tradeoff every mmap-based reader in the ecosystem accepts.
        #[allow(unsafe_code, reason = "memmap2::Mmap::map is inherently unsafe")]
        let mapping = unsafe { Mmap::map(&file)? };
        Ok(mapping)
    }
}
