//! Reference [`PackageParser`] for a minimal `[magic][version]\n[payload]`
//! wire format.
//!
//! Downstream engines bring their own parser for the real dictionary /
//! connector / segmenter package format; this one exists so the crate has a
//! working, non-mocked default and something concrete to integration-test
//! against.

use std::path::Path;
use std::sync::Arc;

use data_loader_sdk::{DataManagerInfo, ModuleBundle, PackageParser, ParseError};
use memmap2::Mmap;

struct DefaultModuleBundle {
    // Kept alive for as long as any consumer holds this bundle; never read
    // directly once parsing has extracted `info`.
    _mapping: Mmap,
    info: DataManagerInfo,
}

impl ModuleBundle for DefaultModuleBundle {
    fn data_manager(&self) -> &DataManagerInfo {
        &self.info
    }
}

/// Parses packages whose payload is `magic_number` followed by a UTF-8
/// version string and a single `\n`; everything after the newline is opaque
/// payload the default parser does not interpret.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultPackageParser;

impl PackageParser for DefaultPackageParser {
    fn parse(
        &self,
        mapping: Mmap,
        source: &Path,
        magic_number: &[u8],
    ) -> Result<Arc<dyn ModuleBundle>, ParseError> {
        if !mapping.starts_with(magic_number) {
            return Err(ParseError::Malformed);
        }

        let rest = &mapping[magic_number.len()..];
        let newline = rest.iter().position(|&b| b == b'\n').ok_or(ParseError::Malformed)?;
        let version = std::str::from_utf8(&rest[..newline]).map_err(|_| ParseError::Malformed)?.to_owned();

        let info = DataManagerInfo {
            data_version: version,
            filename: source.to_str().map(String::from),
        };

        Ok(Arc::new(DefaultModuleBundle {
            _mapping: mapping,
            info,
        }))
    }
}
