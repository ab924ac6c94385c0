//! Top-level facade wiring the registry, loader, and orchestrator together.

use std::sync::Arc;

use data_loader_sdk::{Fingerprint, PackageParser, Request, ResponseFuture};

use crate::orchestrator::BuildOrchestrator;
use crate::package_loader::PackageLoader;
use crate::registry::RequestRegistry;

/// Owns the full request-dedup-and-build pipeline for one kind of data
/// package.
///
/// Cheap to share: every field is internally synchronized, so a single
/// `DataLoader` (wrapped in `Arc`) is meant to back every
/// [`data_loader_sdk::DataLoaderClient`] handed out for its package kind.
pub struct DataLoader {
    registry: RequestRegistry,
    orchestrator: BuildOrchestrator,
}

impl DataLoader {
    #[must_use]
    pub fn new(parser: Arc<dyn PackageParser>) -> Self {
        Self {
            registry: RequestRegistry::new(),
            orchestrator: BuildOrchestrator::new(Arc::new(PackageLoader::new(parser))),
        }
    }

    /// Registers or refreshes `request`, returning the fingerprint of the
    /// current top-priority pending request.
    pub fn register_request(&self, request: Request) -> Fingerprint {
        self.registry.register(request)
    }

    /// Marks `id` as unable to load, returning the fingerprint of the new
    /// top-priority pending request.
    pub fn report_load_failure(&self, id: Fingerprint) -> Fingerprint {
        self.registry.report_failure(id)
    }

    /// Starts (or joins) the build for `id`.
    pub fn build(&self, id: Fingerprint) -> ResponseFuture {
        self.orchestrator.build(id, &self.registry)
    }

    /// Drops every pending registration, cached result, and in-flight
    /// subscription.
    pub fn clear(&self) {
        self.registry.clear();
        self.orchestrator.clear();
    }
}
