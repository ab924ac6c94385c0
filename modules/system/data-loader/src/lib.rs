#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! System module that loads and hot-swaps IME data packages.
//!
//! Dedupes competing reload requests by content fingerprint, ranks them by
//! priority, and builds the winning one on a background task with
//! single-flight semantics: concurrent `build` calls for the same
//! fingerprint share one in-flight load instead of racing each other.

pub mod client;
pub mod default_parser;
pub mod fingerprint;
pub mod loader;
pub mod module;
pub mod orchestrator;
pub mod package_loader;
pub mod registry;

pub use client::LocalDataLoaderClient;
pub use default_parser::DefaultPackageParser;
pub use fingerprint::fingerprint;
pub use loader::DataLoader;
pub use module::{DataLoaderModule, DataLoaderModuleConfig};
pub use orchestrator::BuildOrchestrator;
pub use package_loader::PackageLoader;
pub use registry::RequestRegistry;
