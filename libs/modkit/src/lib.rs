//! Core module-system primitives: lifecycle traits, typed client registry,
//! module-scoped context and configuration access.

pub mod client_hub;
pub mod config;
pub mod context;
pub mod contracts;
pub mod domain;

pub use client_hub::{ClientHub, ClientHubError};
pub use config::{module_config_or_default, module_config_required, ConfigError, ConfigProvider};
pub use context::{ModuleContextBuilder, ModuleCtx};
pub use contracts::{Module, StatefulModule};
