//! `ModKit` wiring: registers a [`DataLoaderClient`] in the host's
//! `ClientHub`.

use std::sync::Arc;

use async_trait::async_trait;
use data_loader_sdk::{DataLoaderClient, PackageParser};
use modkit::context::ModuleCtx;
use tokio::sync::RwLock;

use crate::client::LocalDataLoaderClient;
use crate::default_parser::DefaultPackageParser;
use crate::loader::DataLoader;

/// Configuration for the data-loader module.
///
/// The core introduces no configuration surface of its own: package format,
/// install locations, and priorities all travel on each
/// [`data_loader_sdk::Request`].
#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct DataLoaderModuleConfig;

/// System module that dedups and single-flights data-package reloads,
/// publishing a [`DataLoaderClient`] for other in-process modules to resolve
/// from the `ClientHub`.
pub struct DataLoaderModule {
    config: RwLock<DataLoaderModuleConfig>,
    loader: Arc<DataLoader>,
}

impl DataLoaderModule {
    /// Builds the module around an explicit downstream parser.
    #[must_use]
    pub fn with_parser(parser: Arc<dyn PackageParser>) -> Self {
        Self {
            config: RwLock::new(DataLoaderModuleConfig),
            loader: Arc::new(DataLoader::new(parser)),
        }
    }
}

impl Default for DataLoaderModule {
    fn default() -> Self {
        Self::with_parser(Arc::new(DefaultPackageParser))
    }
}

#[async_trait]
impl modkit::Module for DataLoaderModule {
    async fn init(&self, ctx: &ModuleCtx) -> anyhow::Result<()> {
        let cfg = ctx.config::<DataLoaderModuleConfig>().unwrap_or_default();
        *self.config.write().await = cfg;

        let client: Arc<dyn DataLoaderClient> = Arc::new(LocalDataLoaderClient::new(Arc::clone(&self.loader)));
        ctx.client_hub().register::<dyn DataLoaderClient>(client);

        tracing::info!("data_loader module initialized");
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
