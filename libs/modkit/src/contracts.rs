use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Core module: DI/wiring; do not rely on any particular backend here.
#[async_trait]
pub trait Module: Send + Sync + 'static {
    async fn init(&self, ctx: &crate::context::ModuleCtx) -> anyhow::Result<()>;
    fn as_any(&self) -> &dyn std::any::Any;
}

/// Module with a background lifecycle driven by the host runtime.
#[async_trait]
pub trait StatefulModule: Send + Sync {
    async fn start(&self, cancel: CancellationToken) -> anyhow::Result<()>;
    async fn stop(&self, cancel: CancellationToken) -> anyhow::Result<()>;
}
