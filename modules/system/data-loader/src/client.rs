//! `ClientHub`-facing implementation of [`DataLoaderClient`].

use std::sync::Arc;

use data_loader_sdk::{DataLoaderClient, Fingerprint, Request, ResponseFuture};

use crate::loader::DataLoader;

/// Thin, in-process [`DataLoaderClient`] that dispatches straight into a
/// shared [`DataLoader`].
pub struct LocalDataLoaderClient {
    loader: Arc<DataLoader>,
}

impl LocalDataLoaderClient {
    #[must_use]
    pub fn new(loader: Arc<DataLoader>) -> Self {
        Self { loader }
    }
}

impl DataLoaderClient for LocalDataLoaderClient {
    fn register_request(&self, request: Request) -> Fingerprint {
        self.loader.register_request(request)
    }

    fn report_load_failure(&self, id: Fingerprint) -> Fingerprint {
        self.loader.report_load_failure(id)
    }

    fn build(&self, id: Fingerprint) -> ResponseFuture {
        self.loader.build(id)
    }

    fn clear(&self) {
        self.loader.clear();
    }
}
