//! Single-flight async build scheduling.

use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwap;
use data_loader_sdk::{Fingerprint, Request, Response, ResponseFuture, ResponseStatus};
use parking_lot::Mutex;
use tokio::sync::watch;

use crate::package_loader::{LoadOutcome, PackageLoader};
use crate::registry::RequestRegistry;

enum Slot {
    Cached(Response),
    InFlight(watch::Receiver<Option<Response>>),
}

type SlotMap = Mutex<HashMap<Fingerprint, Slot>>;

/// Builds data packages with dedup: concurrent `build` calls for the same
/// fingerprint share one background task and one result, and a finished
/// build's result is cached so later callers never wait on it again.
pub struct BuildOrchestrator {
    loader: Arc<PackageLoader>,
    slots: ArcSwap<SlotMap>,
}

impl BuildOrchestrator {
    #[must_use]
    pub fn new(loader: Arc<PackageLoader>) -> Self {
        Self {
            loader,
            slots: ArcSwap::from_pointee(Mutex::new(HashMap::new())),
        }
    }

    /// Starts or joins the build for `id`.
    ///
    /// `registry` is consulted first, before any cache or in-flight lookup:
    /// an `id` with no eligible entry (never registered, or registered then
    /// reported as a load failure) returns `DATA_MISSING` immediately
    /// without touching the cache, per spec step 1. Only once `id` is
    /// confirmed eligible does this fall through to the cache/pending
    /// lookup of step 2.
    pub fn build(&self, id: Fingerprint, registry: &RequestRegistry) -> ResponseFuture {
        if id.is_none() {
            return ResponseFuture::ready(Response::data_missing(id));
        }

        let Some(request) = registry.get(id) else {
            return ResponseFuture::ready(Response::data_missing(id));
        };

        let slots = self.slots.load_full();
        let mut guard = slots.lock();
        match guard.get(&id) {
            Some(Slot::Cached(response)) => return ResponseFuture::ready(response.clone()),
            Some(Slot::InFlight(receiver)) => {
                tracing::debug!(fingerprint = %id, "joining in-flight data package build");
                return ResponseFuture::pending(receiver.clone());
            }
            None => {}
        }

        let (sender, receiver) = watch::channel(None);
        guard.insert(id, Slot::InFlight(receiver.clone()));
        drop(guard);

        self.spawn_build(id, request, sender, slots);
        ResponseFuture::pending(receiver)
    }

    /// Drops every cached result and in-flight subscription by swapping in a
    /// fresh, empty slot map.
    ///
    /// A build already spawned keeps running to completion, but it was
    /// handed the slot map that was live at the moment it started: once
    /// `clear()` swaps that map out, the build's eventual completion writes
    /// into the orphaned old map instead of resurrecting a cache entry in
    /// the live one, so a caller who cleared specifically to force a fresh
    /// reload never observes a stale cached result for that fingerprint.
    pub fn clear(&self) {
        self.slots.store(Arc::new(Mutex::new(HashMap::new())));
    }

    fn spawn_build(&self, id: Fingerprint, request: Request, sender: watch::Sender<Option<Response>>, slots: Arc<SlotMap>) {
        let loader = Arc::clone(&self.loader);
        tokio::spawn(async move {
            let response = run_build(loader, id, request).await;
            slots.lock().insert(id, Slot::Cached(response.clone()));
            let _ = sender.send(Some(response));
        });
    }
}

async fn run_build(loader: Arc<PackageLoader>, id: Fingerprint, request: Request) -> Response {
    let blocking_request = request.clone();
    let outcome = tokio::task::spawn_blocking(move || loader.load(&blocking_request)).await;

    match outcome {
        Ok(LoadOutcome::Ready(bundle)) => Response::ready(request, bundle).with_id(id),
        Ok(LoadOutcome::Broken(_)) => Response::terminal(ResponseStatus::DataBroken, request).with_id(id),
        Ok(LoadOutcome::MmapFailed(_)) => Response::terminal(ResponseStatus::MmapFailure, request).with_id(id),
        Ok(LoadOutcome::InstallFailed(_)) => Response::terminal(ResponseStatus::InstallFailure, request).with_id(id),
        Err(join_error) => {
            // The blocking worker panicked; surface a terminal failure
            // instead of leaving every subscriber waiting forever.
            tracing::warn!(fingerprint = %id, error = %join_error, "data package build panicked; reporting as broken");
            Response::terminal(ResponseStatus::DataBroken, request).with_id(id)
        }
    }
}
