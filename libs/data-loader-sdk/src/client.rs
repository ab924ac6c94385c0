//! In-process client interface registered in the host's `ClientHub`.

use crate::future::ResponseFuture;
use crate::model::{Fingerprint, Request};

/// Facade other modules resolve from the `ClientHub` to drive reloads.
///
/// Every method here dispatches synchronously into the registry or
/// orchestrator; the only awaiting consumers ever do is on the
/// [`ResponseFuture`] a `build` call returns.
pub trait DataLoaderClient: Send + Sync {
    /// Registers or refreshes a reload request, returning the fingerprint of
    /// the current top-priority pending request.
    fn register_request(&self, request: Request) -> Fingerprint;

    /// Marks `id` as unable to load and returns the fingerprint of the new
    /// top-priority pending request.
    fn report_load_failure(&self, id: Fingerprint) -> Fingerprint;

    /// Starts (or joins) the build for `id`.
    fn build(&self, id: Fingerprint) -> ResponseFuture;

    /// Drops every pending registration and cached result.
    fn clear(&self);
}
