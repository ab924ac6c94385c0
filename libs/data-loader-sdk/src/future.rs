//! Handle consumers use to await the outcome of a build.

use tokio::sync::watch;

use crate::model::Response;

/// Error returned by [`ResponseFuture::get`] when no result is available yet.
#[derive(Debug, thiserror::Error)]
#[error("response not ready")]
pub struct NotReadyError;

enum FutureState {
    Pending(watch::Receiver<Option<Response>>),
    Ready(Response),
}

/// A single-shot handle to the outcome of one [`crate::model::Fingerprint`]
/// build.
///
/// Every caller that asked to build the same fingerprint while a build was
/// already in flight receives a clone of the same underlying broadcast, so
/// they all observe the one result once it lands.
pub struct ResponseFuture {
    state: FutureState,
}

impl ResponseFuture {
    #[must_use]
    pub fn ready(response: Response) -> Self {
        Self {
            state: FutureState::Ready(response),
        }
    }

    #[must_use]
    pub fn pending(receiver: watch::Receiver<Option<Response>>) -> Self {
        Self {
            state: FutureState::Pending(receiver),
        }
    }

    /// Returns `true` if a result is already available without blocking.
    pub fn is_ready(&mut self) -> bool {
        self.poll_ready();
        matches!(self.state, FutureState::Ready(_))
    }

    /// Returns the result if already available, without blocking.
    ///
    /// # Errors
    ///
    /// Returns [`NotReadyError`] if the build is still in flight.
    pub fn get(&mut self) -> Result<&Response, NotReadyError> {
        self.poll_ready();
        match &self.state {
            FutureState::Ready(response) => Ok(response),
            FutureState::Pending(_) => Err(NotReadyError),
        }
    }

    /// Waits for the build to complete and returns the result.
    ///
    /// # Panics
    ///
    /// Panics if the build's sender is dropped without ever publishing a
    /// result, which would indicate a bug in [`crate::PackageParser`]'s
    /// caller rather than a condition callers need to handle.
    pub async fn wait(&mut self) -> &Response {
        if let FutureState::Pending(receiver) = &mut self.state {
            loop {
                if receiver.borrow().is_some() {
                    break;
                }
                // The sender side is only ever dropped after it has sent a
                // value, so `changed()` failing here would be a bug in the
                // orchestrator rather than a real race to handle.
                if receiver.changed().await.is_err() {
                    break;
                }
            }
            let response = receiver.borrow().clone();
            if let Some(response) = response {
                self.state = FutureState::Ready(response);
            }
        }
        match &self.state {
            FutureState::Ready(response) => response,
            FutureState::Pending(_) => unreachable_pending(),
        }
    }

    fn poll_ready(&mut self) {
        if let FutureState::Pending(receiver) = &mut self.state {
            if let Some(response) = receiver.borrow().clone() {
                self.state = FutureState::Ready(response);
            }
        }
    }
}

#[cold]
fn unreachable_pending() -> &'static Response {
    // `wait` only returns after observing `Some` on the channel and storing
    // it as `Ready`; this branch exists so the match stays exhaustive.
    panic!("ResponseFuture::wait resolved without a response")
}
