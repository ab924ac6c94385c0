//! Deterministic request identity.

use data_loader_sdk::{Fingerprint, Request};
use xxhash_rust::xxh3::xxh3_64;

/// Derives a [`Fingerprint`] from the canonical byte image of `request`.
///
/// Every field of `request`, including `priority`, participates: two
/// requests that differ only in priority hash to different fingerprints, so
/// re-registering the same package at a new priority creates a new, tracked
/// registry entry rather than mutating the old one.
#[must_use]
pub fn fingerprint(request: &Request) -> Fingerprint {
    // `Request`'s fields are all trivially serializable; falling back to the
    // `Debug` image keeps this function infallible without panicking.
    let bytes = serde_json::to_vec(request).unwrap_or_else(|_| format!("{request:?}").into_bytes());
    let hash = xxh3_64(&bytes);
    // Fingerprint::NONE (0) is reserved for "no request"; collapse the one
    // in 2^64 collision onto an adjacent value rather than ever emitting it.
    Fingerprint(if hash == 0 { 1 } else { hash })
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader_sdk::EngineType;

    fn request(priority: i32) -> Request {
        Request::new(EngineType::Desktop, "/tmp/foo.data", "MOCK", priority)
    }

    #[test]
    fn identical_requests_fingerprint_identically() {
        assert_eq!(fingerprint(&request(0)), fingerprint(&request(0)));
    }

    #[test]
    fn priority_changes_the_fingerprint() {
        assert_ne!(fingerprint(&request(0)), fingerprint(&request(5)));
    }

    #[test]
    fn path_changes_the_fingerprint() {
        let a = Request::new(EngineType::Desktop, "/tmp/a.data", "MOCK", 0);
        let b = Request::new(EngineType::Desktop, "/tmp/b.data", "MOCK", 0);
        assert_ne!(fingerprint(&a), fingerprint(&b));
    }

    #[test]
    fn never_returns_none() {
        assert!(!fingerprint(&request(0)).is_none());
    }
}
