//! Deduplicated, priority-ordered table of pending reload requests.

use std::collections::HashMap;

use data_loader_sdk::{Fingerprint, Request};
use parking_lot::Mutex;

use crate::fingerprint::fingerprint;

struct Entry {
    request: Request,
    /// Monotonically increasing registration order; breaks priority ties in
    /// favor of the most recently (re-)registered entry.
    seq: u64,
    registered: bool,
}

/// Tracks every live reload request, deduplicated by [`Fingerprint`] and
/// ranked by `priority` (lower numeric value wins), most-recent-first among
/// equal priorities.
pub struct RequestRegistry {
    inner: Mutex<Inner>,
}

struct Inner {
    entries: HashMap<Fingerprint, Entry>,
    next_seq: u64,
}

impl RequestRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                next_seq: 0,
            }),
        }
    }

    /// Registers `request`, overwriting any existing entry with the same
    /// fingerprint, and returns the fingerprint of the current top entry.
    pub fn register(&self, request: Request) -> Fingerprint {
        let id = fingerprint(&request);
        let mut inner = self.inner.lock();
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.entries.insert(
            id,
            Entry {
                request,
                seq,
                registered: true,
            },
        );
        inner.top()
    }

    /// Marks `id` as unregistered (it failed to load) and returns the
    /// fingerprint of the new top entry.
    ///
    /// A fingerprint with no matching entry is a no-op: it just reports the
    /// current top.
    pub fn report_failure(&self, id: Fingerprint) -> Fingerprint {
        let mut inner = self.inner.lock();
        if let Some(entry) = inner.entries.get_mut(&id) {
            entry.registered = false;
        }
        inner.top()
    }

    /// Looks up the request behind `id`, if it is still a registered entry.
    #[must_use]
    pub fn get(&self, id: Fingerprint) -> Option<Request> {
        let inner = self.inner.lock();
        inner
            .entries
            .get(&id)
            .filter(|entry| entry.registered)
            .map(|entry| entry.request.clone())
    }

    /// Drops every tracked entry.
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.entries.clear();
    }
}

impl Default for RequestRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Inner {
    fn top(&self) -> Fingerprint {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.registered)
            .max_by(|(_, a), (_, b)| a.request.priority.cmp(&b.request.priority).reverse().then(a.seq.cmp(&b.seq)))
            .map_or(Fingerprint::NONE, |(id, _)| *id)
    }
}
