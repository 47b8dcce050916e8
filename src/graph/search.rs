//! Per-traversal bookkeeping: visited identities and pending work.

use std::collections::VecDeque;

use crate::types::{Identity, NodeHandle, UNINITIALIZED};

/// Transient state owned by one top-level traversal call.
///
/// Membership uses a running `[min_seen, max_seen]` window: identities
/// outside it are new by construction, identities on its edges have already
/// been seen, and only strictly interior identities fall back to a scan of
/// `visited`. Identities above [`MAX_IDENTITY`](crate::types::MAX_IDENTITY)
/// are never presented, so the window bounds always name recorded identities.
#[derive(Debug)]
pub struct SearchState {
    visited: Vec<Identity>,
    pending: VecDeque<NodeHandle>,
    min_seen: Identity,
    max_seen: Identity,
}

impl SearchState {
    /// Fresh state with nothing visited.
    pub fn new() -> Self {
        Self {
            visited: Vec::new(),
            pending: VecDeque::new(),
            min_seen: UNINITIALIZED,
            max_seen: 0,
        }
    }

    /// Records `id` and returns `true` the first time it is seen, `false` after.
    pub fn test_and_record(&mut self, id: Identity) -> bool {
        if id > self.max_seen {
            self.max_seen = id;
            if id < self.min_seen {
                self.min_seen = id;
            }
        } else if id < self.min_seen {
            self.min_seen = id;
        } else if id == self.max_seen || id == self.min_seen {
            return false;
        } else if self.visited.contains(&id) {
            return false;
        }
        log::trace!("search: recorded identity {}", id);
        self.visited.push(id);
        true
    }

    /// Whether `id` has been recorded, without recording it.
    pub fn is_visited(&self, id: Identity) -> bool {
        self.visited.contains(&id)
    }

    /// Number of identities recorded so far.
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Smallest identity recorded, or `UNINITIALIZED` if none.
    pub fn min_seen(&self) -> Identity {
        self.min_seen
    }

    /// Largest identity recorded, or 0 if none.
    pub fn max_seen(&self) -> Identity {
        self.max_seen
    }

    pub(crate) fn enqueue(&mut self, handle: NodeHandle) {
        self.pending.push_back(handle);
    }

    pub(crate) fn dequeue(&mut self) -> Option<NodeHandle> {
        self.pending.pop_front()
    }

    /// Number of nodes waiting to be expanded.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new()
    }
}
