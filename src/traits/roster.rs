//! Peer display-name lookup.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Resolves a peer id to a human-readable display name.
pub trait Roster: Send + Sync {
    fn display_name(&self, peer_id: &str) -> Option<String>;
}

/// In-memory roster that can be updated while the panel runs.
///
/// Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct SharedRoster {
    names: Arc<RwLock<HashMap<String, String>>>,
}

impl SharedRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or overwrite the name of a peer.
    pub fn insert(&self, peer_id: impl Into<String>, name: impl Into<String>) {
        if let Ok(mut names) = self.names.write() {
            names.insert(peer_id.into(), name.into());
        }
    }

    /// Forget a peer.
    pub fn remove(&self, peer_id: &str) {
        if let Ok(mut names) = self.names.write() {
            names.remove(peer_id);
        }
    }

    /// Replace every entry.
    pub fn replace<I>(&self, entries: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        if let Ok(mut names) = self.names.write() {
            *names = entries.into_iter().collect();
        }
    }

    pub fn len(&self) -> usize {
        self.names.read().map(|n| n.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Roster for SharedRoster {
    fn display_name(&self, peer_id: &str) -> Option<String> {
        self.names.read().ok()?.get(peer_id).cloned()
    }
}
