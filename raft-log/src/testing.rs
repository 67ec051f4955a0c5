//! Test doubles and entry fixtures.

use crate::entry::Entry;
use crate::entry::EntryKind;
use crate::error::Shutdown;
use crate::host::LogHost;
use crate::host::NodeId;
use crate::state_machine::StateMachine;

/// A normal entry with an empty payload.
pub fn blank(term: u64, id: u64) -> Entry {
    Entry::new(term, id, Vec::new())
}

/// A configuration entry whose payload encodes `node` the way the default
/// [`LogHost::node_id_of`] expects.
pub fn config(kind: EntryKind, term: u64, id: u64, node: NodeId) -> Entry {
    Entry::with_kind(kind, term, id, node.to_be_bytes().to_vec())
}

/// A host that records every callback the log issues, and can inject
/// failures.
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    /// `(id, idx)` of every offered entry, in offer order.
    pub offered: Vec<(u64, u64)>,

    /// `(id, idx)` of every popped tail entry, in pop order.
    pub popped: Vec<(u64, u64)>,

    /// `(id, idx)` of every polled head entry, in poll order.
    pub polled: Vec<(u64, u64)>,

    /// `(node, idx)` reported through `on_node_added`.
    pub added: Vec<(NodeId, u64)>,

    /// Refuse every offer with [`Shutdown`].
    pub refuse_offers: bool,

    /// Replace each offered payload, the way a host relocating entry bytes
    /// into durable buffers would.
    pub relocate_payload: Option<Vec<u8>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LogHost for RecordingHost {
    fn on_offer(&mut self, entry: &mut Entry, idx: u64) -> Result<(), Shutdown> {
        if self.refuse_offers {
            return Err(Shutdown {});
        }
        if let Some(payload) = &self.relocate_payload {
            entry.payload = payload.clone();
        }
        self.offered.push((entry.id, idx));
        Ok(())
    }

    fn on_poll_head(&mut self, entry: &Entry, idx: u64) {
        self.polled.push((entry.id, idx));
    }

    fn on_pop_tail(&mut self, entry: &Entry, idx: u64) {
        self.popped.push((entry.id, idx));
    }

    fn on_node_added(&mut self, node: NodeId, idx: u64) {
        self.added.push((node, idx));
    }
}

/// A state machine that records applied entries, and can inject a shutdown
/// at a chosen index.
#[derive(Debug, Clone, Default)]
pub struct RecordingStateMachine {
    /// `(id, idx)` of every applied entry, in apply order.
    pub applied: Vec<(u64, u64)>,

    /// Return [`Shutdown`] when asked to apply this index.
    pub shutdown_at: Option<u64>,
}

impl RecordingStateMachine {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateMachine for RecordingStateMachine {
    fn apply(&mut self, entry: &Entry, idx: u64) -> Result<(), Shutdown> {
        if self.shutdown_at == Some(idx) {
            return Err(Shutdown {});
        }
        self.applied.push((entry.id, idx));
        Ok(())
    }
}
