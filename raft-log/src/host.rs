//! The durability capability supplied by the embedder.

use byteorder::BigEndian;
use byteorder::ReadBytesExt;

use crate::entry::Entry;
use crate::error::Shutdown;

/// Identifies a member of the cluster.
pub type NodeId = u64;

/// Durability and membership callbacks issued by the log.
///
/// The log invokes these synchronously while it mutates; they may block on
/// I/O but must not call back into the log. Every method has a default, so an
/// embedder implements only the callbacks it needs.
///
/// The callback sequence is a valid linearization of log mutations: a host
/// that replays offers, polls and pops in order reconstructs the same log.
pub trait LogHost {
    /// Called with the entry about to be appended at `idx`, before it becomes
    /// visible in the log.
    ///
    /// The implementation must durably persist the entry before returning
    /// `Ok`. It may replace `entry.payload` to move the bytes into its own
    /// durable buffers. Returning [`Shutdown`] refuses the append and leaves
    /// the log untouched.
    fn on_offer(&mut self, _entry: &mut Entry, _idx: u64) -> Result<(), Shutdown> {
        Ok(())
    }

    /// Called with the head entry at `idx` before it is removed by a poll.
    ///
    /// The implementation must durably record the new base. Once this
    /// returns, the log drops its reference to the entry.
    fn on_poll_head(&mut self, _entry: &Entry, _idx: u64) {}

    /// Called with the tail entry at `idx` before it is removed by a pop.
    ///
    /// The implementation must durably truncate. Once this returns, the log
    /// drops its reference to the entry.
    fn on_pop_tail(&mut self, _entry: &Entry, _idx: u64) {}

    /// Extract the node id a configuration entry affects.
    ///
    /// Must be a pure function of the entry. The default decodes a big-endian
    /// `u64` prefix of the payload; hosts with a different payload encoding
    /// override it.
    fn node_id_of(&self, entry: &Entry, _idx: u64) -> NodeId {
        let mut payload = &entry.payload[..];
        payload.read_u64::<BigEndian>().unwrap_or(0)
    }

    /// Notified after an [`AddNode`](`crate::entry::EntryKind::AddNode`)
    /// entry has been applied, with the node id extracted by
    /// [`node_id_of`](`LogHost::node_id_of`).
    fn on_node_added(&mut self, _node: NodeId, _idx: u64) {}
}
