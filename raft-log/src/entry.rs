//! Log entry types.
//!
//! Each log entry carries an election [`term`](`Entry::term`), a
//! client-assigned [`id`](`Entry::id`), a [`kind`](`Entry::kind`) describing
//! what the entry does to the cluster, and an opaque payload interpreted only
//! by the application state machine (and, for configuration entries, by the
//! host's node-id extraction).

use std::fmt;

/// Classifies what a log entry does when it is applied.
///
/// Kinds other than [`Normal`](`EntryKind::Normal`) alter the cluster
/// configuration. The kinds that grant or revoke a vote are further
/// restricted: at most one of them may be in flight in the log at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum EntryKind {
    /// Application data for the state machine.
    #[default]
    Normal,

    /// Add a node that receives the log but has no vote.
    AddNonVotingNode,

    /// Add a voting member.
    AddNode,

    /// Revoke a member's vote, keeping it as a non-voting node.
    DemoteNode,

    /// Remove a node from the cluster.
    RemoveNode,
}

impl EntryKind {
    /// Whether applying an entry of this kind changes the cluster
    /// configuration.
    pub fn is_config_change(&self) -> bool {
        !matches!(self, EntryKind::Normal)
    }

    /// Whether applying an entry of this kind changes the voting
    /// configuration.
    pub fn is_voting_change(&self) -> bool {
        matches!(
            self,
            EntryKind::AddNode | EntryKind::DemoteNode | EntryKind::RemoveNode
        )
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntryKind::Normal => "normal",
            EntryKind::AddNonVotingNode => "add-non-voting-node",
            EntryKind::AddNode => "add-node",
            EntryKind::DemoteNode => "demote-node",
            EntryKind::RemoveNode => "remove-node",
        };
        f.write_str(name)
    }
}

/// A single replicated log entry.
///
/// An entry is immutable once it is visible in the log, with one exception:
/// during [`LogHost::on_offer`](`crate::host::LogHost::on_offer`) the host may
/// replace the payload to relocate the bytes into its own durable buffers.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Entry {
    /// The election term in which the entry was created.
    ///
    /// Terms are non-decreasing along the log.
    pub term: u64,

    /// Client-assigned identifier, unique per entry in a well-formed client
    /// stream.
    pub id: u64,

    /// What the entry does when applied.
    pub kind: EntryKind,

    /// Opaque application payload.
    pub payload: Vec<u8>,
}

impl Entry {
    /// Create a [`Normal`](`EntryKind::Normal`) entry.
    pub fn new(term: u64, id: u64, payload: Vec<u8>) -> Self {
        Self::with_kind(EntryKind::Normal, term, id, payload)
    }

    /// Create an entry of an explicit kind.
    pub fn with_kind(kind: EntryKind, term: u64, id: u64, payload: Vec<u8>) -> Self {
        Self {
            term,
            id,
            kind,
            payload,
        }
    }

    /// Whether this entry changes the cluster configuration.
    pub fn is_config_change(&self) -> bool {
        self.kind.is_config_change()
    }

    /// Whether this entry changes the voting configuration.
    pub fn is_voting_change(&self) -> bool {
        self.kind.is_voting_change()
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}(term:{}, id:{}, {}B)",
            self.kind,
            self.term,
            self.id,
            self.payload.len()
        )
    }
}
