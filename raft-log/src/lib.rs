//! The replicated-log core of a Raft consensus server.
//!
//! This crate holds the part of Raft that carries the consensus safety
//! invariants: an append-only sequence of entries with a logical base offset,
//! and the commit/apply pipeline that feeds committed entries into the
//! application state machine.
//!
//! - [`LogStore`]: the ordered entry sequence. Append, tail pop, head poll,
//!   index lookup; 1-based logical indices that survive head truncation.
//! - [`LogCommitter`]: owns a [`LogStore`] and adds the commit index, the
//!   last-applied index and the voting-configuration-change gate (at most one
//!   voting change in flight).
//!
//! The core has no I/O of its own. Durability is delegated to the embedder
//! through the [`LogHost`] capability, whose callbacks fire synchronously at
//! each entry lifetime transition; deterministic application goes through
//! [`StateMachine`]. Both are passed into each call that may invoke them, so
//! the log holds no reference to the enclosing server.
//!
//! The core is single-writer: the enclosing server loop serializes all
//! mutating calls, and there is no internal locking and no async surface.
//! Embedding in an async runtime is the caller's concern.

#![deny(unused_qualifications)]
#![allow(clippy::uninlined_format_args)]

mod display_ext;

pub mod committer;
pub mod entry;
pub mod error;
pub mod host;
pub mod log_store;
pub mod state_machine;
pub mod testing;

pub use crate::committer::LogCommitter;
pub use crate::entry::Entry;
pub use crate::entry::EntryKind;
pub use crate::error::AppendError;
pub use crate::error::ApplyError;
pub use crate::error::ChangeInProgress;
pub use crate::error::Committed;
pub use crate::error::NothingToApply;
pub use crate::error::Shutdown;
pub use crate::error::TruncateError;
pub use crate::host::LogHost;
pub use crate::host::NodeId;
pub use crate::log_store::LogStore;
pub use crate::state_machine::StateMachine;
