//! Error types exposed by this crate.
//!
//! Each failure mode is a small struct carrying the indices that explain it;
//! per-operation errors are enums over those structs. All errors are ordinary
//! return values, none of them unwinds.

/// The host or the state machine asked the server to shut down.
///
/// Propagated verbatim to the caller, which is expected to tear down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[error("shutdown requested")]
pub struct Shutdown {}

/// A voting-configuration change was offered while another one is in flight.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[error("a voting-configuration change is already in progress at log index {at}")]
pub struct ChangeInProgress {
    /// Index of the pending voting-configuration entry.
    pub at: u64,
}

/// An attempt was made to truncate at or below the commit index.
///
/// A committed entry must never be removed; hitting this error is a bug in
/// the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[error("refusing to truncate from {idx}: entries up to {committed} are committed")]
pub struct Committed {
    /// The requested truncation index.
    pub idx: u64,

    /// The current commit index.
    pub committed: u64,
}

/// There is no committed-but-unapplied entry.
///
/// Benign; terminates the apply loop.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[error("nothing to apply: applied {applied} of {committed} committed entries")]
pub struct NothingToApply {
    /// The last-applied index.
    pub applied: u64,

    /// The commit index.
    pub committed: u64,
}

/// Errors returned when offering an entry to the log.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, derive_more::TryInto)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum AppendError {
    #[error(transparent)]
    ChangeInProgress(#[from] ChangeInProgress),

    #[error(transparent)]
    Shutdown(#[from] Shutdown),
}

/// Errors returned when applying committed entries to the state machine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, derive_more::TryInto)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum ApplyError {
    #[error(transparent)]
    NothingToApply(#[from] NothingToApply),

    #[error(transparent)]
    Shutdown(#[from] Shutdown),
}

/// Errors returned when truncating the log tail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, derive_more::TryInto)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum TruncateError {
    #[error(transparent)]
    Committed(#[from] Committed),
}
