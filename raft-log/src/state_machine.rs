//! The state-machine capability supplied by the embedder.

use crate::entry::Entry;
use crate::error::Shutdown;

/// The application state machine that committed entries are applied to.
pub trait StateMachine {
    /// Apply a committed entry.
    ///
    /// Must be deterministic given the entry sequence: replicas applying the
    /// same entries in the same order reach the same state.
    ///
    /// Returning [`Shutdown`] stops the apply loop. The entry still counts as
    /// attempted and is not retried.
    fn apply(&mut self, entry: &Entry, idx: u64) -> Result<(), Shutdown>;
}
