//! The commit/apply pipeline over the log store.
//!
//! [`LogCommitter`] tracks two monotone counters and one optional in-flight
//! marker over the log it owns:
//!
//! ```text
//! | log indices
//! | *------------+--------------------+----------------+---------------->
//! |              |                    |                `--- current_idx()
//! |              |                    `-- commit_idx
//! |              `-- last_applied_idx
//! |
//! | applied to the state machine ≤ replicated on a majority ≤ appended
//! ```
//!
//! Commit advances under external authority (the replication layer's
//! majority match); apply lags commit. An entry becomes visible in the log
//! only after the host has durably persisted it, so the committer never
//! applies an un-durable entry.
//!
//! The core is single-writer: the enclosing server loop serializes every
//! mutating call. Host and state-machine callbacks are synchronous and must
//! not re-enter the committer.

use std::cmp::min;
use std::error::Error;
use std::ops::Deref;

use validit::less_equal;
use validit::Valid;
use validit::Validate;

use crate::display_ext::DisplayOptionExt;
use crate::entry::Entry;
use crate::entry::EntryKind;
use crate::error::AppendError;
use crate::error::ApplyError;
use crate::error::ChangeInProgress;
use crate::error::Committed;
use crate::error::NothingToApply;
use crate::error::TruncateError;
use crate::host::LogHost;
use crate::log_store::LogStore;
use crate::state_machine::StateMachine;

#[cfg(test)]
mod validate_test;

/// Commit and apply state over an exclusively owned [`LogStore`].
///
/// Read-only log queries are reachable through `Deref<Target = LogStore>`;
/// mutations go through the committer so that the commit gate and the
/// voting-change gate cannot be bypassed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogCommitter {
    log: Valid<LogStore>,

    /// Highest index known to be replicated on a majority.
    ///
    /// Monotone; `last_applied_idx <= commit_idx <= current_idx()`.
    commit_idx: u64,

    /// Highest index handed to the state machine.
    ///
    /// Monotone; reflects "attempted", not "succeeded": it advances before
    /// the state machine runs.
    last_applied_idx: u64,

    /// Index of the in-flight voting-configuration entry.
    ///
    /// Cleared when that index is applied or the entry is truncated. While
    /// set, further voting-configuration changes are refused.
    voting_change_idx: Option<u64>,
}

impl Default for LogCommitter {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for LogCommitter {
    type Target = LogStore;

    fn deref(&self) -> &Self::Target {
        &self.log
    }
}

impl LogCommitter {
    pub fn new() -> Self {
        Self {
            log: Valid::new(LogStore::new()),
            commit_idx: 0,
            last_applied_idx: 0,
            voting_change_idx: None,
        }
    }

    /// Highest index known to be replicated on a majority.
    pub fn commit_idx(&self) -> u64 {
        self.commit_idx
    }

    /// Highest index handed to the state machine.
    pub fn last_applied_idx(&self) -> u64 {
        self.last_applied_idx
    }

    /// Index of the in-flight voting-configuration entry, if any.
    pub fn voting_change_idx(&self) -> Option<u64> {
        self.voting_change_idx
    }

    pub fn voting_change_in_progress(&self) -> bool {
        self.voting_change_idx.is_some()
    }

    /// Whether `idx` is known to be replicated on a majority.
    pub fn is_committed(&self, idx: u64) -> bool {
        idx <= self.commit_idx
    }

    /// Whether committed entries are still waiting to be applied.
    pub fn has_unapplied(&self) -> bool {
        self.last_applied_idx < self.commit_idx
    }

    /// Offer `entry` to the host and append it at `current_idx() + 1`.
    ///
    /// A voting-configuration change is refused while another one is in
    /// flight. The host persists the entry before it becomes visible and may
    /// relocate its payload; a [`Shutdown`](`crate::error::Shutdown`) from
    /// the host leaves the committer untouched.
    ///
    /// Returns the index assigned to the entry.
    pub fn append_entry<H>(&mut self, host: &mut H, mut entry: Entry) -> Result<u64, AppendError>
    where H: LogHost {
        let idx = self.log.current_idx() + 1;
        let is_voting_change = entry.kind.is_voting_change();

        if is_voting_change {
            if let Some(at) = self.voting_change_idx {
                return Err(ChangeInProgress { at }.into());
            }
            self.voting_change_idx = Some(idx);
        }

        if let Err(e) = host.on_offer(&mut entry, idx) {
            // The entry never became visible.
            if is_voting_change {
                self.voting_change_idx = None;
            }
            return Err(e.into());
        }

        self.log.append(entry);

        tracing::debug!(
            idx = display(idx),
            voting_change_idx = display(self.voting_change_idx.display()),
            "append_entry"
        );

        Ok(idx)
    }

    /// Advance the commit index to `to_idx`, clamped to `current_idx()`.
    ///
    /// Never decreases. Advancing past the end of the log commits only what
    /// exists.
    pub fn advance_commit(&mut self, to_idx: u64) {
        if to_idx <= self.commit_idx {
            return;
        }

        let new_commit = min(to_idx, self.log.current_idx());

        tracing::debug!(from = display(self.commit_idx), to = display(new_commit), "advance_commit");
        self.commit_idx = new_commit;
    }

    /// Remove all entries at `idx` and above.
    ///
    /// Refuses to remove committed entries. Clears the voting-change gate
    /// when the pending entry is among the removed.
    pub fn truncate_from<H>(&mut self, host: &mut H, idx: u64) -> Result<(), TruncateError>
    where H: LogHost {
        if idx <= self.commit_idx {
            return Err(Committed {
                idx,
                committed: self.commit_idx,
            }
            .into());
        }

        if let Some(at) = self.voting_change_idx {
            if idx <= at {
                self.voting_change_idx = None;
            }
        }

        self.log.truncate_from(host, idx);
        Ok(())
    }

    /// Remove and return the head entry for snapshot-driven compaction.
    pub fn poll_head<H>(&mut self, host: &mut H) -> Option<Entry>
    where H: LogHost {
        self.log.poll_head(host)
    }

    /// Apply the next committed entry to the state machine.
    ///
    /// `last_applied_idx` advances *before* the state machine runs: an entry
    /// is attempted at most once and is not retried after a
    /// [`Shutdown`](`crate::error::Shutdown`).
    ///
    /// Applying an [`AddNode`](`EntryKind::AddNode`) entry notifies the
    /// membership sink through the host; applying the pending
    /// voting-configuration entry re-opens the voting-change gate.
    pub fn apply_one<H, SM>(&mut self, host: &mut H, sm: &mut SM) -> Result<(), ApplyError>
    where
        H: LogHost,
        SM: StateMachine,
    {
        if self.last_applied_idx == self.commit_idx {
            return Err(self.nothing_to_apply().into());
        }

        let next = self.last_applied_idx + 1;

        let Some(entry) = self.log.entry_at(next) else {
            // The entry was polled away by a snapshot install.
            return Err(self.nothing_to_apply().into());
        };

        tracing::debug!(idx = display(next), entry = display(entry), "apply");

        self.last_applied_idx = next;

        sm.apply(entry, next)?;

        if entry.kind == EntryKind::AddNode {
            let node = host.node_id_of(entry, next);
            host.on_node_added(node, next);
        }

        if Some(next) == self.voting_change_idx {
            tracing::debug!(idx = display(next), "voting-configuration change applied");
            self.voting_change_idx = None;
        }

        Ok(())
    }

    /// Apply committed entries until caught up with the commit index.
    ///
    /// Stops on the first [`Shutdown`](`crate::error::Shutdown`); running out
    /// of applicable entries terminates the loop successfully.
    pub fn apply_until_committed<H, SM>(&mut self, host: &mut H, sm: &mut SM) -> Result<(), ApplyError>
    where
        H: LogHost,
        SM: StateMachine,
    {
        while self.has_unapplied() {
            match self.apply_one(host, sm) {
                Ok(()) => {}
                Err(ApplyError::NothingToApply(_)) => return Ok(()),
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    /// Reset the pipeline to a freshly installed snapshot covering everything
    /// up to and including `idx`.
    ///
    /// Every live entry is dropped; `base`, the commit index and the
    /// last-applied index all move to `idx`; a pending voting change is
    /// forgotten.
    pub fn load_from_snapshot(&mut self, idx: u64) {
        debug_assert!(
            idx >= self.commit_idx,
            "snapshot index {} must be >= commit index {}",
            idx,
            self.commit_idx
        );

        tracing::info!(idx = display(idx), "load_from_snapshot");

        self.log.reset(idx);
        self.commit_idx = idx;
        self.last_applied_idx = idx;
        self.voting_change_idx = None;
    }

    fn nothing_to_apply(&self) -> NothingToApply {
        NothingToApply {
            applied: self.last_applied_idx,
            committed: self.commit_idx,
        }
    }
}

impl Validate for LogCommitter {
    fn validate(&self) -> Result<(), Box<dyn Error>> {
        less_equal!(self.last_applied_idx, self.commit_idx);
        less_equal!(self.commit_idx, self.log.current_idx());
        if let Some(at) = self.voting_change_idx {
            less_equal!(at, self.log.current_idx());
        }
        Ok(())
    }
}
