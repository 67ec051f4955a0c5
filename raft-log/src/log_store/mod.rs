//! In-memory replicated-log storage with a logical base offset.
//!
//! Logical indices are 1-based and survive head truncation: polling the head
//! increments `base` instead of renumbering, so an entry keeps its index for
//! its whole lifetime.
//!
//! ```text
//! index:   | 1 .. base         | base+1 .. base+count()  |
//! content: | polled away       | live entries            |
//!          '-- not addressable '-- current_idx() is the last one
//! ```

use std::error::Error;

use validit::less_equal;
use validit::Validate;

use crate::entry::Entry;
use crate::host::LogHost;

#[cfg(test)]
mod append_test;
#[cfg(test)]
mod entries_from_test;
#[cfg(test)]
mod pop_tail_test;
#[cfg(test)]
mod truncate_from_test;

/// The ordered sequence of log entries held in memory.
///
/// An entry's storage lifetime begins at [`append`](`LogStore::append`) and
/// ends at [`pop_tail`](`LogStore::pop_tail`) or
/// [`poll_head`](`LogStore::poll_head`); the host callback fires at each
/// transition, before the mutation becomes visible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogStore {
    /// Count of entries permanently removed from the head.
    ///
    /// Never decreases. Indices at or below `base` are snapshotted away and
    /// no longer addressable.
    base: u64,

    /// Live entries, at logical indices `base+1 ..= base+entries.len()`.
    entries: Vec<Entry>,
}

impl LogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries.
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Count of entries permanently removed from the head.
    pub fn base(&self) -> u64 {
        self.base
    }

    /// The last logical index; equals `base` when no entry is live.
    pub fn current_idx(&self) -> u64 {
        self.base + self.entries.len() as u64
    }

    /// The logical index of the head entry. Occupied only when non-empty.
    pub fn first_idx(&self) -> u64 {
        self.base + 1
    }

    /// Term of the entry at [`current_idx`](`LogStore::current_idx`).
    ///
    /// Reads the stored entry rather than a cached scalar: popping the tail
    /// may expose an entry from an earlier term. `None` on an empty log, even
    /// when `base > 0`.
    pub fn last_term(&self) -> Option<u64> {
        self.entries.last().map(|e| e.term)
    }

    /// The tail entry, if any.
    pub fn peek_tail(&self) -> Option<&Entry> {
        self.entries.last()
    }

    /// Append one entry at logical index `current_idx() + 1`.
    ///
    /// The caller guarantees `entry.term >= last_term()`.
    pub fn append(&mut self, entry: Entry) {
        debug_assert!(
            self.last_term().unwrap_or_default() <= entry.term,
            "appended term {} must be >= last term {:?}",
            entry.term,
            self.last_term()
        );

        tracing::debug!(idx = display(self.current_idx() + 1), entry = display(&entry), "append");
        self.entries.push(entry);
    }

    /// The entry at logical index `idx`.
    ///
    /// `None` unless `base < idx <= current_idx()`; indices at or below
    /// `base` are snapshotted away, not an error.
    pub fn entry_at(&self, idx: u64) -> Option<&Entry> {
        if idx <= self.base || idx > self.current_idx() {
            return None;
        }
        self.entries.get((idx - self.base - 1) as usize)
    }

    /// All entries from `idx` through `current_idx()`, inclusive.
    ///
    /// Empty when `idx <= base` or `idx > current_idx()`.
    pub fn entries_from(&self, idx: u64) -> &[Entry] {
        if idx <= self.base || idx > self.current_idx() {
            return &[];
        }
        &self.entries[(idx - self.base - 1) as usize..]
    }

    /// Remove and return the tail entry.
    ///
    /// The host observes the entry through
    /// [`on_pop_tail`](`LogHost::on_pop_tail`) while it is still in the log.
    pub fn pop_tail<H>(&mut self, host: &mut H) -> Option<Entry>
    where H: LogHost {
        let idx = self.current_idx();
        let entry = self.entries.last()?;

        host.on_pop_tail(entry, idx);

        tracing::debug!(idx = display(idx), "pop_tail");
        self.entries.pop()
    }

    /// Remove and return the head entry, advancing `base`.
    ///
    /// The host observes the entry through
    /// [`on_poll_head`](`LogHost::on_poll_head`) while it is still in the
    /// log.
    pub fn poll_head<H>(&mut self, host: &mut H) -> Option<Entry>
    where H: LogHost {
        let idx = self.base + 1;
        let entry = self.entries.first()?;

        host.on_poll_head(entry, idx);

        tracing::debug!(idx = display(idx), "poll_head");
        self.base += 1;
        Some(self.entries.remove(0))
    }

    /// Remove all entries at `idx` and above by repeated
    /// [`pop_tail`](`LogStore::pop_tail`), tail first, so each
    /// [`on_pop_tail`](`LogHost::on_pop_tail`) observes the entry being
    /// removed.
    ///
    /// Out-of-range indices are a no-op.
    pub fn truncate_from<H>(&mut self, host: &mut H, idx: u64)
    where H: LogHost {
        if idx <= self.base || idx > self.current_idx() {
            return;
        }

        tracing::debug!(from = display(idx), upto = display(self.current_idx()), "truncate_from");

        while self.current_idx() >= idx {
            self.pop_tail(host);
        }
    }

    /// Drop every live entry and fast-forward `base` to `new_base`.
    ///
    /// Used when an installed snapshot replaces the log prefix. `new_base`
    /// must not move backwards.
    pub fn reset(&mut self, new_base: u64) {
        debug_assert!(
            new_base >= self.base,
            "base must not decrease: current {}, new {}",
            self.base,
            new_base
        );

        tracing::info!(base = display(new_base), "reset to snapshot base");
        self.entries.clear();
        self.base = new_base;
    }
}

impl Validate for LogStore {
    fn validate(&self) -> Result<(), Box<dyn Error>> {
        for pair in self.entries.windows(2) {
            less_equal!(pair[0].term, pair[1].term);
        }
        Ok(())
    }
}
