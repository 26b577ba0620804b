//! Provenance: the recorded history of user-driven state changes.
//!
//! Interactive drags produce one state change per pointer event. Those
//! intermediate updates are applied inside a [`ProvenanceScope`] with
//! recording suppressed, and only the final value is recorded.

use std::collections::VecDeque;
use std::ops::{Deref, DerefMut};

/// One recorded state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvenanceEntry {
    /// Coarse grouping, e.g. `"vmode"` or `"window"`.
    pub category: String,
    /// The command that was executed.
    pub command: String,
    /// Rendered arguments.
    pub args: String,
}

impl ProvenanceEntry {
    /// Creates an entry.
    pub fn new(
        category: impl Into<String>,
        command: impl Into<String>,
        args: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            command: command.into(),
            args: args.into(),
        }
    }
}

/// Configuration for the provenance log.
#[derive(Debug, Clone)]
pub struct ProvenanceConfig {
    /// Maximum number of entries to keep.
    pub max_history: usize,
}

impl Default for ProvenanceConfig {
    fn default() -> Self {
        Self { max_history: 1000 }
    }
}

/// Bounded provenance history with a temporary suppression switch.
#[derive(Debug, Clone, Default)]
pub struct ProvenanceLog {
    entries: VecDeque<ProvenanceEntry>,
    suppressed: bool,
    config: ProvenanceConfig,
}

impl ProvenanceLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty log with custom configuration.
    pub fn with_config(config: ProvenanceConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Records an entry unless recording is suppressed.
    ///
    /// Returns whether the entry was recorded.
    pub fn record(
        &mut self,
        category: impl Into<String>,
        command: impl Into<String>,
        args: impl Into<String>,
    ) -> bool {
        if self.suppressed {
            return false;
        }
        let entry = ProvenanceEntry::new(category, command, args);
        log::trace!(
            "provenance: {} {} {}",
            entry.category,
            entry.command,
            entry.args
        );
        self.entries.push_back(entry);
        while self.entries.len() > self.config.max_history {
            self.entries.pop_front();
        }
        true
    }

    /// Returns whether recording is currently suppressed.
    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }

    /// Sets the suppression flag and returns its previous value.
    ///
    /// Prefer [`ProvenanceScope`], which restores the flag automatically.
    pub fn set_suppressed(&mut self, suppressed: bool) -> bool {
        std::mem::replace(&mut self.suppressed, suppressed)
    }

    /// Returns the recorded entries, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &ProvenanceEntry> {
        self.entries.iter()
    }

    /// Returns the most recent entry.
    pub fn last(&self) -> Option<&ProvenanceEntry> {
        self.entries.back()
    }

    /// Returns the number of recorded entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clears all history.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Anything that owns a provenance log.
pub trait ProvenanceSink {
    /// Returns the log.
    fn provenance(&self) -> &ProvenanceLog;

    /// Returns the log mutably.
    fn provenance_mut(&mut self) -> &mut ProvenanceLog;
}

impl ProvenanceSink for ProvenanceLog {
    fn provenance(&self) -> &ProvenanceLog {
        self
    }

    fn provenance_mut(&mut self) -> &mut ProvenanceLog {
        self
    }
}

/// Scoped provenance switch.
///
/// Sets the suppression flag of the wrapped sink on creation and restores the
/// previous value when dropped, including on early return. Dereferences to
/// the sink so calls can be made through the scope.
pub struct ProvenanceScope<'a, T: ProvenanceSink + ?Sized> {
    target: &'a mut T,
    previous: bool,
}

impl<'a, T: ProvenanceSink + ?Sized> ProvenanceScope<'a, T> {
    /// Enters a scope with recording set to `suppressed`.
    pub fn new(target: &'a mut T, suppressed: bool) -> Self {
        let previous = target.provenance_mut().set_suppressed(suppressed);
        Self { target, previous }
    }

    /// Enters a scope with recording suppressed.
    pub fn suppressed(target: &'a mut T) -> Self {
        Self::new(target, true)
    }
}

impl<T: ProvenanceSink + ?Sized> Deref for ProvenanceScope<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.target
    }
}

impl<T: ProvenanceSink + ?Sized> DerefMut for ProvenanceScope<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.target
    }
}

impl<T: ProvenanceSink + ?Sized> Drop for ProvenanceScope<'_, T> {
    fn drop(&mut self) {
        self.target.provenance_mut().set_suppressed(self.previous);
    }
}
