//! Calculation history
//!
//! A bounded, newest-first log of completed computations. Entries are plain
//! text lines (`"7 + 3 = 10"`) so they serialise as a JSON array of strings.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::core::Operator;

/// A single completed computation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryEntry {
    line: String,
}

impl HistoryEntry {
    /// Builds an entry from already formatted operands
    #[must_use]
    pub fn new(previous: &str, operator: Operator, current: &str, result: &str) -> Self {
        Self {
            line: format!("{previous} {operator} {current} = {result}"),
        }
    }

    /// The full `"a op b = c"` line
    #[must_use]
    pub fn display(&self) -> &str {
        &self.line
    }

    /// Text before the first `=`, without trailing whitespace
    #[must_use]
    pub fn expression(&self) -> &str {
        self.line
            .split_once('=')
            .map_or(self.line.as_str(), |(lhs, _)| lhs.trim_end())
    }

    /// Text after the first `=`, or an empty string if there is none
    #[must_use]
    pub fn result(&self) -> &str {
        self.line
            .split_once('=')
            .map_or("", |(_, rhs)| rhs.trim_start())
    }
}

/// Calculator history manager
///
/// Index 0 is always the newest entry. Pushing past capacity evicts the
/// oldest entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    max_entries: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// Default maximum history size
    pub const DEFAULT_MAX_ENTRIES: usize = 100;

    /// Creates a new history with default capacity
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_MAX_ENTRIES)
    }

    /// Creates a history with custom maximum size
    #[must_use]
    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(max_entries),
            max_entries,
        }
    }

    /// Adds an entry at the front, evicting the oldest beyond capacity
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(self.max_entries);
    }

    /// Returns the number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the history is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clears all history entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns an iterator over the entries (newest first)
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Returns the most recent entry
    #[must_use]
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    /// Returns all lines, newest first
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.line.clone()).collect()
    }

    /// Serializes the history to a JSON array of strings
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.entries)
    }

    /// Deserializes history from a JSON array of strings
    ///
    /// The array is read newest first; anything beyond capacity is dropped.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let entries: Vec<HistoryEntry> = serde_json::from_str(json)?;
        let mut history = Self::new();
        history
            .entries
            .extend(entries.into_iter().take(history.max_entries));
        Ok(history)
    }
}
