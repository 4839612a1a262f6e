//! EntrySet: a named, ordered, de-duplicated collection of entries.

use ahash::AHashSet;
use ipnet::IpNet;

use crate::entry::Entry;
use crate::family::AddrFamily;

/// EntrySet holds the validated entries of one named list.
///
/// Insertion order is preserved so exports are deterministic. Duplicates
/// (same family, network address, and prefix length) are collapsed: the
/// first occurrence wins and later ones are rejected by [`EntrySet::push`].
#[derive(Debug, Clone)]
pub struct EntrySet {
    name: String,
    entries: Vec<Entry>,
    seen: AHashSet<IpNet>,
}

impl EntrySet {
    /// Create an empty EntrySet with the given list name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
            seen: AHashSet::new(),
        }
    }

    /// Name of this list.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add an entry, preserving insertion order.
    ///
    /// Returns `false` if an equal network is already present; the existing
    /// entry is kept and the new one discarded.
    pub fn push(&mut self, entry: Entry) -> bool {
        if !self.seen.insert(entry.network()) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    /// Whether an equal network is already present.
    pub fn contains_network(&self, network: &IpNet) -> bool {
        self.seen.contains(network)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if this set has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Count entries per family, returned as `(ipv4, ipv6)`.
    pub fn family_counts(&self) -> (usize, usize) {
        let v4 = self
            .entries
            .iter()
            .filter(|e| e.family() == AddrFamily::V4)
            .count();
        (v4, self.entries.len() - v4)
    }

    /// Union this set with another, preserving per-entry source attribution.
    ///
    /// Entries keep their original `source_list`; order is self's entries
    /// followed by other's, with cross-set duplicates collapsed first-wins.
    /// Returns the merged set and the number of duplicates dropped.
    pub fn merge(&self, other: &EntrySet, name: impl Into<String>) -> (EntrySet, usize) {
        let mut merged = EntrySet::new(name);
        let mut duplicates = 0;
        for entry in self.entries.iter().chain(other.entries.iter()) {
            if !merged.push(entry.clone()) {
                duplicates += 1;
            }
        }
        (merged, duplicates)
    }
}
