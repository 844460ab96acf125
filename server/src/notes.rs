//! Per-participant notes owned by the journal
//!
//! The note book maps a participant id to a single free-form label. It is
//! written by two parties:
//! - tag requests coming in over HTTP (set or clear)
//! - the snapshot builder, which derives "Dead"/"Imposter" labels
//!
//! It carries no synchronization of its own; callers reach it through the
//! shared journal lock so a builder pass and a tag write never interleave.

use log::info;
use std::collections::HashMap;

/// Labels keyed by participant id
///
/// At most one label per id. A missing entry means "no note"; an empty
/// string is a real note and is published as such.
#[derive(Debug, Default, Clone)]
pub struct NoteBook {
    notes: HashMap<u8, String>,
}

impl NoteBook {
    pub fn new() -> Self {
        Self {
            notes: HashMap::new(),
        }
    }

    /// Inserts or overwrites the label for `id`
    pub fn set(&mut self, id: u8, label: impl Into<String>) {
        self.notes.insert(id, label.into());
    }

    /// Removes the label for `id`. Returns true if one was present.
    pub fn clear(&mut self, id: u8) -> bool {
        self.notes.remove(&id).is_some()
    }

    pub fn get(&self, id: u8) -> Option<&str> {
        self.notes.get(&id).map(String::as_str)
    }

    /// Drops every label
    ///
    /// Called when the host reports no session so notes from a finished
    /// round never show up in the next one.
    pub fn clear_all(&mut self) {
        if !self.notes.is_empty() {
            info!("Discarding {} notes from previous session", self.notes.len());
            self.notes.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}
