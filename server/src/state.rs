//! The journal: note book plus the last published snapshot
//!
//! Both live behind one `tokio::sync::RwLock`. Snapshot reads take the read
//! half; a builder pass and a tag write each take the write half for their
//! whole duration, so a tag never lands between derivation and publication.

use crate::notes::NoteBook;
use journal_shared::EMPTY_SNAPSHOT_JSON;
use std::sync::Arc;
use tokio::sync::RwLock;

pub type SharedState = Arc<RwLock<Journal>>;

#[derive(Debug)]
pub struct Journal {
    pub notes: NoteBook,
    snapshot: Arc<str>,
}

impl Journal {
    pub fn new() -> Self {
        Self {
            notes: NoteBook::new(),
            snapshot: Arc::from(EMPTY_SNAPSHOT_JSON),
        }
    }

    pub fn shared() -> SharedState {
        Arc::new(RwLock::new(Self::new()))
    }

    /// Serialized snapshot as last published. Cheap to clone.
    pub fn snapshot(&self) -> Arc<str> {
        Arc::clone(&self.snapshot)
    }

    /// Replaces the published snapshot wholesale.
    pub fn publish(&mut self, json: String) {
        self.snapshot = Arc::from(json);
    }
}

impl Default for Journal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_journal_starts_empty() {
        let journal = Journal::new();
        assert_eq!(&*journal.snapshot(), EMPTY_SNAPSHOT_JSON);
        assert!(journal.notes.is_empty());
    }

    #[test]
    fn test_publish_replaces_snapshot() {
        let mut journal = Journal::new();
        let before = journal.snapshot();

        journal.publish(r#"{"players":[{"id":1}],"roles":[]}"#.to_string());

        // Readers holding the old value keep it intact
        assert_eq!(&*before, EMPTY_SNAPSHOT_JSON);
        assert_eq!(&*journal.snapshot(), r#"{"players":[{"id":1}],"roles":[]}"#);
    }

    #[tokio::test]
    async fn test_shared_state_locking() {
        let state = Journal::shared();
        {
            let mut journal = state.write().await;
            journal.notes.set(2, "Sus");
        }

        let journal = state.read().await;
        assert_eq!(journal.notes.get(2), Some("Sus"));
    }
}
