//! Note store - the shared board table with per-note expiry
//!
//! Every note is removed `note_ttl()` after creation by two independent
//! mechanisms: a scheduled action armed at creation, and a sweep at the top
//! of every read or targeted write. All table mutations happen under a single
//! lock, expiry actions included.

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::clock::BoardClock;
use crate::render;
use crate::scheduler::{ExpiryHandle, Scheduler, TokioScheduler};
use crate::types::{note_ttl, Note, NoteId};

/// Fields to replace on update; `None` leaves the stored value untouched
#[derive(Debug, Clone, Default)]
pub struct NotePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
}

/// Shared ephemeral note board
#[derive(Clone)]
pub struct NoteStore {
    inner: Arc<Mutex<BoardTable>>,
    clock: BoardClock,
    scheduler: Arc<dyn Scheduler>,
}

struct BoardTable {
    entries: HashMap<NoteId, Entry>,
    /// Insertion counter used to order notes created in the same instant
    next_seq: u64,
}

struct Entry {
    note: Note,
    seq: u64,
    /// Dropping the entry disarms its expiry action
    expiry: ExpiryHandle,
}

impl BoardTable {
    fn new() -> Self {
        Self {
            entries: HashMap::new(),
            next_seq: 0,
        }
    }

    /// Remove every note whose deadline has passed
    fn sweep(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|id, entry| {
            let live = entry.note.expires_at > now;
            if !live {
                tracing::debug!(note_id = %id, "note expired");
            }
            live
        });
        before - self.entries.len()
    }

    fn sorted_notes(&self) -> Vec<Note> {
        let mut entries: Vec<&Entry> = self.entries.values().collect();
        entries.sort_by(|a, b| {
            b.note
                .created_at
                .cmp(&a.note.created_at)
                .then(b.seq.cmp(&a.seq))
        });
        entries.into_iter().map(|e| e.note.clone()).collect()
    }
}

impl NoteStore {
    /// Create an empty board backed by tokio timers
    pub fn new() -> Self {
        Self::with_parts(BoardClock::new(), Arc::new(TokioScheduler))
    }

    /// Create an empty board with an explicit clock and scheduler
    pub fn with_parts(clock: BoardClock, scheduler: Arc<dyn Scheduler>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(BoardTable::new())),
            clock,
            scheduler,
        }
    }

    /// Arm the removal of `id` at `expires_at`
    ///
    /// Must be called with the table lock held so the action cannot observe
    /// the table before the entry is in place.
    fn arm(&self, id: &str, expires_at: DateTime<Utc>) -> ExpiryHandle {
        let table: Weak<Mutex<BoardTable>> = Arc::downgrade(&self.inner);
        let clock = self.clock;
        let id = id.to_string();

        let action = Box::pin(async move {
            let Some(table) = table.upgrade() else {
                return;
            };
            let mut table = table.lock().await;
            let removed = table.sweep(clock.now());
            tracing::debug!(note_id = %id, removed, "expiry timer fired");
        });

        self.scheduler
            .schedule(self.clock.deadline_for(expires_at), action)
    }

    // ========================================================================
    // Board Operations
    // ========================================================================

    /// Pin a new note to the board
    pub async fn create(&self, title: &str, description: &str, author: &str) -> Note {
        let mut table = self.inner.lock().await;
        let now = self.clock.now();

        let mut id = Uuid::new_v4().to_string();
        while table.entries.contains_key(&id) {
            tracing::warn!(note_id = %id, "note id collision, regenerating");
            id = Uuid::new_v4().to_string();
        }

        let note = Note {
            id: id.clone(),
            title: title.trim().to_string(),
            description: description.trim().to_string(),
            author: author.trim().to_string(),
            created_at: now,
            updated_at: now,
            expires_at: now + note_ttl(),
        };

        let seq = table.next_seq;
        table.next_seq += 1;

        let expiry = self.arm(&id, note.expires_at);
        table.entries.insert(
            id.clone(),
            Entry {
                note: note.clone(),
                seq,
                expiry,
            },
        );

        tracing::debug!(note_id = %id, author = %note.author, "note created");
        note
    }

    /// All live notes, newest first
    pub async fn list(&self) -> Vec<Note> {
        let mut table = self.inner.lock().await;
        table.sweep(self.clock.now());
        table.sorted_notes()
    }

    /// A single live note
    pub async fn get(&self, id: &str) -> Option<Note> {
        let mut table = self.inner.lock().await;
        table.sweep(self.clock.now());
        table.entries.get(id).map(|e| e.note.clone())
    }

    /// Replace the provided fields of a live note
    ///
    /// Returns `None` when the note does not exist or has expired. The expiry
    /// deadline is never moved; the timer is re-armed against the same
    /// deadline.
    pub async fn update(&self, id: &str, patch: NotePatch) -> Option<Note> {
        let mut table = self.inner.lock().await;
        let now = self.clock.now();
        table.sweep(now);

        let expires_at = table.entries.get(id)?.note.expires_at;
        let expiry = self.arm(id, expires_at);

        let entry = table.entries.get_mut(id)?;
        apply_field(&mut entry.note.title, patch.title);
        apply_field(&mut entry.note.description, patch.description);
        apply_field(&mut entry.note.author, patch.author);
        entry.note.updated_at = now.max(entry.note.created_at);
        // Replacing the handle disarms the previous action
        entry.expiry = expiry;

        tracing::debug!(note_id = %id, "note updated");
        Some(entry.note.clone())
    }

    /// Remove a note, returning whether it was on the board
    pub async fn delete(&self, id: &str) -> bool {
        let mut table = self.inner.lock().await;
        table.sweep(self.clock.now());

        match table.entries.remove(id) {
            Some(entry) => {
                entry.expiry.cancel();
                tracing::debug!(note_id = %id, "note deleted");
                true
            }
            None => false,
        }
    }

    /// Remove every note, returning how many were on the board
    pub async fn clear(&self) -> usize {
        let mut table = self.inner.lock().await;
        let cleared = table.entries.len();
        for (_, entry) in table.entries.drain() {
            entry.expiry.cancel();
        }

        tracing::info!(cleared, "board cleared");
        cleared
    }

    /// Compact text rendering of the board for agents
    pub async fn snapshot(&self) -> String {
        let notes = self.list().await;
        render::render_board(&notes, self.clock.now())
    }

    /// Number of live notes
    pub async fn len(&self) -> usize {
        let mut table = self.inner.lock().await;
        table.sweep(self.clock.now());
        table.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for NoteStore {
    fn default() -> Self {
        Self::new()
    }
}

fn apply_field(slot: &mut String, value: Option<String>) {
    if let Some(value) = value {
        let trimmed = value.trim();
        if !trimmed.is_empty() {
            *slot = trimmed.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::ExpiryAction;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::time::Instant;

    const TTL: Duration = Duration::from_secs(600);

    /// Tokio scheduler that counts actions actually run
    #[derive(Default)]
    struct CountingScheduler {
        fired: Arc<AtomicUsize>,
        armed: AtomicUsize,
    }

    impl Scheduler for CountingScheduler {
        fn schedule(&self, deadline: Instant, action: ExpiryAction) -> ExpiryHandle {
            self.armed.fetch_add(1, Ordering::SeqCst);
            let fired = Arc::clone(&self.fired);
            TokioScheduler.schedule(
                deadline,
                Box::pin(async move {
                    fired.fetch_add(1, Ordering::SeqCst);
                    action.await;
                }),
            )
        }
    }

    fn counting_store() -> (NoteStore, Arc<CountingScheduler>) {
        let scheduler = Arc::new(CountingScheduler::default());
        let store = NoteStore::with_parts(BoardClock::new(), scheduler.clone());
        (store, scheduler)
    }

    async fn raw_len(store: &NoteStore) -> usize {
        store.inner.lock().await.entries.len()
    }

    #[tokio::test(start_paused = true)]
    async fn test_create_sets_timestamps_and_trims() {
        let store = NoteStore::new();

        let note = store.create("  Standup ", "\t9am sync\n", " Ana ").await;

        assert_eq!(note.title, "Standup");
        assert_eq!(note.description, "9am sync");
        assert_eq!(note.author, "Ana");
        assert_eq!(note.created_at, note.updated_at);
        assert_eq!(
            (note.expires_at - note.created_at).num_milliseconds(),
            600_000
        );
        assert!(!note.id.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_create_assigns_unique_ids() {
        let store = NoteStore::new();

        let a = store.create("a", "a", "a").await;
        let b = store.create("b", "b", "b").await;

        assert_ne!(a.id, b.id);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_list_newest_first() {
        let store = NoteStore::new();

        let a = store.create("A", "first", "x").await;
        tokio::time::sleep(Duration::from_secs(1)).await;
        let b = store.create("B", "second", "x").await;
        tokio::time::sleep(Duration::from_secs(1)).await;
        let c = store.create("C", "third", "x").await;

        let ids: Vec<NoteId> = store.list().await.into_iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![c.id, b.id, a.id]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_list_same_instant_ordered_by_insertion() {
        let store = NoteStore::new();

        // Paused clock: all three share a creation timestamp
        let a = store.create("A", "d", "x").await;
        let b = store.create("B", "d", "x").await;
        let c = store.create("C", "d", "x").await;
        assert_eq!(a.created_at, c.created_at);

        let ids: Vec<NoteId> = store.list().await.into_iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![c.id, b.id, a.id]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_note_visible_until_deadline() {
        let store = NoteStore::new();
        let note = store.create("t", "d", "a").await;

        tokio::time::sleep(TTL - Duration::from_millis(1)).await;
        assert_eq!(store.list().await.len(), 1);
        assert!(store.get(&note.id).await.is_some());

        tokio::time::sleep(Duration::from_millis(1)).await;
        assert!(store.list().await.is_empty());
        assert!(store.get(&note.id).await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_scheduled_expiry_removes_without_access() {
        let (store, scheduler) = counting_store();
        store.create("t", "d", "a").await;

        tokio::time::sleep(TTL + Duration::from_secs(1)).await;

        // No sweep has run: only the timer can have removed it
        assert_eq!(scheduler.fired.load(Ordering::SeqCst), 1);
        assert_eq!(raw_len(&store).await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_hides_expired_even_if_timer_lags() {
        // A scheduler that never fires
        struct Inert;
        impl Scheduler for Inert {
            fn schedule(&self, deadline: Instant, _action: ExpiryAction) -> ExpiryHandle {
                TokioScheduler.schedule(deadline + Duration::from_secs(3600), Box::pin(async {}))
            }
        }

        let store = NoteStore::with_parts(BoardClock::new(), Arc::new(Inert));
        let note = store.create("t", "d", "a").await;

        tokio::time::sleep(TTL).await;
        assert_eq!(raw_len(&store).await, 1);

        assert!(store.list().await.is_empty());
        assert!(store.update(&note.id, NotePatch::default()).await.is_none());
        assert!(!store.delete(&note.id).await);
        assert_eq!(store.snapshot().await, render::EMPTY_BOARD);
        assert_eq!(raw_len(&store).await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_update_preserves_expiry() {
        let store = NoteStore::new();
        let note = store.create("t", "d", "a").await;

        tokio::time::sleep(Duration::from_secs(120)).await;
        let updated = store
            .update(
                &note.id,
                NotePatch {
                    title: Some(" New title ".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, note.id);
        assert_eq!(updated.title, "New title");
        assert_eq!(updated.expires_at, note.expires_at);
        assert_eq!(updated.created_at, note.created_at);
        assert_eq!((updated.updated_at - note.created_at).num_seconds(), 120);

        tokio::time::sleep(Duration::from_secs(240)).await;
        let again = store
            .update(
                &note.id,
                NotePatch {
                    author: Some("Bo".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(again.expires_at, note.expires_at);
        assert!(again.updated_at > updated.updated_at);
    }

    #[tokio::test(start_paused = true)]
    async fn test_partial_update_leaves_other_fields() {
        let store = NoteStore::new();
        let note = store.create("Standup", "9am sync", "Ana").await;

        let updated = store
            .update(
                &note.id,
                NotePatch {
                    description: Some("9:30am sync".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "Standup");
        assert_eq!(updated.description, "9:30am sync");
        assert_eq!(updated.author, "Ana");
    }

    #[tokio::test(start_paused = true)]
    async fn test_update_blank_field_is_ignored() {
        let store = NoteStore::new();
        let note = store.create("Standup", "9am sync", "Ana").await;

        let updated = store
            .update(
                &note.id,
                NotePatch {
                    title: Some("   ".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "Standup");
    }

    #[tokio::test(start_paused = true)]
    async fn test_update_missing_note_is_not_found() {
        let store = NoteStore::new();

        let result = store
            .update(
                "missing",
                NotePatch {
                    title: Some("x".to_string()),
                    ..Default::default()
                },
            )
            .await;

        assert!(result.is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_update_rearms_without_double_fire() {
        let (store, scheduler) = counting_store();
        let note = store.create("t", "d", "a").await;

        for _ in 0..3 {
            tokio::time::sleep(Duration::from_secs(60)).await;
            store.update(&note.id, NotePatch::default()).await.unwrap();
        }
        assert_eq!(scheduler.armed.load(Ordering::SeqCst), 4);

        tokio::time::sleep(TTL).await;

        // Only the latest arming may fire; the replaced ones were disarmed
        assert_eq!(scheduler.fired.load(Ordering::SeqCst), 1);
        assert_eq!(raw_len(&store).await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delete_reports_existence() {
        let store = NoteStore::new();
        let note = store.create("t", "d", "a").await;

        assert!(store.delete(&note.id).await);
        assert!(!store.delete(&note.id).await);
        assert!(!store.delete("never-existed").await);
        assert!(store.list().await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_delete_disarms_timer() {
        let (store, scheduler) = counting_store();
        let note = store.create("t", "d", "a").await;

        store.delete(&note.id).await;
        tokio::time::sleep(TTL * 2).await;

        assert_eq!(scheduler.fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_disarms_all_timers() {
        let (store, scheduler) = counting_store();
        for i in 0..5 {
            store.create(&format!("n{i}"), "d", "a").await;
        }

        tokio::time::sleep(Duration::from_secs(300)).await;
        assert_eq!(store.clear().await, 5);
        assert!(store.list().await.is_empty());

        let fresh = store.create("fresh", "d", "a").await;
        tokio::time::sleep(Duration::from_secs(301)).await;

        // The cleared notes' deadlines have passed without any timer firing
        assert_eq!(scheduler.fired.load(Ordering::SeqCst), 0);
        assert_eq!(store.get(&fresh.id).await.map(|n| n.id), Some(fresh.id));
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_empty_board_is_noop() {
        let store = NoteStore::new();
        assert_eq!(store.clear().await, 0);
        assert_eq!(store.clear().await, 0);
        assert!(store.is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_snapshot_renders_live_notes() {
        let store = NoteStore::new();
        let note = store.create("Standup", "9am sync", "Ana").await;

        tokio::time::sleep(Duration::from_secs(30)).await;
        let text = store.snapshot().await;

        assert!(text.contains(&note.id));
        assert!(text.contains("Standup"));
        assert!(text.contains("9am sync"));
        assert!(text.contains("Ana"));
        assert!(text.contains("10 min"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_store_timers_are_harmless() {
        let (store, scheduler) = counting_store();
        store.create("t", "d", "a").await;
        let weak = Arc::downgrade(&store.inner);
        drop(store);

        // Handles live in the dropped table, so the timer is disarmed
        tokio::time::sleep(TTL * 2).await;
        assert!(weak.upgrade().is_none());
        assert_eq!(scheduler.fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_callers() {
        let store = NoteStore::new();

        let mut tasks = Vec::new();
        for i in 0..32 {
            let store = store.clone();
            tasks.push(tokio::spawn(async move {
                let note = store.create(&format!("n{i}"), "d", "a").await;
                if i % 2 == 0 {
                    assert!(store.delete(&note.id).await);
                } else {
                    let patch = NotePatch {
                        description: Some(format!("updated {i}")),
                        ..Default::default()
                    };
                    assert!(store.update(&note.id, patch).await.is_some());
                }
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        let notes = store.list().await;
        assert_eq!(notes.len(), 16);
        assert!(notes.iter().all(|n| n.description.starts_with("updated")));
    }
}
