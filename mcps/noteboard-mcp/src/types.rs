//! Type definitions for board notes and tool responses

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Fixed lifetime of every note in seconds, measured from creation
pub const NOTE_TTL_SECS: i64 = 10 * 60;

/// Fixed lifetime of every note
pub fn note_ttl() -> Duration {
    Duration::seconds(NOTE_TTL_SECS)
}

/// Opaque note identifier
pub type NoteId = String;

/// A note pinned to the shared board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Unique ID, assigned at creation
    pub id: NoteId,
    pub title: String,
    pub description: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
    /// Equal to `created_at` until the first successful update
    pub updated_at: DateTime<Utc>,
    /// Always `created_at + note_ttl()`; updates never move it
    pub expires_at: DateTime<Utc>,
}

impl Note {
    /// Whole minutes left before expiry, rounded up and floored at zero
    pub fn minutes_left(&self, now: DateTime<Utc>) -> i64 {
        let remaining_ms = (self.expires_at - now).num_milliseconds();
        if remaining_ms <= 0 {
            return 0;
        }
        (remaining_ms + 59_999) / 60_000
    }
}

// ============================================================================
// Response Types
// ============================================================================

/// Response for listing the board
#[derive(Debug, Serialize, Deserialize)]
pub struct ListResponse {
    pub notes: Vec<Note>,
    pub count: usize,
}

impl From<Vec<Note>> for ListResponse {
    fn from(notes: Vec<Note>) -> Self {
        Self {
            count: notes.len(),
            notes,
        }
    }
}

/// Response for deleting a single note
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub id: NoteId,
    pub deleted: bool,
}

/// Response for clearing the board
#[derive(Debug, Serialize, Deserialize)]
pub struct ClearResponse {
    pub cleared: usize,
}
