//! Compact text rendering of the board for agent consumption

use chrono::{DateTime, Utc};
use std::fmt::Write;

use crate::types::Note;

/// Snapshot text for a board with no live notes
pub const EMPTY_BOARD: &str = "The board is empty.";

/// Render notes (already ordered) as a compact listing
pub fn render_board(notes: &[Note], now: DateTime<Utc>) -> String {
    if notes.is_empty() {
        return EMPTY_BOARD.to_string();
    }

    let mut out = format!(
        "Board: {} note{}\n",
        notes.len(),
        if notes.len() == 1 { "" } else { "s" }
    );
    for note in notes {
        // Writing into a String cannot fail
        let _ = writeln!(
            out,
            "- [{}] {}: {} (by {}, expires in {} min)",
            note.id,
            note.title,
            note.description,
            note.author,
            note.minutes_left(now)
        );
    }
    out
}
