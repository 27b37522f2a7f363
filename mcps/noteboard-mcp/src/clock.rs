//! Board clock - wall-clock timestamps driven by a monotonic anchor
//!
//! Note timestamps are wall-clock (`DateTime<Utc>`), but expiry timers run on
//! tokio's monotonic clock. Anchoring both at construction keeps them in step:
//! a system clock adjustment after start-up moves neither `now()` nor any
//! armed deadline, and a paused tokio runtime advances both together.

use chrono::{DateTime, Utc};
use tokio::time::Instant;

/// Wall-clock time derived from a monotonic anchor
#[derive(Debug, Clone, Copy)]
pub struct BoardClock {
    anchor_wall: DateTime<Utc>,
    anchor_instant: Instant,
}

impl BoardClock {
    /// Anchor a new clock at the current instant
    pub fn new() -> Self {
        Self {
            anchor_wall: Utc::now(),
            anchor_instant: Instant::now(),
        }
    }

    /// Current wall-clock time as seen by the board
    pub fn now(&self) -> DateTime<Utc> {
        let elapsed = chrono::Duration::from_std(self.anchor_instant.elapsed())
            .unwrap_or(chrono::Duration::MAX);
        self.anchor_wall
            .checked_add_signed(elapsed)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// Monotonic instant at which the given wall-clock timestamp is reached
    pub fn deadline_for(&self, at: DateTime<Utc>) -> Instant {
        match (at - self.anchor_wall).to_std() {
            Ok(offset) => self.anchor_instant + offset,
            // Timestamps before the anchor are already due
            Err(_) => self.anchor_instant,
        }
    }
}

impl Default for BoardClock {
    fn default() -> Self {
        Self::new()
    }
}
