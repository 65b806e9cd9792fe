//! Banding — the elapsed-time column.

use chrono::{DateTime, Local};

use super::state::Session;

/// Width of `+HH:MM:SS`, used for the blank column inside a band.
const BAND_WIDTH: usize = 9;

impl Session {
    /// Produce the band column for a line rendered at `now`, advancing the
    /// display anchor.
    ///
    /// The first line after start or reset is always `+00:00:00`; later lines
    /// carry a freshly computed elapsed value only when their wall-clock
    /// second bucket differs from the previous rendered line's. The anchor
    /// advances even when the caller subsequently filters the line out.
    pub fn band_column(&mut self, now: DateTime<Local>) -> String {
        match self.last_display {
            None => {
                self.last_display = Some(now);
                "+00:00:00 | ".to_string()
            }
            Some(last) if now.timestamp() != last.timestamp() => {
                self.last_display = Some(now);
                let elapsed = (now - self.start_time()).num_seconds().max(0);
                let (hours, rem) = (elapsed / 3600, elapsed % 3600);
                format!("+{:02}:{:02}:{:02} | ", hours, rem / 60, rem % 60)
            }
            Some(_) => format!("{} | ", " ".repeat(BAND_WIDTH)),
        }
    }
}
