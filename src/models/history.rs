use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::entry::Quadrant;

/// Ring-buffer capacity for recent-reflection history.
pub const MOOD_HISTORY_MAX: usize = 10;

/// Lightweight recent check-in record, distinct from [`super::entry::MoodEntry`].
/// Kept in a bounded FIFO under the `moodHistory` key and used for the
/// recent-reflections list and time-of-day pattern mining.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MoodHistoryItem {
    pub quadrant: Quadrant,
    /// Pre-formatted clock time, e.g. `09:41 AM`.
    pub time: String,
    /// Pre-formatted calendar date, e.g. `01/05/2024`.
    pub date: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl MoodHistoryItem {
    /// Builds a history record at the given local instant; display strings
    /// are formatted in that timezone, the timestamp is stored in UTC.
    pub fn new<Tz: TimeZone>(quadrant: Quadrant, at: &DateTime<Tz>) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self {
            quadrant,
            time: at.format("%I:%M %p").to_string(),
            date: at.format("%m/%d/%Y").to_string(),
            timestamp: at.with_timezone(&Utc),
            note: None,
        }
    }
}

/// Last grid selection, cached under `lastMood` so the selection dot restores
/// on the next visit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LastPosition {
    pub x: f64,
    pub y: f64,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_item_formats_display_strings() {
        let at = Utc.with_ymd_and_hms(2024, 1, 5, 9, 41, 0).unwrap();
        let item = MoodHistoryItem::new(Quadrant::Green, &at);
        assert_eq!(item.time, "09:41 AM");
        assert_eq!(item.date, "01/05/2024");
        assert_eq!(item.timestamp, at);
        assert!(item.note.is_none());
    }
}
