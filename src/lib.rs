//! Core library for a personal mood tracker built around a 450x450
//! energy/pleasantness grid.
//!
//! The crate is split along three seams:
//!
//! - [`geometry`] turns raw grid coordinates into a classified selection:
//!   clamping, quadrant classification, energy/pleasantness derivation and
//!   magnetic snapping onto named emotion points.
//! - [`analytics`] computes everything derived from the entry list: streaks,
//!   badges, quadrant and time-of-day distributions, the 30-day timeline and
//!   the activity heatmap.
//! - [`store`] persists typed records through a pluggable [`KeyValueStore`]
//!   backend, with infallible reads (missing or corrupt data degrades to
//!   defaults) and fallible writes.
//!
//! [`MoodTracker`] ties the three together for the common flows: log a mood,
//! edit or delete it, export and import, and read the derived views.
//!
//! ```
//! use moodgrid::{MemoryStore, MoodTracker, NewEntry};
//!
//! let tracker = MoodTracker::new(MemoryStore::new());
//! let (entry, _milestones) = tracker.log_mood(NewEntry::at(400.0, 50.0)).unwrap();
//! assert_eq!(entry.quadrant.as_str(), "yellow");
//! assert_eq!(tracker.stats().total_check_ins, 1);
//! ```

pub mod analytics;
pub mod error;
pub mod export;
pub mod geometry;
pub mod models;
pub mod regulation;
pub mod store;
pub mod tracker;

pub use error::{AppError, AppResult};
pub use models::entry::{EntryUpdate, MoodEntry, NewEntry, Quadrant, ACTIVITY_OPTIONS};
pub use models::history::{LastPosition, MoodHistoryItem, MOOD_HISTORY_MAX};
pub use models::preferences::UserPreferences;
pub use models::stats::{Badge, UserStats};
pub use store::{KeyValueStore, MemoryStore, MoodStore, StoreError};
pub use tracker::{Milestone, MoodTracker};
