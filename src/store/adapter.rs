//! Typed read/write of named records against the key-value store.
//!
//! Reads are infallible: an absent key, a backend read error, or corrupt JSON
//! all yield the record's default (logged, never surfaced). Writes propagate
//! store failures so a failed save is observable to the caller.
//!
//! Entry mutations are read-modify-write over the full collection. That is
//! deliberate at this scale (hundreds to low thousands of records) and not a
//! pattern to carry to larger datasets.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::AppResult;
use crate::models::entry::{EntryUpdate, MoodEntry, NewEntry};
use crate::models::history::{LastPosition, MoodHistoryItem, MOOD_HISTORY_MAX};
use crate::models::preferences::UserPreferences;
use crate::models::stats::UserStats;
use crate::store::{keys, KeyValueStore};

pub struct MoodStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> MoodStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    fn read_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        let raw = match self.store.get(key) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(key, error = %e, "storage read failed, using default");
                return T::default();
            }
        };
        match raw {
            None => T::default(),
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(value) => value,
                Err(e) => {
                    tracing::warn!(key, error = %e, "corrupt stored record, using default");
                    T::default()
                }
            },
        }
    }

    fn write<T: Serialize>(&self, key: &str, value: &T) -> AppResult<()> {
        let raw = serde_json::to_string(value).map_err(anyhow::Error::new)?;
        self.store.set(key, &raw)?;
        Ok(())
    }

    // Mood entries

    pub fn entries(&self) -> Vec<MoodEntry> {
        self.read_or_default(keys::MOOD_ENTRIES)
    }

    pub fn append_entry(&self, new: NewEntry) -> AppResult<MoodEntry> {
        let mut entries = self.entries();
        let entry = MoodEntry::create(new);
        entries.push(entry.clone());
        self.write(keys::MOOD_ENTRIES, &entries)?;
        tracing::debug!(id = %entry.id, quadrant = %entry.quadrant, "mood entry appended");
        Ok(entry)
    }

    /// `None` means the id was not found; that is not an error.
    pub fn update_entry(&self, id: &str, update: EntryUpdate) -> AppResult<Option<MoodEntry>> {
        let mut entries = self.entries();
        let Some(entry) = entries.iter_mut().find(|e| e.id == id) else {
            return Ok(None);
        };
        entry.apply(update);
        let updated = entry.clone();
        self.write(keys::MOOD_ENTRIES, &entries)?;
        tracing::debug!(id, "mood entry updated");
        Ok(Some(updated))
    }

    /// `false` means the id was not found; the stored list is unchanged.
    pub fn delete_entry(&self, id: &str) -> AppResult<bool> {
        let mut entries = self.entries();
        let before = entries.len();
        entries.retain(|e| e.id != id);
        if entries.len() == before {
            return Ok(false);
        }
        self.write(keys::MOOD_ENTRIES, &entries)?;
        tracing::debug!(id, "mood entry deleted");
        Ok(true)
    }

    pub fn delete_all_entries(&self) -> AppResult<()> {
        self.write(keys::MOOD_ENTRIES, &Vec::<MoodEntry>::new())
    }

    pub fn replace_entries(&self, entries: &[MoodEntry]) -> AppResult<()> {
        self.write(keys::MOOD_ENTRIES, &entries)
    }

    // Recent-reflection ring buffer

    pub fn mood_history(&self) -> Vec<MoodHistoryItem> {
        self.read_or_default(keys::MOOD_HISTORY)
    }

    /// Push then evict from the front past [`MOOD_HISTORY_MAX`].
    pub fn push_history(&self, item: MoodHistoryItem) -> AppResult<()> {
        let mut history = self.mood_history();
        history.push(item);
        if history.len() > MOOD_HISTORY_MAX {
            let excess = history.len() - MOOD_HISTORY_MAX;
            history.drain(..excess);
        }
        self.write(keys::MOOD_HISTORY, &history)
    }

    /// Attach a note to the most recent history item; no-op when empty.
    pub fn update_last_history_note(&self, note: &str) -> AppResult<()> {
        let mut history = self.mood_history();
        if let Some(last) = history.last_mut() {
            last.note = Some(note.to_string());
            self.write(keys::MOOD_HISTORY, &history)?;
        }
        Ok(())
    }

    // Preferences, stats, flags, last position

    pub fn preferences(&self) -> UserPreferences {
        self.read_or_default(keys::USER_PREFERENCES)
    }

    pub fn save_preferences(&self, prefs: &UserPreferences) -> AppResult<()> {
        self.write(keys::USER_PREFERENCES, prefs)
    }

    pub fn stats(&self) -> UserStats {
        self.read_or_default(keys::USER_STATS)
    }

    pub fn save_stats(&self, stats: &UserStats) -> AppResult<()> {
        self.write(keys::USER_STATS, stats)
    }

    pub fn has_seen_welcome(&self) -> bool {
        self.read_or_default(keys::HAS_SEEN_WELCOME)
    }

    pub fn mark_welcome_seen(&self) -> AppResult<()> {
        self.write(keys::HAS_SEEN_WELCOME, &true)
    }

    pub fn has_seen_onboarding(&self) -> bool {
        self.read_or_default(keys::HAS_SEEN_ONBOARDING)
    }

    pub fn mark_onboarding_seen(&self) -> AppResult<()> {
        self.write(keys::HAS_SEEN_ONBOARDING, &true)
    }

    pub fn last_position(&self) -> Option<LastPosition> {
        self.read_or_default(keys::LAST_MOOD)
    }

    pub fn save_last_position(&self, pos: &LastPosition) -> AppResult<()> {
        self.write(keys::LAST_MOOD, pos)
    }

    // Clears

    /// Entries, last position and mood history; preferences and stats stay.
    pub fn clear_mood_data(&self) -> AppResult<()> {
        self.delete_all_entries()?;
        self.store.remove(keys::LAST_MOOD)?;
        self.store.remove(keys::MOOD_HISTORY)?;
        tracing::info!("mood data cleared");
        Ok(())
    }

    /// Every known key.
    pub fn clear_all(&self) -> AppResult<()> {
        for key in keys::ALL {
            self.store.remove(key)?;
        }
        tracing::info!("all stored records cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::entry::Quadrant;
    use crate::store::MemoryStore;
    use chrono::{TimeZone, Utc};

    fn store() -> MoodStore<MemoryStore> {
        MoodStore::new(MemoryStore::new())
    }

    #[test]
    fn append_then_read_grows_by_one() {
        let store = store();
        assert!(store.entries().is_empty());

        let saved = store
            .append_entry(NewEntry {
                x: 400.0,
                y: 50.0,
                note: Some("great walk".into()),
                activities: vec!["exercise".into()],
                ..NewEntry::default()
            })
            .unwrap();

        let entries = store.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0], saved);
        assert_eq!(entries[0].quadrant, Quadrant::Yellow);
        assert_eq!(entries[0].note.as_deref(), Some("great walk"));
    }

    #[test]
    fn delete_unknown_id_is_a_sentinel_not_an_error() {
        let store = store();
        store.append_entry(NewEntry::at(100.0, 100.0)).unwrap();

        assert!(!store.delete_entry("mood-0-nosuchid").unwrap());
        assert_eq!(store.entries().len(), 1);
    }

    #[test]
    fn delete_known_id_removes_it() {
        let store = store();
        let entry = store.append_entry(NewEntry::at(100.0, 100.0)).unwrap();
        assert!(store.delete_entry(&entry.id).unwrap());
        assert!(store.entries().is_empty());
    }

    #[test]
    fn update_unknown_id_returns_none() {
        let store = store();
        let updated = store
            .update_entry("mood-0-nosuchid", EntryUpdate::default())
            .unwrap();
        assert!(updated.is_none());
    }

    #[test]
    fn update_preserves_id_and_rederives_position_fields() {
        let store = store();
        let entry = store.append_entry(NewEntry::at(400.0, 50.0)).unwrap();

        let updated = store
            .update_entry(
                &entry.id,
                EntryUpdate {
                    x: Some(50.0),
                    y: Some(400.0),
                    ..EntryUpdate::default()
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(updated.id, entry.id);
        assert_eq!(updated.timestamp, entry.timestamp);
        assert_eq!(updated.quadrant, Quadrant::Blue);
        assert_eq!(store.entries()[0], updated);
    }

    #[test]
    fn corrupt_record_falls_back_to_default() {
        let backend = MemoryStore::new();
        backend.set(keys::MOOD_ENTRIES, "{not json").unwrap();
        backend.set(keys::USER_PREFERENCES, "[]").unwrap();

        let store = MoodStore::new(backend);
        assert!(store.entries().is_empty());
        assert_eq!(store.preferences(), UserPreferences::default());
    }

    #[test]
    fn history_evicts_oldest_past_ten() {
        let store = store();
        for i in 0..12 {
            let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, i, 0).unwrap();
            store
                .push_history(MoodHistoryItem::new(Quadrant::Green, &at))
                .unwrap();
        }
        let history = store.mood_history();
        assert_eq!(history.len(), MOOD_HISTORY_MAX);
        // The two oldest minutes were evicted.
        assert_eq!(history[0].time, "12:02 AM");
    }

    #[test]
    fn last_history_note_update() {
        let store = store();
        // Empty history: silently a no-op.
        store.update_last_history_note("nothing yet").unwrap();
        assert!(store.mood_history().is_empty());

        let at = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
        store
            .push_history(MoodHistoryItem::new(Quadrant::Red, &at))
            .unwrap();
        store.update_last_history_note("felt better after").unwrap();
        assert_eq!(
            store.mood_history()[0].note.as_deref(),
            Some("felt better after")
        );
    }

    #[test]
    fn clear_mood_data_keeps_preferences() {
        let store = store();
        store.append_entry(NewEntry::at(100.0, 100.0)).unwrap();
        let prefs = UserPreferences {
            dark_mode: true,
            ..UserPreferences::default()
        };
        store.save_preferences(&prefs).unwrap();

        store.clear_mood_data().unwrap();
        assert!(store.entries().is_empty());
        assert!(store.last_position().is_none());
        assert!(store.mood_history().is_empty());
        assert_eq!(store.preferences(), prefs);
    }

    #[test]
    fn flags_default_false_until_marked() {
        let store = store();
        assert!(!store.has_seen_welcome());
        assert!(!store.has_seen_onboarding());
        store.mark_welcome_seen().unwrap();
        assert!(store.has_seen_welcome());
        assert!(!store.has_seen_onboarding());
    }
}
