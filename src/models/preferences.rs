use serde::{Deserialize, Serialize};

/// User-level flags and settings, persisted under `user-preferences`.
/// Missing fields in stored records fall back to the documented defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPreferences {
    pub dark_mode: bool,
    pub daily_reminder: bool,
    /// `HH:MM` wall-clock time for the reminder surface.
    pub reminder_time: String,
    pub privacy_mode: bool,
    pub custom_tags: Vec<String>,
    pub daily_goal: u32,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            dark_mode: false,
            daily_reminder: false,
            reminder_time: "09:00".to_string(),
            privacy_mode: false,
            custom_tags: Vec::new(),
            daily_goal: 1,
        }
    }
}
