use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::geometry;

/// Mood category derived from grid position. Declaration order is the fixed
/// tie-break order used by every aggregation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Quadrant {
    Yellow,
    Red,
    Blue,
    Green,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::Yellow,
        Quadrant::Red,
        Quadrant::Blue,
        Quadrant::Green,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Quadrant::Yellow => "yellow",
            Quadrant::Red => "red",
            Quadrant::Blue => "blue",
            Quadrant::Green => "green",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Quadrant::Yellow => "High Energy + Pleasant",
            Quadrant::Red => "High Energy + Unpleasant",
            Quadrant::Blue => "Low Energy + Unpleasant",
            Quadrant::Green => "Low Energy + Pleasant",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Quadrant::Yellow => "#FCD34D",
            Quadrant::Red => "#F87171",
            Quadrant::Blue => "#60A5FA",
            Quadrant::Green => "#34D399",
        }
    }

    /// Emotion vocabulary offered when annotating an entry in this quadrant.
    pub fn emotion_words(&self) -> &'static [&'static str] {
        match self {
            Quadrant::Yellow => &[
                "joyful",
                "excited",
                "energized",
                "happy",
                "enthusiastic",
                "elated",
                "thrilled",
            ],
            Quadrant::Red => &[
                "angry",
                "frustrated",
                "anxious",
                "stressed",
                "irritated",
                "overwhelmed",
                "agitated",
            ],
            Quadrant::Blue => &[
                "sad",
                "lonely",
                "tired",
                "depressed",
                "exhausted",
                "melancholy",
                "down",
            ],
            Quadrant::Green => &[
                "calm",
                "peaceful",
                "relaxed",
                "content",
                "serene",
                "tranquil",
                "at ease",
            ],
        }
    }
}

impl std::fmt::Display for Quadrant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed activity tag vocabulary, `(id, label)` pairs.
pub const ACTIVITY_OPTIONS: [(&str, &str); 8] = [
    ("work", "Work"),
    ("exercise", "Exercise"),
    ("social", "Social"),
    ("sleep", "Sleep"),
    ("eating", "Eating"),
    ("commute", "Commute"),
    ("entertainment", "Entertainment"),
    ("other", "Other"),
];

/// One logged mood instance. `quadrant`, `energy` and `pleasantness` are
/// always derived from `(x, y)`; they are stored for the persisted contract
/// but never mutated independently.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub x: f64,
    pub y: f64,
    pub quadrant: Quadrant,
    pub energy: u8,
    pub pleasantness: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default)]
    pub activities: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_emotion: Option<String>,
}

impl MoodEntry {
    /// Builds a full entry from creation inputs: clamps the position, derives
    /// the semantic fields and generates the id. The timestamp defaults to
    /// now unless explicitly supplied (imports).
    pub fn create(new: NewEntry) -> Self {
        let timestamp = new.timestamp.unwrap_or_else(Utc::now);
        let x = geometry::clamp_to_grid(new.x);
        let y = geometry::clamp_to_grid(new.y);
        Self {
            id: generate_id(timestamp),
            timestamp,
            x,
            y,
            quadrant: geometry::classify_quadrant(x, y),
            energy: geometry::energy_from_y(y),
            pleasantness: geometry::pleasantness_from_x(x),
            note: new.note,
            activities: new.activities,
            selected_emotion: new.selected_emotion,
        }
    }

    /// Applies an edit. A position change re-derives quadrant, energy and
    /// pleasantness; id and timestamp are preserved.
    pub fn apply(&mut self, update: EntryUpdate) {
        let moved = update.x.is_some() || update.y.is_some();
        if let Some(x) = update.x {
            self.x = geometry::clamp_to_grid(x);
        }
        if let Some(y) = update.y {
            self.y = geometry::clamp_to_grid(y);
        }
        if moved {
            self.quadrant = geometry::classify_quadrant(self.x, self.y);
            self.energy = geometry::energy_from_y(self.y);
            self.pleasantness = geometry::pleasantness_from_x(self.x);
        }
        if let Some(note) = update.note {
            self.note = Some(note);
        }
        if let Some(activities) = update.activities {
            self.activities = activities;
        }
        if let Some(emotion) = update.selected_emotion {
            self.selected_emotion = Some(emotion);
        }
    }
}

/// Creation inputs for [`MoodEntry::create`]. Derived fields are computed at
/// append time, never accepted from the caller.
#[derive(Debug, Clone, Default)]
pub struct NewEntry {
    pub x: f64,
    pub y: f64,
    pub note: Option<String>,
    pub activities: Vec<String>,
    pub selected_emotion: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl NewEntry {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }
}

/// Edit-flow update; `Some` replaces the field, `None` leaves it untouched.
#[derive(Debug, Clone, Default)]
pub struct EntryUpdate {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub note: Option<String>,
    pub activities: Option<Vec<String>>,
    pub selected_emotion: Option<String>,
}

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_SUFFIX_LEN: usize = 9;

/// Time-based id with a random base-36 suffix, e.g. `mood-1718000000000-k3f9q2x1m`.
fn generate_id(timestamp: DateTime<Utc>) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect();
    format!("mood-{}-{}", timestamp.timestamp_millis(), suffix)
}
