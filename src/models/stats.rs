use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Aggregate check-in statistics. Recomputed in full from the entry list on
/// every change and persisted under the `user-stats` key; never partially
/// updated.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct UserStats {
    pub streak_count: u32,
    pub last_check_in: Option<DateTime<Utc>>,
    pub total_check_ins: u64,
    pub badges: Vec<Badge>,
}

/// Achievement unlocked by crossing a fixed threshold. Badges are cumulative:
/// earning `streak-30` does not remove `streak-7`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Badge {
    #[serde(rename = "first-checkin")]
    FirstCheckIn,
    #[serde(rename = "streak-7")]
    Streak7,
    #[serde(rename = "streak-30")]
    Streak30,
    #[serde(rename = "checkins-100")]
    CheckIns100,
}

impl Badge {
    pub fn label(&self) -> &'static str {
        match self {
            Badge::FirstCheckIn => "First Check-in",
            Badge::Streak7 => "7-Day Streak",
            Badge::Streak30 => "30-Day Streak",
            Badge::CheckIns100 => "100 Check-ins",
        }
    }
}
