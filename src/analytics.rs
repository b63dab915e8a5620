//! Derived, read-only statistics. Everything here is a pure function of the
//! entry list plus an explicit clock instant; callers pass `Local::now()` in
//! production and a fixed instant in tests. There is no incremental state:
//! the full aggregate is recomputed on every entry-list change.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Timelike, Utc};
use serde::Serialize;

use crate::models::entry::{MoodEntry, Quadrant};
use crate::models::history::MoodHistoryItem;
use crate::models::stats::{Badge, UserStats};

/// Count of consecutive local calendar days with at least one entry, walking
/// backward from today. Zero if today itself has no entry; a single missing
/// day ends the run and older entries do not contribute.
pub fn calculate_streak<Tz: TimeZone>(entries: &[MoodEntry], now: &DateTime<Tz>) -> u32 {
    if entries.is_empty() {
        return 0;
    }
    let tz = now.timezone();
    let dates: HashSet<NaiveDate> = entries
        .iter()
        .map(|e| e.timestamp.with_timezone(&tz).date_naive())
        .collect();

    let mut streak = 0;
    let mut day = now.date_naive();
    while dates.contains(&day) {
        streak += 1;
        match day.pred_opt() {
            Some(prev) => day = prev,
            None => break,
        }
    }
    streak
}

/// Threshold badge rule; monotone in both inputs, all qualifying badges
/// returned together.
pub fn badges_for(streak: u32, total_entries: u64) -> Vec<Badge> {
    let mut badges = Vec::new();
    if total_entries >= 1 {
        badges.push(Badge::FirstCheckIn);
    }
    if streak >= 7 {
        badges.push(Badge::Streak7);
    }
    if streak >= 30 {
        badges.push(Badge::Streak30);
    }
    if total_entries >= 100 {
        badges.push(Badge::CheckIns100);
    }
    badges
}

/// Full stats record for persistence. `last_check_in` is the chronologically
/// latest timestamp over all entries, which stays correct when imports arrive
/// out of order.
pub fn compute_stats<Tz: TimeZone>(entries: &[MoodEntry], now: &DateTime<Tz>) -> UserStats {
    let streak = calculate_streak(entries, now);
    UserStats {
        streak_count: streak,
        last_check_in: entries.iter().map(|e| e.timestamp).max(),
        total_check_ins: entries.len() as u64,
        badges: badges_for(streak, entries.len() as u64),
    }
}

/// Per-quadrant entry counts.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct QuadrantCounts {
    pub yellow: u32,
    pub red: u32,
    pub blue: u32,
    pub green: u32,
}

impl QuadrantCounts {
    pub fn record(&mut self, quadrant: Quadrant) {
        match quadrant {
            Quadrant::Yellow => self.yellow += 1,
            Quadrant::Red => self.red += 1,
            Quadrant::Blue => self.blue += 1,
            Quadrant::Green => self.green += 1,
        }
    }

    pub fn get(&self, quadrant: Quadrant) -> u32 {
        match quadrant {
            Quadrant::Yellow => self.yellow,
            Quadrant::Red => self.red,
            Quadrant::Blue => self.blue,
            Quadrant::Green => self.green,
        }
    }

    pub fn total(&self) -> u32 {
        self.yellow + self.red + self.blue + self.green
    }

    /// Highest count wins; ties resolve to the earlier quadrant in the fixed
    /// `[yellow, red, blue, green]` order via a strictly-greater reduction.
    pub fn most_common(&self) -> Option<Quadrant> {
        if self.total() == 0 {
            return None;
        }
        let mut best = Quadrant::Yellow;
        for q in Quadrant::ALL {
            if self.get(q) > self.get(best) {
                best = q;
            }
        }
        Some(best)
    }
}

/// Daypart of a check-in, from the local hour.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    pub const ALL: [TimeOfDay; 4] = [
        TimeOfDay::Morning,
        TimeOfDay::Afternoon,
        TimeOfDay::Evening,
        TimeOfDay::Night,
    ];

    /// Morning [5,12), afternoon [12,17), evening [17,21), night otherwise.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=11 => TimeOfDay::Morning,
            12..=16 => TimeOfDay::Afternoon,
            17..=20 => TimeOfDay::Evening,
            _ => TimeOfDay::Night,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeOfDay::Morning => "Morning",
            TimeOfDay::Afternoon => "Afternoon",
            TimeOfDay::Evening => "Evening",
            TimeOfDay::Night => "Night",
        }
    }
}

/// Check-in counts per daypart.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct TimeOfDayCounts {
    pub morning: u32,
    pub afternoon: u32,
    pub evening: u32,
    pub night: u32,
}

impl TimeOfDayCounts {
    pub fn record(&mut self, slot: TimeOfDay) {
        match slot {
            TimeOfDay::Morning => self.morning += 1,
            TimeOfDay::Afternoon => self.afternoon += 1,
            TimeOfDay::Evening => self.evening += 1,
            TimeOfDay::Night => self.night += 1,
        }
    }

    pub fn get(&self, slot: TimeOfDay) -> u32 {
        match slot {
            TimeOfDay::Morning => self.morning,
            TimeOfDay::Afternoon => self.afternoon,
            TimeOfDay::Evening => self.evening,
            TimeOfDay::Night => self.night,
        }
    }
}

/// One charted point on the 30-day timeline.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TimelinePoint {
    /// Short date label, e.g. `Jan 5`.
    pub label: String,
    pub energy: u8,
    pub pleasantness: u8,
}

/// Per-day heatmap cell.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq)]
pub struct DayActivity {
    pub count: u32,
    pub quadrants: QuadrantCounts,
}

impl DayActivity {
    pub fn dominant_quadrant(&self) -> Option<Quadrant> {
        self.quadrants.most_common()
    }

    /// Display intensity, saturating at five entries per day.
    pub fn intensity(&self) -> f64 {
        (f64::from(self.count) / 5.0).min(1.0)
    }
}

/// The full derived view over the entry list.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MoodSummary {
    pub total_check_ins: u64,
    pub streak: u32,
    pub most_common_mood: Option<Quadrant>,
    pub avg_energy: u8,
    pub avg_pleasantness: u8,
    pub quadrant_distribution: QuadrantCounts,
    pub time_patterns: TimeOfDayCounts,
    pub timeline: Vec<TimelinePoint>,
    pub heatmap: BTreeMap<NaiveDate, DayActivity>,
}

impl MoodSummary {
    pub fn from_entries<Tz: TimeZone>(entries: &[MoodEntry], now: &DateTime<Tz>) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        if entries.is_empty() {
            return Self::default();
        }
        let tz = now.timezone();

        let mut quadrant_distribution = QuadrantCounts::default();
        let mut time_patterns = TimeOfDayCounts::default();
        let mut heatmap: BTreeMap<NaiveDate, DayActivity> = BTreeMap::new();
        let mut total_energy: u64 = 0;
        let mut total_pleasantness: u64 = 0;

        for entry in entries {
            quadrant_distribution.record(entry.quadrant);
            total_energy += u64::from(entry.energy);
            total_pleasantness += u64::from(entry.pleasantness);

            let local = entry.timestamp.with_timezone(&tz);
            time_patterns.record(TimeOfDay::from_hour(local.hour()));

            let day = heatmap.entry(local.date_naive()).or_default();
            day.count += 1;
            day.quadrants.record(entry.quadrant);
        }

        let cutoff = now.clone() - Duration::days(30);
        let cutoff_utc = cutoff.with_timezone(&Utc);
        let mut recent: Vec<&MoodEntry> = entries
            .iter()
            .filter(|e| e.timestamp >= cutoff_utc)
            .collect();
        recent.sort_by_key(|e| e.timestamp);
        let timeline = recent
            .into_iter()
            .map(|e| TimelinePoint {
                label: e.timestamp.with_timezone(&tz).format("%b %-d").to_string(),
                energy: e.energy,
                pleasantness: e.pleasantness,
            })
            .collect();

        let count = entries.len() as u64;
        Self {
            total_check_ins: count,
            streak: calculate_streak(entries, now),
            most_common_mood: quadrant_distribution.most_common(),
            avg_energy: ((total_energy as f64) / (count as f64)).round() as u8,
            avg_pleasantness: ((total_pleasantness as f64) / (count as f64)).round() as u8,
            quadrant_distribution,
            time_patterns,
            timeline,
            heatmap,
        }
    }
}

/// Morning/evening mood split mined from the recent-reflection ring buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct CircadianPattern {
    pub morning: Option<Quadrant>,
    pub evening: Option<Quadrant>,
    pub insight: &'static str,
}

impl CircadianPattern {
    /// Morning is any check-in before 12 local, evening from 18 onward; the
    /// insight sentence only commits once both halves have more than two
    /// samples.
    pub fn from_history<Tz: TimeZone>(history: &[MoodHistoryItem], tz: &Tz) -> Self {
        let mut am = QuadrantCounts::default();
        let mut pm = QuadrantCounts::default();
        for item in history {
            let hour = item.timestamp.with_timezone(tz).hour();
            if hour < 12 {
                am.record(item.quadrant);
            } else if hour >= 18 {
                pm.record(item.quadrant);
            }
        }

        let morning = am.most_common();
        let evening = pm.most_common();
        let insight = match (morning, evening) {
            (Some(m), Some(e)) if am.total() > 2 && pm.total() > 2 => {
                if m == e {
                    "Your mood is remarkably consistent throughout the day."
                } else if m == Quadrant::Green && e == Quadrant::Red {
                    "You start calm, but end the day stressed. Consider a wind-down routine."
                } else {
                    "Your energy shifts significantly from day to night."
                }
            }
            _ => "Log at different times to see your rhythm.",
        };

        Self {
            morning,
            evening,
            insight,
        }
    }
}
