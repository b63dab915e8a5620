//! Mood grid geometry: maps pointer positions on the fixed 450x450 grid to
//! quadrant, energy and pleasantness, and snaps near-miss clicks onto the
//! labeled emotion words.
//!
//! All functions are total over the clamped domain; out-of-range input is
//! clamped at the boundary, never rejected.

use crate::models::entry::{NewEntry, Quadrant};

/// Logical grid edge length in pixels.
pub const GRID_SIZE: f64 = 450.0;

/// Grid center; the quadrant boundary column/row.
pub const GRID_CENTER: f64 = GRID_SIZE / 2.0;

/// Magnetic snap radius over normalized coordinates. Large enough that a
/// click on a word label lands on it, small enough that near-miss
/// placements survive.
pub const SNAP_THRESHOLD: f64 = 0.05;

/// A labeled emotion word at a normalized `[0, 1]` grid position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmotionPoint {
    pub name: &'static str,
    pub x: f64,
    pub y: f64,
}

const fn point(name: &'static str, x: f64, y: f64) -> EmotionPoint {
    EmotionPoint { name, x, y }
}

/// The fixed emotion-word layout. Iteration order is the snap tie-break
/// order.
pub const EMOTION_POINTS: [EmotionPoint; 16] = [
    // Red: high energy / unpleasant (top left)
    point("stressed", 0.35, 0.15),
    point("angry", 0.28, 0.18),
    point("frustrated", 0.38, 0.22),
    point("anxious", 0.25, 0.26),
    // Yellow: high energy / pleasant (top right)
    point("happy", 0.72, 0.14),
    point("joyful", 0.68, 0.17),
    point("energized", 0.67, 0.21),
    point("excited", 0.75, 0.25),
    // Blue: low energy / unpleasant (bottom left)
    point("depressed", 0.33, 0.72),
    point("sad", 0.26, 0.75),
    point("lonely", 0.34, 0.78),
    point("tired", 0.22, 0.82),
    // Green: low energy / pleasant (bottom right)
    point("content", 0.73, 0.71),
    point("calm", 0.66, 0.75),
    point("peaceful", 0.78, 0.79),
    point("relaxed", 0.65, 0.83),
];

pub fn clamp_to_grid(v: f64) -> f64 {
    v.clamp(0.0, GRID_SIZE)
}

/// Quadrant classification. The center column belongs to the right side and
/// the center row to the bottom side (`>=` on both axes), so ties on x break
/// toward yellow/green and ties on y toward blue/green.
pub fn classify_quadrant(x: f64, y: f64) -> Quadrant {
    if x >= GRID_CENTER && y < GRID_CENTER {
        Quadrant::Yellow
    } else if x < GRID_CENTER && y < GRID_CENTER {
        Quadrant::Red
    } else if x < GRID_CENTER && y >= GRID_CENTER {
        Quadrant::Blue
    } else {
        Quadrant::Green
    }
}

/// Energy percentage from the vertical position; low `y` is high energy.
pub fn energy_from_y(y: f64) -> u8 {
    (100.0 - (y / GRID_SIZE) * 100.0).round() as u8
}

/// Pleasantness percentage from the horizontal position.
pub fn pleasantness_from_x(x: f64) -> u8 {
    ((x / GRID_SIZE) * 100.0).round() as u8
}

/// Nearest labeled point within `threshold` Euclidean distance over
/// normalized coordinates, or `None`. The first point with the strictly
/// smallest distance wins, so ties resolve to the earlier table entry.
pub fn find_magnetic_snap(
    nx: f64,
    ny: f64,
    points: &'static [EmotionPoint],
    threshold: f64,
) -> Option<&'static EmotionPoint> {
    let mut closest = None;
    let mut min_dist = threshold;
    for p in points {
        let dist = ((nx - p.x).powi(2) + (ny - p.y).powi(2)).sqrt();
        if dist < min_dist {
            min_dist = dist;
            closest = Some(p);
        }
    }
    closest
}

/// A classified grid position, ready to hand to the entry modal.
#[derive(Debug, Clone, PartialEq)]
pub struct GridSelection {
    pub x: f64,
    pub y: f64,
    pub quadrant: Quadrant,
    pub energy: u8,
    pub pleasantness: u8,
    pub snapped_emotion: Option<&'static str>,
}

impl From<GridSelection> for NewEntry {
    fn from(sel: GridSelection) -> Self {
        NewEntry {
            x: sel.x,
            y: sel.y,
            selected_emotion: sel.snapped_emotion.map(str::to_string),
            ..NewEntry::default()
        }
    }
}

/// Full click pipeline: clamp, magnetic snap, classify. When a snap occurs
/// the reported coordinates are the snapped point scaled back to grid units,
/// so the snap alters the persisted position, not just the display.
pub fn resolve_selection(raw_x: f64, raw_y: f64) -> GridSelection {
    let mut x = clamp_to_grid(raw_x);
    let mut y = clamp_to_grid(raw_y);
    let snapped = find_magnetic_snap(x / GRID_SIZE, y / GRID_SIZE, &EMOTION_POINTS, SNAP_THRESHOLD);
    if let Some(p) = snapped {
        x = p.x * GRID_SIZE;
        y = p.y * GRID_SIZE;
    }
    GridSelection {
        x,
        y,
        quadrant: classify_quadrant(x, y),
        energy: energy_from_y(y),
        pleasantness: pleasantness_from_x(x),
        snapped_emotion: snapped.map(|p| p.name),
    }
}

/// One-tap preset for the quick-log row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuickMood {
    pub label: &'static str,
    pub x: f64,
    pub y: f64,
    pub quadrant: Quadrant,
}

pub const QUICK_MOODS: [QuickMood; 4] = [
    QuickMood {
        label: "Happy",
        x: 360.0,
        y: 90.0,
        quadrant: Quadrant::Yellow,
    },
    QuickMood {
        label: "Calm",
        x: 360.0,
        y: 360.0,
        quadrant: Quadrant::Green,
    },
    QuickMood {
        label: "Stressed",
        x: 90.0,
        y: 90.0,
        quadrant: Quadrant::Red,
    },
    QuickMood {
        label: "Tired",
        x: 90.0,
        y: 360.0,
        quadrant: Quadrant::Blue,
    },
];

impl QuickMood {
    /// Presets log the fixed point as-is; no magnetic snap.
    pub fn selection(&self) -> GridSelection {
        GridSelection {
            x: self.x,
            y: self.y,
            quadrant: classify_quadrant(self.x, self.y),
            energy: energy_from_y(self.y),
            pleasantness: pleasantness_from_x(self.x),
            snapped_emotion: None,
        }
    }
}
