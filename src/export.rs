//! CSV and JSON export, and all-or-nothing JSON import.

use std::fmt::Write as _;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::models::entry::MoodEntry;

pub const CSV_HEADER: &str = "Timestamp,Energy,Pleasantness,Quadrant,Note,Activities";

/// JSON export envelope: `{ "exportDate": ..., "entries": [...] }`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonExport {
    pub export_date: DateTime<Utc>,
    pub entries: Vec<MoodEntry>,
}

/// One CSV row per entry. Notes are wrapped in quotes with internal quotes
/// doubled; activities are joined with `"; "`.
pub fn to_csv(entries: &[MoodEntry]) -> AppResult<String> {
    if entries.is_empty() {
        return Err(AppError::NotFound("no mood entries to export".into()));
    }
    let mut out = String::from(CSV_HEADER);
    for entry in entries {
        let note = entry.note.as_deref().unwrap_or("").replace('"', "\"\"");
        let _ = write!(
            out,
            "\n{},{},{},{},\"{}\",{}",
            entry.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            entry.energy,
            entry.pleasantness,
            entry.quadrant,
            note,
            entry.activities.join("; "),
        );
    }
    Ok(out)
}

pub fn to_json(entries: &[MoodEntry], export_date: DateTime<Utc>) -> AppResult<String> {
    if entries.is_empty() {
        return Err(AppError::NotFound("no mood entries to export".into()));
    }
    let export = JsonExport {
        export_date,
        entries: entries.to_vec(),
    };
    serde_json::to_string_pretty(&export).map_err(|e| AppError::Internal(e.into()))
}

/// Accepts either a bare entry array or an `{ "entries": [...] }` envelope.
/// Anything else is rejected whole; there is no partial import.
pub fn parse_import(raw: &str) -> AppResult<Vec<MoodEntry>> {
    let value: serde_json::Value = serde_json::from_str(raw)
        .map_err(|e| AppError::Validation(format!("invalid JSON: {e}")))?;
    let candidate = match value.get("entries") {
        Some(entries) => entries.clone(),
        None => value,
    };
    if !candidate.is_array() {
        return Err(AppError::Validation(
            "invalid file format: expected an array of entries".into(),
        ));
    }
    serde_json::from_value(candidate)
        .map_err(|e| AppError::Validation(format!("invalid entry data: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::entry::NewEntry;
    use chrono::TimeZone;

    fn sample_entries() -> Vec<MoodEntry> {
        let ts = Utc.with_ymd_and_hms(2024, 1, 5, 9, 30, 0).unwrap();
        vec![
            MoodEntry::create(NewEntry {
                x: 400.0,
                y: 50.0,
                note: Some("said \"hello\" to a neighbor".into()),
                activities: vec!["social".into(), "commute".into()],
                timestamp: Some(ts),
                ..NewEntry::default()
            }),
            MoodEntry::create(NewEntry {
                x: 50.0,
                y: 400.0,
                timestamp: Some(ts),
                ..NewEntry::default()
            }),
        ]
    }

    #[test]
    fn csv_has_header_and_escaped_notes() {
        let csv = to_csv(&sample_entries()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("\"said \"\"hello\"\" to a neighbor\""));
        assert!(lines[1].contains("social; commute"));
        assert!(lines[1].starts_with("2024-01-05T09:30:00.000Z,89,89,yellow,"));
        assert!(lines[2].contains(",\"\","));
    }

    #[test]
    fn empty_export_is_rejected() {
        assert!(to_csv(&[]).is_err());
        assert!(to_json(&[], Utc::now()).is_err());
    }

    #[test]
    fn json_export_then_import_round_trips() {
        let entries = sample_entries();
        let json = to_json(&entries, Utc::now()).unwrap();
        let imported = parse_import(&json).unwrap();
        assert_eq!(imported, entries);
    }

    #[test]
    fn import_accepts_a_bare_array() {
        let entries = sample_entries();
        let json = serde_json::to_string(&entries).unwrap();
        let imported = parse_import(&json).unwrap();
        assert_eq!(imported, entries);
    }

    #[test]
    fn import_rejects_non_array_payloads() {
        let err = parse_import("{\"foo\": 1}").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(parse_import("42").is_err());
        assert!(parse_import("not json at all").is_err());
    }
}
