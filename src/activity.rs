//! Replication slot and session activity rows for a Postgres peer.
//!
//! The rows come from the peer-management service as JSON; this module only
//! turns them into display text with the slot and duration formatters.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use unicode_width::UnicodeWidthStr;

use crate::display::{format_duration, SlotDisplay};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotInfo {
    #[serde(rename = "slotName")]
    pub slot_name: String,
    #[serde(rename = "redoLSN")]
    pub redo_lsn: String,
    #[serde(rename = "restartLSN")]
    pub restart_lsn: String,
    #[serde(rename = "confirmedFlushLSN")]
    pub confirmed_flush_lsn: String,
    pub active: bool,
    #[serde(rename = "lagInMb")]
    pub lag_in_mb: f64,
    #[serde(rename = "walStatus")]
    pub wal_status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatInfo {
    pub pid: i64,
    pub wait_event: String,
    pub wait_event_type: String,
    pub query_start: String,
    pub query: String,
    /// Seconds since `query_start`, negative when unknown
    pub duration: f64,
}

impl Default for StatInfo {
    fn default() -> Self {
        Self {
            pid: 0,
            wait_event: String::new(),
            wait_event_type: String::new(),
            query_start: String::new(),
            query: String::new(),
            duration: -1.0,
        }
    }
}

/// Envelope used by the service for slot responses.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct SlotResponse {
    slot_data: Vec<SlotInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct StatResponse {
    stat_data: Vec<StatInfo>,
}

/// Read slot rows from a file holding either a bare array or a
/// `{"slotData": [...]}` response.
pub fn load_slots(path: &Path) -> Result<Vec<SlotInfo>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_rows(&content, |r: SlotResponse| r.slot_data)
        .with_context(|| format!("Invalid slot data in {}", path.display()))
}

/// Read session rows from a file holding either a bare array or a
/// `{"statData": [...]}` response.
pub fn load_stats(path: &Path) -> Result<Vec<StatInfo>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_rows(&content, |r: StatResponse| r.stat_data)
        .with_context(|| format!("Invalid stat data in {}", path.display()))
}

fn parse_rows<T, R>(content: &str, unwrap: impl FnOnce(R) -> Vec<T>) -> Result<Vec<T>>
where
    T: for<'de> Deserialize<'de>,
    R: for<'de> Deserialize<'de>,
{
    let value: serde_json::Value = serde_json::from_str(content)?;
    if value.is_array() {
        Ok(serde_json::from_value(value)?)
    } else {
        Ok(unwrap(serde_json::from_value(value)?))
    }
}

pub const SLOT_HEADERS: [&str; 5] = ["Slot", "Mirror", "Active", "Lag (MB)", "WAL Status"];
pub const STAT_HEADERS: [&str; 5] = ["PID", "Duration", "Wait Event", "Wait Event Type", "Query"];

const QUERY_PREVIEW_CHARS: usize = 60;

pub fn slot_rows(slots: &[SlotInfo]) -> Vec<Vec<String>> {
    slots
        .iter()
        .map(|slot| {
            let display = SlotDisplay::classify(&slot.slot_name);
            vec![
                display.label().to_string(),
                display.href().unwrap_or_default(),
                if slot.active { "yes" } else { "no" }.to_string(),
                format!("{:.2}", slot.lag_in_mb),
                slot.wal_status.clone(),
            ]
        })
        .collect()
}

pub fn stat_rows(stats: &[StatInfo]) -> Vec<Vec<String>> {
    stats
        .iter()
        .map(|stat| {
            vec![
                stat.pid.to_string(),
                format_duration(stat.duration),
                stat.wait_event.clone(),
                stat.wait_event_type.clone(),
                preview(&stat.query),
            ]
        })
        .collect()
}

/// Collapse whitespace and cut long queries to one line.
fn preview(query: &str) -> String {
    let flat = query.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= QUERY_PREVIEW_CHARS {
        return flat;
    }
    let cut: String = flat.chars().take(QUERY_PREVIEW_CHARS - 1).collect();
    format!("{}…", cut)
}

/// Lay out rows under headers, padding each column to its widest cell.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.width());
            }
        }
    }

    let format_line = |cells: Vec<&str>| -> String {
        let mut line = String::new();
        for (i, cell) in cells.iter().enumerate() {
            if i > 0 {
                line.push_str("  ");
            }
            line.push_str(cell);
            if i + 1 < cells.len() {
                let pad = widths.get(i).copied().unwrap_or(0).saturating_sub(cell.width());
                line.push_str(&" ".repeat(pad));
            }
        }
        line
    };

    let mut lines = vec![format_line(headers.to_vec())];
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in rows {
        lines.push(format_line(row.iter().map(String::as_str).collect()));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_slot_rows_link_mirror_slots() {
        let slots = vec![
            SlotInfo {
                slot_name: "peerflow_slot_orders".to_string(),
                active: true,
                lag_in_mb: 12.5,
                wal_status: "reserved".to_string(),
                ..Default::default()
            },
            SlotInfo {
                slot_name: "manual_slot".to_string(),
                ..Default::default()
            },
        ];

        let rows = slot_rows(&slots);
        assert_eq!(
            rows[0],
            vec!["peerflow_slot_orders", "/mirrors/edit/orders", "yes", "12.50", "reserved"]
        );
        assert_eq!(rows[1][0], "manual_slot");
        assert_eq!(rows[1][1], "");
        assert_eq!(rows[1][2], "no");
    }

    #[test]
    fn test_stat_rows_format_duration() {
        let stats = vec![
            StatInfo {
                pid: 4242,
                duration: 125.0,
                query: "SELECT *\n  FROM orders".to_string(),
                ..Default::default()
            },
            StatInfo {
                pid: 7,
                ..Default::default()
            },
        ];

        let rows = stat_rows(&stats);
        assert_eq!(rows[0][0], "4242");
        assert_eq!(rows[0][1], "2 minute(s) 5 seconds");
        assert_eq!(rows[0][4], "SELECT * FROM orders");
        assert_eq!(rows[1][1], "N/A");
    }

    #[test]
    fn test_missing_duration_defaults_to_unknown() {
        let stat: StatInfo = serde_json::from_str(r#"{"pid": 1}"#).unwrap();
        assert_eq!(stat.duration, -1.0);
    }

    #[test]
    fn test_long_query_is_truncated() {
        let query = "x".repeat(200);
        let p = preview(&query);
        assert_eq!(p.chars().count(), QUERY_PREVIEW_CHARS);
        assert!(p.ends_with('…'));
    }

    #[test]
    fn test_render_table_aligns_columns() {
        let rows = vec![
            vec!["a".to_string(), "1".to_string()],
            vec!["longer".to_string(), "2".to_string()],
        ];
        let table = render_table(&["Name", "N"], &rows);
        assert_eq!(
            table,
            "Name    N\n------  -\na       1\nlonger  2"
        );
    }

    #[test]
    fn test_load_slots_accepts_envelope_and_array() {
        let mut envelope = tempfile::NamedTempFile::new().unwrap();
        write!(
            envelope,
            r#"{{"slotData": [{{"slotName": "peerflow_slot_f", "active": true, "lagInMb": 1.0}}]}}"#
        )
        .unwrap();
        let slots = load_slots(envelope.path()).unwrap();
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].slot_name, "peerflow_slot_f");

        let mut array = tempfile::NamedTempFile::new().unwrap();
        write!(array, r#"[{{"slotName": "s1"}}, {{"slotName": "s2"}}]"#).unwrap();
        let slots = load_slots(array.path()).unwrap();
        assert_eq!(slots.len(), 2);
    }

    #[test]
    fn test_load_stats_reports_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = load_stats(file.path()).unwrap_err();
        assert!(err.to_string().contains("Invalid stat data"));
    }
}
