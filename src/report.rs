//! Statistics export

use crate::keyboard::KeyboardState;
use crate::typing::StatsSnapshot;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use thiserror::Error;

/// Error type for export operations
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Snapshot of one testing session, in the exported JSON shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsReport {
    /// Selected layout name
    pub layout: String,
    /// Every press, repeats included
    pub keys_pressed_count: u64,
    pub unique_keys_pressed_count: usize,
    pub double_pressed_keys_count: usize,
    pub simultaneous_keys_count: usize,
    /// Seconds since the first keystroke
    pub elapsed_time: u64,
    /// `null` when no time had elapsed
    pub wpm: Option<u32>,
    pub accuracy: u32,
}

impl StatsReport {
    pub fn new(keyboard_state: &KeyboardState, stats: &StatsSnapshot) -> Self {
        Self {
            layout: keyboard_state.layout().name().to_string(),
            keys_pressed_count: keyboard_state.total_presses(),
            unique_keys_pressed_count: keyboard_state.pressed_keys().len(),
            double_pressed_keys_count: keyboard_state.double_pressed_keys().len(),
            simultaneous_keys_count: keyboard_state.combinations().len(),
            elapsed_time: stats.elapsed_secs,
            wpm: stats.wpm,
            accuracy: stats.accuracy,
        }
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write the report as JSON to `path`
    pub fn export_json(&self, path: &Path) -> Result<(), ReportError> {
        let json = self.to_json()?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        log::info!("exported stats to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::{KeyId, KeyboardLayout};
    use std::time::{Duration, Instant};

    fn sample_state() -> KeyboardState {
        let mut state = KeyboardState::new(KeyboardLayout::Sixty);
        let t0 = Instant::now();
        let a = KeyId::parse("a").unwrap();
        let b = KeyId::parse("b").unwrap();
        state.press(a.clone(), t0);
        state.release(&a);
        state.press(a.clone(), t0 + Duration::from_millis(50));
        state.press(b, t0 + Duration::from_millis(400));
        state
    }

    #[test]
    fn report_counts_session_state() {
        let stats = StatsSnapshot {
            elapsed_secs: 30,
            wpm: Some(4),
            accuracy: 95,
        };
        let report = StatsReport::new(&sample_state(), &stats);
        assert_eq!(report.layout, "60%");
        assert_eq!(report.keys_pressed_count, 3);
        assert_eq!(report.unique_keys_pressed_count, 2);
        assert_eq!(report.double_pressed_keys_count, 1);
        assert_eq!(report.simultaneous_keys_count, 1);
        assert_eq!(report.elapsed_time, 30);
    }

    #[test]
    fn json_uses_camel_case_fields() {
        let report = StatsReport::new(&sample_state(), &StatsSnapshot::default());
        let json = report.to_json().unwrap();
        for field in [
            "\"layout\"",
            "\"keysPressedCount\"",
            "\"uniqueKeysPressedCount\"",
            "\"doublePressedKeysCount\"",
            "\"simultaneousKeysCount\"",
            "\"elapsedTime\"",
            "\"wpm\"",
            "\"accuracy\"",
        ] {
            assert!(json.contains(field), "missing {field}");
        }
        // two-space indentation
        assert!(json.contains("\n  \"layout\": \"60%\""));
    }

    #[test]
    fn undefined_wpm_exports_as_null() {
        let stats = StatsSnapshot {
            wpm: None,
            ..StatsSnapshot::default()
        };
        let report = StatsReport::new(&KeyboardState::default(), &stats);
        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert!(value["wpm"].is_null());
        assert_eq!(value["accuracy"], 100);
    }

    #[test]
    fn export_writes_file() {
        let path = std::env::temp_dir().join(format!(
            "keyboard-tester-report-{}.json",
            std::process::id()
        ));
        let report = StatsReport::new(&sample_state(), &StatsSnapshot::default());
        report.export_json(&path).expect("export failed");

        let contents = std::fs::read_to_string(&path).unwrap();
        let parsed: StatsReport = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed, report);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn export_to_missing_directory_fails() {
        let report = StatsReport::new(&KeyboardState::default(), &StatsSnapshot::default());
        let result = report.export_json(Path::new("/nonexistent/dir/stats.json"));
        assert!(matches!(result, Err(ReportError::Io(_))));
    }
}
