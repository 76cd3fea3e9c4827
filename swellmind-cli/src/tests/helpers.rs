//! Temporary workspaces holding JSON fixtures for CLI tests.

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Utc};
use serde::Serialize;
use swellmind_core::{ForecastObservation, TimeOfDay, UserPreferences, WindOrientation};
use tempfile::TempDir;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path, contents).expect("write fixture file");
}

/// A temporary directory addressed with UTF-8 paths.
#[derive(Debug)]
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    pub(super) fn write_json<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> Utf8PathBuf {
        let path = self.path(name);
        let payload = serde_json::to_vec_pretty(value).expect("serialise fixture");
        write_utf8(&path, &payload);
        path
    }
}

/// Preferences under which [`ideal_window`] scores 99.
pub(super) fn morning_preferences() -> UserPreferences {
    UserPreferences::new(1.0, 2.0, 5, [TimeOfDay::Morning]).expect("valid preferences")
}

/// Waist-high offshore conditions with light wind.
pub(super) fn ideal_window(at: DateTime<Utc>) -> ForecastObservation {
    ForecastObservation::at(at)
        .with_wave_height(1.5)
        .with_wind_speed(2.0)
        .with_wind_orientation(WindOrientation::Offshore)
}

pub(super) fn output_json(buffer: &[u8]) -> serde_json::Value {
    serde_json::from_slice(buffer).expect("output should be JSON")
}
