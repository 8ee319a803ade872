use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::geometry::{Bounds, Extent};
use crate::state::REPLAY_CADENCE;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionSettings {
    pub version: u32,
    pub width: u32,
    pub height: u32,
    /// Side of the actor's square footprint, in pixels. 0 makes it a point.
    pub actor_size: u32,
    /// Keyboard movement speed in pixels per second.
    pub speed: f32,
    pub replay_cadence: u32,
    pub target_fps: u32,
    pub vsync: bool,
    pub show_debug: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION,
            width: 800,
            height: 600,
            actor_size: 24,
            speed: 200.0,
            replay_cadence: REPLAY_CADENCE,
            target_fps: 60,
            vsync: true,
            show_debug: false,
        }
    }
}

const SETTINGS_VERSION: u32 = 1;

impl SessionSettings {
    pub fn sanitized(mut self) -> Self {
        self.version = SETTINGS_VERSION;
        self.width = self.width.max(1);
        self.height = self.height.max(1);
        self.replay_cadence = self.replay_cadence.max(1);
        self.target_fps = self.target_fps.clamp(1, 240);
        if !self.speed.is_finite() || self.speed < 0.0 {
            self.speed = Self::default().speed;
        }
        self
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.width as f32, self.height as f32)
    }

    pub fn actor_extent(&self) -> Extent {
        Extent::square(self.actor_size as f32)
    }
}

#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_env() -> Self {
        if let Some(explicit) = std::env::var_os("REWIND_SETTINGS_PATH") {
            return Self::new(explicit);
        }

        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));

        Self::new(base.join("path-rewind").join("settings.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads settings, falling back to defaults when the file is missing or unusable.
    pub fn load(&self) -> SessionSettings {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no settings file, using defaults");
                return SessionSettings::default();
            }
            Err(err) => {
                tracing::warn!(path = %self.path.display(), %err, "settings unreadable, using defaults");
                return SessionSettings::default();
            }
        };

        match serde_json::from_slice::<SessionSettings>(&bytes) {
            Ok(settings) => settings.sanitized(),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), %err, "settings malformed, using defaults");
                SessionSettings::default()
            }
        }
    }

    pub fn save(&self, settings: &SessionSettings) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let text = serde_json::to_string_pretty(settings)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_path(tag: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        std::env::temp_dir().join(format!("rewind_settings_{tag}_{nanos}.json"))
    }

    #[test]
    fn defaults_match_the_classic_window() {
        let s = SessionSettings::default();
        assert_eq!((s.width, s.height), (800, 600));
        assert_eq!(s.replay_cadence, 3);
        assert_eq!(s.bounds(), Bounds::new(800.0, 600.0));
        assert_eq!(s.actor_extent(), Extent::square(24.0));
    }

    #[test]
    fn sanitized_repairs_out_of_range_values() {
        let s = SessionSettings {
            version: 9,
            width: 0,
            height: 0,
            speed: f32::NAN,
            replay_cadence: 0,
            target_fps: 1000,
            ..SessionSettings::default()
        }
        .sanitized();

        assert_eq!(s.version, 1);
        assert_eq!((s.width, s.height), (1, 1));
        assert_eq!(s.speed, 200.0);
        assert_eq!(s.replay_cadence, 1);
        assert_eq!(s.target_fps, 240);
    }

    #[test]
    fn serde_defaults_fill_missing_fields() {
        let parsed: SessionSettings =
            serde_json::from_str(r#"{"width":1024,"speed":50.0}"#).expect("partial settings parse");
        assert_eq!(parsed.width, 1024);
        assert_eq!(parsed.speed, 50.0);
        assert_eq!(parsed.height, 600);
        assert_eq!(parsed.replay_cadence, 3);
    }

    #[test]
    fn store_round_trips_and_tolerates_garbage() {
        let path = unique_temp_path("roundtrip");
        let store = SettingsStore::new(&path);
        assert_eq!(store.load(), SessionSettings::default());

        let custom = SessionSettings {
            width: 640,
            show_debug: true,
            ..SessionSettings::default()
        };
        store.save(&custom).expect("save settings");
        assert_eq!(store.load(), custom);

        fs::write(&path, b"{not json").expect("write garbage");
        assert_eq!(store.load(), SessionSettings::default());

        let _ = fs::remove_file(path);
    }
}
