//! Client configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/canvascal/config.toml` by default:
//!
//! ```toml
//! [source]
//! kind = "file"
//! path = "~/canvas/events.json"
//!
//! [export]
//! download_dir = "~/Downloads"
//! default_filename = "canvas-calendar.ics"
//!
//! [display]
//! new_window_hours = 24
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use canvascal_core::{DEFAULT_ICS_FILENAME, group::NEW_EVENT_WINDOW_HOURS};
use canvascal_providers::{
    EventSource, JsonFileSource, MOCK_FETCH_DELAY, MockCanvasSource, ProviderError, ProviderResult,
};

/// Configuration for the canvascal client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Where events come from.
    pub source: SourceSettings,

    /// Export settings.
    pub export: ExportSettings,

    /// Display settings.
    pub display: DisplaySettings,
}

/// Which event source to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Built-in demo events.
    #[default]
    Mock,
    /// A JSON file of events.
    File,
}

/// Event source settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    pub kind: SourceKind,

    /// Path to the events file (`kind = "file"`).
    pub path: Option<PathBuf>,

    /// Simulated latency of the mock source, in milliseconds.
    pub mock_delay_ms: u64,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            kind: SourceKind::Mock,
            path: None,
            mock_delay_ms: MOCK_FETCH_DELAY.as_millis() as u64,
        }
    }
}

impl SourceSettings {
    /// Builds the configured event source.
    pub fn build(&self) -> ProviderResult<Box<dyn EventSource>> {
        match self.kind {
            SourceKind::Mock => Ok(Box::new(
                MockCanvasSource::new().with_delay(Duration::from_millis(self.mock_delay_ms)),
            )),
            SourceKind::File => {
                let path = self.path.as_ref().ok_or_else(|| {
                    ProviderError::configuration("[source] kind = \"file\" requires a path")
                        .with_provider("file")
                })?;
                Ok(Box::new(JsonFileSource::new(expand_home(path))))
            }
        }
    }
}

/// Export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Directory exported files are saved to (defaults to the user's download directory).
    pub download_dir: Option<PathBuf>,

    /// Filename used when exporting more than one event.
    pub default_filename: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            download_dir: None,
            default_filename: DEFAULT_ICS_FILENAME.to_string(),
        }
    }
}

impl ExportSettings {
    /// Returns the resolved download directory.
    pub fn download_dir(&self) -> PathBuf {
        self.download_dir
            .as_deref()
            .map(expand_home)
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Display settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// How far back an event's "added" time may be for it to count as new.
    pub new_window_hours: i64,

    /// Print JSON instead of the agenda.
    pub json: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            new_window_hours: NEW_EVENT_WINDOW_HOURS,
            json: false,
        }
    }
}

impl DisplaySettings {
    /// Returns the new-event window.
    ///
    /// Fails unless `new_window_hours` is positive and representable.
    pub fn new_window(&self) -> Result<chrono::Duration, String> {
        chrono::Duration::try_hours(self.new_window_hours)
            .filter(|window| *window > chrono::Duration::zero())
            .ok_or_else(|| {
                format!(
                    "[display] new_window_hours must be a positive number of hours, got {}",
                    self.new_window_hours
                )
            })
    }
}

impl ClientConfig {
    /// Loads configuration from the default path.
    pub fn load() -> Result<Self, String> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("failed to read config: {}", e))?;
        toml::from_str(&content).map_err(|e| format!("failed to parse config: {}", e))
    }

    /// Checks settings that parse but cannot work.
    pub fn validate(&self) -> Result<(), String> {
        if self.source.kind == SourceKind::File && self.source.path.is_none() {
            return Err("[source] kind = \"file\" requires a path".to_string());
        }
        self.display.new_window()?;
        let filename = &self.export.default_filename;
        if filename.is_empty() || filename.contains(['/', '\\']) {
            return Err(format!(
                "[export] default_filename must be a plain file name, got {:?}",
                filename
            ));
        }
        Ok(())
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("canvascal")
    }
}

/// Expands a leading `~/` to the home directory.
fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}
