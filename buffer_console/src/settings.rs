//! Console settings
//!
//! Settings are layered: baked-in defaults, then an optional JSON settings
//! file, then command-line overrides applied by the binary.

use std::fs;
use std::path::{Path, PathBuf};

use buffer_core::DEFAULT_CAPACITY;
use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Transcript path used by script mode when none is configured
pub const DEFAULT_TRANSCRIPT_PATH: &str = "output.txt";

/// Effective console settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleSettings {
    /// Buffer capacity for script mode, and for interactive mode when set
    /// explicitly
    pub capacity: usize,
    /// Whether `capacity` came from a file or flag rather than the default
    pub capacity_overridden: bool,
    /// Where script mode writes the transcript
    pub transcript_path: PathBuf,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            capacity_overridden: false,
            transcript_path: PathBuf::from(DEFAULT_TRANSCRIPT_PATH),
        }
    }
}

/// On-disk settings overrides
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsFile {
    /// Version of the settings format
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript_path: Option<PathBuf>,
}

impl SettingsFile {
    /// Current version of the settings format
    pub const CURRENT_VERSION: u32 = 1;

    pub fn from_json(bytes: &[u8]) -> Result<Self, SettingsError> {
        let file: SettingsFile = serde_json::from_slice(bytes)?;

        if file.version != Self::CURRENT_VERSION {
            return Err(SettingsError::UnsupportedVersion(file.version));
        }
        if file.capacity == Some(0) {
            return Err(SettingsError::ZeroCapacity);
        }

        Ok(file)
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let bytes = fs::read(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&bytes)
    }
}

impl ConsoleSettings {
    /// Apply a settings file on top of these settings
    pub fn with_file(mut self, file: &SettingsFile) -> Self {
        if let Some(capacity) = file.capacity {
            self.capacity = capacity;
            self.capacity_overridden = true;
        }
        if let Some(path) = &file.transcript_path {
            self.transcript_path = path.clone();
        }
        self
    }

    /// Apply a capacity override
    pub fn with_capacity(mut self, capacity: Option<usize>) -> Result<Self, SettingsError> {
        match capacity {
            Some(0) => Err(SettingsError::ZeroCapacity),
            Some(capacity) => {
                self.capacity = capacity;
                self.capacity_overridden = true;
                Ok(self)
            }
            None => Ok(self),
        }
    }

    /// Apply a transcript path override
    pub fn with_transcript_path(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.transcript_path = path;
        }
        self
    }

    /// Defaults, overlaid with the settings file at `path` if given
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        let settings = Self::default();
        match path {
            Some(path) => Ok(settings.with_file(&SettingsFile::load(path)?)),
            None => Ok(settings),
        }
    }
}
