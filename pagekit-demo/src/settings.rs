//! Widget options loaded from JSON.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};
use pagekit::{CollapsibleOptions, ModalOptions, WidgetDefaults};
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Contents of `widgets.json`. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub collapsible: CollapsibleOptions,
    pub modal: ModalOptions,
}

impl Settings {
    /// Load settings from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("no settings at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(SettingsError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let settings = serde_json::from_str(&text).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!("loaded widget settings from {}", path.display());
        Ok(settings)
    }

    /// Process defaults with these settings applied.
    pub fn defaults(&self) -> WidgetDefaults {
        let mut defaults = WidgetDefaults::new();
        defaults.configure_collapsible(&self.collapsible);
        defaults.configure_modal(&self.modal);
        defaults
    }
}
