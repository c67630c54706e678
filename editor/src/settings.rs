use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use partwizard_core::highlight::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default location of the settings file, relative to the working directory.
pub const DEFAULT_SETTINGS_PATH: &str = "GameData/PartWizard/partwizard.toml";

pub const DEFAULT_TOOLBAR_ICON_ACTIVE: &str = "PartWizard/Icons/partwizard_active_toolbar_24_icon";
pub const DEFAULT_TOOLBAR_ICON_INACTIVE: &str =
    "PartWizard/Icons/partwizard_inactive_toolbar_24_icon";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid settings key {0:?}")]
    InvalidKey(String),
}

/// Screen-space window rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl WindowRect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Toolbar button icon paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolbarSettings {
    pub icon_active: String,
    pub icon_inactive: String,
}

impl Default for ToolbarSettings {
    fn default() -> Self {
        Self {
            icon_active: DEFAULT_TOOLBAR_ICON_ACTIVE.into(),
            icon_inactive: DEFAULT_TOOLBAR_ICON_INACTIVE.into(),
        }
    }
}

/// Highlight colors as RGBA arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightPalette {
    pub deletable_part: [f32; 4],
    pub deletable_counterparts: [f32; 4],
    pub single_part: [f32; 4],
    pub counterparts: [f32; 4],
    pub editable_symmetry_root: [f32; 4],
    pub editable_symmetry_counterparts: [f32; 4],
    pub root_part: [f32; 4],
    pub symmetry_editor: [f32; 4],
    pub symmetry_group: [f32; 4],
    pub symmetry_group_part: [f32; 4],
    pub symmetry_group_hover: [f32; 4],
}

impl Default for HighlightPalette {
    fn default() -> Self {
        Self {
            deletable_part: Color::RED.to_array(),
            deletable_counterparts: Color::RED.to_array(),
            single_part: Color::GREEN.to_array(),
            counterparts: Color::YELLOW.to_array(),
            editable_symmetry_root: Color::YELLOW.to_array(),
            editable_symmetry_counterparts: Color::YELLOW.to_array(),
            root_part: Color::BLUE.to_array(),
            symmetry_editor: Color::CYAN.to_array(),
            symmetry_group: Color::BLUE.to_array(),
            symmetry_group_part: Color::GREEN.to_array(),
            symmetry_group_hover: Color::MAGENTA.to_array(),
        }
    }
}

/// Persisted add-on settings, loaded from a TOML file.
///
/// Every field has a default, so a partial or empty file is valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Window rectangles keyed by window.
    pub windows: BTreeMap<String, WindowRect>,
    pub toolbar: ToolbarSettings,
    pub highlight: HighlightPalette,
}

fn validate_key(key: &str) -> Result<(), SettingsError> {
    if key.trim().is_empty() {
        return Err(SettingsError::InvalidKey(key.to_owned()));
    }
    Ok(())
}

/// Load settings from a TOML file.
pub fn load_settings(path: &Path) -> Result<Settings, SettingsError> {
    let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_owned(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| SettingsError::Parse {
        path: path.to_owned(),
        source,
    })
}

/// Settings bound to the file they are saved to.
#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    settings: Settings,
    dirty: bool,
}

impl SettingsStore {
    /// Settings that are never loaded from nor saved to disk.
    pub fn in_memory() -> Self {
        Self::with_settings(PathBuf::new(), Settings::default())
    }

    pub fn with_settings(path: impl Into<PathBuf>, settings: Settings) -> Self {
        Self {
            path: path.into(),
            settings,
            dirty: false,
        }
    }

    /// Load settings, falling back to defaults if the file is missing or
    /// malformed.
    pub fn load_or_default(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let settings = match load_settings(&path) {
            Ok(settings) => {
                log::info!(
                    "Loaded settings from {} ({} window rects)",
                    path.display(),
                    settings.windows.len()
                );
                settings
            }
            Err(e) => {
                log::warn!("No settings file ({e}), using defaults");
                Settings::default()
            }
        };
        Self::with_settings(path, settings)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Mutable access; marks the settings as needing a save.
    pub fn settings_mut(&mut self) -> &mut Settings {
        self.dirty = true;
        &mut self.settings
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The stored rectangle for `key`, or `default` if none was saved.
    pub fn window_rect(&self, key: &str, default: WindowRect) -> Result<WindowRect, SettingsError> {
        validate_key(key)?;
        Ok(self.settings.windows.get(key).copied().unwrap_or(default))
    }

    pub fn set_window_rect(&mut self, key: &str, rect: WindowRect) -> Result<(), SettingsError> {
        validate_key(key)?;
        if self.settings.windows.get(key) != Some(&rect) {
            self.settings.windows.insert(key.to_owned(), rect);
            self.dirty = true;
        }
        Ok(())
    }

    /// Write the settings file, creating its directory if needed. An
    /// in-memory store has nothing to write.
    pub fn save(&mut self) -> Result<(), SettingsError> {
        if self.path.as_os_str().is_empty() {
            self.dirty = false;
            return Ok(());
        }
        let content = toml::to_string_pretty(&self.settings)?;
        let write_err = |source| SettingsError::Write {
            path: self.path.clone(),
            source,
        };
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(write_err)?;
        }
        std::fs::write(&self.path, content).map_err(write_err)?;
        log::debug!("Saved settings to {}", self.path.display());
        self.dirty = false;
        Ok(())
    }

    pub fn save_if_dirty(&mut self) -> Result<(), SettingsError> {
        if self.dirty { self.save() } else { Ok(()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("partwizard-settings-{}-{name}", std::process::id()))
            .join("partwizard.toml")
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [windows.PART_WIZARD_WINDOW]
            x = 25.0
            y = 25.0
            width = 250.0
            height = 400.0

            [toolbar]
            icon_active = "custom/icon"
            "#,
        )
        .unwrap();

        assert_eq!(
            settings.windows["PART_WIZARD_WINDOW"],
            WindowRect::new(25.0, 25.0, 250.0, 400.0)
        );
        assert_eq!(settings.toolbar.icon_active, "custom/icon");
        assert_eq!(settings.toolbar.icon_inactive, DEFAULT_TOOLBAR_ICON_INACTIVE);
        assert_eq!(settings.highlight, HighlightPalette::default());
    }

    #[test]
    fn missing_file_uses_defaults() {
        let store = SettingsStore::load_or_default(temp_path("missing"));
        assert_eq!(store.settings(), &Settings::default());
        assert!(!store.is_dirty());
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let path = temp_path("malformed");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "windows = 3").unwrap();
        assert!(matches!(
            load_settings(&path),
            Err(SettingsError::Parse { .. })
        ));
        let store = SettingsStore::load_or_default(&path);
        assert_eq!(store.settings(), &Settings::default());
    }

    #[test]
    fn save_then_load() {
        let path = temp_path("save");
        let mut store = SettingsStore::with_settings(&path, Settings::default());
        store
            .set_window_rect("SYMMETRY_EDITOR_WINDOW", WindowRect::new(275.0, 25.0, 250.0, 400.0))
            .unwrap();
        assert!(store.is_dirty());
        store.save_if_dirty().unwrap();
        assert!(!store.is_dirty());

        let loaded = SettingsStore::load_or_default(&path);
        assert_eq!(loaded.settings(), store.settings());
    }

    #[test]
    fn empty_keys_are_rejected() {
        let mut store = SettingsStore::in_memory();
        let rect = WindowRect::new(0.0, 0.0, 1.0, 1.0);
        assert!(matches!(
            store.set_window_rect(" ", rect),
            Err(SettingsError::InvalidKey(_))
        ));
        assert!(store.window_rect("", rect).is_err());
        assert_eq!(store.window_rect("unknown", rect).unwrap(), rect);
    }
}
