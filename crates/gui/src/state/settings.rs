//! Application settings

use serde::{Deserialize, Serialize};
use shared::SnapMode;

use crate::helpers::DEFAULT_SNAP_THRESHOLD;

/// Snap behaviour during drag
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapSettings {
    /// Active snap mode
    pub mode: SnapMode,
    /// Distance below which a snap is accepted, in world units
    pub threshold: f64,
}

impl Default for SnapSettings {
    fn default() -> Self {
        Self {
            mode: SnapMode::None,
            threshold: DEFAULT_SNAP_THRESHOLD,
        }
    }
}

/// Stock block dimensions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BodySettings {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

impl Default for BodySettings {
    fn default() -> Self {
        Self {
            width: 3.0,
            height: 2.0,
            depth: 5.0,
        }
    }
}

/// Drag session settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DragSettings {
    /// A drag with no pointer event for this long is ended
    pub session_timeout_ms: u64,
}

impl Default for DragSettings {
    fn default() -> Self {
        Self {
            session_timeout_ms: 10_000,
        }
    }
}

/// Viewport settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    /// Initial zoom of the plan view
    pub pixels_per_unit: f32,
    /// Background color RGB
    pub background_color: [u8; 3],
    /// Draw the ground grid
    pub grid_visible: bool,
    /// Minor grid cells per world unit
    pub divisions_per_unit: u32,
    /// Minor cells between major lines
    pub major_unit_frequency: u32,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            pixels_per_unit: 80.0,
            background_color: [30, 30, 35],
            grid_visible: false,
            divisions_per_unit: 10,
            major_unit_frequency: 5,
        }
    }
}

impl ViewSettings {
    /// Turn the grid on, with optional new divisions (0 keeps the current value)
    pub fn show_grid(&mut self, divisions_per_unit: u32, major_unit_frequency: u32) {
        self.grid_visible = true;
        self.set_grid_divisions(divisions_per_unit, major_unit_frequency);
    }

    /// Change the grid density; a zero argument leaves that value unchanged
    pub fn set_grid_divisions(&mut self, divisions_per_unit: u32, major_unit_frequency: u32) {
        if divisions_per_unit > 0 {
            self.divisions_per_unit = divisions_per_unit;
        }
        if major_unit_frequency > 0 {
            self.major_unit_frequency = major_unit_frequency;
        }
    }

    pub fn hide_grid(&mut self) {
        self.grid_visible = false;
    }

    /// Distance between minor grid lines in world units
    pub fn grid_spacing(&self) -> f64 {
        1.0 / f64::from(self.divisions_per_unit.max(1))
    }
}

/// UI settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Font size in points
    pub font_size: f32,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self { font_size: 14.0 }
    }
}

/// All application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FitSettings {
    pub snap: SnapSettings,
    pub body: BodySettings,
    pub drag: DragSettings,
    pub view: ViewSettings,
    pub ui: UiSettings,
}

impl FitSettings {
    /// Load settings from file, or return default if not found
    pub fn load() -> Self {
        if let Some(dirs) = directories::ProjectDirs::from("com", "xactfit", "xactfit") {
            let config_path = dirs.config_dir().join("settings.json");
            if let Ok(json) = std::fs::read_to_string(&config_path) {
                match Self::from_json(&json) {
                    Ok(settings) => return settings,
                    Err(e) => tracing::warn!("Ignoring malformed {}: {}", config_path.display(), e),
                }
            }
        }
        Self::default()
    }

    /// Save settings to file
    pub fn save(&self) {
        if let Some(dirs) = directories::ProjectDirs::from("com", "xactfit", "xactfit") {
            let config_dir = dirs.config_dir();
            if std::fs::create_dir_all(config_dir).is_ok() {
                let config_path = config_dir.join("settings.json");
                if let Ok(json) = serde_json::to_string_pretty(self) {
                    if let Err(e) = std::fs::write(&config_path, json) {
                        tracing::warn!("Failed to save settings: {}", e);
                    }
                }
            }
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn session_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.drag.session_timeout_ms)
    }
}
