//! Configuration persistence for editor preferences

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{MAX_SCALE, MIN_SCALE, MarkKind};
use crate::error::{EditorError, Result};

/// Smallest brush size offered to the operator, in image pixels
pub const MIN_BRUSH_SIZE: f32 = 5.0;
/// Largest brush size offered to the operator, in image pixels
pub const MAX_BRUSH_SIZE: f32 = 100.0;

/// Serializable color representation for config storage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Default for MarkColor {
    fn default() -> Self {
        // Translucent red highlight
        Self {
            r: 239.0 / 255.0,
            g: 68.0 / 255.0,
            b: 68.0 / 255.0,
            a: 0.5,
        }
    }
}

impl MarkColor {
    /// Opaque color from 8-bit channels
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Convert to image crate RGBA format (0-255)
    pub fn to_rgba_u8(self) -> [u8; 4] {
        [
            (self.r.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.g.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.b.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.a.clamp(0.0, 1.0) * 255.0).round() as u8,
        ]
    }
}

/// Editor configuration persisted between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Brush diameter in image pixels (5-100)
    pub brush_size: f32,
    /// Tool active when a session opens
    pub default_tool: MarkKind,
    /// Lower zoom limit
    pub min_scale: f32,
    /// Upper zoom limit
    pub max_scale: f32,
    /// Zoom factor applied per wheel notch scrolling up
    pub zoom_in_factor: f32,
    /// Zoom factor applied per wheel notch scrolling down
    pub zoom_out_factor: f32,
    /// Highlight used to display markings on screen (never exported)
    pub highlight_color: MarkColor,
    /// Color behind the image on the display surface
    pub background_color: MarkColor,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            brush_size: 20.0,
            default_tool: MarkKind::Brush,
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            zoom_in_factor: 1.1,
            zoom_out_factor: 0.9,
            highlight_color: MarkColor::default(),
            background_color: MarkColor {
                r: 0.07,
                g: 0.09,
                b: 0.15,
                a: 1.0,
            },
        }
    }
}

impl EditorConfig {
    /// Directory name under the platform config dir
    pub const ID: &'static str = "regionmark";

    /// Default config file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::ID).join("config.json"))
    }

    /// Load configuration from disk, or return defaults if unavailable
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            log::warn!("No config directory available, using defaults");
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Error loading config, using defaults: {}", err);
                Self::default()
            }
        }
    }

    /// Save configuration to disk
    pub fn save(&self) {
        match Self::default_path() {
            Some(path) => {
                if let Err(err) = self.save_to(&path) {
                    log::error!("Failed to save config: {}", err);
                }
            }
            None => log::error!("No config directory available for saving"),
        }
    }

    /// Read and sanitize a config file
    pub fn load_from(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| EditorError::Config(format!("{}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&text)
            .map_err(|e| EditorError::Config(format!("{}: {}", path.display(), e)))?;
        Ok(config.sanitized())
    }

    /// Write the config as pretty JSON, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| EditorError::Config(format!("{}: {}", parent.display(), e)))?;
        }
        let text = serde_json::to_string_pretty(self)
            .map_err(|e| EditorError::Config(e.to_string()))?;
        std::fs::write(path, text)
            .map_err(|e| EditorError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Clamp a brush size into the offered range
    pub fn clamp_brush_size(size: f32) -> f32 {
        if size.is_finite() {
            size.clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE)
        } else {
            Self::default().brush_size
        }
    }

    /// Replace out-of-range values with usable ones
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        self.brush_size = Self::clamp_brush_size(self.brush_size);
        let limits_ok = self.min_scale.is_finite()
            && self.max_scale.is_finite()
            && self.min_scale > 0.0
            && self.min_scale <= self.max_scale;
        if !limits_ok {
            log::warn!(
                "Invalid zoom limits [{}, {}] in config, using defaults",
                self.min_scale,
                self.max_scale
            );
            self.min_scale = defaults.min_scale;
            self.max_scale = defaults.max_scale;
        }
        if !(self.zoom_in_factor.is_finite() && self.zoom_in_factor > 1.0) {
            self.zoom_in_factor = defaults.zoom_in_factor;
        }
        if !(self.zoom_out_factor.is_finite()
            && self.zoom_out_factor > 0.0
            && self.zoom_out_factor < 1.0)
        {
            self.zoom_out_factor = defaults.zoom_out_factor;
        }
        self
    }
}
