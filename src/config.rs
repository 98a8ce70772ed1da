use egui::Color32;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::tools::ToolState;

/// Environment variable naming an optional JSON config file.
pub const CONFIG_ENV_VAR: &str = "DRAFT_PAD_CONFIG";

/// Pen palette and widths offered by the draft pad toolbar.
///
/// Persisted between runs through eframe storage; missing fields fall back to
/// their defaults when deserializing older state.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PadConfig {
    pub palette: Vec<Color32>,
    pub pen_widths: Vec<f32>,
    pub eraser_widths: Vec<f32>,
    pub pen_color: Color32,
    pub pen_width: f32,
    pub eraser_width: f32,
}

impl Default for PadConfig {
    fn default() -> Self {
        let palette = vec![
            Color32::from_rgb(0x11, 0x18, 0x27),
            Color32::from_rgb(0x25, 0x63, 0xeb),
            Color32::from_rgb(0xef, 0x44, 0x44),
        ];
        Self {
            pen_color: palette[0],
            palette,
            pen_widths: vec![2.0, 4.0, 8.0],
            eraser_widths: vec![12.0, 16.0, 24.0],
            pen_width: 4.0,
            eraser_width: 16.0,
        }
    }
}

impl PadConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Config from the file named by `DRAFT_PAD_CONFIG`, or the defaults.
    pub fn from_env() -> Self {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) => match Self::load(&path) {
                Ok(config) => {
                    log::info!("Loaded draft pad config from {}", path);
                    config
                }
                Err(err) => {
                    log::warn!("Ignoring draft pad config: {}", err);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Keep the pen the user ended up with for the next session.
    pub fn remember_tools(&mut self, tools: &ToolState) {
        self.pen_color = tools.pen_color();
        self.pen_width = tools.pen_width();
        self.eraser_width = tools.eraser_width();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = PadConfig::from_json_str(r#"{ "pen_width": 8.0 }"#).unwrap();
        assert_eq!(config.pen_width, 8.0);
        assert_eq!(config.eraser_width, 16.0);
        assert_eq!(config.palette.len(), 3);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            PadConfig::from_json_str("{ nope"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            PadConfig::load("/definitely/not/here.json"),
            Err(ConfigError::Io { .. })
        ));
    }
}
