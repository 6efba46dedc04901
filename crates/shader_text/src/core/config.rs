//! # Shader Text Configuration
//!
//! Serializable settings for the text renderer, the performance counter and
//! the demo HUD. Every struct loads from TOML or RON through [`Config`];
//! missing fields fall back to their defaults.

use serde::{Deserialize, Serialize};

use crate::render::text::{LayoutParams, LayoutRect, TextAnchor, MIN_CHARACTER_SIZE};

pub use crate::config::{Config, ConfigError};

/// # Renderer Configuration
///
/// Glyph metrics, slot count, alignment, initial text and colour of one
/// shader text label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShaderTextConfig {
    /// Number of glyph slots
    pub max_characters: usize,
    /// Width of one glyph quad
    pub character_width: f32,
    /// Height of one glyph quad
    pub character_height: f32,
    /// Gap between glyph quads
    pub character_spacing: f32,
    /// Anchor of the text inside its rectangle
    pub alignment: TextAnchor,
    /// Initial text
    pub text: String,
    /// Vertex colour (RGBA)
    pub color: [f32; 4],
}

impl Default for ShaderTextConfig {
    fn default() -> Self {
        Self {
            max_characters: 16,
            character_width: 14.0,
            character_height: 24.0,
            character_spacing: 2.0,
            alignment: TextAnchor::UpperLeft,
            text: String::new(),
            color: [1.0, 1.0, 1.0, 1.0],
        }
    }
}

impl ShaderTextConfig {
    /// Set the slot count
    pub fn with_max_characters(mut self, max_characters: usize) -> Self {
        self.max_characters = max_characters;
        self
    }

    /// Set glyph width, height and spacing
    pub fn with_metrics(mut self, width: f32, height: f32, spacing: f32) -> Self {
        self.character_width = width;
        self.character_height = height;
        self.character_spacing = spacing;
        self
    }

    /// Set the alignment
    pub fn with_alignment(mut self, alignment: TextAnchor) -> Self {
        self.alignment = alignment;
        self
    }

    /// Set the initial text
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Copy with every value forced into its valid range
    ///
    /// Capacity is at least 1, width and height at least
    /// [`MIN_CHARACTER_SIZE`], spacing non-negative. Each correction is
    /// logged.
    pub fn validated(mut self) -> Self {
        if self.max_characters < 1 {
            log::warn!("max_characters {} clamped to 1", self.max_characters);
            self.max_characters = 1;
        }
        if !(self.character_width >= MIN_CHARACTER_SIZE) {
            log::warn!("character_width {} clamped to {}", self.character_width, MIN_CHARACTER_SIZE);
            self.character_width = MIN_CHARACTER_SIZE;
        }
        if !(self.character_height >= MIN_CHARACTER_SIZE) {
            log::warn!("character_height {} clamped to {}", self.character_height, MIN_CHARACTER_SIZE);
            self.character_height = MIN_CHARACTER_SIZE;
        }
        if !(self.character_spacing >= 0.0) {
            log::warn!("character_spacing {} clamped to 0", self.character_spacing);
            self.character_spacing = 0.0;
        }
        self
    }

    /// Layout parameters described by this configuration
    pub fn layout_params(&self) -> LayoutParams {
        LayoutParams {
            character_width: self.character_width,
            character_height: self.character_height,
            character_spacing: self.character_spacing,
            alignment: self.alignment,
            capacity: self.max_characters,
        }
        .clamped()
    }
}

impl Config for ShaderTextConfig {}

/// # Performance Counter Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceCounterConfig {
    /// Seconds between label refreshes
    pub update_interval: f32,
    /// Fractional digits of the frame time
    pub decimals: u32,
}

impl Default for PerformanceCounterConfig {
    fn default() -> Self {
        Self {
            update_interval: 0.25,
            decimals: 1,
        }
    }
}

impl Config for PerformanceCounterConfig {}

/// # HUD Configuration
///
/// Top-level configuration of the counter demo: logging, the label and the
/// rectangle it is laid out in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HudConfig {
    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,
    /// Number of frames the demo simulates
    pub frames: u32,
    /// Simulated frame time in milliseconds
    pub frame_time_ms: f32,
    /// Label configuration
    pub renderer: ShaderTextConfig,
    /// Counter refresh behaviour
    pub counter: PerformanceCounterConfig,
    /// Rectangle the label is laid out in
    pub rect: LayoutRect,
}

impl Default for HudConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            frames: 240,
            frame_time_ms: 1000.0 / 60.0,
            renderer: ShaderTextConfig::default(),
            counter: PerformanceCounterConfig::default(),
            rect: LayoutRect::new(0.0, 0.0, 256.0, 32.0),
        }
    }
}

impl Config for HudConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_component_defaults() {
        let config = ShaderTextConfig::default();
        assert_eq!(config.max_characters, 16);
        assert_eq!(config.character_width, 14.0);
        assert_eq!(config.character_height, 24.0);
        assert_eq!(config.character_spacing, 2.0);
        assert_eq!(config.alignment, TextAnchor::UpperLeft);
        assert!(config.text.is_empty());
    }

    #[test]
    fn test_validated_clamps_values() {
        let config = ShaderTextConfig::default()
            .with_max_characters(0)
            .with_metrics(0.5, -2.0, -1.0)
            .validated();

        assert_eq!(config.max_characters, 1);
        assert_eq!(config.character_width, 1.0);
        assert_eq!(config.character_height, 1.0);
        assert_eq!(config.character_spacing, 0.0);
    }

    #[test]
    fn test_validated_keeps_valid_values() {
        let config = ShaderTextConfig::default().with_metrics(20.0, 40.0, 0.0);
        assert_eq!(config.clone().validated(), config);
    }

    #[test]
    fn test_layout_params_from_config() {
        let params = ShaderTextConfig::default()
            .with_max_characters(8)
            .with_alignment(TextAnchor::MiddleCenter)
            .layout_params();

        assert_eq!(params.capacity, 8);
        assert_eq!(params.alignment, TextAnchor::MiddleCenter);
        assert_eq!(params.advance(), 16.0);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = HudConfig::from_toml_str(
            r#"
            log_level = "debug"

            [renderer]
            max_characters = 12
            alignment = "LowerRight"
            "#,
        )
        .unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.renderer.max_characters, 12);
        assert_eq!(config.renderer.alignment, TextAnchor::LowerRight);
        assert_eq!(config.renderer.character_width, 14.0);
        assert_eq!(config.counter, PerformanceCounterConfig::default());
    }

    #[test]
    fn test_ron_config() {
        let config = ShaderTextConfig::from_ron_str(r#"(text: "HP:100", alignment: MiddleCenter)"#).unwrap();
        assert_eq!(config.text, "HP:100");
        assert_eq!(config.alignment, TextAnchor::MiddleCenter);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let path = std::env::temp_dir().join(format!("shader_text_hud_{}.toml", std::process::id()));
        let config = HudConfig {
            frames: 10,
            renderer: ShaderTextConfig::default().with_text("READY"),
            ..HudConfig::default()
        };

        config.save_to_file(&path).unwrap();
        let loaded = HudConfig::load_from_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = HudConfig::load_from_file("does/not/exist.toml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
