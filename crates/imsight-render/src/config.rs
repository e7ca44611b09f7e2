//! Presentation configuration
//!
//! Figure size and number display settings are passed explicitly to every
//! rendering call; nothing here is process-wide state.

use serde::{Deserialize, Serialize};

use crate::error::{validation, RenderResult};

/// Settings shared by the table and chart renderers
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationConfig {
    /// Chart width in pixels
    pub width: u32,

    /// Chart height in pixels
    pub height: u32,

    /// Chart title (the facade falls back to the feature name)
    pub title: Option<String>,

    /// Decimals for flag rates shown as percentages
    pub rate_decimals: usize,

    /// Decimals for floating-point values in aggregate tables
    pub float_decimals: usize,

    /// Font size for tick labels and annotations
    pub font_size: u32,

    /// Stroke color of the rate line and markers
    pub line_color: String,

    /// Fill color of the count bars and their labels
    pub bar_color: String,

    /// Fill opacity of the count bars
    pub bar_opacity: f32,

    /// Radius of the rate markers
    pub marker_radius: f32,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            width: 1400,
            height: 700,
            title: None,
            rate_decimals: 2,
            float_decimals: 0,
            font_size: 12,
            line_color: "#1f77b4".to_string(),
            bar_color: "green".to_string(),
            bar_opacity: 0.2,
            marker_radius: 5.0,
        }
    }
}

impl PresentationConfig {
    /// Parse a config from TOML; missing keys keep their defaults
    pub fn from_toml_str(input: &str) -> RenderResult<Self> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the config to TOML
    pub fn to_toml_string(&self) -> RenderResult<String> {
        Ok(toml::to_string(self)?)
    }

    /// Check the figure dimensions
    pub fn validate(&self) -> RenderResult<()> {
        validation::validate_dimensions(self.width, self.height)
    }

    /// Set the figure size
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set decimals for percentages
    pub fn with_rate_decimals(mut self, decimals: usize) -> Self {
        self.rate_decimals = decimals;
        self
    }

    /// Set decimals for floats in aggregate tables
    pub fn with_float_decimals(mut self, decimals: usize) -> Self {
        self.float_decimals = decimals;
        self
    }
}

/// Preset presentation configurations
pub mod presets {
    use super::*;

    /// Large figure for interactive inspection
    pub fn wide() -> PresentationConfig {
        PresentationConfig::default()
    }

    /// Short, report-width strip
    pub fn report() -> PresentationConfig {
        PresentationConfig {
            width: 1200,
            height: 400,
            ..Default::default()
        }
    }

    /// Small figure for dashboards and thumbnails
    pub fn compact() -> PresentationConfig {
        PresentationConfig {
            width: 640,
            height: 320,
            font_size: 10,
            marker_radius: 3.0,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;

    #[test]
    fn test_defaults() {
        let config = PresentationConfig::default();
        assert_eq!((config.width, config.height), (1400, 700));
        assert_eq!(config.float_decimals, 0);
        assert_eq!(config.rate_decimals, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml_partial() {
        let config = PresentationConfig::from_toml_str(
            r#"
            width = 800
            title = "income"
            "#,
        )
        .unwrap();

        assert_eq!(config.width, 800);
        assert_eq!(config.height, 700);
        assert_eq!(config.title.as_deref(), Some("income"));
    }

    #[test]
    fn test_from_toml_rejects_bad_dimensions() {
        let err = PresentationConfig::from_toml_str("width = 0").unwrap_err();
        assert!(matches!(err, RenderError::InvalidDimensions { .. }));

        let err = PresentationConfig::from_toml_str("width = \"wide\"").unwrap_err();
        assert!(matches!(err, RenderError::Config(_)));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = presets::compact().with_title("age");
        let text = config.to_toml_string().unwrap();
        assert_eq!(PresentationConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_presets() {
        assert_eq!(presets::report().height, 400);
        assert_eq!(presets::compact().font_size, 10);
        assert_eq!(presets::wide(), PresentationConfig::default());
    }
}
