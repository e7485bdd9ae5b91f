//! Configuration types for Cueline choreography runs.
//!
//! This module provides configuration structures that control default step
//! timing and the styling of rendered output. All types implement
//! [`serde::Deserialize`] for flexible loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining timing and style settings.
//! - [`TimingConfig`] - Default animation durations and pauses for steps that
//!   do not set their own.
//! - [`StyleConfig`] - Visual styling options for render-engine backends.
//!
//! # Example
//!
//! ```
//! # use cueline::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.style().background_color().is_ok());
//! assert_eq!(config.timing().default_pause(), 1.0);
//! ```

use serde::Deserialize;

use cueline_core::{color::Color, geometry::Size, step::Seconds};

/// Top-level configuration combining timing and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Timing configuration section.
    #[serde(default)]
    timing: TimingConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified timing and style configurations.
    pub fn new(timing: TimingConfig, style: StyleConfig) -> Self {
        Self { timing, style }
    }

    /// Returns the timing configuration.
    pub fn timing(&self) -> &TimingConfig {
        &self.timing
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Default durations for steps that do not declare their own.
///
/// Every step may carry an explicit animation duration and post-action
/// pause; these values fill in whichever is missing.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Duration of text write-on animations, in seconds.
    write_duration: Seconds,

    /// Duration of shape draw-on animations, in seconds.
    draw_duration: Seconds,

    /// Duration of fade-out animations, in seconds.
    fade_duration: Seconds,

    /// Pause after each step once its animation completes, in seconds.
    default_pause: Seconds,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            write_duration: 1.0,
            draw_duration: 1.0,
            fade_duration: 1.0,
            default_pause: 1.0,
        }
    }
}

impl TimingConfig {
    /// Returns the default write-on duration in seconds.
    pub fn write_duration(&self) -> Seconds {
        self.write_duration
    }

    /// Returns the default draw-on duration in seconds.
    pub fn draw_duration(&self) -> Seconds {
        self.draw_duration
    }

    /// Returns the default fade-out duration in seconds.
    pub fn fade_duration(&self) -> Seconds {
        self.fade_duration
    }

    /// Returns the default post-step pause in seconds.
    pub fn default_pause(&self) -> Seconds {
        self.default_pause
    }
}

/// Visual styling configuration for render-engine backends.
///
/// Fields that are not set fall back to backend defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Background [`Color`] for rendered frames, as a color string.
    background_color: Option<String>,

    /// Stroke width for shape outlines, in scene units.
    stroke_width: f32,

    /// Frame width in scene units.
    frame_width: f32,

    /// Frame height in scene units.
    frame_height: f32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: None,
            stroke_width: 4.0,
            frame_width: 1280.0,
            frame_height: 720.0,
        }
    }
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    /// Returns the stroke width for shape outlines.
    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    /// Returns the frame dimensions.
    pub fn frame_size(&self) -> Size {
        Size::new(self.frame_width, self.frame_height)
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_timing_defaults() {
        let timing = TimingConfig::default();
        assert_approx_eq!(f32, timing.write_duration(), 1.0);
        assert_approx_eq!(f32, timing.draw_duration(), 1.0);
        assert_approx_eq!(f32, timing.fade_duration(), 1.0);
        assert_approx_eq!(f32, timing.default_pause(), 1.0);
    }

    #[test]
    fn test_style_defaults() {
        let style = StyleConfig::default();
        assert!(style.background_color().unwrap().is_none());
        assert_approx_eq!(f32, style.stroke_width(), 4.0);
        assert_approx_eq!(f32, style.frame_size().width(), 1280.0);
        assert_approx_eq!(f32, style.frame_size().height(), 720.0);
    }
}
