// Construction-time widget options

use serde::{Deserialize, Serialize};
use std::fmt;

/// Recognized widget options. Deserializable so a host page can declare
/// them as a JSON `data-zoom` attribute on a mount element; unknown fields
/// fall back to the defaults of the simplest configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomOptions {
    /// Scale increment applied per zoom trigger.
    pub zoom_step: f64,
    /// Scale at construction, clamped up to `scale_min`.
    pub initial_scale: f64,
    /// Floor the scale never drops below.
    pub scale_min: f64,
    /// Render the built-in +/- controls.
    pub buttons: bool,
    /// Zoom on mouse wheel while hovering the container.
    pub wheel: bool,
    /// Zoom in on double-click.
    pub double_click: bool,
    /// Show the magnifier-lens hover preview instead of centering.
    pub hover_preview: bool,
    /// Magnification factor of the lens background.
    pub lens_scale: f64,
    /// Optional pre-existing trigger elements, resolved by CSS selector.
    pub zoom_in_selector: Option<String>,
    pub zoom_out_selector: Option<String>,
}

impl Default for ZoomOptions {
    fn default() -> Self {
        Self {
            zoom_step: 0.12,
            initial_scale: 1.0,
            scale_min: 0.12,
            buttons: false,
            wheel: true,
            double_click: true,
            hover_preview: false,
            lens_scale: 2.0,
            zoom_in_selector: None,
            zoom_out_selector: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    NonPositiveZoomStep(f64),
    NonPositiveScaleMin(f64),
    InvalidInitialScale(f64),
    NonPositiveLensScale(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveZoomStep(v) => write!(f, "zoom_step must be > 0, got {v}"),
            Self::NonPositiveScaleMin(v) => write!(f, "scale_min must be > 0, got {v}"),
            Self::InvalidInitialScale(v) => write!(f, "initial_scale must be finite, got {v}"),
            Self::NonPositiveLensScale(v) => write!(f, "lens_scale must be > 0, got {v}"),
        }
    }
}

impl ZoomOptions {
    /// Rejects values the original silently misbehaved on. `!(v > 0.0)`
    /// also catches NaN.
    pub fn validated(self) -> Result<Self, ConfigError> {
        if !(self.zoom_step > 0.0) || !self.zoom_step.is_finite() {
            return Err(ConfigError::NonPositiveZoomStep(self.zoom_step));
        }
        if !(self.scale_min > 0.0) || !self.scale_min.is_finite() {
            return Err(ConfigError::NonPositiveScaleMin(self.scale_min));
        }
        if !self.initial_scale.is_finite() {
            return Err(ConfigError::InvalidInitialScale(self.initial_scale));
        }
        if !(self.lens_scale > 0.0) || !self.lens_scale.is_finite() {
            return Err(ConfigError::NonPositiveLensScale(self.lens_scale));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_simplest_configuration() {
        let o = ZoomOptions::default();
        assert_eq!(o.zoom_step, 0.12);
        assert_eq!(o.initial_scale, 1.0);
        assert_eq!(o.scale_min, 0.12);
        assert!(!o.buttons);
        assert!(o.wheel);
        assert!(o.double_click);
        assert!(!o.hover_preview);
        assert_eq!(o.lens_scale, 2.0);
        assert!(o.validated().is_ok());
    }

    #[test]
    fn rejects_non_positive_zoom_step() {
        let o = ZoomOptions {
            zoom_step: 0.0,
            ..Default::default()
        };
        assert_eq!(
            o.validated(),
            Err(ConfigError::NonPositiveZoomStep(0.0))
        );
        let o = ZoomOptions {
            zoom_step: f64::NAN,
            ..Default::default()
        };
        assert!(o.validated().is_err());
    }

    #[test]
    fn rejects_bad_scale_min_and_lens_scale() {
        let o = ZoomOptions {
            scale_min: -1.0,
            ..Default::default()
        };
        assert!(o.validated().is_err());
        let o = ZoomOptions {
            lens_scale: 0.0,
            ..Default::default()
        };
        assert!(o.validated().is_err());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let o: ZoomOptions =
            serde_json::from_str(r#"{"buttons": true, "zoom_step": 0.2}"#).unwrap();
        assert!(o.buttons);
        assert_eq!(o.zoom_step, 0.2);
        assert_eq!(o.scale_min, 0.12);
        assert!(o.wheel);
    }
}
