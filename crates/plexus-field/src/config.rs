//! Field tuning: particle count, motion, link thresholds and colors.

use serde::{Deserialize, Serialize};

use crate::error::{FieldError, Result};
use crate::surface::Rgb;

/// Particles allocated when a field starts.
pub const DEFAULT_COUNT: usize = 60;

/// Above this many particles the O(n²) pair scan gets expensive enough to
/// want a spatial index.
pub const QUADRATIC_WARN_COUNT: usize = 200;

/// Tunables for a particle field.
///
/// Every field has a default, so a partial JSON object is a valid config:
///
/// ```
/// use plexus_field::FieldConfig;
///
/// let cfg = FieldConfig::from_json(r#"{ "count": 40, "color": [14, 165, 233] }"#).unwrap();
/// assert_eq!(cfg.count, 40);
/// assert_eq!(cfg.link_distance, 150.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub count: usize,
    /// Velocity span per axis: each component is drawn from `[-speed/2, speed/2]`.
    pub speed: f64,
    pub radius_min: f64,
    pub radius_max: f64,
    /// Particle pairs closer than this are linked.
    pub link_distance: f64,
    /// Link opacity at distance 0, fading linearly to 0 at `link_distance`.
    pub link_alpha: f64,
    /// Particles closer than this to the pointer get a line to it.
    pub pointer_distance: f64,
    pub pointer_alpha: f64,
    /// Fill opacity of the dots.
    pub dot_alpha: f64,
    pub color: Rgb,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            speed: 0.4,
            radius_min: 1.0,
            radius_max: 3.0,
            link_distance: 150.0,
            link_alpha: 0.08,
            pointer_distance: 120.0,
            pointer_alpha: 0.15,
            dot_alpha: 0.25,
            color: Rgb(99, 102, 241),
        }
    }
}

impl FieldConfig {
    /// Parse a JSON object, filling missing keys from [`FieldConfig::default`].
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: FieldConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        non_negative("speed", self.speed)?;
        non_negative("radius_min", self.radius_min)?;
        non_negative("radius_max", self.radius_max)?;
        if self.radius_min > self.radius_max {
            return Err(FieldError::InvalidParameter(format!(
                "radius_min ({}) exceeds radius_max ({})",
                self.radius_min, self.radius_max
            )));
        }
        positive("link_distance", self.link_distance)?;
        positive("pointer_distance", self.pointer_distance)?;
        non_negative("link_alpha", self.link_alpha)?;
        non_negative("pointer_alpha", self.pointer_alpha)?;
        non_negative("dot_alpha", self.dot_alpha)?;
        Ok(())
    }
}

fn non_negative(name: &str, v: f64) -> Result<()> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(FieldError::InvalidParameter(format!(
            "{name} must be finite and >= 0, got {v}"
        )))
    }
}

fn positive(name: &str, v: f64) -> Result<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(FieldError::InvalidParameter(format!(
            "{name} must be finite and > 0, got {v}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let cfg = FieldConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.count, 60);
        assert_eq!(cfg.color, Rgb(99, 102, 241));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let cfg = FieldConfig::from_json(r#"{ "pointer_distance": 80.0 }"#).unwrap();
        assert_eq!(cfg.pointer_distance, 80.0);
        assert_eq!(cfg.count, DEFAULT_COUNT);
        assert_eq!(cfg.link_alpha, 0.08);
    }

    #[test]
    fn test_malformed_json() {
        let err = FieldConfig::from_json("{ count: 3 ").unwrap_err();
        assert!(matches!(err, FieldError::JsonError(_)));
    }

    #[test]
    fn test_rejects_inverted_radius() {
        let err = FieldConfig::from_json(r#"{ "radius_min": 4.0, "radius_max": 2.0 }"#)
            .unwrap_err();
        assert!(matches!(err, FieldError::InvalidParameter(_)));
    }

    #[test]
    fn test_rejects_zero_link_distance() {
        let cfg = FieldConfig {
            link_distance: 0.0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = FieldConfig {
            speed: f64::NAN,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_zero_count_is_valid() {
        let cfg = FieldConfig {
            count: 0,
            ..Default::default()
        };
        assert!(cfg.validate().is_ok());
    }
}
