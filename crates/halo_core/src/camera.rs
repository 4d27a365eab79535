//! Camera configuration.
//!
//! This is the immutable input the renderer derives its viewport from.
//! The defaults reproduce the classic fixed camera: eye at the origin,
//! looking down -Z with a 90 degree vertical field of view, 2:1 aspect
//! ratio and a pinhole lens.

use halo_math::Vec3;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Camera placement and lens settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Eye position
    pub look_from: Vec3,
    /// Point the camera looks at
    pub look_at: Vec3,
    /// Approximate up direction
    pub vup: Vec3,
    /// Vertical field of view in degrees
    pub vfov: f32,
    /// Viewport width / height
    pub aspect_ratio: f32,
    /// Lens radius; 0 means a pinhole camera
    pub aperture: f32,
    /// Distance from the eye to the plane of perfect focus
    pub focus_dist: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            look_from: Vec3::ZERO,
            look_at: Vec3::new(0.0, 0.0, -1.0),
            vup: Vec3::Y,
            vfov: 90.0,
            aspect_ratio: 2.0,
            aperture: 0.0,
            focus_dist: 1.0,
        }
    }
}

impl CameraConfig {
    /// Set camera position.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f32, aperture: f32, focus_dist: f32) -> Self {
        self.vfov = vfov;
        self.aperture = aperture;
        self.focus_dist = focus_dist;
        self
    }

    /// Set the aspect ratio.
    pub fn with_aspect_ratio(mut self, aspect_ratio: f32) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Check that the configuration describes a usable camera.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_finite_vec("camera.look_from", self.look_from)?;
        check_finite_vec("camera.look_at", self.look_at)?;
        check_finite_vec("camera.vup", self.vup)?;
        check_finite("camera.vfov", self.vfov)?;
        check_finite("camera.aspect_ratio", self.aspect_ratio)?;
        check_finite("camera.aperture", self.aperture)?;
        check_finite("camera.focus_dist", self.focus_dist)?;

        if self.vfov <= 0.0 || self.vfov >= 180.0 {
            return Err(ConfigError::InvalidFieldOfView(self.vfov));
        }
        if self.aspect_ratio <= 0.0 {
            return Err(ConfigError::InvalidAspectRatio(self.aspect_ratio));
        }
        if self.aperture < 0.0 {
            return Err(ConfigError::NegativeAperture(self.aperture));
        }
        if self.focus_dist <= 0.0 {
            return Err(ConfigError::InvalidFocusDistance(self.focus_dist));
        }

        let view = self.look_from - self.look_at;
        if view.length_squared() < 1e-12 {
            return Err(ConfigError::DegenerateViewDirection);
        }
        if self.vup.cross(view.normalize()).length_squared() < 1e-12 {
            return Err(ConfigError::DegenerateViewUp);
        }

        Ok(())
    }
}

pub(crate) fn check_finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { field, value })
    }
}

pub(crate) fn check_finite_vec(field: &'static str, v: Vec3) -> Result<(), ConfigError> {
    match v.to_array().into_iter().find(|c| !c.is_finite()) {
        Some(value) => Err(ConfigError::NonFinite { field, value }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(CameraConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_bad_lens() {
        let bad_fov = CameraConfig::default().with_lens(180.0, 0.0, 1.0);
        assert_eq!(bad_fov.validate(), Err(ConfigError::InvalidFieldOfView(180.0)));

        let bad_aperture = CameraConfig::default().with_lens(90.0, -0.1, 1.0);
        assert_eq!(bad_aperture.validate(), Err(ConfigError::NegativeAperture(-0.1)));

        let bad_focus = CameraConfig::default().with_lens(90.0, 0.5, 0.0);
        assert_eq!(bad_focus.validate(), Err(ConfigError::InvalidFocusDistance(0.0)));
    }

    #[test]
    fn test_rejects_degenerate_basis() {
        let same_point = CameraConfig::default().with_position(Vec3::ONE, Vec3::ONE, Vec3::Y);
        assert_eq!(same_point.validate(), Err(ConfigError::DegenerateViewDirection));

        let straight_down =
            CameraConfig::default().with_position(Vec3::Y, Vec3::ZERO, Vec3::Y);
        assert_eq!(straight_down.validate(), Err(ConfigError::DegenerateViewUp));
    }

    #[test]
    fn test_rejects_non_finite() {
        let config = CameraConfig::default().with_aspect_ratio(f32::NAN);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFinite { field: "camera.aspect_ratio", .. })
        ));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: CameraConfig = serde_json::from_str(r#"{ "vfov": 20.0 }"#).unwrap();
        assert_eq!(config.vfov, 20.0);
        assert_eq!(config.look_at, Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(config.aspect_ratio, 2.0);
    }
}
