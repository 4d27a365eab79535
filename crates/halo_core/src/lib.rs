//! Halo Core - scene description for the Halo sphere tracer.
//!
//! This crate provides:
//!
//! - **Camera configuration**: `CameraConfig`
//! - **Scene description**: `SceneDescription`, `SphereDesc`, `MaterialDesc`
//! - **Validation**: descriptive `ConfigError`s raised before rendering
//!
//! # Example
//!
//! ```ignore
//! use halo_core::SceneDescription;
//!
//! let scene = SceneDescription::load("bubble.json")?;
//! println!("Loaded {} spheres", scene.sphere_count());
//! ```

pub mod camera;
pub mod error;
pub mod scene;

// Re-export commonly used types
pub use camera::CameraConfig;
pub use error::{ConfigError, SceneError, SceneResult};
pub use scene::{MaterialDesc, MaterialRef, SceneDescription, SphereDesc};
