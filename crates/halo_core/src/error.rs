//! Configuration and scene loading errors.

use thiserror::Error;

/// An invalid render, camera or scene setting, caught before rendering starts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Image dimensions must be positive, got {width}x{height}")]
    ZeroImageSize { width: u32, height: u32 },

    #[error("Samples per pixel must be positive")]
    ZeroSamples,

    #[error("Max depth must be positive")]
    ZeroDepth,

    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f32 },

    #[error("Sphere {index}: radius must be non-zero")]
    ZeroRadius { index: usize },

    #[error(
        "Sphere {index}: negative radius {radius} needs an enclosing sphere with the same center \
         and a larger positive radius (hollow shell)"
    )]
    UnpairedNegativeRadius { index: usize, radius: f32 },

    #[error("Sphere {index}: unknown material '{name}'")]
    UnknownMaterial { index: usize, name: String },

    #[error("Material '{material}': albedo components must be in [0, 1], got {albedo:?}")]
    AlbedoOutOfRange { material: String, albedo: [f32; 3] },

    #[error("Material '{material}': fuzz must be in [0, 1], got {fuzz}")]
    FuzzOutOfRange { material: String, fuzz: f32 },

    #[error("Material '{material}': refractive index must be positive, got {ior}")]
    InvalidRefractiveIndex { material: String, ior: f32 },

    #[error("Vertical field of view must be in (0, 180) degrees, got {0}")]
    InvalidFieldOfView(f32),

    #[error("Aspect ratio must be positive, got {0}")]
    InvalidAspectRatio(f32),

    #[error("Aperture must not be negative, got {0}")]
    NegativeAperture(f32),

    #[error("Focus distance must be positive, got {0}")]
    InvalidFocusDistance(f32),

    #[error("Camera look_from and look_at must differ")]
    DegenerateViewDirection,

    #[error("Camera view-up vector must not be parallel to the view direction")]
    DegenerateViewUp,
}

/// Errors that can occur while loading a scene description.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid scene: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for scene loading.
pub type SceneResult<T> = Result<T, SceneError>;
