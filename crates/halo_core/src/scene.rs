//! Scene description types.
//!
//! A scene is a flat list of spheres plus the camera looking at them.
//! Materials can be declared once under a name and shared by several
//! spheres, or written inline on a single sphere. Descriptions are
//! renderer-agnostic; `halo_renderer` turns a validated description into
//! intersectable objects.

use std::collections::BTreeMap;
use std::path::Path;

use halo_math::{Color, Vec3};
use serde::{Deserialize, Serialize};

use crate::camera::{check_finite, check_finite_vec};
use crate::{CameraConfig, ConfigError, SceneResult};

/// Centers closer than this count as the same point when pairing shells.
const SHELL_CENTER_EPS: f32 = 1e-6;

/// Surface scattering model and its parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MaterialDesc {
    /// Diffuse surface
    Lambertian { albedo: Color },
    /// Reflective surface; `fuzz` 0 is a perfect mirror
    Metal { albedo: Color, fuzz: f32 },
    /// Clear refractive surface (glass, water, air bubbles)
    Dielectric { refractive_index: f32 },
}

impl MaterialDesc {
    /// Check the parameters are physically meaningful.
    ///
    /// `name` only labels the error message.
    pub fn validate(&self, name: &str) -> Result<(), ConfigError> {
        match *self {
            MaterialDesc::Lambertian { albedo } => check_albedo(name, albedo),
            MaterialDesc::Metal { albedo, fuzz } => {
                check_albedo(name, albedo)?;
                if !(0.0..=1.0).contains(&fuzz) {
                    return Err(ConfigError::FuzzOutOfRange {
                        material: name.to_string(),
                        fuzz,
                    });
                }
                Ok(())
            }
            MaterialDesc::Dielectric { refractive_index } => {
                if !(refractive_index.is_finite() && refractive_index > 0.0) {
                    return Err(ConfigError::InvalidRefractiveIndex {
                        material: name.to_string(),
                        ior: refractive_index,
                    });
                }
                Ok(())
            }
        }
    }
}

fn check_albedo(name: &str, albedo: Color) -> Result<(), ConfigError> {
    if albedo.to_array().iter().all(|c| (0.0..=1.0).contains(c)) {
        Ok(())
    } else {
        Err(ConfigError::AlbedoOutOfRange {
            material: name.to_string(),
            albedo: albedo.to_array(),
        })
    }
}

/// Either a reference to a named material or an inline definition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MaterialRef {
    Named(String),
    Inline(MaterialDesc),
}

impl From<MaterialDesc> for MaterialRef {
    fn from(desc: MaterialDesc) -> Self {
        MaterialRef::Inline(desc)
    }
}

impl From<&str> for MaterialRef {
    fn from(name: &str) -> Self {
        MaterialRef::Named(name.to_string())
    }
}

/// One sphere in the scene.
///
/// A negative radius flips the surface normal inward. Paired with a larger
/// positive sphere of the same center it models a hollow shell, such as a
/// soap bubble, where refraction must bend the right way on both walls.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SphereDesc {
    pub center: Vec3,
    pub radius: f32,
    pub material: MaterialRef,
}

impl SphereDesc {
    pub fn new(center: Vec3, radius: f32, material: impl Into<MaterialRef>) -> Self {
        Self {
            center,
            radius,
            material: material.into(),
        }
    }
}

/// A complete scene: camera, shared materials and spheres.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub materials: BTreeMap<String, MaterialDesc>,
    #[serde(default)]
    pub spheres: Vec<SphereDesc>,
}

impl SceneDescription {
    /// Create an empty scene with the default camera.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a named material that spheres can share.
    pub fn add_material(&mut self, name: impl Into<String>, material: MaterialDesc) {
        self.materials.insert(name.into(), material);
    }

    /// Add a sphere.
    pub fn add_sphere(&mut self, sphere: SphereDesc) {
        self.spheres.push(sphere);
    }

    /// Add a hollow shell: an outer sphere and an inward-facing inner sphere
    /// sharing the same center.
    pub fn add_shell(
        &mut self,
        center: Vec3,
        outer_radius: f32,
        inner_radius: f32,
        outer: impl Into<MaterialRef>,
        inner: impl Into<MaterialRef>,
    ) {
        self.add_sphere(SphereDesc::new(center, outer_radius.abs(), outer));
        self.add_sphere(SphereDesc::new(center, -inner_radius.abs(), inner));
    }

    /// Look up the material a sphere uses.
    pub fn resolve_material<'a>(&'a self, material: &'a MaterialRef) -> Option<&'a MaterialDesc> {
        match material {
            MaterialRef::Named(name) => self.materials.get(name),
            MaterialRef::Inline(desc) => Some(desc),
        }
    }

    /// Number of spheres.
    pub fn sphere_count(&self) -> usize {
        self.spheres.len()
    }

    /// Check the whole description before rendering.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.camera.validate()?;

        for (name, material) in &self.materials {
            material.validate(name)?;
        }

        for (index, sphere) in self.spheres.iter().enumerate() {
            check_finite_vec("sphere.center", sphere.center)?;
            check_finite("sphere.radius", sphere.radius)?;
            if sphere.radius == 0.0 {
                return Err(ConfigError::ZeroRadius { index });
            }

            match &sphere.material {
                MaterialRef::Named(name) => {
                    if !self.materials.contains_key(name) {
                        return Err(ConfigError::UnknownMaterial {
                            index,
                            name: name.clone(),
                        });
                    }
                }
                MaterialRef::Inline(desc) => desc.validate(&format!("sphere {index}"))?,
            }

            if sphere.radius < 0.0 && !self.has_enclosing_shell(sphere) {
                return Err(ConfigError::UnpairedNegativeRadius {
                    index,
                    radius: sphere.radius,
                });
            }
        }

        Ok(())
    }

    fn has_enclosing_shell(&self, inner: &SphereDesc) -> bool {
        self.spheres.iter().any(|outer| {
            outer.radius > -inner.radius
                && outer.center.distance_squared(inner.center) < SHELL_CENTER_EPS
        })
    }

    /// Parse and validate a JSON scene description.
    pub fn from_json_str(json: &str) -> SceneResult<Self> {
        let scene: SceneDescription = serde_json::from_str(json)?;
        scene.validate()?;
        Ok(scene)
    }

    /// Load and validate a JSON scene description from disk.
    pub fn load(path: impl AsRef<Path>) -> SceneResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let scene = Self::from_json_str(&json)?;
        log::info!(
            "Loaded scene {} ({} spheres, {} named materials)",
            path.display(),
            scene.spheres.len(),
            scene.materials.len()
        );
        Ok(scene)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_string(&self) -> SceneResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The built-in demo scene: a glass bubble surrounded by diffuse and
    /// metal spheres, resting on a huge diffuse floor sphere.
    pub fn demo() -> Self {
        let mut scene = SceneDescription::new();

        // Center bubble
        scene.add_shell(
            Vec3::new(0.0, 0.0, -1.0),
            0.45,
            0.40,
            MaterialDesc::Dielectric {
                refractive_index: 1.5,
            },
            MaterialDesc::Dielectric {
                refractive_index: 1.4,
            },
        );

        // Floor
        scene.add_sphere(SphereDesc::new(
            Vec3::new(0.0, -100.5, -1.0),
            100.0,
            MaterialDesc::Lambertian {
                albedo: Color::new(0.8, 0.8, 0.0),
            },
        ));

        // Red sphere behind the bubble
        scene.add_sphere(SphereDesc::new(
            Vec3::new(0.5, 0.0, -2.0),
            0.5,
            MaterialDesc::Lambertian {
                albedo: Color::new(1.0, 0.1, 0.1),
            },
        ));
        scene.add_sphere(SphereDesc::new(
            Vec3::new(1.0, 0.0, -1.0),
            0.5,
            MaterialDesc::Metal {
                albedo: Color::new(0.8, 0.6, 0.3),
                fuzz: 0.3,
            },
        ));
        scene.add_sphere(SphereDesc::new(
            Vec3::new(-1.0, 0.0, -1.0),
            0.5,
            MaterialDesc::Metal {
                albedo: Color::new(0.8, 0.8, 0.8),
                fuzz: 0.05,
            },
        ));

        // Behind the camera, only visible in reflections
        scene.add_sphere(SphereDesc::new(
            Vec3::new(-0.8, 0.0, 0.6),
            0.5,
            MaterialDesc::Dielectric {
                refractive_index: 1.3,
            },
        ));
        scene.add_sphere(SphereDesc::new(
            Vec3::new(0.0, 0.0, 0.6),
            0.5,
            MaterialDesc::Metal {
                albedo: Color::new(0.0, 1.0, 0.0),
                fuzz: 0.1,
            },
        ));

        scene
    }
}
