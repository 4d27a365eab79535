//! Halo Renderer - CPU sphere ray tracing.
//!
//! A Monte Carlo ray tracer for scenes made of spheres, lit only by a sky
//! gradient. Diffuse, metal and glass materials; depth of field; rows
//! rendered in parallel with rayon.
//!
//! # Example
//!
//! ```ignore
//! use halo_core::SceneDescription;
//! use halo_renderer::{render, CancelToken, RenderConfig, Scene};
//!
//! let scene = Scene::build(&SceneDescription::demo())?;
//! let config = RenderConfig::default().with_resolution(400, 200);
//! let output = render(&scene.camera, &scene.world, &config, &CancelToken::new())?;
//! ```

mod camera;
mod hittable;
mod material;
mod renderer;
pub mod sampling;
mod scene;
mod sphere;

pub use camera::Camera;
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{Dielectric, Lambertian, Material, Metal, Scatter, ScatterResult};
pub use renderer::{
    color_to_rgba, linear_to_gamma, ray_color, render, render_pixel, render_row, sky_color,
    CancelToken, ImageBuffer, RenderConfig, RenderOutput, T_MIN,
};
pub use scene::Scene;
pub use sphere::Sphere;

/// Re-export math types from halo_math
pub use halo_math::{Color, Interval, Ray, Vec3};
