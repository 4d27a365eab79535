//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing with configurable depth
//! - Sky gradient as the only light source
//! - Anti-aliasing via multi-sampling
//! - Gamma correction
//! - Row-parallel rendering with cancellation between rows
//!
//! Output row 0 is the top of the image.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::sampling::gen_f32;
use crate::{Camera, Hittable, Ray, Scatter};
use halo_core::ConfigError;
use halo_math::{Color, Interval};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;

/// Smallest accepted hit distance; avoids shadow acne.
pub const T_MIN: f32 = 0.001;

/// Render configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub image_width: u32,
    pub image_height: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Seed for reproducible renders; None draws a fresh one
    pub seed: Option<u64>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            image_width: 1600,
            image_height: 800,
            samples_per_pixel: 256,
            max_depth: 96,
            seed: None,
        }
    }
}

impl RenderConfig {
    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples: u32, max_depth: u32) -> Self {
        self.samples_per_pixel = samples;
        self.max_depth = max_depth;
        self
    }

    /// Fix the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Width / height of the output image.
    pub fn aspect_ratio(&self) -> f32 {
        self.image_width as f32 / self.image_height as f32
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.image_width == 0 || self.image_height == 0 {
            return Err(ConfigError::ZeroImageSize {
                width: self.image_width,
                height: self.image_height,
            });
        }
        if self.samples_per_pixel == 0 {
            return Err(ConfigError::ZeroSamples);
        }
        if self.max_depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        Ok(())
    }
}

/// Compute the color seen by a ray.
///
/// Traces the ray through the scene, bouncing off surfaces and filtering
/// the sky light by each surface's attenuation. Returns black once the
/// depth budget runs out or a surface absorbs the ray.
pub fn ray_color(ray: &Ray, world: &dyn Hittable, depth: u32, rng: &mut dyn RngCore) -> Color {
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(rec) = world.hit(ray, Interval::new(T_MIN, f32::INFINITY)) else {
        return sky_color(ray);
    };

    match rec.material.scatter(ray, &rec, rng) {
        Some(result) => result.attenuation * ray_color(&result.scattered, world, depth - 1, rng),
        None => Color::ZERO,
    }
}

/// Vertical gradient from white at the horizon to sky blue at the zenith.
pub fn sky_color(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize_or_zero();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Clamp a value to [0, 1] range.
#[inline]
pub fn clamp_01(x: f32) -> f32 {
    const UNIT: Interval = Interval { min: 0.0, max: 1.0 };
    UNIT.clamp(x)
}

/// Convert a linear color to gamma-corrected 8-bit RGBA.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let r = (255.0 * clamp_01(linear_to_gamma(color.x))) as u8;
    let g = (255.0 * clamp_01(linear_to_gamma(color.y))) as u8;
    let b = (255.0 * clamp_01(linear_to_gamma(color.z))) as u8;
    [r, g, b, 255]
}

/// Render a single pixel with multi-sampling.
///
/// Returns the averaged linear color. `y` counts rows from the top.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let width = config.image_width as f32;
    let height = config.image_height as f32;
    let row_from_bottom = (config.image_height - 1 - y) as f32;

    let mut pixel_color = Color::ZERO;
    for _ in 0..config.samples_per_pixel {
        let s = (x as f32 + gen_f32(rng)) / width;
        let t = (row_from_bottom + gen_f32(rng)) / height;
        let ray = camera.get_ray(s, t, rng);
        pixel_color += ray_color(&ray, world, config.max_depth, rng);
    }

    pixel_color / config.samples_per_pixel as f32
}

/// Render one row of pixels into `row`.
pub fn render_row(
    camera: &Camera,
    world: &dyn Hittable,
    y: u32,
    config: &RenderConfig,
    row: &mut [[u8; 4]],
    rng: &mut dyn RngCore,
) {
    for (x, pixel) in row.iter_mut().enumerate() {
        let color = render_pixel(camera, world, x as u32, y, config, rng);
        *pixel = color_to_rgba(color);
    }
}

/// RGBA8 pixel buffer, row-major, row 0 at the top.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<[u8; 4]>,
}

impl ImageBuffer {
    /// Opaque black pixel, used for rows that were never rendered.
    pub const BLACK: [u8; 4] = [0, 0, 0, 255];

    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Self::BLACK; (width as usize) * (height as usize)],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> [u8; 4] {
        self.pixels[self.index(x, y)]
    }

    /// One row of pixels.
    pub fn row(&self, y: u32) -> &[[u8; 4]] {
        let start = self.index(0, y);
        &self.pixels[start..start + self.width as usize]
    }

    /// Raw RGBA bytes, for display or saving.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }
}

/// Shared flag used to abort a render between rows.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the render to stop. Rows already started still finish.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Result of a full render.
#[derive(Debug, Clone)]
pub struct RenderOutput {
    /// Rendered pixels; rows skipped after cancellation stay black
    pub image: ImageBuffer,
    pub rows_completed: u32,
    pub cancelled: bool,
    pub elapsed: Duration,
}

impl RenderOutput {
    pub fn is_complete(&self) -> bool {
        self.rows_completed == self.image.height
    }
}

/// Per-row RNG seed, so results do not depend on thread scheduling.
fn row_seed(seed: u64, row: u32) -> u64 {
    seed ^ (u64::from(row) + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Render the entire scene to an image buffer.
///
/// Rows are rendered in parallel with rayon, each with its own RNG. The
/// cancel token is checked before every row.
pub fn render(
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
    cancel: &CancelToken,
) -> Result<RenderOutput, ConfigError> {
    config.validate()?;

    let seed = config.seed.unwrap_or_else(rand::random);
    log::info!(
        "Rendering {}x{} @ {} spp, max depth {} (seed {})",
        config.image_width,
        config.image_height,
        config.samples_per_pixel,
        config.max_depth,
        seed
    );

    let start = Instant::now();
    let mut image = ImageBuffer::new(config.image_width, config.image_height);
    let rows_done = AtomicUsize::new(0);

    let rows_completed = image
        .pixels
        .par_chunks_mut(config.image_width as usize)
        .enumerate()
        .map(|(y, row)| -> u32 {
            if cancel.is_cancelled() {
                return 0;
            }
            let y = y as u32;
            let mut rng = StdRng::seed_from_u64(row_seed(seed, y));
            render_row(camera, world, y, config, row, &mut rng);

            let done = rows_done.fetch_add(1, Ordering::Relaxed) + 1;
            log::debug!("Row {} done ({}/{})", y, done, config.image_height);
            1
        })
        .sum::<u32>();

    let elapsed = start.elapsed();
    let cancelled = rows_completed < config.image_height;
    if cancelled {
        log::warn!(
            "Render cancelled after {}/{} rows",
            rows_completed,
            config.image_height
        );
    } else {
        log::info!("Rendered in {:?}", elapsed);
    }

    Ok(RenderOutput {
        image,
        rows_completed,
        cancelled,
        elapsed,
    })
}
