//! Vector helpers used by the scattering models.

use crate::Vec3;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Threshold below which every component counts as zero.
const NEAR_ZERO_EPS: f32 = 1e-8;

/// True when all components are close to zero.
///
/// Guards against normalizing or scattering along a degenerate direction.
#[inline]
pub fn near_zero(v: Vec3) -> bool {
    v.abs().max_element() < NEAR_ZERO_EPS
}

/// Reflect a vector about a normal.
///
/// `n` is expected to be unit length.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector through a surface with unit normal `n`.
///
/// Splits the outgoing direction into the parts perpendicular and
/// parallel to the normal (Snell's law).
#[inline]
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f32) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}
