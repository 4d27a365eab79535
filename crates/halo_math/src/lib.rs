// Re-export glam for convenience
pub use glam::*;

// Halo math types
mod interval;
mod ray;
mod vector;

pub use interval::Interval;
pub use ray::Ray;
pub use vector::{near_zero, reflect, refract, Color};
