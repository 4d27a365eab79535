//! Sphere primitive for ray tracing.

use std::sync::Arc;

use crate::{HitRecord, Hittable, Material, Ray};
use halo_math::{Interval, Vec3};

/// A sphere primitive.
///
/// The radius may be negative: the geometry is unchanged but the outward
/// normal points toward the center. Nested inside a positive sphere of the
/// same center this gives a hollow shell.
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Arc<Material>,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32, material: impl Into<Arc<Material>>) -> Self {
        Self {
            center,
            radius,
            material: material.into(),
        }
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let outward_normal = (ray.at(root) - self.center) / self.radius;
        Some(HitRecord::new(ray, root, outward_normal, &self.material))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: Interval = Interval {
        min: 0.001,
        max: f32::INFINITY,
    };

    fn glass_sphere(center: Vec3, radius: f32) -> Sphere {
        Sphere::new(center, radius, Material::dielectric(1.5))
    }

    #[test]
    fn test_sphere_hit_at_distance_minus_radius() {
        let sphere = glass_sphere(Vec3::new(0.0, 0.0, -3.0), 0.5);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        let rec = sphere.hit(&ray, FULL).unwrap();
        assert!((rec.t - 2.5).abs() < 1e-5);
        assert!(rec.front_face);
        assert!((rec.normal - Vec3::Z).length() < 1e-5);
        assert!((rec.p - Vec3::new(0.0, 0.0, -2.5)).length() < 1e-5);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = glass_sphere(Vec3::new(0.0, 0.0, -1.0), 0.5);

        // Ray pointing away from sphere
        let away = Ray::new(Vec3::ZERO, Vec3::Y);
        assert!(sphere.hit(&away, FULL).is_none());

        // Ray passing just outside the silhouette
        let beside = Ray::new(Vec3::new(0.0, 0.51, 0.0), Vec3::NEG_Z);
        assert!(sphere.hit(&beside, FULL).is_none());
    }

    #[test]
    fn test_sphere_hit_is_translation_invariant() {
        let offset = Vec3::new(12.5, -3.0, 7.25);
        let direction = Vec3::new(0.1, 0.05, -1.0);

        let original = glass_sphere(Vec3::new(0.2, 0.0, -4.0), 1.0);
        let moved = glass_sphere(Vec3::new(0.2, 0.0, -4.0) + offset, 1.0);
        let a = original.hit(&Ray::new(Vec3::ZERO, direction), FULL).unwrap();
        let b = moved.hit(&Ray::new(offset, direction), FULL).unwrap();

        assert!((a.t - b.t).abs() < 1e-4);
        assert!((a.normal - b.normal).length() < 1e-4);
        assert!((a.p + offset - b.p).length() < 1e-3);
    }

    #[test]
    fn test_ray_from_inside_uses_far_root() {
        let sphere = glass_sphere(Vec3::ZERO, 2.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        let rec = sphere.hit(&ray, FULL).unwrap();
        assert!((rec.t - 2.0).abs() < 1e-5);
        assert!(!rec.front_face);
        // Normal flipped to face the ray
        assert!((rec.normal - Vec3::NEG_X).length() < 1e-5);
    }

    #[test]
    fn test_negative_radius_flips_outward_normal() {
        let center = Vec3::new(0.0, 0.0, -2.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        let outer = glass_sphere(center, 0.5);
        let inner = glass_sphere(center, -0.5);
        let solid = outer.hit(&ray, FULL).unwrap();
        let hollow = inner.hit(&ray, FULL).unwrap();

        // Same geometry, opposite sidedness
        assert!((solid.t - hollow.t).abs() < 1e-6);
        assert!(solid.front_face);
        assert!(!hollow.front_face);
        assert!((solid.normal - hollow.normal).length() < 1e-6);
    }

    #[test]
    fn test_hit_outside_interval_is_rejected() {
        let sphere = glass_sphere(Vec3::new(0.0, 0.0, -3.0), 0.5);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        assert!(sphere.hit(&ray, Interval::new(0.001, 2.0)).is_none());
        // Near root excluded, far root still valid
        let rec = sphere.hit(&ray, Interval::new(2.6, 10.0)).unwrap();
        assert!((rec.t - 3.5).abs() < 1e-5);
    }
}
