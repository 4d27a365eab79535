//! Surface scattering models.
//!
//! The set of materials is closed: diffuse, metal and dielectric. Each
//! variant implements [`Scatter`], and [`Material`] dispatches with a match.
//! Materials are immutable and shared between spheres through `Arc`.

use crate::sampling::{gen_f32, random_in_unit_sphere, random_unit_vector};
use crate::{HitRecord, Ray};
use halo_core::MaterialDesc;
use halo_math::{near_zero, reflect, refract, Color};
use rand::RngCore;

/// Outgoing ray and the color filter applied to the light it carries.
#[derive(Debug, Clone, Copy)]
pub struct ScatterResult {
    pub attenuation: Color,
    pub scattered: Ray,
}

/// Something that decides what happens to a ray hitting a surface.
pub trait Scatter: Send + Sync {
    /// Scatter an incoming ray.
    ///
    /// Returns the attenuation and outgoing ray, or None if the ray is absorbed.
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore)
        -> Option<ScatterResult>;
}

/// Lambertian (diffuse) material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lambertian {
    albedo: Color,
}

impl Lambertian {
    /// Create a new Lambertian material with the given albedo color.
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }
}

impl Scatter for Lambertian {
    fn scatter(
        &self,
        _ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let mut scatter_direction = rec.normal + random_unit_vector(rng);

        // Catch degenerate scatter direction
        if near_zero(scatter_direction) {
            scatter_direction = rec.normal;
        }

        Some(ScatterResult {
            attenuation: self.albedo,
            scattered: Ray::new(rec.p, scatter_direction),
        })
    }
}

/// Metal (specular) material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metal {
    albedo: Color,
    fuzz: f32,
}

impl Metal {
    /// Create a new Metal material.
    ///
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, 0.0 = perfect mirror, 1.0 = very rough
    pub fn new(albedo: Color, fuzz: f32) -> Self {
        Self {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }
}

impl Scatter for Metal {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let reflected = reflect(ray_in.direction().normalize(), rec.normal);
        let direction = if self.fuzz > 0.0 {
            reflected + self.fuzz * random_in_unit_sphere(rng)
        } else {
            reflected
        };

        // Fuzz pushed the ray below the surface: absorbed
        if direction.dot(rec.normal) <= 0.0 {
            return None;
        }

        Some(ScatterResult {
            attenuation: self.albedo,
            scattered: Ray::new(rec.p, direction),
        })
    }
}

/// Dielectric (glass) material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dielectric {
    /// Index of refraction
    ior: f32,
}

impl Dielectric {
    /// Create a new Dielectric material.
    ///
    /// - `ior`: Index of refraction (1.0 = air, 1.5 = glass, 2.4 = diamond)
    pub fn new(ior: f32) -> Self {
        Self { ior }
    }

    /// Schlick's approximation for reflectance
    fn reflectance(cosine: f32, ior: f32) -> f32 {
        let r0 = ((1.0 - ior) / (1.0 + ior)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
    }
}

impl Scatter for Dielectric {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let refraction_ratio = if rec.front_face {
            1.0 / self.ior
        } else {
            self.ior
        };

        let unit_direction = ray_in.direction().normalize();
        let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

        // Total internal reflection
        let cannot_refract = refraction_ratio * sin_theta > 1.0;

        let direction = if cannot_refract
            || Self::reflectance(cos_theta, refraction_ratio) > gen_f32(rng)
        {
            reflect(unit_direction, rec.normal)
        } else {
            refract(unit_direction, rec.normal, refraction_ratio)
        };

        Some(ScatterResult {
            attenuation: Color::ONE,
            scattered: Ray::new(rec.p, direction),
        })
    }
}

/// Any of the supported materials.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    Lambertian(Lambertian),
    Metal(Metal),
    Dielectric(Dielectric),
}

impl Material {
    pub fn lambertian(albedo: Color) -> Self {
        Material::Lambertian(Lambertian::new(albedo))
    }

    pub fn metal(albedo: Color, fuzz: f32) -> Self {
        Material::Metal(Metal::new(albedo, fuzz))
    }

    pub fn dielectric(ior: f32) -> Self {
        Material::Dielectric(Dielectric::new(ior))
    }
}

impl Scatter for Material {
    #[inline]
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        match self {
            Material::Lambertian(m) => m.scatter(ray_in, rec, rng),
            Material::Metal(m) => m.scatter(ray_in, rec, rng),
            Material::Dielectric(m) => m.scatter(ray_in, rec, rng),
        }
    }
}

impl From<&MaterialDesc> for Material {
    fn from(desc: &MaterialDesc) -> Self {
        match *desc {
            MaterialDesc::Lambertian { albedo } => Material::lambertian(albedo),
            MaterialDesc::Metal { albedo, fuzz } => Material::metal(albedo, fuzz),
            MaterialDesc::Dielectric { refractive_index } => Material::dielectric(refractive_index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use halo_math::Vec3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn hit_on_floor<'a>(ray: &Ray, material: &'a Material) -> HitRecord<'a> {
        // Ray from above striking the plane y = 0 at the origin
        let t = -ray.origin().y / ray.direction().y;
        HitRecord::new(ray, t, Vec3::Y, material)
    }

    /// Replays a fixed list of `next_u32` values.
    struct ScriptedRng {
        values: Vec<u32>,
        next: usize,
    }

    impl ScriptedRng {
        fn new(values: &[u32]) -> Self {
            Self {
                values: values.to_vec(),
                next: 0,
            }
        }
    }

    impl RngCore for ScriptedRng {
        fn next_u32(&mut self) -> u32 {
            let value = self.values[self.next % self.values.len()];
            self.next += 1;
            value
        }

        fn next_u64(&mut self) -> u64 {
            u64::from(self.next_u32())
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for chunk in dest.chunks_mut(4) {
                let bytes = self.next_u32().to_le_bytes();
                chunk.copy_from_slice(&bytes[..chunk.len()]);
            }
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    #[test]
    fn test_lambertian_degenerate_direction_falls_back_to_normal() {
        let material = Material::lambertian(Color::new(0.5, 0.5, 0.5));
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Y);
        let rec = hit_on_floor(&ray, &material);
        assert_eq!(rec.normal, Vec3::Y);

        // f32 samples 0.5, 0.25, 0.5 give the point (0, -0.5, 0), so the
        // unit vector is exactly -normal
        let mut rng = ScriptedRng::new(&[0x8000_0000, 0x4000_0000, 0x8000_0000]);
        assert_eq!(crate::sampling::random_unit_vector(&mut rng), Vec3::NEG_Y);

        let mut rng = ScriptedRng::new(&[0x8000_0000, 0x4000_0000, 0x8000_0000]);
        let result = material.scatter(&ray, &rec, &mut rng).unwrap();
        assert_eq!(result.scattered.direction(), rec.normal);
        assert_eq!(result.scattered.origin(), rec.p);
    }

    #[test]
    fn test_lambertian_never_amplifies() {
        let albedo = Color::new(0.9, 0.5, 0.1);
        let material = Material::lambertian(albedo);
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.3, -1.0, 0.2));
        let rec = hit_on_floor(&ray, &material);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..500 {
            let result = material.scatter(&ray, &rec, &mut rng).unwrap();
            let a = result.attenuation;
            assert!(a.cmple(albedo).all());
            assert!(a.cmpge(Vec3::ZERO).all() && a.cmple(Vec3::ONE).all());

            // Scattered rays leave from the hit point into the upper hemisphere
            assert_eq!(result.scattered.origin(), rec.p);
            assert!(result.scattered.direction().dot(rec.normal) >= 0.0);
            assert!(!near_zero(result.scattered.direction()));
        }
    }

    #[test]
    fn test_metal_mirror_obeys_law_of_reflection() {
        let albedo = Color::new(0.8, 0.6, 0.3);
        let material = Material::metal(albedo, 0.0);
        let ray = Ray::new(Vec3::new(-1.0, 1.0, 0.0), Vec3::new(2.0, -2.0, 0.0));
        let rec = hit_on_floor(&ray, &material);
        let mut rng = StdRng::seed_from_u64(8);

        let result = material.scatter(&ray, &rec, &mut rng).unwrap();
        assert_eq!(result.attenuation, albedo);

        let incoming = ray.direction().normalize();
        let outgoing = result.scattered.direction();
        assert!((outgoing - Vec3::new(1.0, 1.0, 0.0).normalize()).length() < 1e-5);
        assert!(((-incoming).dot(rec.normal) - outgoing.dot(rec.normal)).abs() < 1e-5);
    }

    #[test]
    fn test_fuzzy_metal_absorbs_grazing_rays() {
        let material = Material::metal(Color::ONE, 1.0);
        // Nearly parallel to the surface: fuzz often pushes it below
        let ray = Ray::new(Vec3::new(-1.0, 0.01, 0.0), Vec3::new(1.0, -0.01, 0.0));
        let rec = hit_on_floor(&ray, &material);
        let mut rng = StdRng::seed_from_u64(9);

        let mut absorbed = 0;
        for _ in 0..200 {
            match material.scatter(&ray, &rec, &mut rng) {
                Some(result) => assert!(result.scattered.direction().dot(rec.normal) > 0.0),
                None => absorbed += 1,
            }
        }
        assert!(absorbed > 0);
    }

    #[test]
    fn test_dielectric_index_one_passes_straight_through() {
        let material = Material::dielectric(1.0);
        let mut rng = StdRng::seed_from_u64(10);

        // Head on: Schlick reflectance is exactly zero
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, -3.0, 0.0));
        let rec = hit_on_floor(&ray, &material);
        for _ in 0..100 {
            let result = material.scatter(&ray, &rec, &mut rng).unwrap();
            assert_eq!(result.attenuation, Color::ONE);
            assert!((result.scattered.direction() - Vec3::NEG_Y).length() < 1e-6);
        }

        // Oblique: almost every sample refracts, and those go straight on
        let ray = Ray::new(Vec3::new(-1.0, 1.0, 0.0), Vec3::new(1.0, -1.0, 0.0));
        let rec = hit_on_floor(&ray, &material);
        let incident = ray.direction().normalize();
        let straight = (0..1000)
            .filter_map(|_| material.scatter(&ray, &rec, &mut rng))
            .filter(|r| (r.scattered.direction() - incident).length() < 1e-5)
            .count();
        assert!(straight >= 990, "only {straight} of 1000 rays went straight");
    }

    #[test]
    fn test_dielectric_total_internal_reflection() {
        let material = Material::dielectric(1.5);
        let mut rng = StdRng::seed_from_u64(11);

        // Leaving glass at a shallow angle: outward normal points along the ray
        let ray = Ray::new(Vec3::new(-1.0, -0.2, 0.0), Vec3::new(1.0, 0.2, 0.0));
        let t = -ray.origin().y / ray.direction().y;
        let rec = HitRecord::new(&ray, t, Vec3::Y, &material);
        assert!(!rec.front_face);

        for _ in 0..100 {
            let result = material.scatter(&ray, &rec, &mut rng).unwrap();
            let expected = reflect(ray.direction().normalize(), rec.normal);
            assert!((result.scattered.direction() - expected).length() < 1e-5);
        }
    }

    #[test]
    fn test_schlick_reflectance() {
        // Normal incidence on glass reflects about 4%
        assert!((Dielectric::reflectance(1.0, 1.5) - 0.04).abs() < 1e-4);
        // Grazing incidence reflects everything
        assert!((Dielectric::reflectance(0.0, 1.5) - 1.0).abs() < 1e-6);
        // The ratio and its inverse give the same base reflectance
        assert!((Dielectric::reflectance(1.0, 1.0 / 1.5) - 0.04).abs() < 1e-4);
    }

    #[test]
    fn test_from_description() {
        let desc = MaterialDesc::Metal {
            albedo: Color::splat(0.7),
            fuzz: 0.2,
        };
        assert_eq!(Material::from(&desc), Material::metal(Color::splat(0.7), 0.2));
    }
}
