//! Build renderable objects from a scene description.

use std::collections::HashMap;
use std::sync::Arc;

use crate::{Camera, HittableList, Material, Sphere};
use halo_core::{ConfigError, MaterialRef, SceneDescription};

/// A scene ready to render: read-only world plus camera.
pub struct Scene {
    pub world: HittableList,
    pub camera: Camera,
}

impl Scene {
    /// Validate `desc` and build its spheres and camera.
    ///
    /// Named materials are built once and shared by every sphere that
    /// references them.
    pub fn build(desc: &SceneDescription) -> Result<Self, ConfigError> {
        desc.validate()?;

        let shared: HashMap<&str, Arc<Material>> = desc
            .materials
            .iter()
            .map(|(name, material)| (name.as_str(), Arc::new(Material::from(material))))
            .collect();

        let mut world = HittableList::new();
        for (index, sphere) in desc.spheres.iter().enumerate() {
            let material = match &sphere.material {
                MaterialRef::Named(name) => shared.get(name.as_str()).cloned().ok_or_else(|| {
                    ConfigError::UnknownMaterial {
                        index,
                        name: name.clone(),
                    }
                })?,
                MaterialRef::Inline(inline) => Arc::new(Material::from(inline)),
            };
            world.add(Box::new(Sphere::new(sphere.center, sphere.radius, material)));
        }

        log::info!(
            "Built scene: {} spheres, {} shared materials",
            world.len(),
            shared.len()
        );

        Ok(Self {
            world,
            camera: Camera::new(&desc.camera)?,
        })
    }
}
