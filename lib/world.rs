use crate::error::SceneError;
use crate::material::{Material, MaterialId};
use crate::ray::Ray;
use crate::sphere::Sphere;
use crate::surface::{Surface, SurfaceIntersection};

/// Non-empty list of indices into the geometry list marking emitters.
#[derive(Debug, Clone, PartialEq)]
pub struct LightSet {
    indices: Vec<usize>,
}

impl LightSet {
    pub fn new(indices: Vec<usize>, geom_count: usize) -> Result<LightSet, SceneError> {
        if indices.is_empty() {
            return Err(SceneError::EmptyLightSet);
        }
        if let Some(&index) = indices.iter().find(|&&index| index >= geom_count) {
            return Err(SceneError::LightIndexOutOfRange { index, len: geom_count });
        }

        Ok(LightSet { indices })
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Geometry index for a uniform draw `u` in [0, 1).
    ///
    /// `u * len` can round up to `len` for `u` just below 1, so the slot is clamped.
    pub fn pick(&self, u: f32) -> usize {
        let slot = ((u * self.indices.len() as f32) as usize).min(self.indices.len() - 1);
        self.indices[slot]
    }
}

pub struct World {
    pub geoms: Vec<Sphere>,
    pub materials: Vec<Material>,
    pub lights: LightSet,
}

impl World {
    pub fn new(geoms: Vec<Sphere>, materials: Vec<Material>, lights: Vec<usize>) -> Result<World, SceneError> {
        for material in &materials {
            material.validate()?;
        }

        for (geom, sphere) in geoms.iter().enumerate() {
            if sphere.material.0 >= materials.len() {
                return Err(SceneError::UnknownMaterial { geom, material: sphere.material.0 });
            }
        }

        let lights = LightSet::new(lights, geoms.len())?;

        log::debug!(
            "world: {} geometries, {} materials, {} lights",
            geoms.len(),
            materials.len(),
            lights.len()
        );

        Ok(World { geoms, materials, lights })
    }

    pub fn material(&self, id: MaterialId) -> &Material {
        &self.materials[id.0]
    }
}

impl Surface for World {
    fn raycast(&self, r: &Ray, t_min: f32, t_max: f32) -> Option<SurfaceIntersection> {
        self.geoms.iter().fold(None, |nearest: Option<SurfaceIntersection>, sphere| {
            let t_far = nearest.map_or(t_max, |hit| hit.t);
            sphere.raycast(r, t_min, t_far).or(nearest)
        })
    }
}
