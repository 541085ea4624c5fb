use glam::*;

use crate::error::SceneError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Specular {
    pub color: Vec3,
    pub exponent: f32,
}

/// Surface description read by the scatter step.
///
/// `specular_probability` picks the specular lobe; `specular_weight` is the
/// share of energy that lobe carries under the weighted shading model. The two
/// are usually equal but nothing forces them to be. The refraction pair works
/// the same way, and the diffuse lobe gets what is left of both.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Vec3,
    pub specular: Specular,
    pub specular_probability: f32,
    pub specular_weight: f32,
    pub refraction_probability: f32,
    pub refraction_weight: f32,
    pub index_of_refraction: f32,
    pub emittance: f32,
}

impl Default for Material {
    fn default() -> Self {
        Material {
            color: Vec3::ONE,
            specular: Specular { color: Vec3::ONE, exponent: 0.0 },
            specular_probability: 0.0,
            specular_weight: 0.0,
            refraction_probability: 0.0,
            refraction_weight: 0.0,
            index_of_refraction: 1.0,
            emittance: 0.0,
        }
    }
}

impl Material {
    pub fn diffuse(color: Vec3) -> Material {
        Material { color, ..Default::default() }
    }

    /// Diffuse base with a mirror lobe taken (and weighted) with `reflectivity`.
    pub fn glossy(color: Vec3, specular: Specular, reflectivity: f32) -> Material {
        Material {
            color,
            specular,
            specular_probability: reflectivity,
            specular_weight: reflectivity,
            ..Default::default()
        }
    }

    pub fn dielectric(tint: Vec3, index_of_refraction: f32) -> Material {
        Material {
            color: tint,
            specular: Specular { color: tint, exponent: 0.0 },
            refraction_probability: 1.0,
            refraction_weight: 1.0,
            index_of_refraction,
            ..Default::default()
        }
    }

    pub fn light(color: Vec3, emittance: f32) -> Material {
        Material { color, emittance, ..Default::default() }
    }

    pub fn is_emissive(&self) -> bool {
        self.emittance > 0.0
    }

    /// Probability of the diffuse lobe.
    ///
    /// Uses the same sum the lobe selection compares against, so it is
    /// positive whenever the diffuse lobe can be picked.
    pub fn diffuse_probability(&self) -> f32 {
        (1.0 - (self.specular_probability + self.refraction_probability)).max(0.0)
    }

    pub fn diffuse_weight(&self) -> f32 {
        (1.0 - (self.specular_weight + self.refraction_weight)).max(0.0)
    }

    pub fn validate(&self) -> Result<(), SceneError> {
        check_unit("specular_probability", self.specular_probability)?;
        check_unit("specular_weight", self.specular_weight)?;
        check_unit("refraction_probability", self.refraction_probability)?;
        check_unit("refraction_weight", self.refraction_weight)?;

        let sum = self.specular_probability + self.refraction_probability;
        if sum > 1.0 {
            return Err(SceneError::ProbabilitySumExceedsOne(sum));
        }
        let weights = self.specular_weight + self.refraction_weight;
        if weights > 1.0 {
            return Err(SceneError::WeightSumExceedsOne(weights));
        }
        if !(self.index_of_refraction > 0.0) {
            return Err(SceneError::InvalidIndexOfRefraction(self.index_of_refraction));
        }

        Ok(())
    }
}

fn check_unit(name: &'static str, value: f32) -> Result<(), SceneError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(SceneError::ProbabilityOutOfRange { name, value })
    }
}
