use glam::*;
use rand::Rng;
use std::f32::consts::TAU;

use crate::material::Material;
use crate::path::PathSegment;
use crate::sampling::sample_cosine_hemisphere;
use crate::sphere::Sphere;
use crate::surface::SurfaceIntersection;
use crate::util::{reflect, reflectance, refract};
use crate::world::LightSet;

/// How a lobe turns into the bounce color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadingModel {
    /// Bounce color is the lobe's base color.
    #[default]
    Unweighted,
    /// Bounce color carries the lighting factor and the lobe's energy weight
    /// divided by the probability of having picked that lobe, and every lobe
    /// folds its color into the throughput.
    Weighted,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterConfig {
    pub shading: ShadingModel,
    pub ambient: f32,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        ScatterConfig { shading: ShadingModel::Unweighted, ambient: 0.2 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lobe {
    Specular,
    Refractive,
    Diffuse,
}

/// Direction from `origin` towards one light picked uniformly from `lights`.
///
/// No visibility test is made. Consumes one draw.
pub fn sample_light_direction_unoccluded<R: Rng + ?Sized>(
    rng: &mut R,
    origin: Vec3,
    lights: &LightSet,
    geoms: &[Sphere],
) -> Vec3 {
    let light = &geoms[lights.pick(rng.gen())];
    return (light.translation - origin).normalize_or_zero();
}

fn select_lobe(material: &Material, r: f32) -> Lobe {
    if r < material.specular_probability {
        Lobe::Specular
    } else if r < material.specular_probability + material.refraction_probability {
        Lobe::Refractive
    } else {
        Lobe::Diffuse
    }
}

fn specular_color(reflected: Vec3, normal: Vec3, material: &Material, config: &ScatterConfig) -> Vec3 {
    match config.shading {
        ShadingModel::Unweighted => material.specular.color,
        ShadingModel::Weighted => {
            let falloff = reflected.dot(normal).max(0.0).powf(material.specular.exponent);
            material.specular.color * material.specular_weight * falloff / material.specular_probability
        }
    }
}

fn diffuse_color(normal: Vec3, light_direction: Vec3, material: &Material, config: &ScatterConfig) -> Vec3 {
    match config.shading {
        ShadingModel::Unweighted => material.color,
        ShadingModel::Weighted => {
            let lux = normal.dot(light_direction).max(0.0) + config.ambient;
            material.color * lux * material.diffuse_weight() / material.diffuse_probability()
        }
    }
}

fn refraction_color(material: &Material, config: &ScatterConfig) -> Vec3 {
    match config.shading {
        ShadingModel::Unweighted => material.specular.color,
        ShadingModel::Weighted => {
            material.specular.color * material.refraction_weight / material.refraction_probability
        }
    }
}

fn refracted_direction<R: Rng + ?Sized>(
    rng: &mut R,
    incoming: Vec3,
    intersection: &SurfaceIntersection,
    material: &Material,
) -> Vec3 {
    let refraction_ratio =
        if intersection.facing { 1.0 / material.index_of_refraction } else { material.index_of_refraction };

    let incoming = incoming.normalize();

    let cos_theta = intersection.normal.dot(-incoming).min(1.0);
    let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

    let cannot_refract = refraction_ratio * sin_theta > 1.0;
    let schlick_approx = reflectance(cos_theta, refraction_ratio);

    return if cannot_refract || schlick_approx > rng.gen() {
        reflect(incoming, intersection.normal)
    } else {
        refract(incoming, intersection.normal, refraction_ratio)
    };
}

/// Scatters `segment` off `intersection` and returns the lobe that was taken.
///
/// Draw order: lobe choice, light sample, then whatever the lobe needs (two
/// draws for diffuse, one for refractive, none for specular).
///
/// Expects a unit normal and a segment with bounces left; the bounce counter
/// saturates at zero otherwise.
pub fn scatter<R: Rng + ?Sized>(
    rng: &mut R,
    segment: &mut PathSegment,
    intersection: &SurfaceIntersection,
    material: &Material,
    lights: &LightSet,
    geoms: &[Sphere],
    config: &ScatterConfig,
) -> Lobe {
    let normal = intersection.normal;
    let incoming = segment.ray.direction;
    segment.ray.origin = intersection.position;

    let r: f32 = rng.gen();
    let light_direction = sample_light_direction_unoccluded(rng, segment.ray.origin, lights, geoms);

    let lobe = select_lobe(material, r);
    let (color, direction) = match lobe {
        Lobe::Specular => {
            let reflected = reflect(incoming, normal);
            (specular_color(reflected, normal, material, config), reflected)
        }
        Lobe::Refractive => {
            let color = refraction_color(material, config);
            (color, refracted_direction(rng, incoming, intersection, material))
        }
        Lobe::Diffuse => {
            let color = diffuse_color(normal, light_direction, material, config);
            segment.throughput *= color * incoming.dot(normal).abs() / TAU;
            (color, sample_cosine_hemisphere(normal, rng))
        }
    };

    if config.shading == ShadingModel::Weighted && lobe != Lobe::Diffuse {
        segment.throughput *= color;
    }

    segment.ray.direction = direction;
    segment.color = color;
    segment.remaining_bounces = segment.remaining_bounces.saturating_sub(1);

    return lobe;
}
