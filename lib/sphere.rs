use glam::Vec3;

use crate::material::MaterialId;
use crate::ray::Ray;
use crate::surface::{Surface, SurfaceIntersection};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub translation: Vec3,
    pub radius: f32,
    pub material: MaterialId,
}

impl Sphere {
    pub fn new(translation: Vec3, radius: f32, material: MaterialId) -> Sphere {
        return Sphere { translation, radius, material };
    }
}

impl Surface for Sphere {
    fn raycast(&self, r: &Ray, t_min: f32, t_max: f32) -> Option<SurfaceIntersection> {
        let to_origin = r.origin - self.translation;
        let a = r.direction.length_squared();
        let half_b = to_origin.dot(r.direction);
        let c = to_origin.length_squared() - self.radius * self.radius;

        let discriminant = half_b * half_b - a * c;
        if discriminant < 0.0 {
            return None;
        }

        // near root first, far root when the ray starts inside
        let sqrt_d = discriminant.sqrt();
        let t = [(-half_b - sqrt_d) / a, (-half_b + sqrt_d) / a]
            .into_iter()
            .find(|t| (t_min..=t_max).contains(t))?;

        let position = r.at(t);
        let outward = (position - self.translation) / self.radius;
        let facing = r.direction.dot(outward) < 0.0;

        return Some(SurfaceIntersection {
            position,
            normal: if facing { outward } else { -outward },
            facing,
            material: self.material,
            t,
        });
    }
}
