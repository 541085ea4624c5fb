use crate::material::MaterialId;
use crate::ray::Ray;
use glam::*;

pub trait Surface: Send + Sync {
    fn raycast(&self, r: &Ray, t_min: f32, t_max: f32) -> Option<SurfaceIntersection>;
}

/// Hit produced by the intersector and read by the shading step.
///
/// `normal` is unit length and faces the incoming ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceIntersection {
    pub position: Vec3,
    pub normal: Vec3,
    pub facing: bool,
    pub material: MaterialId,
    pub t: f32,
}
