use glam::*;

use crate::ray::Ray;

/// One in-flight ray and what it has accumulated so far.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSegment {
    pub ray: Ray,
    pub throughput: Vec3,
    pub color: Vec3,
    pub remaining_bounces: u32,
    pub index: u32,
}

impl PathSegment {
    pub fn new(index: u32, ray: Ray, max_bounces: u32) -> PathSegment {
        PathSegment { ray, throughput: Vec3::ONE, color: Vec3::ONE, remaining_bounces: max_bounces, index }
    }

    pub fn is_active(&self) -> bool {
        self.remaining_bounces > 0
    }

    pub fn terminate(&mut self, color: Vec3) {
        self.color = color;
        self.remaining_bounces = 0;
    }
}
