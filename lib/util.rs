use glam::*;
use rand::Rng;
use rand_distr::*;

pub fn rand_on_unit_sphere<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let p: [f32; 3] = UnitSphere.sample(rng);
    return Vec3::from(p);
}

pub fn reflect(v: Vec3, normal: Vec3) -> Vec3 {
    return v - (2.0 * v.dot(normal) * normal);
}

/// `v` and `normal` must be normalized and on opposite sides.
pub fn refract(v: Vec3, normal: Vec3, ratio: f32) -> Vec3 {
    let inv_normal = -normal;
    let r_perp = (v + v.dot(inv_normal).min(1.0) * normal) * ratio;
    let r_para = (1.0 - r_perp.length_squared()).abs().sqrt() * inv_normal;
    return r_perp + r_para;
}

/// Schlick's approximation of the Fresnel reflectance.
pub fn reflectance(cos_theta: f32, refraction_ratio: f32) -> f32 {
    let r = ((1.0 - refraction_ratio) / (1.0 + refraction_ratio)).powi(2);
    return r + (1.0 - r) * (1.0 - cos_theta).powi(5);
}
