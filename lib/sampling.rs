use glam::*;
use rand::Rng;
use std::f32::consts::TAU;

const SQRT_OF_ONE_THIRD: f32 = 0.577_350_26;

/// Axis to cross with `normal`: the first of x, y, z whose component is small.
fn helper_axis(normal: Vec3) -> Vec3 {
    if normal.x.abs() < SQRT_OF_ONE_THIRD {
        Vec3::X
    } else if normal.y.abs() < SQRT_OF_ONE_THIRD {
        Vec3::Y
    } else {
        Vec3::Z
    }
}

/// Two unit tangents completing `normal` to an orthonormal basis.
pub fn tangent_frame(normal: Vec3) -> (Vec3, Vec3) {
    let t1 = normal.cross(helper_axis(normal)).normalize();
    let t2 = normal.cross(t1).normalize();
    (t1, t2)
}

/// Cosine-weighted direction on the hemisphere around `normal`.
///
/// `normal` is expected to be normalized. Consumes exactly two draws from `rng`.
pub fn sample_cosine_hemisphere<R: Rng + ?Sized>(normal: Vec3, rng: &mut R) -> Vec3 {
    let u1: f32 = rng.gen();
    let u2: f32 = rng.gen();

    let cos_theta = u1.sqrt();
    let sin_theta = (1.0 - u1).sqrt();
    let (sin_phi, cos_phi) = (TAU * u2).sin_cos();

    let (t1, t2) = tangent_frame(normal);

    return cos_theta * normal + cos_phi * sin_theta * t1 + sin_phi * sin_theta * t2;
}
