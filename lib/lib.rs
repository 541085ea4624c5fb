pub mod bounce;
pub mod error;
pub mod material;
pub mod path;
pub mod random;
pub mod ray;
pub mod sampling;
pub mod scatter;
pub mod sphere;
pub mod surface;
pub mod util;
pub mod world;
