use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SceneError {
    #[error("light set is empty")]
    EmptyLightSet,
    #[error("light index {index} out of range for {len} geometries")]
    LightIndexOutOfRange { index: usize, len: usize },
    #[error("{name} must be in [0, 1], got {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f32 },
    #[error("specular and refraction probabilities sum to {0}, more than 1")]
    ProbabilitySumExceedsOne(f32),
    #[error("specular and refraction weights sum to {0}, more than 1")]
    WeightSumExceedsOne(f32),
    #[error("index of refraction must be positive, got {0}")]
    InvalidIndexOfRefraction(f32),
    #[error("geometry {geom} uses unknown material {material}")]
    UnknownMaterial { geom: usize, material: usize },
}
