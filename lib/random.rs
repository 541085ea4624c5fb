use rand::SeedableRng;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Per-ray random stream. Never shared between rays.
pub type RandomStream = rand_xoshiro::Xoshiro256StarStar;

/// Identifies the draws of one ray at one bounce of one render.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub struct StreamKey {
    pub seed: u64,
    pub ray_index: u32,
    pub bounce: u32,
}

impl StreamKey {
    pub fn new(seed: u64, ray_index: u32, bounce: u32) -> StreamKey {
        StreamKey { seed, ray_index, bounce }
    }

    /// Seeds through `DefaultHasher`, whose algorithm may change between Rust
    /// releases: streams repeat across runs of one build, not across toolchains.
    pub fn into_stream(self) -> RandomStream {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        RandomStream::seed_from_u64(hasher.finish())
    }
}

pub fn stream_for(seed: u64, ray_index: u32, bounce: u32) -> RandomStream {
    StreamKey::new(seed, ray_index, bounce).into_stream()
}
