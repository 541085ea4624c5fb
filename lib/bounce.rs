use glam::*;
use rayon::prelude::*;
use std::ops::Add;

use crate::path::PathSegment;
use crate::random::stream_for;
use crate::scatter::{scatter, Lobe, ScatterConfig};
use crate::surface::{Surface, SurfaceIntersection};
use crate::world::World;

pub const T_MIN: f32 = 0.001;

/// What happened to the active paths during one bounce.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BounceStats {
    pub specular: usize,
    pub refractive: usize,
    pub diffuse: usize,
    pub emissive: usize,
    pub missed: usize,
}

impl BounceStats {
    pub fn active(&self) -> usize {
        self.specular + self.refractive + self.diffuse + self.emissive + self.missed
    }

    fn single(outcome: Outcome) -> BounceStats {
        let mut stats = BounceStats::default();
        match outcome {
            Outcome::Inactive => {}
            Outcome::Missed => stats.missed = 1,
            Outcome::Emissive => stats.emissive = 1,
            Outcome::Scattered(Lobe::Specular) => stats.specular = 1,
            Outcome::Scattered(Lobe::Refractive) => stats.refractive = 1,
            Outcome::Scattered(Lobe::Diffuse) => stats.diffuse = 1,
        }
        stats
    }
}

impl Add for BounceStats {
    type Output = BounceStats;

    fn add(self, rhs: BounceStats) -> BounceStats {
        BounceStats {
            specular: self.specular + rhs.specular,
            refractive: self.refractive + rhs.refractive,
            diffuse: self.diffuse + rhs.diffuse,
            emissive: self.emissive + rhs.emissive,
            missed: self.missed + rhs.missed,
        }
    }
}

enum Outcome {
    Inactive,
    Missed,
    Emissive,
    Scattered(Lobe),
}

/// Nearest hit for every active segment, `None` for misses and finished paths.
pub fn intersect_paths(segments: &[PathSegment], world: &World) -> Vec<Option<SurfaceIntersection>> {
    segments
        .par_iter()
        .map(|segment| if segment.is_active() { world.raycast(&segment.ray, T_MIN, f32::MAX) } else { None })
        .collect()
}

fn shade_one(
    segment: &mut PathSegment,
    intersection: Option<&SurfaceIntersection>,
    world: &World,
    config: &ScatterConfig,
    seed: u64,
    depth: u32,
) -> Outcome {
    if !segment.is_active() {
        return Outcome::Inactive;
    }

    let intersection = match intersection {
        Some(intersection) => intersection,
        None => {
            segment.terminate(Vec3::ZERO);
            return Outcome::Missed;
        }
    };

    let material = world.material(intersection.material);
    if material.is_emissive() {
        segment.terminate(segment.throughput * material.color * material.emittance);
        return Outcome::Emissive;
    }

    let mut rng = stream_for(seed, segment.index, depth);
    let lobe = scatter(&mut rng, segment, intersection, material, &world.lights, &world.geoms, config);

    // budget spent before reaching a light
    if !segment.is_active() {
        segment.color = Vec3::ZERO;
    }

    return Outcome::Scattered(lobe);
}

/// Shades one bounce for every segment in parallel.
///
/// `intersections[i]` belongs to `segments[i]`. Each ray draws from its own
/// stream keyed by `(seed, segment.index, depth)`, so results do not depend on
/// the thread count.
pub fn shade_paths(
    segments: &mut [PathSegment],
    intersections: &[Option<SurfaceIntersection>],
    world: &World,
    config: &ScatterConfig,
    seed: u64,
    depth: u32,
) -> BounceStats {
    assert_eq!(segments.len(), intersections.len(), "one intersection slot per segment");

    let stats = segments
        .par_iter_mut()
        .zip(intersections.par_iter())
        .map(|(segment, intersection)| {
            BounceStats::single(shade_one(segment, intersection.as_ref(), world, config, seed, depth))
        })
        .reduce(BounceStats::default, |a, b| a + b);

    log::debug!("bounce {depth}: {:?}", stats);
    stats
}

/// Runs intersect + shade until every segment is finished or `max_depth` bounces were shaded.
pub fn trace_paths(
    segments: &mut [PathSegment],
    world: &World,
    config: &ScatterConfig,
    seed: u64,
    max_depth: u32,
) -> Vec<BounceStats> {
    let mut history = Vec::new();

    for depth in 0..max_depth {
        let intersections = intersect_paths(segments, world);
        let stats = shade_paths(segments, &intersections, world, config, seed, depth);
        if stats.active() == 0 {
            break;
        }
        history.push(stats);
    }

    log::info!("traced {} paths over {} bounces", segments.len(), history.len());
    history
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::{Material, MaterialId, Specular};
    use crate::ray::Ray;
    use crate::scatter::ShadingModel;
    use crate::sphere::Sphere;

    fn world() -> World {
        let geoms = vec![
            Sphere::new(Vec3::new(0.0, -1000.0, 0.0), 999.0, MaterialId(0)),
            Sphere::new(Vec3::new(0.0, 5.0, 0.0), 1.0, MaterialId(1)),
        ];
        let materials = vec![
            Material::glossy(Vec3::splat(0.5), Specular { color: Vec3::ONE, exponent: 0.0 }, 0.5),
            Material::light(Vec3::new(1.0, 0.9, 0.8), 4.0),
        ];
        World::new(geoms, materials, vec![1]).unwrap()
    }

    fn segments(n: u32, direction: Vec3) -> Vec<PathSegment> {
        (0..n).map(|i| PathSegment::new(i, Ray::new(Vec3::ZERO, direction), 8)).collect()
    }

    #[test]
    fn miss_terminates_with_black() {
        let world = world();
        let mut segs = segments(4, Vec3::X);
        let hits = intersect_paths(&segs, &world);
        assert!(hits.iter().all(Option::is_none));

        let stats = shade_paths(&mut segs, &hits, &world, &ScatterConfig::default(), 0, 0);

        assert_eq!(stats, BounceStats { missed: 4, ..Default::default() });
        assert!(segs.iter().all(|s| !s.is_active() && s.color == Vec3::ZERO));
    }

    #[test]
    fn emissive_hit_terminates_with_contribution() {
        let world = world();
        let mut segs = segments(2, Vec3::Y);
        segs[1].throughput = Vec3::splat(0.5);

        let hits = intersect_paths(&segs, &world);
        let stats = shade_paths(&mut segs, &hits, &world, &ScatterConfig::default(), 0, 0);

        assert_eq!(stats.emissive, 2);
        assert!(segs[0].color.abs_diff_eq(Vec3::new(4.0, 3.6, 3.2), 1e-5));
        assert!(segs[1].color.abs_diff_eq(Vec3::new(2.0, 1.8, 1.6), 1e-5));
        assert!(segs.iter().all(|s| !s.is_active()));
    }

    #[test]
    fn surface_hit_scatters_and_finished_paths_are_skipped() {
        let world = world();
        let mut segs = segments(3, -Vec3::Y);
        segs[2].remaining_bounces = 0;

        let hits = intersect_paths(&segs, &world);
        assert!(hits[2].is_none());

        let stats = shade_paths(&mut segs, &hits, &world, &ScatterConfig::default(), 7, 0);

        assert_eq!(stats.active(), 2);
        assert_eq!(stats.specular + stats.diffuse, 2);
        for seg in &segs[..2] {
            assert_eq!(seg.remaining_bounces, 7);
            assert!((seg.ray.origin.y + 1.0).abs() < 1e-3);
        }
        assert_eq!(segs[2].remaining_bounces, 0);
    }

    #[test]
    fn exhausted_budget_contributes_nothing() {
        let world = world();
        let mut segs = segments(2, -Vec3::Y);
        segs[0].remaining_bounces = 1;
        segs[1].remaining_bounces = 2;

        let hits = intersect_paths(&segs, &world);
        shade_paths(&mut segs, &hits, &world, &ScatterConfig::default(), 3, 0);

        assert!(!segs[0].is_active());
        assert_eq!(segs[0].color, Vec3::ZERO);
        assert!(segs[1].is_active());
        assert_ne!(segs[1].color, Vec3::ZERO);
    }

    fn mirror_world(weight: f32, exponent: f32) -> World {
        let geoms = vec![
            Sphere::new(Vec3::new(0.0, -1000.0, 0.0), 999.0, MaterialId(0)),
            Sphere::new(Vec3::new(0.0, 5.0, 0.0), 1.0, MaterialId(1)),
        ];
        let specular = Specular { color: Vec3::new(0.2, 0.4, 0.9), exponent };
        let mut mirror = Material::glossy(Vec3::splat(0.5), specular, 1.0);
        mirror.specular_weight = weight;
        let materials = vec![mirror, Material::light(Vec3::ONE, 4.0)];
        World::new(geoms, materials, vec![1]).unwrap()
    }

    fn mirror_estimate(world: &World, direction: Vec3, config: &ScatterConfig) -> Vec3 {
        let mut segs = vec![PathSegment::new(0, Ray::new(Vec3::ZERO, direction.normalize()), 8)];
        let history = trace_paths(&mut segs, world, config, 5, 8);

        assert_eq!(history[0].specular, 1);
        assert_eq!(history[1].emissive, 1);
        segs[0].color
    }

    #[test]
    fn weighted_mirror_estimate_follows_specular_weight() {
        let config = ScatterConfig { shading: ShadingModel::Weighted, ..Default::default() };
        let tint = Vec3::new(0.2, 0.4, 0.9);

        let full = mirror_estimate(&mirror_world(1.0, 0.0), -Vec3::Y, &config);
        let quarter = mirror_estimate(&mirror_world(0.25, 0.0), -Vec3::Y, &config);

        assert!(full.abs_diff_eq(tint * 4.0, 1e-5), "{full:?}");
        assert!(quarter.abs_diff_eq(tint, 1e-5), "{quarter:?}");
    }

    #[test]
    fn weighted_mirror_estimate_follows_exponent() {
        let config = ScatterConfig { shading: ShadingModel::Weighted, ..Default::default() };
        let direction = Vec3::new(0.1, -1.0, 0.0);

        let flat = mirror_estimate(&mirror_world(1.0, 0.0), direction, &config);
        let sharp_world = mirror_world(1.0, 64.0);
        let sharp = mirror_estimate(&sharp_world, direction, &config);

        let first_hit = sharp_world.raycast(&Ray::new(Vec3::ZERO, direction.normalize()), T_MIN, f32::MAX).unwrap();
        let falloff = first_hit.normal.dot(-direction.normalize()).powf(64.0);
        assert!(sharp.abs_diff_eq(flat * falloff, 1e-4), "{sharp:?} vs {flat:?}");
        assert!(falloff < 0.8);
    }

    #[test]
    fn unweighted_mirror_estimate_ignores_specular_weight() {
        let config = ScatterConfig::default();

        let full = mirror_estimate(&mirror_world(1.0, 0.0), -Vec3::Y, &config);
        let quarter = mirror_estimate(&mirror_world(0.25, 0.0), -Vec3::Y, &config);

        assert_eq!(full, Vec3::splat(4.0));
        assert_eq!(quarter, full);
    }

    #[test]
    fn trace_is_deterministic_across_thread_counts() {
        let world = world();
        let directions = |i: u32| {
            let a = i as f32 * 0.37;
            Vec3::new(a.cos() * 0.3, -1.0, a.sin() * 0.3).normalize()
        };
        let fresh = || (0..256).map(|i| PathSegment::new(i, Ray::new(Vec3::ZERO, directions(i)), 6)).collect::<Vec<_>>();

        let single = rayon::ThreadPoolBuilder::new().num_threads(1).build().unwrap();
        let many = rayon::ThreadPoolBuilder::new().num_threads(4).build().unwrap();

        let mut a = fresh();
        let mut b = fresh();
        let stats_a = single.install(|| trace_paths(&mut a, &world, &ScatterConfig::default(), 42, 6));
        let stats_b = many.install(|| trace_paths(&mut b, &world, &ScatterConfig::default(), 42, 6));

        assert_eq!(stats_a, stats_b);
        assert_eq!(a, b);
    }

    #[test]
    fn trace_stops_when_every_path_is_done() {
        let world = world();
        let mut segs = segments(8, Vec3::X);

        let history = trace_paths(&mut segs, &world, &ScatterConfig::default(), 1, 10);

        assert_eq!(history.len(), 1);
        assert_eq!(history[0].missed, 8);
    }
}
