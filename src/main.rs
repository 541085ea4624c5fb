use anyhow::Result;
use clap::{Parser, ValueEnum};
use glam::Vec3;
use rand::Rng;

use path_scatter::bounce::trace_paths;
use path_scatter::material::{Material, MaterialId, Specular};
use path_scatter::path::PathSegment;
use path_scatter::random::stream_for;
use path_scatter::ray::Ray;
use path_scatter::scatter::{ScatterConfig, ShadingModel};
use path_scatter::sphere::Sphere;
use path_scatter::util::rand_on_unit_sphere;
use path_scatter::world::World;

#[derive(Debug, Default, Clone, Copy, ValueEnum)]
enum Shading {
    #[default]
    Unweighted,
    Weighted,
}

impl From<Shading> for ShadingModel {
    fn from(shading: Shading) -> Self {
        match shading {
            Shading::Unweighted => ShadingModel::Unweighted,
            Shading::Weighted => ShadingModel::Weighted,
        }
    }
}

/// Traces seeded paths through a small sphere scene and reports what the scatter step did.
#[derive(Parser, Debug)]
struct Args {
    #[arg(long, default_value_t = 100_000)]
    /// Number of traced paths
    paths: u32,

    #[arg(long, default_value_t = 8, value_parser = clap::value_parser!(u32).range(1..))]
    /// Bounce budget per path
    bounces: u32,

    #[arg(long, default_value_t = 0)]
    seed: u64,

    #[arg(long, default_value_t = 0.3)]
    /// Chance of the mirror lobe on the glossy spheres
    specular_probability: f32,

    #[arg(long)]
    /// Energy of the mirror lobe, defaults to the probability
    specular_weight: Option<f32>,

    #[arg(long, value_enum, default_value_t)]
    shading: Shading,

    #[arg(long, default_value_t = 0.2)]
    ambient: f32,

    #[arg(long)]
    /// Worker threads, all cores when omitted
    threads: Option<usize>,
}

fn create_world(args: &Args, rng: &mut impl Rng) -> Result<World> {
    let specular = Specular { color: Vec3::new(0.9, 0.9, 0.9), exponent: 16.0 };
    let mut glossy = Material::glossy(Vec3::new(0.7, 0.3, 0.2), specular, args.specular_probability);
    glossy.specular_weight = args.specular_weight.unwrap_or(args.specular_probability);

    let materials = vec![
        Material::diffuse(Vec3::new(0.5, 0.5, 0.5)),
        glossy,
        Material::dielectric(Vec3::ONE, 1.5),
        Material::light(Vec3::new(1.0, 0.95, 0.9), 8.0),
    ];

    let mut geoms = vec![Sphere::new(Vec3::new(0.0, -1000.0, 0.0), 1000.0, MaterialId(0))];

    for a in -3..3 {
        for b in -3..3 {
            let choose: f32 = rng.gen();
            let material = if choose < 0.8 { MaterialId(1) } else { MaterialId(2) };
            let center = Vec3::new((a as f32) + rng.gen_range(0.0..0.9), 0.2, (b as f32) + rng.gen_range(0.0..0.9));
            geoms.push(Sphere::new(center, 0.2, material));
        }
    }

    let light = geoms.len();
    geoms.push(Sphere::new(Vec3::new(0.0, 6.0, 0.0), 1.5, MaterialId(3)));
    geoms.push(Sphere::new(Vec3::new(-4.0, 4.0, 3.0), 0.75, MaterialId(3)));

    Ok(World::new(geoms, materials, vec![light, light + 1])?)
}

fn run(args: Args) -> Result<()> {
    if let Some(threads) = args.threads {
        log::info!("Working on {threads} threads");
        rayon::ThreadPoolBuilder::new().num_threads(threads).build_global()?;
    }

    let mut scene_rng = stream_for(args.seed, u32::MAX, 0);
    let world = create_world(&args, &mut scene_rng)?;

    let config = ScatterConfig { shading: args.shading.into(), ambient: args.ambient };
    let eye = Vec3::new(0.0, 1.0, 0.0);

    let mut segments: Vec<PathSegment> = (0..args.paths)
        .map(|i| {
            let mut rng = stream_for(args.seed, i, u32::MAX);
            let direction = rand_on_unit_sphere(&mut rng);
            PathSegment::new(i, Ray::new(eye, direction), args.bounces)
        })
        .collect();

    log::info!("Tracing {} paths, {} bounces, {:?}", args.paths, args.bounces, config);
    let history = trace_paths(&mut segments, &world, &config, args.seed, args.bounces);

    for (depth, stats) in history.iter().enumerate() {
        log::info!(
            "bounce {depth}: {} active, {} specular, {} refractive, {} diffuse, {} emissive, {} missed",
            stats.active(),
            stats.specular,
            stats.refractive,
            stats.diffuse,
            stats.emissive,
            stats.missed
        );
    }

    let scattered: usize = history.iter().map(|s| s.specular + s.refractive + s.diffuse).sum();
    let specular: usize = history.iter().map(|s| s.specular).sum();
    if scattered > 0 {
        log::info!("specular fraction: {:.4}", specular as f64 / scattered as f64);
    }

    let estimate = segments.iter().fold(Vec3::ZERO, |acc, s| acc + s.color) / args.paths.max(1) as f32;
    log::info!("mean radiance estimate: {estimate:?}");

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(err) = run(args) {
        log::error!("{:?}", err);
        std::process::exit(1);
    }
}
