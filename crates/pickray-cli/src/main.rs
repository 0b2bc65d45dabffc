//! pickray CLI - cast picking rays against scene files.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use pickray::{HitLocation, HitMode, Primitive, Ray, Scene, ScenePick};
use pickray_math::{Point3, Vec3};
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pickray")]
#[command(about = "Cast rays against triangles, quads, planes and boxes", long_about = None)]
struct Cli {
    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report the nearest primitive a ray hits
    Pick {
        /// Scene file (.json or .toml)
        scene: PathBuf,
        #[command(flatten)]
        ray: RayArgs,
        /// Report barycentric weights instead of world positions for polygons
        #[arg(long)]
        planar: bool,
        /// List every primitive hit, nearest first
        #[arg(long)]
        all: bool,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Distance from a point to a ray (treated as a half-line)
    Distance {
        #[command(flatten)]
        ray: RayArgs,
        /// The point, as x,y,z
        #[arg(long, value_parser = parse_triple, allow_hyphen_values = true)]
        point: [f64; 3],
    },
    /// Summarize a scene file
    Info {
        /// Scene file (.json or .toml)
        scene: PathBuf,
    },
}

#[derive(Args)]
struct RayArgs {
    /// Ray origin, as x,y,z
    #[arg(long, value_parser = parse_triple, allow_hyphen_values = true)]
    origin: [f64; 3],
    /// Ray direction, as x,y,z (used verbatim, not normalized)
    #[arg(long, value_parser = parse_triple, allow_hyphen_values = true, conflicts_with = "to")]
    direction: Option<[f64; 3]>,
    /// Aim the ray at this point, as x,y,z
    #[arg(long, value_parser = parse_triple, allow_hyphen_values = true)]
    to: Option<[f64; 3]>,
}

impl RayArgs {
    fn ray(&self) -> Result<Ray> {
        let origin = Point3::from(self.origin);
        match (self.direction, self.to) {
            (Some(direction), None) => Ok(Ray::with_direction(origin, Vec3::from(direction))),
            (None, Some(to)) => Ok(Ray::from_to(origin, Point3::from(to))),
            _ => bail!("give exactly one of --direction or --to"),
        }
    }
}

fn parse_triple(s: &str) -> std::result::Result<[f64; 3], String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [x, y, z] = parts[..] else {
        return Err(format!("expected x,y,z but got `{s}`"));
    };
    let parse = |v: &str| {
        v.parse::<f64>()
            .map_err(|e| format!("invalid coordinate `{v}`: {e}"))
    };
    Ok([parse(x)?, parse(y)?, parse(z)?])
}

#[derive(Serialize)]
struct PickReport<'a> {
    name: &'a str,
    distance: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    point: Option<[f64; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    t: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    weights: Option<[f64; 3]>,
}

impl<'a> From<&ScenePick<'a>> for PickReport<'a> {
    fn from(pick: &ScenePick<'a>) -> Self {
        let (point, t, weights) = match pick.location {
            HitLocation::World(p) => (Some([p.x, p.y, p.z]), None, None),
            HitLocation::Planar(hit) => (None, Some(hit.t), Some([hit.w0(), hit.w1, hit.w2])),
        };
        Self {
            name: pick.name,
            distance: pick.distance,
            point,
            t,
            weights,
        }
    }
}

impl std::fmt::Display for PickReport<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: distance {:.6}", self.name, self.distance)?;
        if let Some([x, y, z]) = self.point {
            write!(f, " at ({x:.6}, {y:.6}, {z:.6})")?;
        }
        if let (Some(t), Some([w0, w1, w2])) = (self.t, self.weights) {
            write!(f, " t={t:.6} weights=({w0:.6}, {w1:.6}, {w2:.6})")?;
        }
        Ok(())
    }
}

fn init_logging(verbose: bool) -> Result<()> {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command {
        Commands::Pick {
            scene: path,
            ray,
            planar,
            all,
            json,
        } => {
            let scene = Scene::load(&path)
                .with_context(|| format!("loading scene {}", path.display()))?;
            let ray = ray.ray()?;
            let mode = if planar { HitMode::Planar } else { HitMode::World };
            for line in pick_lines(&scene, &ray, mode, all, json)? {
                println!("{line}");
            }
        }
        Commands::Distance { ray, point } => {
            let ray = ray.ray()?;
            let (d2, closest) = ray.distance_squared_with_closest(&Point3::from(point));
            println!(
                "distance {:.6} (squared {:.6}) closest ({:.6}, {:.6}, {:.6})",
                d2.sqrt(),
                d2,
                closest.x,
                closest.y,
                closest.z
            );
        }
        Commands::Info { scene: path } => {
            let scene = Scene::load(&path)
                .with_context(|| format!("loading scene {}", path.display()))?;
            println!("{}", describe(&scene));
        }
    }

    Ok(())
}

/// Render pick results, one line per hit.
fn pick_lines(
    scene: &Scene,
    ray: &Ray,
    mode: HitMode,
    all: bool,
    json: bool,
) -> Result<Vec<String>> {
    let picks = if all {
        scene.hits(ray)
    } else {
        scene.pick(ray, mode).into_iter().collect()
    };
    debug!(hits = picks.len(), ?mode, "cast ray");

    if picks.is_empty() {
        return Ok(vec![if json { "[]".to_string() } else { "no hit".to_string() }]);
    }

    let reports: Vec<PickReport> = picks.iter().map(PickReport::from).collect();
    if json {
        return Ok(vec![serde_json::to_string_pretty(&reports)?]);
    }
    Ok(reports.iter().map(ToString::to_string).collect())
}

fn describe(scene: &Scene) -> String {
    let (mut polygons, mut planes, mut boxes) = (0, 0, 0);
    for (_, primitive) in scene.iter() {
        match primitive {
            Primitive::Polygon(_) => polygons += 1,
            Primitive::Plane(_) => planes += 1,
            Primitive::Box(_) => boxes += 1,
        }
    }
    format!(
        "{} primitives: {polygons} polygons, {planes} planes, {boxes} boxes",
        scene.len()
    )
}
