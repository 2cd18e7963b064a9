use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use racetrack::prelude::*;
use rand::{rngs::StdRng, SeedableRng};
use serde::Serialize;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;

#[derive(Parser, Debug)]
#[command(name = "racetrack")]
#[command(about = "Generate, evolve and query random race tracks")]
struct Cmd {
    /// RNG seed; the same seed and parameters reproduce the same output
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Write JSON here (plus a provenance sidecar) instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,

    #[command(flatten)]
    cfg: CfgArgs,

    #[command(subcommand)]
    action: Action,
}

/// Overrides for `TrackCfg::default()`.
#[derive(Args, Debug, Default)]
struct CfgArgs {
    #[arg(long)]
    space: Option<f64>,
    #[arg(long)]
    space_to_use: Option<f64>,
    #[arg(long)]
    vectors: Option<usize>,
    #[arg(long)]
    vectors_var: Option<f64>,
    #[arg(long)]
    pos_var: Option<f64>,
    #[arg(long)]
    max_angle_variation: Option<f64>,
    #[arg(long)]
    min_corner_distance: Option<f64>,
    #[arg(long)]
    margin: Option<f64>,
    #[arg(long)]
    retries: Option<u32>,
}

impl CfgArgs {
    fn resolve(&self) -> TrackCfg {
        let d = TrackCfg::default();
        TrackCfg {
            space: self.space.unwrap_or(d.space),
            space_to_use: self.space_to_use.unwrap_or(d.space_to_use),
            vectors: self.vectors.unwrap_or(d.vectors),
            vectors_var: self.vectors_var.unwrap_or(d.vectors_var),
            pos_var: self.pos_var.unwrap_or(d.pos_var),
            max_angle_variation: self.max_angle_variation.unwrap_or(d.max_angle_variation),
            min_corner_distance: self.min_corner_distance.unwrap_or(d.min_corner_distance),
            margin: self.margin.unwrap_or(d.margin),
            retries: self.retries.unwrap_or(d.retries),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Action {
    /// Generate a random loop or race track
    Generate {
        #[arg(long, value_enum, default_value_t = Kind::Track)]
        kind: Kind,
    },
    /// Generate a race track and apply `ticks` small jitter passes to it
    Evolve {
        #[arg(long, default_value_t = 10)]
        ticks: u32,
        /// Share of vertices considered per tick
        #[arg(long)]
        tick_ratio: Option<f64>,
        #[arg(long)]
        tick_pos_var: Option<f64>,
        #[arg(long)]
        tick_retries: Option<u32>,
    },
    /// Generate a race track and test whether a point lies on the drivable band
    Encloses {
        #[arg(long, allow_hyphen_values = true)]
        x: f64,
        #[arg(long, allow_hyphen_values = true)]
        y: f64,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Kind {
    Loop,
    Track,
}

#[derive(Serialize)]
struct LoopOut {
    points: Vec<[f64; 2]>,
    path: String,
}

impl From<&Loop> for LoopOut {
    fn from(lp: &Loop) -> Self {
        Self {
            points: lp.points().iter().map(|p| [p.x, p.y]).collect(),
            path: lp.path_data(),
        }
    }
}

#[derive(Serialize)]
struct TrackOut {
    outer: LoopOut,
    inner: LoopOut,
    clearance: f64,
}

impl From<&RaceTrack> for TrackOut {
    fn from(track: &RaceTrack) -> Self {
        Self {
            outer: track.outer().into(),
            inner: track.inner().into(),
            clearance: track.inner_distance(),
        }
    }
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    let doc = run(&cmd)?;
    emit(&cmd, &doc)
}

fn run(cmd: &Cmd) -> Result<Value> {
    let cfg = cmd.cfg.resolve();
    cfg.validate().context("invalid track parameters")?;
    let mut rng = StdRng::seed_from_u64(cmd.seed);
    match &cmd.action {
        Action::Generate { kind } => generate(*kind, &cfg, &mut rng),
        Action::Evolve {
            ticks,
            tick_ratio,
            tick_pos_var,
            tick_retries,
        } => {
            let d = Jitter::dynamic();
            let jitter = Jitter {
                ratio: tick_ratio.unwrap_or(d.ratio),
                pos_var: tick_pos_var.unwrap_or(d.pos_var),
                retries: tick_retries.unwrap_or(d.retries),
            };
            jitter.validate().context("invalid tick parameters")?;
            evolve(*ticks, &jitter, &cfg, &mut rng)
        }
        Action::Encloses { x, y } => encloses(Point::new(*x, *y), &cfg, &mut rng),
    }
}

fn generate(kind: Kind, cfg: &TrackCfg, rng: &mut StdRng) -> Result<Value> {
    tracing::info!(?kind, vectors = cfg.vectors, "generate");
    let doc = match kind {
        Kind::Loop => json!({ "loop": LoopOut::from(&Loop::make_random(cfg, rng)?) }),
        Kind::Track => json!({ "track": TrackOut::from(&RaceTrack::make_random(cfg, rng)?) }),
    };
    Ok(doc)
}

fn evolve(ticks: u32, jitter: &Jitter, cfg: &TrackCfg, rng: &mut StdRng) -> Result<Value> {
    let mut track = RaceTrack::make_random(cfg, rng)?;
    let moved: Vec<usize> = (0..ticks).map(|_| track.evolve(jitter, cfg, rng)).collect();
    tracing::info!(ticks, total = moved.iter().sum::<usize>(), "evolve");
    Ok(json!({
        "moved": moved,
        "track": TrackOut::from(&track),
    }))
}

fn encloses(point: Point, cfg: &TrackCfg, rng: &mut StdRng) -> Result<Value> {
    let track = RaceTrack::make_random(cfg, rng)?;
    let inside = track.encloses(point);
    let nearest = track.closest_boundary(point).map(|hit| {
        json!({
            "boundary": match hit.boundary {
                Boundary::Outer => "outer",
                Boundary::Inner => "inner",
            },
            "index": hit.closest.index,
            "distance": hit.closest.distance,
            "point": [hit.closest.point.x, hit.closest.point.y],
        })
    });
    tracing::info!(%point, inside, "encloses");
    Ok(json!({
        "point": [point.x, point.y],
        "encloses": inside,
        "nearest": nearest,
        "track": TrackOut::from(&track),
    }))
}

fn emit(cmd: &Cmd, doc: &Value) -> Result<()> {
    let Some(out) = &cmd.out else {
        println!("{}", serde_json::to_string_pretty(doc)?);
        return Ok(());
    };
    write_json(out, doc)?;
    let params = json!({
        "seed": cmd.seed,
        "cfg": cmd.cfg.resolve(),
        "action": format!("{:?}", cmd.action),
    });
    let prov = provenance::write_sidecar(out, action_name(&cmd.action), params)?;
    tracing::info!(out = %out.display(), provenance = %prov.display(), "written");
    Ok(())
}

fn write_json(out: &Path, doc: &Value) -> Result<()> {
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    std::fs::write(out, serde_json::to_vec_pretty(doc)?)
        .with_context(|| format!("writing {}", out.display()))
}

fn action_name(action: &Action) -> &'static str {
    match action {
        Action::Generate { .. } => "generate",
        Action::Evolve { .. } => "evolve",
        Action::Encloses { .. } => "encloses",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn parse(args: &[&str]) -> Cmd {
        Cmd::try_parse_from(std::iter::once("racetrack").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn cfg_flags_override_defaults() {
        let cmd = parse(&["--vectors", "9", "--margin", "5", "generate"]);
        let cfg = cmd.cfg.resolve();
        assert_eq!(cfg.vectors, 9);
        assert_eq!(cfg.margin, 5.0);
        assert_eq!(cfg.space, TrackCfg::default().space);
    }

    #[test]
    fn same_seed_same_track() {
        let a = run(&parse(&["--seed", "4", "generate"])).unwrap();
        let b = run(&parse(&["--seed", "4", "generate"])).unwrap();
        assert_eq!(a, b);
        assert!(a["track"]["outer"]["path"].as_str().unwrap().ends_with('z'));
        assert!(a["track"]["clearance"].as_f64().unwrap() > 30.0);
    }

    #[test]
    fn generate_loop_kind() {
        let doc = run(&parse(&["generate", "--kind", "loop"])).unwrap();
        let n = doc["loop"]["points"].as_array().unwrap().len();
        assert!((8..=12).contains(&n));
    }

    #[test]
    fn evolve_reports_each_tick() {
        let doc = run(&parse(&["--seed", "2", "evolve", "--ticks", "4"])).unwrap();
        assert_eq!(doc["moved"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn far_point_is_off_track() {
        let doc = run(&parse(&["encloses", "--x", "1000", "--y", "-5"])).unwrap();
        assert_eq!(doc["encloses"], false);
        assert_eq!(doc["point"], json!([1000.0, -5.0]));
        assert!(doc["nearest"]["distance"].as_f64().unwrap() > 600.0);
    }

    #[test]
    fn bad_params_are_rejected() {
        assert!(run(&parse(&["--vectors", "2", "generate"])).is_err());
        assert!(run(&parse(&["--vectors", "3", "generate"])).is_err());
        assert!(run(&parse(&["evolve", "--tick-ratio", "2"])).is_err());
    }

    #[test]
    fn out_writes_json_and_sidecar() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("nested").join("track.json");
        let cmd = parse(&["--seed", "1", "--out", out.to_str().unwrap(), "generate"]);
        let doc = run(&cmd).unwrap();
        emit(&cmd, &doc).unwrap();
        let written: Value = serde_json::from_slice(&std::fs::read(&out).unwrap()).unwrap();
        assert_eq!(written, doc);
        let sidecar = out.with_file_name("track.provenance.json");
        let prov: Value = serde_json::from_slice(&std::fs::read(sidecar).unwrap()).unwrap();
        assert_eq!(prov["params"]["seed"], 1);
        assert_eq!(prov["params"]["cfg"]["vectors"], 12);
        assert_eq!(prov["params"]["cfg"]["margin"], 20.0);
        assert_eq!(prov["command"], "generate");
    }
}
