//! stops — place bus stops for a city's students.
//!
//! ```text
//! stops --students students.geojson --roads roads.geojson \
//!       --stops 5000 --cache output/centroids.json --exact-radius 0.5
//! ```
//!
//! Students are clustered into `--stops` centroids, which are then snapped
//! onto the nearest road segment.  Results go to `--out` as CSV
//! (`stops.csv`, `failed_stops.csv`) or GeoJSON (`stops.geojson`).

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;

use bs_cluster::ClusterConfig;
use bs_cluster::config::DEFAULT_MAX_ITER;
use bs_output::{
    CacheKey, CsvWriter, GeoJsonWriter, OutputWriter, StopOutputObserver, load_centroids, store_centroids,
};
use bs_pipeline::{FailurePolicy, PipelineConfig, StopPipeline};
use bs_spatial::geojson::{load_points, load_road_network};
use bs_spatial::{ExactRadius, SnapConfig};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Format {
    Csv,
    Geojson,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Unit {
    /// Raw coordinate units.
    Planar,
    /// Great-circle metres; coordinates must be lon/lat degrees.
    Metres,
    /// Great-circle miles; coordinates must be lon/lat degrees.
    Miles,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Student locations: GeoJSON FeatureCollection of Point features.
    #[arg(long)]
    students: PathBuf,

    /// Road network: GeoJSON FeatureCollection of LineString features.
    #[arg(long)]
    roads: PathBuf,

    /// Number of bus stops to place.
    #[arg(long, default_value_t = 5_000)]
    stops: usize,

    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Independent k-means runs; the tightest one wins.
    #[arg(long, default_value_t = 1)]
    n_init: usize,

    #[arg(long, default_value_t = DEFAULT_MAX_ITER)]
    max_iter: usize,

    /// Centroid cache file, reused while the students and clustering
    /// parameters are unchanged.
    #[arg(long)]
    cache: Option<PathBuf>,

    /// Output directory.
    #[arg(long, default_value = "output/stops")]
    out: PathBuf,

    #[arg(long, value_enum, default_value_t = Format::Csv)]
    format: Format,

    /// Half-width of the first road search window, in coordinate units.
    #[arg(long, default_value_t = 0.01)]
    radius: f64,

    /// Window multiplier on each retry.
    #[arg(long, default_value_t = 2.0)]
    growth: f64,

    #[arg(long, default_value_t = 10)]
    max_expansions: u32,

    /// Candidate roads wanted before the window stops growing.
    #[arg(long, default_value_t = 1)]
    min_candidates: usize,

    /// Only consider roads with a vertex within this distance of the
    /// centroid, in `--exact-unit`.
    #[arg(long)]
    exact_radius: Option<f64>,

    #[arg(long, value_enum, default_value_t = Unit::Miles)]
    exact_unit: Unit,

    /// Stop at the first centroid with no road in reach.
    #[arg(long)]
    abort_on_miss: bool,
}

impl Args {
    fn pipeline_config(&self) -> PipelineConfig {
        let exact_radius = self.exact_radius.map(|d| match self.exact_unit {
            Unit::Planar => ExactRadius::planar(d),
            Unit::Metres => ExactRadius::metres(d),
            Unit::Miles => ExactRadius::miles(d),
        });
        PipelineConfig {
            cluster: ClusterConfig::new(self.stops, self.seed)
                .with_max_iter(self.max_iter)
                .with_restarts(self.n_init),
            snap: SnapConfig {
                initial_radius: self.radius,
                growth_factor: self.growth,
                max_expansions: self.max_expansions,
                min_candidates: self.min_candidates,
                exact_radius,
            },
            failure_policy: if self.abort_on_miss { FailurePolicy::Abort } else { FailurePolicy::Continue },
        }
    }

    fn writer(&self) -> Result<Box<dyn OutputWriter>> {
        let dir = self.out.as_path();
        let writer: Box<dyn OutputWriter> = match self.format {
            Format::Csv => Box::new(CsvWriter::new(dir)?),
            Format::Geojson => Box::new(GeoJsonWriter::new(dir)?),
        };
        Ok(writer)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    // 1. Inputs.
    let t0 = Instant::now();
    let network = load_road_network(&args.roads)
        .with_context(|| format!("loading roads from {}", args.roads.display()))?;
    let students = load_points(&args.students)
        .with_context(|| format!("loading students from {}", args.students.display()))?;
    info!(
        lines = network.line_count(),
        vertices = network.vertex_count(),
        students = students.len(),
        secs = t0.elapsed().as_secs_f64(),
        "inputs loaded"
    );

    // 2. Pipeline and output.
    let pipeline = StopPipeline::new(args.pipeline_config(), &network)?;
    let mut obs = StopOutputObserver::new(args.writer()?);

    // 3. Cluster (or reuse cached centroids), then snap.
    let t1 = Instant::now();
    let summary = match &args.cache {
        Some(path) => {
            let key = CacheKey::new(&students, &pipeline.config().cluster);
            let centroids = match load_centroids(path, &key)? {
                Some(centroids) => {
                    info!(path = %path.display(), "reusing cached centroids");
                    centroids
                }
                None => {
                    let clustering = pipeline.cluster(&students)?;
                    store_centroids(path, &key, &clustering.centroids)
                        .with_context(|| format!("writing centroid cache {}", path.display()))?;
                    clustering.centroids
                }
            };
            pipeline.run_centroids(&centroids, &mut obs)?
        }
        None => pipeline.run(&students, &mut obs)?,
    };

    if let Some(e) = obs.take_error() {
        return Err(e).context("writing stops");
    }

    println!("Placed {}/{} stops in {:.2} s", summary.snapped, summary.stops, t1.elapsed().as_secs_f64());
    println!("  failed      : {}", summary.failed);
    println!("  max offset  : {:.6}", summary.max_offset);
    println!("  output      : {}", args.out.display());
    Ok(())
}
