//! xsmall — smallest end-to-end run of the bus-stop pipeline.
//!
//! Places 6 stops for 120 students on a synthetic 8-street grid, writes
//! `output/xsmall/stops.csv`, and prints the stop table.  Swap in
//! `demos/stops` with real GeoJSON inputs for a city-scale run.

mod network;

use std::path::Path;
use std::time::Instant;

use anyhow::Result;

use bs_cluster::Clustering;
use bs_core::{Point, SeededRng};
use bs_output::{CsvWriter, StopOutputObserver, StopRow};
use bs_pipeline::{FailedStop, PipelineConfig, RunSummary, SnappedStop, StopObserver, StopPipeline};
use bs_spatial::{ExactRadius, SnapConfig};

use network::build_network;

// ── Constants ─────────────────────────────────────────────────────────────────

const STOP_COUNT:       usize = 6;
const STUDENTS_PER_HUB: usize = 30;
const SEED:             u64   = 42;
const OUTPUT_DIR:       &str  = "output/xsmall";

/// Neighbourhood centres students cluster around, `(lon, lat)`.
const HUBS: [(f64, f64); 4] = [
    (-71.084, 42.355),
    (-71.076, 42.349),
    (-71.068, 42.344),
    (-71.070, 42.356),
];

/// Students scattered up to ±0.003° around each hub.
fn students(rng: &mut SeededRng) -> Vec<Point> {
    let mut pts = Vec::with_capacity(HUBS.len() * STUDENTS_PER_HUB);
    for (lon, lat) in HUBS {
        for _ in 0..STUDENTS_PER_HUB {
            let dx = (rng.unit() - 0.5) * 0.006;
            let dy = (rng.unit() - 0.5) * 0.006;
            pts.push(Point::new(lon + dx, lat + dy));
        }
    }
    pts
}

// ── Observer wrapper that keeps rows for the table ───────────────────────────

struct TableObserver<O: StopObserver> {
    inner: O,
    rows:  Vec<StopRow>,
}

impl<O: StopObserver> StopObserver for TableObserver<O> {
    fn on_clustered(&mut self, clustering: &Clustering) {
        self.inner.on_clustered(clustering);
    }

    fn on_stop(&mut self, stop: &SnappedStop) {
        self.rows.push(StopRow::from_snap(stop));
        self.inner.on_stop(stop);
    }

    fn on_stop_failed(&mut self, failed: &FailedStop) {
        self.inner.on_stop_failed(failed);
    }

    fn on_end(&mut self, summary: &RunSummary) {
        self.inner.on_end(summary);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    println!("=== xsmall — bus-stop synthesis ===");
    println!("Students: {}  |  Stops: {STOP_COUNT}  |  Seed: {SEED}", HUBS.len() * STUDENTS_PER_HUB);
    println!();

    // 1. Road network.
    let network = build_network()?;
    println!("Road network: {} lines, {} indexed vertices", network.line_count(), network.vertex_count());

    // 2. Students.
    let mut rng = SeededRng::new(SEED);
    let points = students(&mut rng);

    // 3. Pipeline: 0.005° first window, half-mile exact filter.
    let mut config = PipelineConfig::with_stops(STOP_COUNT, SEED);
    config.snap = SnapConfig {
        initial_radius: 0.005,
        exact_radius: Some(ExactRadius::miles(0.5)),
        ..SnapConfig::default()
    };
    let pipeline = StopPipeline::new(config, &network)?;

    // 4. Output.
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut obs = TableObserver { inner: StopOutputObserver::new(writer), rows: Vec::new() };

    // 5. Run.
    let t0 = Instant::now();
    let summary = pipeline.run(&points, &mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    println!("Placed {}/{} stops in {:.3} s", summary.snapped, summary.stops, elapsed.as_secs_f64());
    println!("  {OUTPUT_DIR}/stops.csv        : {} rows", summary.snapped);
    println!("  {OUTPUT_DIR}/failed_stops.csv : {} rows", summary.failed);
    println!();

    // 6. Stop table.
    println!("{:<6} {:<24} {:<18} {:>9}", "Stop", "Centroid", "Street", "Offset m");
    println!("{}", "-".repeat(60));
    for row in &obs.rows {
        let centroid = Point::new(row.centroid_x, row.centroid_y);
        let stop = Point::new(row.stop_x, row.stop_y);
        let street = network
            .lines()
            .get(row.line_id as usize)
            .and_then(|l| l.name.as_deref())
            .unwrap_or("?");
        println!(
            "{:<6} {:<24} {:<18} {:>9.1}",
            row.stop_id,
            centroid.to_string(),
            street,
            centroid.haversine_m(stop),
        );
    }

    Ok(())
}
