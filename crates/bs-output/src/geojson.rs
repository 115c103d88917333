//! GeoJSON output backend.
//!
//! Collects one `Point` feature per stop and writes them as a single
//! `stops.geojson` FeatureCollection on [`OutputWriter::finish`].  Snapped
//! stops sit at the road position; failed stops sit at their centroid with
//! `status = "no_network_nearby"`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use geojson::feature::Id;
use geojson::{Feature, FeatureCollection, GeoJson, Geometry};
use serde_json::{Map, json};

use crate::writer::OutputWriter;
use crate::{FailedStopRow, OutputResult, StopRow};

pub struct GeoJsonWriter {
    out:      BufWriter<File>,
    features: Vec<Feature>,
    finished: bool,
}

impl GeoJsonWriter {
    /// Create `dir` if needed and open `stops.geojson`.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;
        let out = BufWriter::new(File::create(dir.join("stops.geojson"))?);
        Ok(Self { out, features: Vec::new(), finished: false })
    }

    fn push(&mut self, stop_id: u32, x: f64, y: f64, properties: Map<String, serde_json::Value>) {
        self.features.push(Feature {
            bbox: None,
            geometry: Some(Geometry::new(geojson::Value::Point(vec![x, y]))),
            id: Some(Id::Number(stop_id.into())),
            properties: Some(properties),
            foreign_members: None,
        });
    }
}

impl OutputWriter for GeoJsonWriter {
    fn write_stop(&mut self, row: &StopRow) -> OutputResult<()> {
        let [sx, sy, ex, ey] = row.segment;
        let properties = Map::from_iter([
            ("status".to_string(), json!("snapped")),
            ("centroid".to_string(), json!([row.centroid_x, row.centroid_y])),
            ("offset".to_string(), json!(row.offset)),
            ("line_id".to_string(), json!(row.line_id)),
            ("segment".to_string(), json!([[sx, sy], [ex, ey]])),
        ]);
        self.push(row.stop_id, row.stop_x, row.stop_y, properties);
        Ok(())
    }

    fn write_failure(&mut self, row: &FailedStopRow) -> OutputResult<()> {
        let properties = Map::from_iter([
            ("status".to_string(), json!("no_network_nearby")),
            ("reason".to_string(), json!(row.reason)),
        ]);
        self.push(row.stop_id, row.centroid_x, row.centroid_y, properties);
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        let collection = FeatureCollection {
            bbox: None,
            features: std::mem::take(&mut self.features),
            foreign_members: None,
        };
        self.out.write_all(GeoJson::from(collection).to_string().as_bytes())?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        Ok(())
    }
}
