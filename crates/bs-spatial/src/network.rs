//! Road network representation and builder.
//!
//! # Data layout
//!
//! A `RoadNetwork` owns its LineStrings in a `Vec` indexed by `LineId`.
//! Metadata (`name`, `source_id`) rides along for output but is never read
//! by the snap engine.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) holds every vertex of every LineString, each entry
//! tagged with its `VertexId` and owning `LineId`.  Every vertex appears
//! exactly once.  The tree is bulk-loaded by [`RoadNetworkBuilder::build`]
//! and never updated in place: to change the network, call
//! [`RoadNetwork::into_builder`], edit, and build again.

use rstar::{AABB, PointDistance, RTree, RTreeObject};
use tracing::debug;

use bs_core::{LineId, Point, VertexId};

use crate::geometry::Segment;
use crate::{SpatialError, SpatialResult};

// ── LineString ────────────────────────────────────────────────────────────────

/// An ordered polyline of at least two vertices.
#[derive(Clone, Debug, PartialEq)]
pub struct LineString {
    vertices: Vec<Point>,
    /// Street name, if the source carried one.
    pub name: Option<String>,
    /// Identifier from the source data set.
    pub source_id: Option<String>,
}

impl LineString {
    /// # Errors
    ///
    /// [`SpatialError::TooFewVertices`] for fewer than two vertices.
    pub fn new(vertices: Vec<Point>) -> SpatialResult<Self> {
        if vertices.len() < 2 {
            return Err(SpatialError::TooFewVertices { vertices: vertices.len() });
        }
        Ok(Self { vertices, name: None, source_id: None })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_source_id(mut self, id: impl Into<String>) -> Self {
        self.source_id = Some(id.into());
        self
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Consecutive vertex pairs, including zero-length ones.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.vertices.windows(2).map(|w| Segment::new(w[0], w[1]))
    }
}

// ── R-tree vertex entry ───────────────────────────────────────────────────────

/// Entry stored in the R-tree: one LineString vertex.
#[derive(Clone, Debug)]
struct VertexEntry {
    point:  [f64; 2],
    vertex: VertexId,
    line:   LineId,
}

impl RTreeObject for VertexEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for VertexEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── RoadNetwork ───────────────────────────────────────────────────────────────

/// Street LineStrings plus a vertex R-tree.  Build with
/// [`RoadNetworkBuilder`].
pub struct RoadNetwork {
    lines:      Vec<LineString>,
    vertex_idx: RTree<VertexEntry>,
}

impl RoadNetwork {
    /// A network with no lines.  Snapping against it fails with
    /// [`SpatialError::EmptyNetwork`].
    pub fn empty() -> Self {
        RoadNetworkBuilder::new().build()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Number of vertices in the spatial index.
    pub fn vertex_count(&self) -> usize {
        self.vertex_idx.size()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[LineString] {
        &self.lines
    }

    /// # Panics
    /// Panics if `id` is not a line of this network.
    #[inline]
    pub fn line(&self, id: LineId) -> &LineString {
        &self.lines[id.index()]
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// Vertices inside the square window of half-width `half_width` centred
    /// on `center`, as `(vertex, owning line, position)`.
    pub fn vertices_in_window(
        &self,
        center: Point,
        half_width: f64,
    ) -> impl Iterator<Item = (VertexId, LineId, Point)> + '_ {
        let window = AABB::from_corners(
            [center.x - half_width, center.y - half_width],
            [center.x + half_width, center.y + half_width],
        );
        self.vertex_idx
            .locate_in_envelope(&window)
            .map(|e| (e.vertex, e.line, Point::from(e.point)))
    }

    /// Distinct lines with at least one vertex in the window, sorted by id.
    pub fn lines_in_window(&self, center: Point, half_width: f64) -> Vec<LineId> {
        self.lines_in_window_where(center, half_width, |_| true)
    }

    /// As [`lines_in_window`](Self::lines_in_window), counting only the
    /// window vertices accepted by `keep`.
    pub fn lines_in_window_where(
        &self,
        center: Point,
        half_width: f64,
        mut keep: impl FnMut(Point) -> bool,
    ) -> Vec<LineId> {
        let mut ids: Vec<LineId> = self
            .vertices_in_window(center, half_width)
            .filter(|&(_, _, v)| keep(v))
            .map(|(_, line, _)| line)
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// Nearest indexed vertex to `p` and the line owning it.
    ///
    /// Returns `None` only if the network has no lines.
    pub fn nearest_vertex(&self, p: Point) -> Option<(LineId, Point)> {
        self.vertex_idx
            .nearest_neighbor(&p.to_array())
            .map(|e| (e.line, Point::from(e.point)))
    }

    /// Give the lines back for editing; the index is dropped and rebuilt by
    /// the next [`RoadNetworkBuilder::build`].
    pub fn into_builder(self) -> RoadNetworkBuilder {
        RoadNetworkBuilder { lines: self.lines }
    }
}

// ── RoadNetworkBuilder ────────────────────────────────────────────────────────

/// Collect LineStrings, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use bs_core::Point;
/// use bs_spatial::RoadNetworkBuilder;
///
/// let mut b = RoadNetworkBuilder::new();
/// b.add_line(vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(1.0, 1.0)]).unwrap();
/// b.add_line(vec![Point::new(5.0, 5.0), Point::new(6.0, 5.0)]).unwrap();
/// let net = b.build();
/// assert_eq!(net.line_count(), 2);
/// assert_eq!(net.vertex_count(), 5);
/// ```
#[derive(Default)]
pub struct RoadNetworkBuilder {
    lines: Vec<LineString>,
}

impl RoadNetworkBuilder {
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    pub fn with_capacity(lines: usize) -> Self {
        Self { lines: Vec::with_capacity(lines) }
    }

    /// Add an unnamed line.
    ///
    /// # Errors
    ///
    /// [`SpatialError::TooFewVertices`] for fewer than two vertices.
    pub fn add_line(&mut self, vertices: Vec<Point>) -> SpatialResult<LineId> {
        Ok(self.push(LineString::new(vertices)?))
    }

    /// Add an already validated line (with its metadata).
    pub fn push(&mut self, line: LineString) -> LineId {
        let id = LineId(self.lines.len() as u32);
        self.lines.push(line);
        id
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Consume the builder and bulk-load the vertex R-tree.
    ///
    /// Time complexity: O(V log V) for V total vertices.
    pub fn build(self) -> RoadNetwork {
        let mut entries = Vec::with_capacity(self.lines.iter().map(|l| l.vertices.len()).sum());
        for (line_idx, line) in self.lines.iter().enumerate() {
            for &v in &line.vertices {
                entries.push(VertexEntry {
                    point:  v.to_array(),
                    vertex: VertexId(entries.len() as u32),
                    line:   LineId(line_idx as u32),
                });
            }
        }

        let vertex_count = entries.len();
        let vertex_idx = RTree::bulk_load(entries);
        debug!(lines = self.lines.len(), vertices = vertex_count, "built road vertex index");

        RoadNetwork { lines: self.lines, vertex_idx }
    }
}
