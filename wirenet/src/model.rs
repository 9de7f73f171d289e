use serde::{Deserialize, Serialize};

pub type PointId = u32;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Point {
    pub id: PointId,
    pub x: f64,
    pub y: f64,
    // Ordered adjacency; kept free of duplicates by `Graph::connect`
    pub connections: Vec<PointId>,
}

impl Point {
    pub fn new(id: PointId, x: f64, y: f64) -> Self {
        Point { id, x, y, connections: Vec::new() }
    }
    pub fn is_connected_to(&self, other: PointId) -> bool {
        self.connections.contains(&other)
    }
    pub fn degree(&self) -> usize {
        self.connections.len()
    }
}

/// Result of a spatial query against the graph.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Hit {
    #[serde(rename = "point")]
    Point { id: PointId, dist: f64 },
    /// `a < b`; `t` is the clamped projection parameter along `a -> b`.
    #[serde(rename = "segment")]
    Segment { a: PointId, b: PointId, t: f64, dist: f64 },
}

impl Hit {
    pub fn dist(&self) -> f64 {
        match *self {
            Hit::Point { dist, .. } | Hit::Segment { dist, .. } => dist,
        }
    }
    /// Point used to seed component traversals: the point itself, or the segment's first end.
    pub fn anchor(&self) -> PointId {
        match *self {
            Hit::Point { id, .. } => id,
            Hit::Segment { a, .. } => a,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryMode {
    /// Closest point within range, else closest segment.
    First,
    /// Every point within range, then every segment, each sorted by distance.
    All,
}

/// A derived segment between two connected points, `a < b`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Segment {
    pub a: PointId,
    pub b: PointId,
    pub ax: f64,
    pub ay: f64,
    pub bx: f64,
    pub by: f64,
}
