pub mod config;
pub mod diagnostics;
pub mod error;
pub mod frame;
pub mod model;
pub mod session;
pub mod geometry {
    pub mod limits;
    pub mod math;
    pub mod tolerance;
}
pub mod algorithms {
    pub mod invariants;
    pub mod merge;
    pub mod picking;
}
mod json;

pub use algorithms::invariants::{Violation, ViolationKind};
pub use config::EditorConfig;
pub use diagnostics::{DiagnosticsHost, EventLog, LogEntry, MemoryHost};
pub use error::{Result, WireError};
pub use frame::{draw_frame, Frame, Highlight, Ink, Renderer};
pub use model::{Hit, Point, PointId, QueryMode, Segment};
pub use session::{DragState, EditorSession, PointerButton};

use std::collections::HashSet;
use tracing::debug;

/// Point/edge registry. Connections live on the points as id lists; segments are derived.
#[derive(Clone, Debug)]
pub struct Graph {
    pub(crate) points: Vec<Option<Point>>, // id is index, never reused
    pub(crate) geom_ver: u64,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph {
    pub fn new() -> Self {
        Graph { points: Vec::new(), geom_ver: 1 }
    }
    /// Monotonic geometry version; increments on every structural or positional edit
    pub fn geom_version(&self) -> u64 {
        self.geom_ver
    }

    // Points
    // Coordinates must be finite. `EditorSession` validates them at the event boundary, so
    // both constructors below only assert it in debug builds.
    pub fn create_point(&mut self, x: f64, y: f64) -> PointId {
        debug_assert!(x.is_finite() && y.is_finite(), "non-finite point ({}, {})", x, y);
        let id = self.points.len() as PointId;
        self.points.push(Some(Point::new(id, x, y)));
        debug!(id, x, y, "create point");
        self.bump();
        id
    }
    pub fn point(&self, id: PointId) -> Option<&Point> {
        self.points.get(id as usize).and_then(|p| p.as_ref())
    }
    pub(crate) fn point_mut(&mut self, id: PointId) -> Option<&mut Point> {
        self.points.get_mut(id as usize).and_then(|p| p.as_mut())
    }
    pub fn contains(&self, id: PointId) -> bool {
        self.point(id).is_some()
    }
    pub fn position(&self, id: PointId) -> Option<(f64, f64)> {
        self.point(id).map(|p| (p.x, p.y))
    }
    pub fn neighbors(&self, id: PointId) -> &[PointId] {
        self.point(id).map_or(&[], |p| p.connections.as_slice())
    }
    pub fn is_connected(&self, a: PointId, b: PointId) -> bool {
        self.point(a).is_some_and(|p| p.is_connected_to(b))
    }
    /// Returns `false` only when `id` is absent.
    pub fn move_point(&mut self, id: PointId, x: f64, y: f64) -> bool {
        debug_assert!(x.is_finite() && y.is_finite(), "non-finite point ({}, {})", x, y);
        match self.point_mut(id) {
            Some(p) => {
                if p.x == x && p.y == y {
                    return true;
                }
                p.x = x;
                p.y = y;
            }
            None => return false,
        }
        self.bump();
        true
    }
    pub fn point_count(&self) -> u32 {
        self.points.iter().filter(|p| p.is_some()).count() as u32
    }
    /// Live points in ascending id order
    pub fn points(&self) -> impl Iterator<Item = &Point> + '_ {
        self.points.iter().flatten()
    }
    pub fn edge_count(&self) -> u32 {
        let ends: usize = self.points().map(|p| p.connections.len()).sum();
        (ends / 2) as u32
    }
    /// Every undirected edge once, from its lower-id endpoint.
    pub fn segments(&self) -> Vec<Segment> {
        let mut out = Vec::new();
        for p in self.points() {
            for &c in &p.connections {
                if c <= p.id {
                    continue;
                }
                if let Some(q) = self.point(c) {
                    out.push(Segment { a: p.id, b: q.id, ax: p.x, ay: p.y, bx: q.x, by: q.y });
                }
            }
        }
        out
    }
    pub fn get_point_arrays(&self) -> (Vec<u32>, Vec<f64>) {
        let mut ids = Vec::new();
        let mut pos = Vec::new();
        for p in self.points() {
            ids.push(p.id);
            pos.push(p.x);
            pos.push(p.y);
        }
        (ids, pos)
    }

    // Edges
    pub fn connect(&mut self, a: PointId, b: PointId) -> bool {
        if a == b || !self.contains(a) || !self.contains(b) || self.is_connected(a, b) {
            return false;
        }
        if let Some(p) = self.point_mut(a) {
            p.connections.push(b);
        }
        if let Some(p) = self.point_mut(b) {
            p.connections.push(a);
        }
        debug!(a, b, "connect");
        self.bump();
        true
    }
    /// Drop the edge from both sides without any isolation cleanup.
    pub(crate) fn unlink(&mut self, a: PointId, b: PointId) -> bool {
        let mut changed = false;
        if let Some(p) = self.point_mut(a) {
            let before = p.connections.len();
            p.connections.retain(|&c| c != b);
            changed |= p.connections.len() != before;
        }
        if let Some(p) = self.point_mut(b) {
            let before = p.connections.len();
            p.connections.retain(|&c| c != a);
            changed |= p.connections.len() != before;
        }
        if changed {
            self.bump();
        }
        changed
    }
    /// Remove a point slot outright. Callers unlink its edges first.
    pub(crate) fn drop_point(&mut self, id: PointId) -> bool {
        match self.points.get_mut(id as usize) {
            Some(slot) if slot.is_some() => {
                *slot = None;
                debug!(id, "remove point");
                self.bump();
                true
            }
            _ => false,
        }
    }
    fn drop_if_isolated(&mut self, id: PointId) {
        if self.point(id).is_some_and(|p| p.connections.is_empty()) {
            self.drop_point(id);
        }
    }
    /// Remove edge `a`-`b`; endpoints left without connections are removed as well.
    /// With `fold`, both former endpoints are simplified afterwards.
    pub fn disconnect(&mut self, a: PointId, b: PointId, fold: bool) -> bool {
        if !self.is_connected(a, b) && !self.is_connected(b, a) {
            return false;
        }
        self.unlink(a, b);
        debug!(a, b, fold, "disconnect");
        self.drop_if_isolated(a);
        self.drop_if_isolated(b);
        if fold {
            self.simplify_all(&[a, b]);
        }
        true
    }
    /// Remove a point and its edges. Neighbours left isolated go with it; with `fold` the
    /// surviving neighbours are simplified.
    pub fn remove_point(&mut self, id: PointId, fold: bool) -> bool {
        let neighbors = match self.point(id) {
            Some(p) => p.connections.clone(),
            None => return false,
        };
        for &n in &neighbors {
            self.unlink(id, n);
            self.drop_if_isolated(n);
        }
        self.drop_point(id);
        if fold {
            self.simplify_all(&neighbors);
        }
        true
    }
    /// Points reachable from `start`, in visit order. Iterative, so long chains are fine.
    pub fn component_of(&self, start: PointId) -> Vec<PointId> {
        let mut out = Vec::new();
        if !self.contains(start) {
            return out;
        }
        let mut seen: HashSet<PointId> = HashSet::new();
        let mut stack = vec![start];
        seen.insert(start);
        while let Some(id) = stack.pop() {
            out.push(id);
            for &c in self.neighbors(id) {
                if self.contains(c) && seen.insert(c) {
                    stack.push(c);
                }
            }
        }
        out
    }
    /// Remove every point connected to `start`. Returns how many points were removed.
    pub fn remove_component(&mut self, start: PointId) -> usize {
        let members = self.component_of(start);
        for &id in &members {
            self.drop_point(id);
        }
        debug!(start, removed = members.len(), "remove component");
        members.len()
    }
    /// Replace edge `a`-`b` by `a`-`new` and `new`-`b`.
    pub fn insert_point_on_edge(&mut self, new: PointId, a: PointId, b: PointId) -> Option<PointId> {
        if new == a || new == b || !self.contains(new) || !self.is_connected(a, b) {
            return None;
        }
        self.connect(a, new);
        self.connect(b, new);
        self.unlink(a, b);
        debug!(new, a, b, "insert point on edge");
        Some(new)
    }

    // Queries
    pub fn find_nearest(&self, x: f64, y: f64, max_distance: f64, mode: QueryMode) -> Vec<Hit> {
        algorithms::picking::find_nearest_impl(self, x, y, max_distance, mode)
    }
    pub fn pick(&self, x: f64, y: f64, max_distance: f64) -> Option<Hit> {
        self.find_nearest(x, y, max_distance, QueryMode::First).into_iter().next()
    }

    // Merging
    pub fn simplify(&mut self, id: PointId) {
        algorithms::merge::simplify_impl(self, vec![id]);
    }
    pub fn simplify_all(&mut self, ids: &[PointId]) {
        // Work-list pops from the back; reverse so the first id is handled first
        algorithms::merge::simplify_impl(self, ids.iter().rev().copied().collect());
    }

    // Diagnostics
    pub fn check(&self) -> Vec<Violation> {
        algorithms::invariants::check_graph(self)
    }
    pub fn to_json_value(&self) -> serde_json::Value {
        json::to_json_impl(self)
    }
    pub fn adjacency_list(&self) -> String {
        json::adjacency_list_impl(self)
    }

    /// Drop every point. Slots stay allocated so ids are never handed out twice.
    pub fn clear(&mut self) {
        for slot in self.points.iter_mut() {
            *slot = None;
        }
        self.bump();
    }

    fn bump(&mut self) {
        self.geom_ver = self.geom_ver.wrapping_add(1);
    }
}
