//! Read-only per-frame view of the editor and the drawing seam it is rendered through.
//!
//! The graph never learns a frame exists; frames are built on demand from a `&Graph`.

use crate::geometry::math::grid_round;
use crate::model::PointId;
use crate::Graph;
use serde::Serialize;
use std::collections::HashMap;

pub const POINT_RADIUS: f64 = 0.1;
pub const EDGE_WIDTH: f64 = 0.1;
pub const MIRROR_WIDTH: f64 = 0.01;
pub const LABEL_SIZE: f64 = 0.25;
pub const LABEL_OFFSET: f64 = 0.5;
pub const CURSOR_LABEL_OFFSET: f64 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Highlight {
    Normal,
    /// Component under the cursor
    Hover,
    /// Component of the point being dragged
    Drag,
}

/// What a primitive is drawn for; colours are the renderer's business.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Ink {
    Component(Highlight),
    /// Half-edge from a point towards the midpoint of one of its connections
    Mirror,
    Cursor,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PointView {
    pub id: PointId,
    pub x: f64,
    pub y: f64,
    pub highlight: Highlight,
    pub connections: Vec<PointId>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SegmentView {
    pub a: PointId,
    pub b: PointId,
    pub ax: f64,
    pub ay: f64,
    pub bx: f64,
    pub by: f64,
    pub highlight: Highlight,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CursorView {
    pub x: f64,
    pub y: f64,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Frame {
    pub points: Vec<PointView>,
    pub segments: Vec<SegmentView>,
    pub dragging: Option<PointId>,
    pub hovered: Option<PointId>,
    pub cursor: Option<CursorView>,
}

impl Frame {
    /// Snapshot `g`. While dragging, the dragged component is highlighted; otherwise the
    /// component nearest the cursor within `hover_radius`.
    pub fn build(g: &Graph, dragging: Option<PointId>, cursor: Option<(f64, f64)>, hover_radius: f64, grid: f64) -> Frame {
        let (seed, mark) = match (dragging, cursor) {
            (Some(d), _) => (Some(d), Highlight::Drag),
            (None, Some((x, y))) => (g.pick(x, y, hover_radius).map(|h| h.anchor()), Highlight::Hover),
            (None, None) => (None, Highlight::Normal),
        };
        let mut marks: HashMap<PointId, Highlight> = HashMap::new();
        if let Some(s) = seed {
            for id in g.component_of(s) {
                marks.insert(id, mark);
            }
        }
        let of = |id: PointId| marks.get(&id).copied().unwrap_or(Highlight::Normal);
        let points = g
            .points()
            .map(|p| PointView { id: p.id, x: p.x, y: p.y, highlight: of(p.id), connections: p.connections.clone() })
            .collect();
        let segments = g
            .segments()
            .into_iter()
            .map(|s| SegmentView { a: s.a, b: s.b, ax: s.ax, ay: s.ay, bx: s.bx, by: s.by, highlight: of(s.a) })
            .collect();
        let cursor = cursor.map(|(x, y)| CursorView {
            x,
            y,
            label: format!("{}/{}", grid_round(x, grid), grid_round(y, grid)),
        });
        Frame { points, segments, dragging, hovered: if dragging.is_none() { seed } else { None }, cursor }
    }
}

/// Drawing primitives in graph coordinates. Implementations own the device transform.
pub trait Renderer {
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, ink: Ink);
    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, ink: Ink, width: f64);
    fn fill_text(&mut self, x: f64, y: f64, text: &str, size: f64, ink: Ink);
}

pub fn draw_frame<R: Renderer + ?Sized>(frame: &Frame, r: &mut R) {
    for s in &frame.segments {
        r.line(s.ax, s.ay, s.bx, s.by, Ink::Component(s.highlight), EDGE_WIDTH);
    }
    let mut pos: HashMap<PointId, (f64, f64)> = HashMap::new();
    for p in &frame.points {
        pos.insert(p.id, (p.x, p.y));
    }
    for p in &frame.points {
        let ink = Ink::Component(p.highlight);
        r.fill_circle(p.x, p.y, POINT_RADIUS, ink);
        r.fill_text(p.x, p.y - LABEL_OFFSET, &p.id.to_string(), LABEL_SIZE, ink);
    }
    // Each side draws half of every edge, so a one-way connection shows up as a half line
    for p in &frame.points {
        for c in &p.connections {
            if let Some(&(cx, cy)) = pos.get(c) {
                r.line(p.x, p.y, (p.x + cx) * 0.5, (p.y + cy) * 0.5, Ink::Mirror, MIRROR_WIDTH);
            }
        }
    }
    if let Some(c) = &frame.cursor {
        r.fill_text(c.x, c.y - CURSOR_LABEL_OFFSET, &c.label, LABEL_SIZE, Ink::Cursor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Tally {
        circles: usize,
        lines: Vec<(Ink, f64)>,
        texts: Vec<String>,
    }

    impl Renderer for Tally {
        fn fill_circle(&mut self, _x: f64, _y: f64, _radius: f64, _ink: Ink) {
            self.circles += 1;
        }
        fn line(&mut self, _x1: f64, _y1: f64, _x2: f64, _y2: f64, ink: Ink, width: f64) {
            self.lines.push((ink, width));
        }
        fn fill_text(&mut self, _x: f64, _y: f64, text: &str, _size: f64, _ink: Ink) {
            self.texts.push(text.to_string());
        }
    }

    fn two_wires() -> (Graph, PointId, PointId) {
        let mut g = Graph::new();
        let a = g.create_point(0.0, 0.0);
        let b = g.create_point(4.0, 0.0);
        g.connect(a, b);
        let c = g.create_point(0.0, 5.0);
        let d = g.create_point(4.0, 5.0);
        g.connect(c, d);
        (g, a, c)
    }

    #[test]
    fn hover_marks_only_the_nearby_component() {
        let (g, a, c) = two_wires();
        let f = Frame::build(&g, None, Some((2.0, 0.3)), 0.75, 1.0);
        assert_eq!(f.hovered, Some(a));
        let hot: Vec<_> = f.points.iter().filter(|p| p.highlight == Highlight::Hover).map(|p| p.id).collect();
        assert_eq!(hot.len(), 2);
        assert!(!hot.contains(&c));
        assert_eq!(f.cursor.as_ref().unwrap().label, "2/0");
    }

    #[test]
    fn drag_overrides_hover() {
        let (g, a, c) = two_wires();
        let f = Frame::build(&g, Some(c), Some((2.0, 0.3)), 0.75, 1.0);
        assert_eq!(f.hovered, None);
        assert!(f.points.iter().filter(|p| p.id == a).all(|p| p.highlight == Highlight::Normal));
        assert!(f.segments.iter().any(|s| s.highlight == Highlight::Drag));
    }

    #[test]
    fn draw_emits_markers_edges_mirrors_and_labels() {
        let (g, _, _) = two_wires();
        let f = Frame::build(&g, None, Some((9.0, 9.0)), 0.75, 1.0);
        let mut t = Tally::default();
        draw_frame(&f, &mut t);
        assert_eq!(t.circles, 4);
        assert_eq!(t.lines.iter().filter(|(i, _)| *i == Ink::Mirror).count(), 4);
        assert_eq!(t.lines.iter().filter(|(_, w)| *w == EDGE_WIDTH).count(), 2);
        assert_eq!(t.texts.len(), 5);
        assert_eq!(t.texts.last().map(String::as_str), Some("9/9"));
    }
}
