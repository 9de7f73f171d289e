// Fixed-point simplification: crossing splits, coincident merges, collinear collapse.
// Runs off an explicit work-list so long chains of follow-up merges never grow the stack.

use crate::algorithms::picking::lies_inside_segment;
use crate::geometry::math::is_opposite;
use crate::geometry::tolerance::{same_pos, EXACT};
use crate::model::{Hit, PointId, QueryMode};
use crate::Graph;
use tracing::trace;

pub fn simplify_impl(g: &mut Graph, mut work: Vec<PointId>) {
    while let Some(id) = work.pop() {
        if !g.contains(id) {
            continue;
        }
        split_crossed_segments(g, id);
        if !merge_coincident(g, id) {
            continue;
        }
        splice_points_on_edges(g, id, &mut work);
        collapse_collinear(g, id, &mut work);
    }
}

/// Insert `id` into every segment that runs exactly through it.
fn split_crossed_segments(g: &mut Graph, id: PointId) {
    let (x, y) = match g.position(id) { Some(p) => p, None => return };
    let hits = g.find_nearest(x, y, EXACT, QueryMode::All);
    for hit in hits {
        let (a, b) = match hit { Hit::Segment { a, b, .. } => (a, b), Hit::Point { .. } => continue };
        if a == id || b == id {
            continue;
        }
        let ends_here = [a, b].iter().any(|&e| g.position(e).is_some_and(|(ex, ey)| same_pos(ex, ey, x, y)));
        if ends_here {
            continue;
        }
        if g.insert_point_on_edge(id, a, b).is_some() {
            trace!(id, a, b, "split crossed segment");
        }
    }
}

/// Fold every other point at the same spot into `id`. Returns false if `id` is gone afterwards.
fn merge_coincident(g: &mut Graph, id: PointId) -> bool {
    let (x, y) = match g.position(id) { Some(p) => p, None => return false };
    let twins: Vec<PointId> = g
        .points()
        .filter(|p| p.id != id && same_pos(p.x, p.y, x, y))
        .map(|p| p.id)
        .collect();
    for twin in twins {
        g.unlink(id, twin);
        let inherited = g.neighbors(twin).to_vec();
        for n in inherited {
            g.unlink(twin, n);
            g.connect(id, n);
        }
        g.drop_point(twin);
        trace!(id, twin, "merged coincident point");
        if g.neighbors(id).is_empty() {
            g.drop_point(id);
            return false;
        }
    }
    true
}

/// Any point sitting on one of `id`'s edges becomes a joint of that edge.
fn splice_points_on_edges(g: &mut Graph, id: PointId, work: &mut Vec<PointId>) {
    let neighbors = g.neighbors(id).to_vec();
    for n in neighbors {
        let candidates: Vec<PointId> = g.points().filter(|p| p.id != id && p.id != n).map(|p| p.id).collect();
        for q in candidates {
            if !g.is_connected(id, n) {
                break;
            }
            let (Some((px, py)), Some((nx, ny)), Some((qx, qy))) = (g.position(id), g.position(n), g.position(q)) else {
                continue;
            };
            if lies_inside_segment(qx, qy, px, py, nx, ny) && g.insert_point_on_edge(q, id, n).is_some() {
                trace!(q, id, n, "spliced point onto edge");
                work.push(q);
            }
        }
    }
}

/// A point with exactly two opposite connections is a pass-through and gets removed.
fn collapse_collinear(g: &mut Graph, id: PointId, work: &mut Vec<PointId>) {
    let mut subjects = vec![id];
    subjects.extend_from_slice(g.neighbors(id));
    for m in subjects {
        let (mx, my, a, b) = match g.point(m) {
            Some(p) if p.degree() == 2 => (p.x, p.y, p.connections[0], p.connections[1]),
            _ => continue,
        };
        let (Some((ax, ay)), Some((bx, by))) = (g.position(a), g.position(b)) else { continue };
        if !is_opposite(ax - mx, ay - my, bx - mx, by - my) {
            continue;
        }
        g.unlink(m, a);
        g.unlink(m, b);
        g.drop_point(m);
        g.connect(a, b);
        trace!(m, a, b, "collapsed collinear point");
        work.push(b);
        work.push(a);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_reuses_the_point_id() {
        let mut g = Graph::new();
        let a = g.create_point(0.0, 0.0);
        let b = g.create_point(4.0, 0.0);
        g.connect(a, b);
        let c = g.create_point(2.0, -3.0);
        let p = g.create_point(2.0, 0.0);
        g.connect(c, p);
        g.simplify(p);
        assert!(g.is_connected(a, p));
        assert!(g.is_connected(p, b));
        assert!(g.is_connected(p, c));
        assert!(!g.is_connected(a, b));
        assert_eq!(g.point_count(), 4);
        assert!(g.check().is_empty());
    }

    #[test]
    fn twin_with_only_each_other_vanishes() {
        let mut g = Graph::new();
        let a = g.create_point(3.0, 3.0);
        let b = g.create_point(3.0, 3.0);
        g.connect(a, b);
        g.simplify(b);
        assert_eq!(g.point_count(), 0);
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn removed_point_is_a_noop() {
        let mut g = Graph::new();
        let a = g.create_point(0.0, 0.0);
        let b = g.create_point(1.0, 0.0);
        g.connect(a, b);
        g.remove_point(a, false);
        let ver = g.geom_version();
        g.simplify(a);
        assert_eq!(g.geom_version(), ver);
    }

    #[test]
    fn splice_picks_up_point_lying_on_new_edge() {
        let mut g = Graph::new();
        // A stray joint at (2,2) already connected elsewhere
        let s = g.create_point(2.0, 2.0);
        let t = g.create_point(2.0, 5.0);
        g.connect(s, t);
        // A diagonal that runs through it after a move
        let a = g.create_point(0.0, 0.0);
        let b = g.create_point(4.0, 4.0);
        g.connect(a, b);
        g.simplify(a);
        assert!(g.is_connected(a, s));
        assert!(g.is_connected(s, b));
        assert!(!g.is_connected(a, b));
        assert!(g.check().is_empty());
    }

    #[test]
    fn collapse_cascades_along_a_chain() {
        let mut g = Graph::new();
        let ids: Vec<_> = (0..6).map(|i| g.create_point(i as f64, 0.0)).collect();
        for w in ids.windows(2) {
            g.connect(w[0], w[1]);
        }
        g.simplify(ids[2]);
        assert_eq!(g.point_count(), 2);
        assert!(g.is_connected(ids[0], ids[5]));
    }
}
