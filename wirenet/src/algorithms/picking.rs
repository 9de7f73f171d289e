use crate::{Graph, model::{Hit, QueryMode}};
use crate::geometry::math::{distance, seg_box_contains, seg_distance_sq};

/// Nearest point-or-segment lookup. Points always win over segments in `First` mode;
/// ties resolve to the lower id because candidates are gathered in id order and the sort is stable.
pub fn find_nearest_impl(g: &Graph, x: f64, y: f64, max_distance: f64, mode: QueryMode) -> Vec<Hit> {
    let max = max_distance;
    // Points first
    let mut points: Vec<Hit> = Vec::new();
    for p in g.points() {
        let d = distance(x, y, p.x, p.y);
        if d <= max { points.push(Hit::Point { id: p.id, dist: d }); }
    }
    sort_by_dist(&mut points);
    if mode == QueryMode::First && !points.is_empty() {
        points.truncate(1);
        return points;
    }
    // Segments, each undirected edge once from its lower id end
    let mut segments: Vec<Hit> = Vec::new();
    for a in g.points() {
        for &bid in &a.connections {
            if bid <= a.id { continue; }
            let b = match g.point(bid) { Some(b) => b, None => continue };
            if !seg_box_contains(x, y, a.x, a.y, b.x, b.y, max) { continue; }
            if distance(a.x, a.y, x, y) <= max || distance(b.x, b.y, x, y) <= max { continue; }
            let (d2, t) = seg_distance_sq(x, y, a.x, a.y, b.x, b.y);
            let d = d2.sqrt();
            if d <= max { segments.push(Hit::Segment { a: a.id, b: b.id, t, dist: d }); }
        }
    }
    sort_by_dist(&mut segments);
    match mode {
        QueryMode::First => { segments.truncate(1); segments }
        QueryMode::All => { points.extend(segments); points }
    }
}

fn sort_by_dist(hits: &mut [Hit]) {
    hits.sort_by(|a, b| a.dist().total_cmp(&b.dist()));
}

/// `(px,py)` lies on segment `a`-`b` strictly between its endpoints.
pub(crate) fn lies_inside_segment(px: f64, py: f64, ax: f64, ay: f64, bx: f64, by: f64) -> bool {
    if !seg_box_contains(px, py, ax, ay, bx, by, 0.0) { return false; }
    if distance(ax, ay, px, py) <= 0.0 || distance(bx, by, px, py) <= 0.0 { return false; }
    let (d2, _) = seg_distance_sq(px, py, ax, ay, bx, by);
    d2 <= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(g: &mut Graph, ax: f64, ay: f64, bx: f64, by: f64) -> (u32, u32) {
        let a = g.create_point(ax, ay);
        let b = g.create_point(bx, by);
        g.connect(a, b);
        (a, b)
    }

    #[test]
    fn point_beats_closer_segment() {
        let mut g = Graph::new();
        let (a, _) = line(&mut g, 0.0, 0.0, 10.0, 0.0);
        let _ = line(&mut g, 0.4, 0.1, 0.4, 5.0);
        // Probe sits 0.05 from the vertical segment but 0.3 from point a
        let hit = g.pick(0.3, 0.2, 0.5).unwrap();
        assert_eq!(hit, Hit::Point { id: a, dist: distance(0.3, 0.2, 0.0, 0.0) });
    }

    #[test]
    fn segment_hit_reports_projection() {
        let mut g = Graph::new();
        let (a, b) = line(&mut g, 0.0, 0.0, 10.0, 0.0);
        match g.pick(2.5, 0.25, 0.5) {
            Some(Hit::Segment { a: sa, b: sb, t, dist }) => {
                assert_eq!((sa, sb), (a, b));
                assert_eq!(t, 0.25);
                assert_eq!(dist, 0.25);
            }
            other => panic!("expected segment, got {:?}", other),
        }
    }

    #[test]
    fn segment_near_endpoint_does_not_qualify() {
        let mut g = Graph::new();
        let _ = line(&mut g, 0.0, 0.0, 10.0, 0.0);
        let all = g.find_nearest(0.2, 0.0, 0.5, QueryMode::All);
        assert_eq!(all.len(), 1);
        assert!(matches!(all[0], Hit::Point { .. }));
    }

    #[test]
    fn all_mode_orders_points_then_segments() {
        let mut g = Graph::new();
        let (_, _) = line(&mut g, 0.0, 0.0, 0.0, 10.0);
        let (c, _) = line(&mut g, 1.0, 5.0, 8.0, 5.0);
        let (e, _) = line(&mut g, -5.0, 4.0, 5.0, 4.0);
        let _ = e;
        let all = g.find_nearest(0.5, 5.0, 1.0, QueryMode::All);
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].anchor(), c);
        assert!(matches!(all[1], Hit::Segment { dist, .. } if dist == 0.5));
        assert!(matches!(all[2], Hit::Segment { dist, .. } if dist == 1.0));
    }

    #[test]
    fn ties_resolve_to_lower_id() {
        let mut g = Graph::new();
        let (a, b) = line(&mut g, -1.0, 0.0, 1.0, 0.0);
        let hit = g.pick(0.0, 0.0, 1.0).unwrap();
        assert_eq!(hit.anchor(), a);
        assert!(a < b);
    }

    #[test]
    fn exact_inside_test() {
        assert!(lies_inside_segment(2.5, 0.0, 0.0, 0.0, 5.0, 0.0));
        assert!(lies_inside_segment(1.0, 1.0, 0.0, 0.0, 3.0, 3.0));
        assert!(!lies_inside_segment(0.0, 0.0, 0.0, 0.0, 5.0, 0.0));
        assert!(!lies_inside_segment(2.5, 0.1, 0.0, 0.0, 5.0, 0.0));
        assert!(!lies_inside_segment(6.0, 0.0, 0.0, 0.0, 5.0, 0.0));
    }
}
