use proptest::prelude::*;
use std::collections::HashSet;
use wirenet::Graph;

#[derive(Clone, Debug)]
enum Op {
    CreatePoint { x: i8, y: i8 },
    MovePoint { idx: u16, dx: i8, dy: i8 },
    Connect { a: u16, b: u16 },
    Disconnect { a: u16, fold: bool },
    RemovePoint { idx: u16, fold: bool },
    RemoveComponent { idx: u16 },
    Simplify { idx: u16 },
}

// Small integer coordinates so coincident points, crossings and straight runs come up often
fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => ((-6i8..=6), (-6i8..=6)).prop_map(|(x, y)| Op::CreatePoint { x, y }),
        1 => (any::<u16>(), (-3i8..=3), (-3i8..=3)).prop_map(|(idx, dx, dy)| Op::MovePoint { idx, dx, dy }),
        3 => (any::<u16>(), any::<u16>()).prop_map(|(a, b)| Op::Connect { a, b }),
        1 => (any::<u16>(), any::<bool>()).prop_map(|(a, fold)| Op::Disconnect { a, fold }),
        1 => (any::<u16>(), any::<bool>()).prop_map(|(idx, fold)| Op::RemovePoint { idx, fold }),
        1 => any::<u16>().prop_map(|idx| Op::RemoveComponent { idx }),
        2 => any::<u16>().prop_map(|idx| Op::Simplify { idx }),
    ]
}

fn live_ids(g: &Graph) -> Vec<u32> {
    g.points().map(|p| p.id).collect()
}

fn pick(ids: &[u32], idx: u16) -> Option<u32> {
    if ids.is_empty() {
        None
    } else {
        Some(ids[idx as usize % ids.len()])
    }
}

fn apply_op(g: &mut Graph, op: Op) {
    let ids = live_ids(g);
    match op {
        Op::CreatePoint { x, y } => {
            g.create_point(x as f64, y as f64);
        }
        Op::MovePoint { idx, dx, dy } => {
            if let Some(id) = pick(&ids, idx) {
                if let Some((x, y)) = g.position(id) {
                    g.move_point(id, x + dx as f64, y + dy as f64);
                }
            }
        }
        Op::Connect { a, b } => {
            if let (Some(a), Some(b)) = (pick(&ids, a), pick(&ids, b)) {
                g.connect(a, b);
            }
        }
        Op::Disconnect { a, fold } => {
            if let Some(a) = pick(&ids, a) {
                if let Some(&b) = g.neighbors(a).first() {
                    g.disconnect(a, b, fold);
                }
            }
        }
        Op::RemovePoint { idx, fold } => {
            if let Some(id) = pick(&ids, idx) {
                g.remove_point(id, fold);
            }
        }
        Op::RemoveComponent { idx } => {
            if let Some(id) = pick(&ids, idx) {
                g.remove_component(id);
            }
        }
        Op::Simplify { idx } => {
            if let Some(id) = pick(&ids, idx) {
                g.simplify(id);
            }
        }
    }
}

fn assert_invariants(g: &Graph) {
    assert!(g.check().is_empty(), "violations: {:?}", g.check());

    // Same facts through the public surface only
    let mut ends = 0usize;
    for p in g.points() {
        let mut seen = HashSet::new();
        for &c in &p.connections {
            assert_ne!(c, p.id, "self loop on {}", p.id);
            assert!(seen.insert(c), "{} lists {} twice", p.id, c);
            assert!(g.contains(c), "{} points at removed {}", p.id, c);
            assert!(g.is_connected(c, p.id), "{} -> {} is one way", p.id, c);
            ends += 1;
        }
    }
    assert_eq!(ends, 2 * g.edge_count() as usize);
    assert_eq!(g.segments().len(), g.edge_count() as usize);
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 2_000, .. ProptestConfig::default() })]
    #[test]
    fn graph_edit_invariants(seq in prop::collection::vec(op_strategy(), 5..40)) {
        let mut graph = Graph::new();
        for op in seq {
            apply_op(&mut graph, op);
            assert_invariants(&graph);
        }
    }

    #[test]
    fn simplified_points_are_never_pass_throughs(seq in prop::collection::vec(op_strategy(), 5..40)) {
        let mut graph = Graph::new();
        for op in seq {
            apply_op(&mut graph, op);
        }
        let ids = live_ids(&graph);
        graph.simplify_all(&ids);
        for p in graph.points() {
            if p.connections.len() != 2 {
                continue;
            }
            let (Some((ax, ay)), Some((bx, by))) = (graph.position(p.connections[0]), graph.position(p.connections[1])) else {
                continue;
            };
            let (ux, uy, vx, vy) = (ax - p.x, ay - p.y, bx - p.x, by - p.y);
            let straight = ux * vy - uy * vx == 0.0 && ux * vx + uy * vy < 0.0;
            prop_assert!(!straight, "point {} left as a straight pass-through", p.id);
        }
    }
}
