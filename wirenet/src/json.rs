use crate::Graph;
use serde::Serialize;
use serde_json::Value;

pub fn to_json_impl(g: &Graph) -> Value {
    #[derive(Serialize)]
    struct PointSer<'a> {
        id: u32,
        x: f64,
        y: f64,
        connections: &'a [u32],
    }
    #[derive(Serialize)]
    struct DocSer<'a> {
        version: u32,
        geom_version: u64,
        points: Vec<PointSer<'a>>,
    }
    let points = g
        .points()
        .map(|p| PointSer { id: p.id, x: p.x, y: p.y, connections: &p.connections })
        .collect();
    serde_json::to_value(DocSer { version: 1, geom_version: g.geom_ver, points }).unwrap_or(Value::Null)
}

/// One line per point: `id   -   n1 - n2 - ...`
pub fn adjacency_list_impl(g: &Graph) -> String {
    g.points()
        .map(|p| {
            let conns: Vec<String> = p.connections.iter().map(|c| c.to_string()).collect();
            format!("{}   -   {}", p.id, conns.join(" - "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}
