use std::time::Instant;
use wirenet::Graph;

fn build_grid_graph(edges_target: usize) -> Graph {
    let mut g = Graph::new();
    // Horizontal runs on a grid; spacing keeps every wire clear of its neighbours
    let w = 120usize; let h = 120usize;
    let mut ids = Vec::with_capacity(w*h);
    for j in 0..h { for i in 0..w { ids.push(g.create_point(i as f64 * 8.0, j as f64 * 6.0)); } }
    let mut ecount = 0usize;
    'outer: for j in 0..h { for i in 0..(w-1) { let a=ids[j*w+i]; let b=ids[j*w+i+1]; g.connect(a,b); ecount+=1; if ecount>=edges_target { break 'outer; } } }
    g
}

fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() { return 0.0; }
    let idx = ((sorted.len() as f64 - 1.0) * p).round() as usize;
    sorted[idx.min(sorted.len()-1)]
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let mut edges = 5000usize;
    let mut picks = 2000usize;
    let mut radius = 0.5f64;
    let mut assert_ms: Option<f64> = None;
    for a in &args[1..] {
        if let Some(val)=a.strip_prefix("--edges=") { if let Ok(v)=val.parse() { edges=v; } }
        else if let Some(val)=a.strip_prefix("--picks=") { if let Ok(v)=val.parse() { picks=v; } }
        else if let Some(val)=a.strip_prefix("--radius=") { if let Ok(v)=val.parse() { radius=v; } }
        else if let Some(val)=a.strip_prefix("--assert-ms=") { if let Ok(v)=val.parse() { assert_ms=Some(v); } }
    }

    let mut g = build_grid_graph(edges);
    let mut times_ms: Vec<f64> = Vec::with_capacity(picks);
    let start_all = Instant::now();
    let mut point_hits = 0usize;
    let mut segment_hits = 0usize;
    for k in 0..picks {
        // Alternate between probes near a point and probes mid-wire
        let x = (k % 100) as f64 * 8.0 + if k % 2 == 0 { 0.2 } else { 4.0 };
        let y = ((k/100) % 100) as f64 * 6.0 + 0.3;
        let t0 = Instant::now();
        match g.pick(x, y, radius) {
            Some(wirenet::Hit::Point { .. }) => point_hits += 1,
            Some(wirenet::Hit::Segment { .. }) => segment_hits += 1,
            None => {}
        }
        times_ms.push(t0.elapsed().as_secs_f64() * 1000.0);
    }
    let dur_all = start_all.elapsed().as_secs_f64() * 1000.0;

    // One release on a fully populated graph: simplify scans every point
    let probe = g.create_point(0.0, 3.0);
    let t0 = Instant::now();
    g.simplify(probe);
    let simplify_ms = t0.elapsed().as_secs_f64() * 1000.0;

    times_ms.sort_by(|a,b| a.total_cmp(b));
    let med = percentile(&times_ms, 0.5);
    let p90 = percentile(&times_ms, 0.9);
    let p99 = percentile(&times_ms, 0.99);
    println!("edges={} picks={} radius={} point_hits={} segment_hits={} total_ms={:.3} median_ms={:.4} p90_ms={:.4} p99_ms={:.4} simplify_ms={:.4}",
        g.edge_count(), picks, radius, point_hits, segment_hits, dur_all, med, p90, p99, simplify_ms);
    if let Some(th) = assert_ms { if med > th { eprintln!("FAIL: median {:.4} ms > threshold {:.3} ms", med, th); std::process::exit(1); } }
}
