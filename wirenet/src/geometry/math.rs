use super::tolerance::clamp01;

/// Squared distance from `p` to segment `(x1,y1)-(x2,y2)` and the clamped projection parameter.
pub fn seg_distance_sq(px: f64, py: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> (f64, f64) {
    let vx = x2 - x1; let vy = y2 - y1;
    let wx = px - x1; let wy = py - y1;
    let vv = vx*vx + vy*vy;
    let t = if vv > 0.0 { clamp01((wx*vx + wy*vy) / vv) } else { 0.0 };
    let projx = x1 + t * vx; let projy = y1 + t * vy;
    let dx = px - projx; let dy = py - projy;
    (dx*dx + dy*dy, t)
}

#[inline]
pub fn distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    ((x1 - x2).powi(2) + (y1 - y2).powi(2)).sqrt()
}

/// Bounding box of the segment grown by `pad` on every side contains `(px,py)`.
#[inline]
pub fn seg_box_contains(px: f64, py: f64, x1: f64, y1: f64, x2: f64, y2: f64, pad: f64) -> bool {
    x1.max(x2) + pad >= px && y1.max(y2) + pad >= py
        && x1.min(x2) - pad <= px && y1.min(y2) - pad <= py
}

/// Direction `(dx,dy)` is an exact multiple of 45 degrees. The zero vector counts as aligned.
#[inline]
pub fn is_octilinear(dx: f64, dy: f64) -> bool {
    dx == 0.0 || dy == 0.0 || dx.abs() == dy.abs()
}

/// `u` and `v` point in exactly opposite directions (180 degrees apart). Only a true zero
/// vector has no direction.
#[inline]
pub fn is_opposite(ux: f64, uy: f64, vx: f64, vy: f64) -> bool {
    if (ux == 0.0 && uy == 0.0) || (vx == 0.0 && vy == 0.0) { return false; }
    ux*vy - uy*vx == 0.0 && ux*vx + uy*vy < 0.0
}

/// Round to the nearest grid line, halves upward.
#[inline]
pub fn grid_round(v: f64, grid: f64) -> f64 {
    (v / grid + 0.5).floor() * grid
}
