// Centralized tolerances and helpers for grid geometry

pub const EXACT: f64 = 0.0;               // query radius for exact incidence tests

#[inline] pub fn clamp01(x: f64) -> f64 { x.max(0.0).min(1.0) }

/// Exact coordinate equality. Merging only ever folds points that sit on the same grid spot.
#[inline]
pub fn same_pos(ax: f64, ay: f64, bx: f64, by: f64) -> bool { ax == bx && ay == by }
