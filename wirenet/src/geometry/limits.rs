// Centralized bounds for values arriving from the event source

// Coordinates are grid units; anything beyond this is a broken transform upstream
pub const COORD_MIN: f64 = -10_000_000.0;
pub const COORD_MAX: f64 =  10_000_000.0;

// Query radii
pub const RADIUS_MAX: f64 = 1_000.0;

// Grid pitch
pub const GRID_MIN: f64 = 1e-6;
pub const GRID_MAX: f64 = 1_000.0;

#[inline]
pub fn in_coord_bounds(x: f64) -> bool { x.is_finite() && x >= COORD_MIN && x <= COORD_MAX }

#[inline]
pub fn in_radius_bounds(r: f64) -> bool { r.is_finite() && r >= 0.0 && r <= RADIUS_MAX }

#[inline]
pub fn in_grid_bounds(g: f64) -> bool { g.is_finite() && g >= GRID_MIN && g <= GRID_MAX }
