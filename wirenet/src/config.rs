use crate::error::{Result, WireError};
use crate::geometry::limits::{in_grid_bounds, in_radius_bounds, GRID_MAX, GRID_MIN, RADIUS_MAX};
use serde::{Deserialize, Serialize};

/// Editor tunables. Every field has a default, so partial JSON is accepted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Hit radius for pointer-down, in grid units
    pub pick_radius: f64,
    /// Hit radius for the hover highlight
    pub hover_radius: f64,
    /// Grid pitch that dragged and inserted points snap to
    pub grid: f64,
    /// Run the invariant checker after structural edits
    pub check_invariants: bool,
    /// Delay before the one-time consistency alert is shown
    pub alert_delay_ms: u32,
    /// Storage key the diagnostic log is persisted under
    pub storage_key: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            pick_radius: 0.5,
            hover_radius: 0.75,
            grid: 1.0,
            check_invariants: cfg!(debug_assertions),
            alert_delay_ms: 100,
            storage_key: "lastLog".to_string(),
        }
    }
}

impl EditorConfig {
    pub fn from_json(s: &str) -> Result<Self> {
        let cfg: EditorConfig = serde_json::from_str(s).map_err(WireError::Config)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        for (param, r) in [("pick_radius", self.pick_radius), ("hover_radius", self.hover_radius)] {
            if !r.is_finite() {
                return Err(WireError::NonFinite { param });
            }
            if !in_radius_bounds(r) {
                return Err(WireError::OutOfRange { param, min: 0.0, max: RADIUS_MAX, got: r });
            }
        }
        if !self.grid.is_finite() {
            return Err(WireError::NonFinite { param: "grid" });
        }
        if !in_grid_bounds(self.grid) {
            return Err(WireError::OutOfRange { param: "grid", min: GRID_MIN, max: GRID_MAX, got: self.grid });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = EditorConfig::from_json(r#"{ "pick_radius": 0.25, "storage_key": "wires" }"#).unwrap();
        assert_eq!(cfg.pick_radius, 0.25);
        assert_eq!(cfg.storage_key, "wires");
        assert_eq!(cfg.grid, 1.0);
        assert_eq!(cfg.alert_delay_ms, 100);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(EditorConfig::from_json(r#"{ "grid": 0 }"#), Err(WireError::OutOfRange { param: "grid", .. })));
        assert!(matches!(EditorConfig::from_json(r#"{ "hover_radius": -1 }"#), Err(WireError::OutOfRange { param: "hover_radius", .. })));
        let err = EditorConfig::from_json("{ nope").unwrap_err();
        assert_eq!(err.code(), "invalid_config");
    }
}
