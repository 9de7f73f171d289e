use thiserror::Error;

pub type Result<T> = std::result::Result<T, WireError>;

/// Malformed arguments from the event source or configuration. These fail the call
/// immediately; the graph is left untouched.
#[derive(Debug, Error)]
pub enum WireError {
    #[error("parameter '{param}' must be finite")]
    NonFinite { param: &'static str },

    #[error("parameter '{param}' out of range [{min}, {max}]: {got}")]
    OutOfRange { param: &'static str, min: f64, max: f64, got: f64 },

    #[error("unsupported pointer button: {0}")]
    InvalidButton(u8),

    #[error("invalid configuration: {0}")]
    Config(#[source] serde_json::Error),

    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl WireError {
    /// Stable short code, used by the wasm result envelopes
    pub fn code(&self) -> &'static str {
        match self {
            Self::NonFinite { .. } => "non_finite",
            Self::OutOfRange { .. } => "out_of_range",
            Self::InvalidButton(_) => "invalid_button",
            Self::Config(_) => "invalid_config",
            Self::Serialize(_) => "serialize",
        }
    }
}

/// Reject NaN/infinite coordinates and anything outside the coordinate bounds.
pub(crate) fn check_coord(param: &'static str, v: f64) -> Result<()> {
    use crate::geometry::limits::{in_coord_bounds, COORD_MAX, COORD_MIN};
    if !v.is_finite() {
        return Err(WireError::NonFinite { param });
    }
    if !in_coord_bounds(v) {
        return Err(WireError::OutOfRange { param, min: COORD_MIN, max: COORD_MAX, got: v });
    }
    Ok(())
}
