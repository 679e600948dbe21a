//! Parallax layers

use crate::{Error, Result};

/// Vertical translation for a layer moving at `speed` times the scroll rate
#[inline]
pub fn parallax_offset(scroll: f64, speed: f64) -> f64 {
    -scroll * speed
}

/// Read a `data-speed` attribute, falling back to `default` when absent
pub fn parse_speed(value: Option<&str>, default: f64) -> Result<f64> {
    match value {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| Error::InvalidAttribute {
                name: "data-speed".to_string(),
                value: raw.to_string(),
            }),
    }
}
