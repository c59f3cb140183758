use crate::LpError;

pub fn ensure_finite(v: f64, what: &'static str) -> Result<f64, LpError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(LpError::NonFinite { what, value: v })
    }
}

/// Round to a fixed number of decimal digits.
///
/// Only used at reporting boundaries; accumulation stays unrounded.
pub fn round_to(v: f64, digits: u32) -> f64 {
    let scale = 10f64.powi(digits as i32);
    (v * scale).round() / scale
}
