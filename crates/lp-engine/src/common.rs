//! Common utilities for transfer calculations.

use crate::error::{EngineError, EngineResult};
use lp_core::ensure_finite;

/// Ensure a value is finite, returning `EngineError::Internal` if not.
pub fn check_finite(value: f64, what: &'static str) -> EngineResult<f64> {
    Ok(ensure_finite(value, what)?)
}

/// Multiply every entry of `values` by the matching entry of `factors`.
pub fn scale_each(values: &mut [f64], factors: &[f64]) -> EngineResult<()> {
    if values.len() != factors.len() {
        return Err(EngineError::Internal {
            what: format!(
                "channel count mismatch: {} values, {} factors",
                values.len(),
                factors.len()
            ),
        });
    }
    for (v, f) in values.iter_mut().zip(factors) {
        *v *= f;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_each_multiplies_pairwise() {
        let mut v = vec![1.0, 2.0, 3.0];
        scale_each(&mut v, &[2.0, 0.5, 0.0]).unwrap();
        assert_eq!(v, vec![2.0, 1.0, 0.0]);
    }

    #[test]
    fn scale_each_rejects_mismatch() {
        let mut v = vec![1.0, 2.0];
        assert!(matches!(
            scale_each(&mut v, &[1.0]),
            Err(EngineError::Internal { .. })
        ));
    }

    #[test]
    fn check_finite_passes_value_through() {
        assert_eq!(check_finite(2.5, "x").unwrap(), 2.5);
        assert!(check_finite(f64::INFINITY, "x").is_err());
    }
}
