use crate::CoreError;

/// Floating point type for every engine quantity.
pub type Real = f64;

/// Absolute and relative slack for comparing computed quantities.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerance {
    pub abs: Real,
    pub rel: Real,
}

impl Tolerance {
    /// Tight enough to catch formula drift, loose enough for unit conversions.
    pub const ENGINE: Tolerance = Tolerance {
        abs: 1e-9,
        rel: 1e-9,
    };
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::ENGINE
    }
}

pub fn approx_eq(a: Real, b: Real, tol: Tolerance) -> bool {
    let diff = (a - b).abs();
    diff <= tol.abs || diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Round half away from zero to `decimals` places.
pub fn round_to(v: Real, decimals: i32) -> Real {
    let scale = 10f64.powi(decimals);
    (v * scale).round() / scale
}

/// Smallest whole count that covers `v` units. Non-positive or non-finite input yields 0;
/// counts beyond `u32` saturate at `u32::MAX`.
pub fn ceil_count(v: Real) -> u32 {
    try_ceil_count(v).unwrap_or(u32::MAX)
}

/// Like [`ceil_count`], but `None` when the count does not fit below `u32::MAX`.
pub fn try_ceil_count(v: Real) -> Option<u32> {
    if v.is_nan() || v <= 0.0 {
        return Some(0);
    }
    let c = v.ceil();
    if c >= u32::MAX as Real {
        None
    } else {
        Some(c as u32)
    }
}
