//! Leading significant digit extraction in an arbitrary base.
//!
//! Values below one are normalised with repeated floating-point
//! multiplication, so any value sitting on a digit boundary `d * base^k`
//! (for example `7e-5` in base 10) inherits whatever rounding its `f64`
//! representation and each multiplication carry, and can land on the digit
//! below. This is a known precision limit and is not corrected.
//!
//! Values too large for the integer stage are scaled down in one division
//! and then snapped to a whole mantissa when they are within a few ulps of
//! one, so boundaries such as `3e27` or `3e300` keep their digit.

use crate::types::Digit;

/// Magnitudes at or above this no longer fit the integer stage.
const INTEGER_LIMIT: f64 = u64::MAX as f64;

/// Mantissas this many ulps from a whole number are treated as that number.
const SNAP_ULPS: f64 = 8.0;

/// Returns the leading significant digit of `n` written in `base`.
///
/// The sign is ignored. Values below one are scaled up by `base` until they
/// reach `[1, base)`, then the integer part is divided down until a single
/// digit remains.
///
/// `n` must be finite and non-zero; the distribution builders filter
/// everything else out before calling this. For those inputs the function
/// returns `0`, which lies outside every Benford domain.
pub fn lead_digit(n: f64, base: u32) -> Digit {
    if n == 0.0 || !n.is_finite() {
        return 0;
    }
    let b = f64::from(base);
    let mut n = n.abs();
    while n < 1.0 {
        n *= b;
    }
    if n >= INTEGER_LIMIT {
        n = mantissa(n, b);
    }

    let base = u64::from(base);
    let mut resid = n as u64;
    while resid >= base {
        resid /= base;
    }
    resid as Digit
}

/// Scales `n >= 1` into `[1, b)` with a single division by `b^k`.
fn mantissa(n: f64, b: f64) -> f64 {
    let mut k = n.log(b).floor();
    let mut m = n / b.powf(k);
    if m >= b {
        k += 1.0;
        m = n / b.powf(k);
    }
    if m < 1.0 {
        k -= 1.0;
        m = n / b.powf(k);
    }

    let whole = m.round();
    if (m - whole).abs() <= SNAP_ULPS * f64::EPSILON * whole {
        m = whole;
    }
    if m >= b {
        m /= b;
    }
    m
}
