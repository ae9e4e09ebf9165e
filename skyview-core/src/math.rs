#[inline]
pub fn fmod(x: f64, y: f64) -> f64 {
    libm::fmod(x, y)
}

/// Euclidean distance between two screen points.
#[inline]
pub fn distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    libm::hypot(x2 - x1, y2 - y1)
}

/// Linear interpolation clamped to the `[lo, hi]` input range.
///
/// Maps `value` from `[lo, hi]` onto `[from, to]`, saturating outside.
#[inline]
pub fn lerp_clamped(value: f64, lo: f64, hi: f64, from: f64, to: f64) -> f64 {
    let v = value.clamp(lo, hi);
    from + (v - lo) / (hi - lo) * (to - from)
}
