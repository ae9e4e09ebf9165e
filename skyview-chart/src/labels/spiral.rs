//! Bounded spiral search around an anchor.

use skyview_core::constants::TWOPI;

pub const POINTS_PER_RING: usize = 12;
pub const MAX_RINGS: usize = 8;
pub const RING_STEP: f64 = 0.75;

/// Offsets on concentric rings, inner ring first.
///
/// Ring `k` (1-based) has radius `base·(1.5 + 0.75·k)`; odd rings are
/// rotated half a step so consecutive rings interleave.
pub fn spiral_offsets(base: f64, rings: usize) -> impl Iterator<Item = (f64, f64)> {
    let rings = rings.min(MAX_RINGS);
    (1..=rings).flat_map(move |ring| {
        let radius = base * (1.5 + RING_STEP * ring as f64);
        let phase = if ring % 2 == 1 { 0.5 } else { 0.0 };
        (0..POINTS_PER_RING).map(move |k| {
            let theta = (k as f64 + phase) * TWOPI / POINTS_PER_RING as f64;
            (radius * theta.cos(), radius * theta.sin())
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounded_and_growing() {
        let pts: Vec<_> = spiral_offsets(10.0, 100).collect();
        assert_eq!(pts.len(), POINTS_PER_RING * MAX_RINGS);
        let r_first = pts[0].0.hypot(pts[0].1);
        let r_last = pts[pts.len() - 1].0.hypot(pts[pts.len() - 1].1);
        assert!((r_first - 22.5).abs() < 1e-9);
        assert!((r_last - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_rings_is_empty() {
        assert_eq!(spiral_offsets(10.0, 0).count(), 0);
    }
}
