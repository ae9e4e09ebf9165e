//! Screen-space pick index, rebuilt on every redraw.
//!
//! Only glyphs that were actually drawn are recorded, so below-horizon and
//! culled objects are never hit.

use crate::catalog::CatalogRef;
use skyview_core::math::distance;

/// Slack added to every hit radius, for touch input.
pub const HIT_PADDING: f64 = 18.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HitTarget {
    Catalog(CatalogRef),
    /// Index into the calibration point list.
    Calibration(usize),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub target: HitTarget,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub target: HitTarget,
    pub distance: f64,
    pub record: HitRecord,
}

#[derive(Debug, Default)]
pub struct HitIndex {
    records: Vec<HitRecord>,
}

impl HitIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn push(&mut self, x: f64, y: f64, radius: f64, target: HitTarget) {
        self.records.push(HitRecord {
            x,
            y,
            radius,
            target,
        });
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[HitRecord] {
        &self.records
    }

    /// Nearest record whose padded radius contains `(x, y)`; the earliest
    /// recorded wins a tie.
    pub fn pick(&self, x: f64, y: f64) -> Option<Hit> {
        let mut best: Option<Hit> = None;
        for record in &self.records {
            let d = distance(x, y, record.x, record.y);
            if d >= record.radius + HIT_PADDING {
                continue;
            }
            if best.map_or(true, |b| d < b.distance) {
                best = Some(Hit {
                    target: record.target,
                    distance: d,
                    record: *record,
                });
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ObjectClass;

    fn star(index: usize) -> HitTarget {
        HitTarget::Catalog(CatalogRef {
            class: ObjectClass::Star,
            index,
        })
    }

    #[test]
    fn test_empty_index_misses() {
        assert_eq!(HitIndex::new().pick(0.0, 0.0), None);
    }

    #[test]
    fn test_nearest_wins() {
        let mut idx = HitIndex::new();
        idx.push(100.0, 100.0, 12.0, star(0));
        idx.push(110.0, 100.0, 12.0, star(1));
        assert_eq!(idx.pick(108.0, 100.0).map(|h| h.target), Some(star(1)));
        assert_eq!(idx.pick(101.0, 100.0).map(|h| h.target), Some(star(0)));
    }

    #[test]
    fn test_padding_boundary_is_exclusive() {
        let mut idx = HitIndex::new();
        idx.push(0.0, 0.0, 12.0, star(0));
        assert!(idx.pick(29.99, 0.0).is_some());
        assert!(idx.pick(30.0, 0.0).is_none());
    }

    #[test]
    fn test_tie_goes_to_first_recorded() {
        let mut idx = HitIndex::new();
        idx.push(10.0, 0.0, 5.0, star(0));
        idx.push(-10.0, 0.0, 5.0, HitTarget::Calibration(3));
        assert_eq!(idx.pick(0.0, 0.0).map(|h| h.target), Some(star(0)));
        idx.clear();
        assert!(idx.is_empty());
    }
}
