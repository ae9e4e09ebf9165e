//! Registered label boxes behind a uniform grid.
//!
//! Boxes live in a slab so ids stay stable across removals. Each grid cell
//! lists the ids of every box touching it; a query walks only the cells its
//! rectangle covers and visits each box once.

use super::candidates::LabelClass;
use std::collections::HashMap;

pub const CELL_SIZE: f64 = 64.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn inflate(self, by: f64) -> Self {
        Self::new(self.left - by, self.top - by, self.right + by, self.bottom + by)
    }

    /// Strict overlap; boxes sharing only an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// A committed label footprint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelBox {
    pub rect: Rect,
    pub class: LabelClass,
    pub magnitude: f64,
    /// Index of the candidate that owns the box.
    pub owner: usize,
}

impl LabelBox {
    /// True when `self` may displace `other`: higher class, or same class and
    /// strictly brighter. Equal rank never displaces.
    pub fn outranks(&self, other: &LabelBox) -> bool {
        match self.class.rank().cmp(&other.class.rank()) {
            std::cmp::Ordering::Less => true,
            std::cmp::Ordering::Greater => false,
            std::cmp::Ordering::Equal => self.magnitude < other.magnitude,
        }
    }
}

pub type BoxId = usize;

#[derive(Debug, Default)]
pub struct BoxStore {
    slots: Vec<Option<LabelBox>>,
    free: Vec<BoxId>,
    cells: HashMap<(i64, i64), Vec<BoxId>>,
    stamps: Vec<u32>,
    stamp: u32,
    live: usize,
}

fn cell_span(lo: f64, hi: f64) -> std::ops::RangeInclusive<i64> {
    let a = (lo / CELL_SIZE).floor() as i64;
    let b = (hi / CELL_SIZE).floor() as i64;
    a..=b.max(a)
}

impl BoxStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.cells.clear();
        self.stamps.clear();
        self.stamp = 0;
        self.live = 0;
    }

    pub fn get(&self, id: BoxId) -> Option<&LabelBox> {
        self.slots.get(id).and_then(Option::as_ref)
    }

    pub fn iter(&self) -> impl Iterator<Item = (BoxId, &LabelBox)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(id, slot)| slot.as_ref().map(|b| (id, b)))
    }

    fn covered_cells(rect: &Rect) -> impl Iterator<Item = (i64, i64)> {
        let xs = cell_span(rect.left, rect.right);
        let ys = cell_span(rect.top, rect.bottom);
        xs.flat_map(move |x| ys.clone().map(move |y| (x, y)))
    }

    pub fn insert(&mut self, label: LabelBox) -> BoxId {
        let id = match self.free.pop() {
            Some(id) => {
                self.slots[id] = Some(label);
                id
            }
            None => {
                self.slots.push(Some(label));
                self.stamps.push(0);
                self.slots.len() - 1
            }
        };
        for cell in Self::covered_cells(&label.rect) {
            self.cells.entry(cell).or_default().push(id);
        }
        self.live += 1;
        id
    }

    pub fn remove(&mut self, id: BoxId) -> Option<LabelBox> {
        let label = self.slots.get_mut(id)?.take()?;
        for cell in Self::covered_cells(&label.rect) {
            if let Some(ids) = self.cells.get_mut(&cell) {
                ids.retain(|&other| other != id);
                if ids.is_empty() {
                    self.cells.remove(&cell);
                }
            }
        }
        self.free.push(id);
        self.live -= 1;
        Some(label)
    }

    /// Calls `visit` once for every stored box overlapping `rect`, stopping
    /// early when it returns `false`.
    pub fn for_each_overlap(&mut self, rect: &Rect, mut visit: impl FnMut(BoxId, &LabelBox) -> bool) {
        self.stamp = self.stamp.wrapping_add(1);
        if self.stamp == 0 {
            self.stamps.iter_mut().for_each(|s| *s = 0);
            self.stamp = 1;
        }
        for cell in Self::covered_cells(rect) {
            let Some(ids) = self.cells.get(&cell) else {
                continue;
            };
            for &id in ids {
                if self.stamps[id] == self.stamp {
                    continue;
                }
                self.stamps[id] = self.stamp;
                if let Some(label) = &self.slots[id] {
                    if label.rect.intersects(rect) && !visit(id, label) {
                        return;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boxed(left: f64, top: f64, w: f64, h: f64, owner: usize) -> LabelBox {
        LabelBox {
            rect: Rect::new(left, top, left + w, top + h),
            class: LabelClass::Star,
            magnitude: 1.0,
            owner,
        }
    }

    fn overlaps(store: &mut BoxStore, rect: Rect) -> Vec<usize> {
        let mut owners = Vec::new();
        store.for_each_overlap(&rect, |_, b| {
            owners.push(b.owner);
            true
        });
        owners.sort_unstable();
        owners
    }

    #[test]
    fn test_edge_contact_is_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&Rect::new(10.0, 0.0, 20.0, 10.0)));
        assert!(a.intersects(&Rect::new(9.9, 9.9, 20.0, 20.0)));
    }

    #[test]
    fn test_spanning_box_is_reported_once() {
        let mut store = BoxStore::new();
        store.insert(boxed(-100.0, -100.0, 300.0, 300.0, 7));
        assert_eq!(overlaps(&mut store, Rect::new(-90.0, -90.0, 190.0, 190.0)), vec![7]);
    }

    #[test]
    fn test_remove_frees_cells_and_reuses_slot() {
        let mut store = BoxStore::new();
        let a = store.insert(boxed(0.0, 0.0, 10.0, 10.0, 1));
        store.insert(boxed(100.0, 0.0, 10.0, 10.0, 2));
        assert_eq!(store.remove(a).map(|b| b.owner), Some(1));
        assert_eq!(store.remove(a), None);
        assert_eq!(store.len(), 1);
        assert!(overlaps(&mut store, Rect::new(0.0, 0.0, 10.0, 10.0)).is_empty());
        let c = store.insert(boxed(200.0, 0.0, 10.0, 10.0, 3));
        assert_eq!(c, a);
        assert_eq!(overlaps(&mut store, Rect::new(0.0, 0.0, 300.0, 20.0)), vec![2, 3]);
    }

    #[test]
    fn test_early_stop() {
        let mut store = BoxStore::new();
        for i in 0..5 {
            store.insert(boxed(i as f64, 0.0, 10.0, 10.0, i));
        }
        let mut seen = 0;
        store.for_each_overlap(&Rect::new(0.0, 0.0, 20.0, 10.0), |_, _| {
            seen += 1;
            seen < 2
        });
        assert_eq!(seen, 2);
    }

    #[test]
    fn test_outranks_rules() {
        let star = boxed(0.0, 0.0, 1.0, 1.0, 0);
        let mut dso = star;
        dso.class = LabelClass::DeepSky;
        dso.magnitude = -5.0;
        assert!(star.outranks(&dso));
        assert!(!dso.outranks(&star));

        let mut brighter = star;
        brighter.magnitude = 0.5;
        assert!(brighter.outranks(&star));
        assert!(!star.outranks(&brighter));
        assert!(!star.outranks(&star));
    }
}
