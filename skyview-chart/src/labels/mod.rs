//! Collision-avoiding label placement.
//!
//! Labels are laid out in screen space, highest class first (stars, then
//! deep-sky objects, then constellations) and in input order within a class.
//! For each label the engine tries its ranked candidate offsets, then a
//! bounded spiral, committing the first position whose footprint collides
//! with no box it cannot displace.
//!
//! A committed box is displaced only by a label of strictly higher class, or
//! of the same class and strictly brighter magnitude. A displaced label is
//! placed again, at most [`LabelConfig::max_relocations`] times.
//!
//! Labels that find no free position are still drawn at their least-crowded
//! or fallback position but are not registered, so they never block later
//! labels. Registered boxes never overlap each other.
//!
//! At most [`MAX_PLACED_LABELS`] boxes are registered per frame.

pub mod candidates;
pub mod measure;
pub mod spiral;
pub mod store;

pub use candidates::{alignment, base_offset, candidate_offsets, fallback_offset, LabelClass};
pub use measure::{AverageAdvance, TextMeasurer};
pub use store::{BoxId, BoxStore, LabelBox, Rect};

use crate::canvas::TextAlign;
use tracing::trace;

pub const MAX_PLACED_LABELS: usize = 10_000;

/// Collision tests one label may spend before giving up.
pub const COLLISION_TEST_BUDGET: usize = 2_000;

#[derive(Debug, Clone, PartialEq)]
pub struct LabelCandidate {
    pub text: String,
    pub class: LabelClass,
    pub magnitude: f64,
    pub anchor_x: f64,
    pub anchor_y: f64,
}

impl LabelCandidate {
    pub fn new(text: impl Into<String>, class: LabelClass, magnitude: f64, x: f64, y: f64) -> Self {
        Self {
            text: text.into(),
            class,
            magnitude,
            anchor_x: x,
            anchor_y: y,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LabelConfig {
    pub max_boxes: usize,
    pub collision_budget: usize,
    pub spiral_rings: usize,
    pub max_relocations: u8,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            max_boxes: MAX_PLACED_LABELS,
            collision_budget: COLLISION_TEST_BUDGET,
            spiral_rings: spiral::MAX_RINGS,
            max_relocations: 2,
        }
    }
}

/// Where one label ended up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedLabel {
    /// Index into the candidate slice.
    pub candidate: usize,
    pub x: f64,
    pub y: f64,
    pub align: TextAlign,
    pub rect: Rect,
    /// False for best-effort placements that do not block others.
    pub registered: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LabelStats {
    pub committed: usize,
    pub from_spiral: usize,
    pub displaced: usize,
    pub unregistered: usize,
    pub capped: usize,
    pub budget_exhausted: usize,
}

#[derive(Debug, Clone, Default)]
pub struct LabelLayout {
    /// Final placements in processing order.
    pub labels: Vec<PlacedLabel>,
    pub stats: LabelStats,
}

impl LabelLayout {
    pub fn registered(&self) -> impl Iterator<Item = &PlacedLabel> {
        self.labels.iter().filter(|l| l.registered)
    }
}

enum Probe {
    Free(Vec<BoxId>),
    Blocked(usize),
    Exhausted,
}

struct Measured {
    width: f64,
    height: f64,
    base: f64,
}

/// Text footprint for a text point; middle baseline, alignment per side.
pub fn text_rect(x: f64, y: f64, width: f64, height: f64, align: TextAlign) -> Rect {
    let left = match align {
        TextAlign::Left => x,
        TextAlign::Center => x - width / 2.0,
        TextAlign::Right => x - width,
    };
    Rect::new(left, y - height / 2.0, left + width, y + height / 2.0)
}

pub struct LabelEngine<M: TextMeasurer> {
    measurer: M,
    config: LabelConfig,
    store: BoxStore,
}

impl LabelEngine<AverageAdvance> {
    pub fn with_default_measurer() -> Self {
        Self::new(AverageAdvance::default(), LabelConfig::default())
    }
}

impl<M: TextMeasurer> LabelEngine<M> {
    pub fn new(measurer: M, config: LabelConfig) -> Self {
        Self {
            measurer,
            config,
            store: BoxStore::new(),
        }
    }

    pub fn config(&self) -> &LabelConfig {
        &self.config
    }

    /// Lays out one frame worth of labels. Boxes from a previous call are
    /// discarded first.
    pub fn layout(&mut self, candidates: &[LabelCandidate]) -> LabelLayout {
        self.store.clear();
        let mut order: Vec<usize> = (0..candidates.len()).collect();
        order.sort_by_key(|&i| candidates[i].class.rank());

        let mut placed: Vec<Option<(PlacedLabel, Option<BoxId>)>> = vec![None; candidates.len()];
        let mut relocations = vec![0u8; candidates.len()];
        let mut stats = LabelStats::default();
        let mut pending = Vec::new();

        for &first in &order {
            pending.push(first);
            while let Some(idx) = pending.pop() {
                let displaced = self.place(idx, candidates, &mut placed, &mut stats);
                for owner in displaced {
                    stats.displaced += 1;
                    relocations[owner] = relocations[owner].saturating_add(1);
                    if relocations[owner] <= self.config.max_relocations {
                        pending.push(owner);
                    } else {
                        let fallback = self.unregistered_fallback(owner, &candidates[owner]);
                        placed[owner] = Some((fallback, None));
                        stats.unregistered += 1;
                    }
                }
            }
        }

        let labels: Vec<PlacedLabel> = order
            .iter()
            .filter_map(|&i| placed[i].map(|(label, _)| label))
            .collect();
        stats.committed = labels.iter().filter(|l| l.registered).count();
        trace!(?stats, boxes = self.store.len(), "label layout");
        LabelLayout { labels, stats }
    }

    fn measure(&self, c: &LabelCandidate) -> Measured {
        let (width, height) = self.measurer.measure(&c.text, c.class.font_px());
        Measured {
            width,
            height,
            base: base_offset(height),
        }
    }

    fn position(&self, idx: usize, c: &LabelCandidate, m: &Measured, dx: f64, dy: f64) -> PlacedLabel {
        let align = alignment(c.class, dx);
        let x = c.anchor_x + dx;
        let y = c.anchor_y + dy;
        PlacedLabel {
            candidate: idx,
            x,
            y,
            align,
            rect: text_rect(x, y, m.width, m.height, align),
            registered: false,
        }
    }

    fn unregistered_fallback(&self, idx: usize, c: &LabelCandidate) -> PlacedLabel {
        let m = self.measure(c);
        let (dx, dy) = fallback_offset(c.class, m.base, m.height);
        self.position(idx, c, &m, dx, dy)
    }

    fn probe(&mut self, rect: &Rect, owner: &LabelBox, budget: &mut usize) -> Probe {
        let mut displace = Vec::new();
        let mut blockers = 0usize;
        let mut exhausted = false;
        self.store.for_each_overlap(rect, |id, other| {
            if *budget == 0 {
                exhausted = true;
                return false;
            }
            *budget -= 1;
            if owner.outranks(other) {
                displace.push(id);
            } else {
                blockers += 1;
            }
            true
        });
        if exhausted {
            Probe::Exhausted
        } else if blockers == 0 {
            Probe::Free(displace)
        } else {
            Probe::Blocked(blockers)
        }
    }

    /// Places candidate `idx`; returns the owners of boxes it displaced.
    fn place(
        &mut self,
        idx: usize,
        candidates: &[LabelCandidate],
        placed: &mut [Option<(PlacedLabel, Option<BoxId>)>],
        stats: &mut LabelStats,
    ) -> Vec<usize> {
        let c = &candidates[idx];
        let m = self.measure(c);

        if self.store.len() >= self.config.max_boxes {
            let offsets = candidate_offsets(c.class, m.base);
            let (dx, dy) = offsets.first().copied().unwrap_or((0.0, 0.0));
            placed[idx] = Some((self.position(idx, c, &m, dx, dy), None));
            stats.capped += 1;
            stats.unregistered += 1;
            return Vec::new();
        }

        let padding = c.class.padding();
        let key = LabelBox {
            rect: Rect::new(0.0, 0.0, 0.0, 0.0),
            class: c.class,
            magnitude: c.magnitude,
            owner: idx,
        };
        let mut budget = self.config.collision_budget;
        let mut best: Option<(usize, PlacedLabel)> = None;

        let ranked = candidate_offsets(c.class, m.base);
        let ranked_len = ranked.len();
        let offsets = ranked
            .into_iter()
            .chain(spiral::spiral_offsets(m.base, self.config.spiral_rings));

        for (n, (dx, dy)) in offsets.enumerate() {
            let label = self.position(idx, c, &m, dx, dy);
            match self.probe(&label.rect.inflate(padding), &key, &mut budget) {
                Probe::Free(displace) => {
                    if n >= ranked_len {
                        stats.from_spiral += 1;
                    }
                    return self.commit(label, key, displace, placed);
                }
                Probe::Blocked(count) => {
                    if best.as_ref().map_or(true, |(fewest, _)| count < *fewest) {
                        best = Some((count, label));
                    }
                }
                Probe::Exhausted => {
                    stats.budget_exhausted += 1;
                    break;
                }
            }
        }

        let label = match best {
            Some((_, label)) => label,
            None => self.unregistered_fallback(idx, c),
        };
        placed[idx] = Some((label, None));
        stats.unregistered += 1;
        Vec::new()
    }

    fn commit(
        &mut self,
        mut label: PlacedLabel,
        mut key: LabelBox,
        displace: Vec<BoxId>,
        placed: &mut [Option<(PlacedLabel, Option<BoxId>)>],
    ) -> Vec<usize> {
        let mut owners = Vec::with_capacity(displace.len());
        for id in displace {
            if let Some(old) = self.store.remove(id) {
                placed[old.owner] = None;
                owners.push(old.owner);
            }
        }
        key.rect = label.rect;
        label.registered = true;
        let id = self.store.insert(key);
        placed[label.candidate] = Some((label, Some(id)));
        owners
    }
}
