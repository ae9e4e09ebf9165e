//! Label classes and their ranked candidate offsets.
//!
//! Offsets are multiples of the base offset `b = max(0.8·h, 6)`, with `h`
//! the text height. Screen y grows downward.
//!
//! | class | font | padding | candidates, in order |
//! |-------|------|---------|----------------------|
//! | star | 10 px | 2.0 | diagonals at `b`, cardinals at `1.2b` |
//! | deep-sky | 12 px | 1.6 | diagonals at `1.1b`, cardinals at `1.5b`, sides at `2b` |
//! | constellation | 12 px | 1.0 | below, above, off-centre, diagonals, far |

use crate::canvas::TextAlign;
use serde::{Deserialize, Serialize};

pub const MIN_BASE_OFFSET: f64 = 6.0;
pub const COLLISION_PADDING: f64 = 2.0;

/// Label priority class; lower rank is placed first and wins collisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LabelClass {
    Star,
    DeepSky,
    Constellation,
}

impl LabelClass {
    pub fn rank(self) -> u8 {
        match self {
            Self::Star => 1,
            Self::DeepSky => 2,
            Self::Constellation => 3,
        }
    }

    pub fn font_px(self) -> f64 {
        match self {
            Self::Star => 10.0,
            Self::DeepSky | Self::Constellation => 12.0,
        }
    }

    pub fn padding(self) -> f64 {
        match self {
            Self::Star => COLLISION_PADDING,
            Self::DeepSky => COLLISION_PADDING * 0.8,
            Self::Constellation => COLLISION_PADDING * 0.5,
        }
    }
}

pub fn base_offset(text_height: f64) -> f64 {
    (text_height * 0.8).max(MIN_BASE_OFFSET)
}

const DIAGONALS: [(f64, f64); 4] = [(1.0, -1.0), (-1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];
const CARDINALS: [(f64, f64); 4] = [(1.0, 0.0), (-1.0, 0.0), (0.0, -1.0), (0.0, 1.0)];

fn scaled(dirs: &[(f64, f64)], k: f64) -> impl Iterator<Item = (f64, f64)> + '_ {
    dirs.iter().map(move |(x, y)| (x * k, y * k))
}

/// Offsets from the anchor to the text point, most preferred first.
pub fn candidate_offsets(class: LabelClass, base: f64) -> Vec<(f64, f64)> {
    let b = base;
    match class {
        LabelClass::Star => scaled(&DIAGONALS, b)
            .chain(scaled(&CARDINALS, 1.2 * b))
            .collect(),
        LabelClass::DeepSky => scaled(&DIAGONALS, 1.1 * b)
            .chain(scaled(&CARDINALS, 1.5 * b))
            .chain([(2.0 * b, 0.0), (-2.0 * b, 0.0)])
            .collect(),
        LabelClass::Constellation => {
            let mut v: Vec<(f64, f64)> = [1.8, 2.5, 3.2].iter().map(|k| (0.0, k * b)).collect();
            v.extend([1.8, 2.5, 3.2].iter().map(|k| (0.0, -k * b)));
            v.extend([
                (0.8 * b, 2.0 * b),
                (-0.8 * b, 2.0 * b),
                (0.8 * b, -2.0 * b),
                (-0.8 * b, -2.0 * b),
            ]);
            v.extend(scaled(&DIAGONALS, 1.8 * b));
            v.extend([(0.0, 4.0 * b), (0.0, -4.0 * b), (3.0 * b, 0.0), (-3.0 * b, 0.0)]);
            v.extend(scaled(&DIAGONALS, 2.5 * b));
            v
        }
    }
}

/// Deterministic position used when nothing could be registered.
pub fn fallback_offset(class: LabelClass, base: f64, text_height: f64) -> (f64, f64) {
    let f = text_height.max(1.5 * base);
    match class {
        LabelClass::Constellation => (0.0, 3.0 * f),
        LabelClass::DeepSky => (1.5 * f, f),
        LabelClass::Star => (-1.5 * f, f),
    }
}

/// Horizontal alignment for a text point offset `dx` from its anchor.
///
/// Text to the right of the object starts at the text point; text to the
/// left ends there. Vertically stacked positions are centred.
pub fn alignment(class: LabelClass, dx: f64) -> TextAlign {
    let centred = match class {
        LabelClass::Constellation => dx.abs() < 1.0,
        _ => dx.abs() < 1e-9,
    };
    if centred {
        TextAlign::Center
    } else if dx > 0.0 {
        TextAlign::Left
    } else {
        TextAlign::Right
    }
}
