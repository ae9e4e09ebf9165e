//! Glyph shapes, sizes and hit radii.
//!
//! Sizes are in screen pixels and do not scale with zoom.
//!
//! | class | shape | size | hit radius |
//! |-------|-------|------|------------|
//! | star | filled disc | `1.2·√(1.5^(7−bin))`, bin = ⌊mag−1⌋ in 0..=7 | `max(r, 12)` |
//! | galaxy | ellipse 2:1 | `2.2·√(1.5^(7−bin))`, bin from mag 10 in 10/7 steps | major axis |
//! | open cluster | circle | 4..12 from size 1..25 | radius |
//! | globular | circle with X | 12..4 from mag 3.5..20 | radius |
//! | nebula | square | side 16..6 from mag 3.5..20 | side / 1.5 |
//! | planetary | triangle | 14..8 from mag 7.3..20 | size / 1.3 |
//! | solar body | disc | per body | size / 2 + 3 |
//! | calibration | circle with crosshair | 13 | 19 |

use crate::canvas::Canvas;
use crate::catalog::{CatalogObject, ObjectClass};
use crate::style::{solar_body_style, Color};
use skyview_core::math::lerp_clamped;

pub const CALIBRATION_RADIUS: f64 = 13.0;
pub const CALIBRATION_HIT_RADIUS: f64 = 19.0;
pub const MIN_STAR_HIT_RADIUS: f64 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Disc { r: f64 },
    Ellipse { rx: f64, ry: f64 },
    Circle { r: f64 },
    CrossedCircle { r: f64 },
    Square { side: f64 },
    Triangle { r: f64 },
    Body { r: f64, rays: bool, ring: bool },
    Crosshair { r: f64 },
}

impl Shape {
    /// Approximate drawn radius, used to size the selection ring.
    pub fn radius(&self) -> f64 {
        match *self {
            Shape::Disc { r }
            | Shape::Circle { r }
            | Shape::CrossedCircle { r }
            | Shape::Triangle { r }
            | Shape::Body { r, .. }
            | Shape::Crosshair { r } => r,
            Shape::Ellipse { rx, .. } => rx,
            Shape::Square { side } => side / 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    pub shape: Shape,
    pub hit_radius: f64,
}

fn magnitude_scale(bin: f64) -> f64 {
    1.5f64.powf(7.0 - bin).sqrt()
}

pub fn star_bin(magnitude: f64) -> f64 {
    if magnitude < 2.0 {
        0.0
    } else {
        (magnitude - 1.0).floor().clamp(0.0, 7.0)
    }
}

pub fn galaxy_bin(magnitude: f64) -> f64 {
    if magnitude < 10.0 {
        0.0
    } else {
        (((magnitude - 10.0) / (10.0 / 7.0)).floor() + 1.0).min(7.0)
    }
}

pub fn star(magnitude: f64) -> Glyph {
    let r = 1.2 * magnitude_scale(star_bin(magnitude));
    Glyph {
        shape: Shape::Disc { r },
        hit_radius: r.max(MIN_STAR_HIT_RADIUS),
    }
}

pub fn galaxy(magnitude: f64) -> Glyph {
    let major = 2.2 * magnitude_scale(galaxy_bin(magnitude));
    Glyph {
        shape: Shape::Ellipse {
            rx: major,
            ry: major / 2.0,
        },
        hit_radius: major,
    }
}

pub fn open_cluster(size: Option<f64>) -> Glyph {
    let r = lerp_clamped(size.unwrap_or(1.0), 1.0, 25.0, 4.0, 12.0);
    Glyph {
        shape: Shape::Circle { r },
        hit_radius: r,
    }
}

pub fn globular_cluster(magnitude: f64) -> Glyph {
    let r = lerp_clamped(magnitude, 3.5, 20.0, 12.0, 4.0);
    Glyph {
        shape: Shape::CrossedCircle { r },
        hit_radius: r,
    }
}

pub fn nebula(magnitude: f64) -> Glyph {
    let side = lerp_clamped(magnitude, 3.5, 20.0, 16.0, 6.0);
    Glyph {
        shape: Shape::Square { side },
        hit_radius: side / 1.5,
    }
}

pub fn planetary_nebula(magnitude: f64) -> Glyph {
    let size = lerp_clamped(magnitude, 7.3, 20.0, 14.0, 8.0);
    Glyph {
        shape: Shape::Triangle { r: size / 1.2 },
        hit_radius: size / 1.3,
    }
}

pub fn solar_body(name: &str) -> Glyph {
    let (size, _) = solar_body_style(name);
    let lower = name.to_ascii_lowercase();
    Glyph {
        shape: Shape::Body {
            r: size / 2.0,
            rays: lower == "sun",
            ring: lower == "saturn",
        },
        hit_radius: size / 2.0 + 3.0,
    }
}

pub fn calibration() -> Glyph {
    Glyph {
        shape: Shape::Crosshair {
            r: CALIBRATION_RADIUS,
        },
        hit_radius: CALIBRATION_HIT_RADIUS,
    }
}

/// Glyph for a catalog object by class.
pub fn for_object(obj: &CatalogObject) -> Glyph {
    match obj.class {
        ObjectClass::Star => star(obj.magnitude),
        ObjectClass::Galaxy => galaxy(obj.magnitude),
        ObjectClass::OpenCluster => open_cluster(obj.size),
        ObjectClass::GlobularCluster => globular_cluster(obj.magnitude),
        ObjectClass::Nebula => nebula(obj.magnitude),
        ObjectClass::PlanetaryNebula => planetary_nebula(obj.magnitude),
        ObjectClass::SolarSystem => solar_body(obj.name.as_deref().unwrap_or_default()),
        ObjectClass::Constellation | ObjectClass::Calibration => calibration(),
    }
}

/// Extra radius of the selection ring around a glyph of the given hit radius.
pub fn selection_margin(radius: f64) -> f64 {
    if radius <= 2.0 {
        0.3
    } else if radius <= 5.0 {
        1.0
    } else if radius <= 10.0 {
        1.5
    } else {
        2.0
    }
}

pub fn draw(canvas: &mut dyn Canvas, shape: Shape, x: f64, y: f64, color: Color) {
    match shape {
        Shape::Disc { r } => canvas.fill_circle(x, y, r, color),
        Shape::Ellipse { rx, ry } => canvas.stroke_ellipse(x, y, rx, ry, color, 1.0),
        Shape::Circle { r } => canvas.stroke_circle(x, y, r, color, 1.0),
        Shape::CrossedCircle { r } => {
            canvas.stroke_circle(x, y, r, color, 1.0);
            let d = 0.7 * r * std::f64::consts::FRAC_1_SQRT_2;
            canvas.line(x - d, y - d, x + d, y + d, color, 1.0);
            canvas.line(x - d, y + d, x + d, y - d, color, 1.0);
        }
        Shape::Square { side } => {
            let h = side / 2.0;
            let corners = [(x - h, y - h), (x + h, y - h), (x + h, y + h), (x - h, y + h)];
            canvas.stroke_polygon(&corners, color, 1.0);
        }
        Shape::Triangle { r } => {
            let pts: Vec<(f64, f64)> = (0..3)
                .map(|k| {
                    let a = -std::f64::consts::FRAC_PI_2 + k as f64 * 2.0 * std::f64::consts::FRAC_PI_3;
                    (x + r * a.cos(), y + r * a.sin())
                })
                .collect();
            canvas.stroke_polygon(&pts, color, 1.0);
        }
        Shape::Body { r, rays, ring } => {
            canvas.fill_circle(x, y, r, color);
            if rays {
                for k in 0..8 {
                    let a = k as f64 * std::f64::consts::FRAC_PI_4;
                    let (s, c) = a.sin_cos();
                    canvas.line(x + c * r * 1.3, y + s * r * 1.3, x + c * r * 1.8, y + s * r * 1.8, color, 1.0);
                }
            }
            if ring {
                canvas.stroke_ellipse(x, y, r * 1.8, r * 0.6, color, 1.0);
            }
        }
        Shape::Crosshair { r } => {
            canvas.stroke_circle(x, y, r, color, 1.5);
            canvas.line(x - r, y, x + r, y, color, 1.0);
            canvas.line(x, y - r, x, y + r, color, 1.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_bins() {
        assert_eq!(star_bin(-1.4), 0.0);
        assert_eq!(star_bin(1.99), 0.0);
        assert_eq!(star_bin(2.5), 1.0);
        assert_eq!(star_bin(12.0), 7.0);
    }

    #[test]
    fn test_faint_star_hit_radius_has_floor() {
        let g = star(6.0);
        match g.shape {
            Shape::Disc { r } => assert!(r < MIN_STAR_HIT_RADIUS),
            other => panic!("unexpected shape {:?}", other),
        }
        assert_eq!(g.hit_radius, MIN_STAR_HIT_RADIUS);
    }

    #[test]
    fn test_galaxy_bins_and_axes() {
        assert_eq!(galaxy_bin(9.9), 0.0);
        assert_eq!(galaxy_bin(10.0), 1.0);
        assert_eq!(galaxy_bin(11.5), 2.0);
        assert_eq!(galaxy_bin(30.0), 7.0);
        let g = galaxy(15.0);
        if let Shape::Ellipse { rx, ry } = g.shape {
            assert!((rx - 2.0 * ry).abs() < 1e-12);
            assert_eq!(g.hit_radius, rx);
        } else {
            panic!("galaxy is an ellipse");
        }
    }

    #[test]
    fn test_dso_sizes_interpolate() {
        assert_eq!(globular_cluster(3.5).hit_radius, 12.0);
        assert_eq!(globular_cluster(20.0).hit_radius, 4.0);
        assert!((nebula(3.5).hit_radius - 16.0 / 1.5).abs() < 1e-12);
        assert!((planetary_nebula(7.3).hit_radius - 14.0 / 1.3).abs() < 1e-12);
        assert_eq!(open_cluster(Some(25.0)).hit_radius, 12.0);
        assert_eq!(open_cluster(None).hit_radius, 4.0);
    }

    #[test]
    fn test_sun_and_saturn_decorations() {
        assert!(matches!(solar_body("Sun").shape, Shape::Body { rays: true, ring: false, .. }));
        assert!(matches!(solar_body("Saturn").shape, Shape::Body { rays: false, ring: true, .. }));
        assert_eq!(solar_body("Sun").hit_radius, 9.0);
    }

    #[test]
    fn test_selection_margins() {
        assert_eq!(selection_margin(2.0), 0.3);
        assert_eq!(selection_margin(4.0), 1.0);
        assert_eq!(selection_margin(10.0), 1.5);
        assert_eq!(selection_margin(19.0), 2.0);
    }
}
