//! The redraw pipeline.
//!
//! One pass per frame, in draw order:
//!
//! 1. background, horizon circle, altitude rings, radials and compass letters
//! 2. constellation figures
//! 3. catalog glyphs per class, culled and recorded in the hit index
//! 4. calibration points and the mount reticle
//! 5. the selection ring, at the selected object's current position
//! 6. labels, after collision-avoiding layout
//!
//! The hit index is rebuilt from scratch in lockstep with drawing, so it
//! always describes exactly what is on screen.

use crate::canvas::{Canvas, TextAlign, TextBaseline, TextStyle};
use crate::catalog::{Catalog, CatalogRef, ObjectClass};
use crate::glyph;
use crate::hittest::{HitIndex, HitTarget};
use crate::labels::{LabelCandidate, LabelClass, LabelEngine, LabelStats, TextMeasurer};
use crate::mount::RETICLE_RADIUS;
use crate::state::ViewToggles;
use crate::style::{Palette, Role};
use crate::visibility::{
    deep_sky_label_ceiling, star_label_ceiling, CullStats, VisibilityPolicy, VIEWPORT_PADDING,
};
use skyview_coords::{FrameTransform, Horizontal, ScreenPoint};
use tracing::debug;

/// Altitudes of the grid rings.
pub const ALTITUDE_RINGS: [f64; 2] = [30.0, 60.0];
pub const RADIAL_STEP_DEG: f64 = 22.5;
/// Compass letters sit this far below the horizon.
const COMPASS_DIP_DEG: f64 = 6.0;

/// Inputs of one frame, borrowed from the session.
pub struct Scene<'a> {
    pub catalog: &'a Catalog,
    pub frame: &'a FrameTransform,
    pub toggles: &'a ViewToggles,
    pub policy: &'a VisibilityPolicy,
    pub max_stars: usize,
    pub reticle: Option<Horizontal>,
    pub selection: Option<HitTarget>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    pub culling: CullStats,
    pub labels: LabelStats,
    pub hit_records: usize,
    pub constellation_segments: usize,
    pub reticle_drawn: bool,
    pub selection_drawn: bool,
}

fn class_role(class: ObjectClass) -> Role {
    match class {
        ObjectClass::Galaxy => Role::Galaxy,
        ObjectClass::OpenCluster => Role::OpenCluster,
        ObjectClass::GlobularCluster => Role::GlobularCluster,
        ObjectClass::Nebula => Role::Nebula,
        ObjectClass::PlanetaryNebula => Role::PlanetaryNebula,
        _ => Role::Compass,
    }
}

fn label_role(class: LabelClass) -> Role {
    match class {
        LabelClass::Star => Role::StarLabel,
        LabelClass::DeepSky => Role::DeepSkyLabel,
        LabelClass::Constellation => Role::ConstellationLabel,
    }
}

/// True for names that are real designations rather than placeholders.
fn is_real_name(name: &str) -> bool {
    let trimmed = name.trim();
    !trimmed.is_empty() && !trimmed.eq_ignore_ascii_case("noname")
}

/// Draws one frame and rebuilds `hits`.
pub fn render<M: TextMeasurer>(
    scene: &Scene<'_>,
    labels: &mut LabelEngine<M>,
    hits: &mut HitIndex,
    canvas: &mut dyn Canvas,
) -> FrameStats {
    let palette = Palette::new(scene.toggles.night_mode);
    let frame = scene.frame;
    let mut stats = FrameStats::default();
    let mut candidates = Vec::new();

    hits.clear();
    canvas.clear(palette.color(Role::Background));
    draw_grid(frame, &palette, canvas);

    if scene.toggles.constellations {
        stats.constellation_segments = draw_constellations(scene, &palette, canvas);
    }

    draw_catalog(scene, &palette, hits, canvas, &mut stats.culling, &mut candidates);

    if scene.toggles.messier_names {
        collect_messier_labels(scene, &mut candidates);
    }
    if scene.toggles.constellation_labels {
        collect_constellation_labels(scene, &mut candidates);
    }
    if scene.toggles.calibration_points {
        draw_calibration(scene, &palette, hits, canvas);
    }
    if let Some(hz) = scene.reticle {
        stats.reticle_drawn = draw_reticle(frame, hz, &palette, canvas);
    }
    stats.selection_drawn = draw_selection(scene, &palette, canvas);

    let layout = labels.layout(&candidates);
    for placed in &layout.labels {
        let c = &candidates[placed.candidate];
        let style = TextStyle {
            color: palette.color(label_role(c.class)),
            size_px: c.class.font_px(),
            align: placed.align,
            baseline: TextBaseline::Middle,
        };
        canvas.text(&c.text, placed.x, placed.y, &style);
    }
    stats.labels = layout.stats;
    stats.hit_records = hits.len();

    debug!(
        drawn = stats.culling.drawn,
        below_horizon = stats.culling.below_horizon,
        too_faint = stats.culling.too_faint,
        off_screen = stats.culling.off_screen,
        labels = stats.labels.committed,
        unregistered = stats.labels.unregistered,
        hits = stats.hit_records,
        zoom = frame.zoom(),
        "frame rendered"
    );
    stats
}

fn draw_grid(frame: &FrameTransform, palette: &Palette, canvas: &mut dyn Canvas) {
    let (cx, cy, r) = frame.screen_disc();
    let grid = palette.color(Role::Grid);
    canvas.stroke_circle(cx, cy, r, palette.color(Role::Border), 2.0);
    for alt in ALTITUDE_RINGS {
        canvas.stroke_circle(cx, cy, r * (90.0 - alt) / 90.0, grid, 1.0);
    }

    let spokes = (360.0 / RADIAL_STEP_DEG) as usize;
    for k in 0..spokes {
        let edge = frame.project_horizontal(Horizontal::new(0.0, k as f64 * RADIAL_STEP_DEG));
        canvas.line(cx, cy, edge.x, edge.y, grid, 1.0);
    }

    let style = TextStyle {
        color: palette.color(Role::Compass),
        size_px: 14.0,
        align: TextAlign::Center,
        baseline: TextBaseline::Middle,
    };
    for (letter, az) in [("N", 0.0), ("E", 90.0), ("S", 180.0), ("W", 270.0)] {
        let p = frame.project_horizontal(Horizontal::new(-COMPASS_DIP_DEG, az));
        canvas.text(letter, p.x, p.y, &style);
    }
}

fn draw_constellations(scene: &Scene<'_>, palette: &Palette, canvas: &mut dyn Canvas) -> usize {
    let color = palette.color(Role::ConstellationLine);
    let mut segments = 0;
    for figure in &scene.catalog.constellations {
        for line in &figure.lines {
            let points: Vec<ScreenPoint> = line
                .iter()
                .map(|&(ra, dec)| scene.frame.project_equatorial(ra, dec))
                .collect();
            for pair in points.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                let wraps = (a.az_deg - b.az_deg).abs() >= 180.0;
                if wraps || !(a.is_visible() || b.is_visible()) {
                    continue;
                }
                canvas.line(a.x, a.y, b.x, b.y, color, 1.0);
                segments += 1;
            }
        }
    }
    segments
}

fn draw_catalog(
    scene: &Scene<'_>,
    palette: &Palette,
    hits: &mut HitIndex,
    canvas: &mut dyn Canvas,
    culling: &mut CullStats,
    labels: &mut Vec<LabelCandidate>,
) {
    let frame = scene.frame;
    let zoom = frame.zoom();
    let star_label_limit = star_label_ceiling(zoom);

    for class in ObjectClass::GLYPH_CLASSES {
        if !scene.toggles.shows(class) {
            continue;
        }
        let mut drawn_in_class = 0usize;
        for (index, obj) in scene.catalog.objects(class).iter().enumerate() {
            if class == ObjectClass::Star && drawn_in_class >= scene.max_stars {
                break;
            }
            let p = frame.project_equatorial(obj.ra_hours, obj.dec_deg);
            if !culling.record(scene.policy.check(class, obj.magnitude, &p, frame)) {
                continue;
            }
            drawn_in_class += 1;

            let g = glyph::for_object(obj);
            let color = match class {
                ObjectClass::Star => palette.star(obj.spectral_type.as_deref()),
                ObjectClass::SolarSystem => palette.solar_body(obj.name.as_deref().unwrap_or_default()),
                other => palette.color(class_role(other)),
            };
            glyph::draw(canvas, g.shape, p.x, p.y, color);
            hits.push(p.x, p.y, g.hit_radius, HitTarget::Catalog(CatalogRef { class, index }));

            let name = obj.name.as_deref().filter(|n| is_real_name(n));
            match (class, name) {
                (ObjectClass::Star, Some(name))
                    if scene.toggles.star_names && obj.magnitude <= star_label_limit =>
                {
                    labels.push(LabelCandidate::new(name, LabelClass::Star, obj.magnitude, p.x, p.y));
                }
                (ObjectClass::SolarSystem, Some(name)) => {
                    labels.push(LabelCandidate::new(name, LabelClass::Star, obj.magnitude, p.x, p.y));
                }
                _ => {}
            }
        }
    }
}

fn collect_messier_labels(scene: &Scene<'_>, labels: &mut Vec<LabelCandidate>) {
    let frame = scene.frame;
    let limit = deep_sky_label_ceiling(frame.zoom());
    for obj in &scene.catalog.messier {
        let Some(name) = obj.name.as_deref().filter(|n| is_real_name(n)) else {
            continue;
        };
        if obj.magnitude > limit {
            continue;
        }
        let p = frame.project_equatorial(obj.ra_hours, obj.dec_deg);
        if p.is_visible() && frame.in_viewport(p.x, p.y, VIEWPORT_PADDING) {
            labels.push(LabelCandidate::new(name, LabelClass::DeepSky, obj.magnitude, p.x, p.y));
        }
    }
}

fn collect_constellation_labels(scene: &Scene<'_>, labels: &mut Vec<LabelCandidate>) {
    let frame = scene.frame;
    for figure in &scene.catalog.constellations {
        let (mut sx, mut sy, mut n) = (0.0, 0.0, 0usize);
        for &(ra, dec) in figure.vertices() {
            let p = frame.project_equatorial(ra, dec);
            if p.is_visible() {
                sx += p.x;
                sy += p.y;
                n += 1;
            }
        }
        if n == 0 {
            continue;
        }
        let (x, y) = (sx / n as f64, sy / n as f64);
        if frame.in_viewport(x, y, VIEWPORT_PADDING) {
            labels.push(LabelCandidate::new(figure.id.clone(), LabelClass::Constellation, 0.0, x, y));
        }
    }
}

fn draw_calibration(scene: &Scene<'_>, palette: &Palette, hits: &mut HitIndex, canvas: &mut dyn Canvas) {
    let g = glyph::calibration();
    for (i, point) in scene.catalog.calibration.iter().enumerate() {
        let p = scene
            .frame
            .project_horizontal(Horizontal::new(point.alt_deg, point.az_deg));
        if !p.is_visible() {
            continue;
        }
        let role = if point.enabled {
            Role::CalibrationEnabled
        } else {
            Role::CalibrationDisabled
        };
        glyph::draw(canvas, g.shape, p.x, p.y, palette.color(role));
        hits.push(p.x, p.y, g.hit_radius, HitTarget::Calibration(i));
    }
}

fn draw_reticle(frame: &FrameTransform, hz: Horizontal, palette: &Palette, canvas: &mut dyn Canvas) -> bool {
    let p = frame.project_horizontal(hz);
    if !p.is_visible() {
        return false;
    }
    let arm = RETICLE_RADIUS * 1.3;
    let color = palette.color(Role::Reticle);
    canvas.line(p.x - arm, p.y, p.x + arm, p.y, color, 2.0);
    canvas.line(p.x, p.y - arm, p.x, p.y + arm, color, 2.0);
    true
}

/// Re-projects the selection at this frame's time and view.
fn draw_selection(scene: &Scene<'_>, palette: &Palette, canvas: &mut dyn Canvas) -> bool {
    let (p, radius) = match scene.selection {
        Some(HitTarget::Catalog(r)) if scene.toggles.shows(r.class) => match scene.catalog.get(r) {
            Some(obj) => (
                scene.frame.project_equatorial(obj.ra_hours, obj.dec_deg),
                glyph::for_object(obj).shape.radius(),
            ),
            None => return false,
        },
        Some(HitTarget::Calibration(i)) if scene.toggles.calibration_points => {
            match scene.catalog.calibration.get(i) {
                Some(point) => (
                    scene
                        .frame
                        .project_horizontal(Horizontal::new(point.alt_deg, point.az_deg)),
                    glyph::CALIBRATION_RADIUS,
                ),
                None => return false,
            }
        }
        _ => return false,
    };
    if !p.is_visible() {
        return false;
    }
    let ring = radius + glyph::selection_margin(radius);
    canvas.stroke_circle(p.x, p.y, ring, palette.color(Role::Selection), 2.0);
    true
}
