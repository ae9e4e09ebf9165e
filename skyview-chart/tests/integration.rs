use chrono::{TimeZone, Utc};
use skyview_chart::catalog::{CatalogLoader, CatalogObject, DirectorySource, ObjectClass};
use skyview_chart::hittest::HitTarget;
use skyview_chart::labels::{LabelCandidate, LabelClass, LabelEngine, MAX_PLACED_LABELS};
use skyview_chart::profile::DeviceProfile;
use skyview_chart::session::{SessionConfig, SkyviewSession};
use skyview_chart::state::ViewState;
use skyview_chart::{Catalog, CatalogRef, RecordingCanvas};
use skyview_core::Location;
use skyview_time::FixedClock;
use std::fs;

fn near_pole_session(catalog: Catalog) -> SkyviewSession<FixedClock> {
    let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 3, 20, 22, 0, 0).unwrap());
    let config = SessionConfig {
        location: Location::new(89.0, 0.0).unwrap(),
        width: 800.0,
        height: 800.0,
        profile: DeviceProfile::conservative(),
        state: ViewState::default(),
    };
    SkyviewSession::new(catalog, clock, config)
}

fn star_ref(index: usize) -> HitTarget {
    HitTarget::Catalog(CatalogRef {
        class: ObjectClass::Star,
        index,
    })
}

// --- Label placement ---

#[test]
fn test_label_cap_holds_past_ten_thousand() {
    let candidates: Vec<LabelCandidate> = (0..10_050)
        .map(|i| {
            let x = (i % 101) as f64 * 40.0;
            let y = (i / 101) as f64 * 40.0;
            LabelCandidate::new("S", LabelClass::Star, 5.0, x, y)
        })
        .collect();
    let mut engine = LabelEngine::with_default_measurer();
    let layout = engine.layout(&candidates);

    assert_eq!(layout.labels.len(), candidates.len());
    assert_eq!(layout.stats.committed, MAX_PLACED_LABELS);
    assert_eq!(layout.stats.capped, 50);

    let registered: Vec<_> = layout.registered().collect();
    assert_eq!(registered.len(), MAX_PLACED_LABELS);
    // spot-check the tail against everything; the grid keeps neighbours apart
    for a in registered.iter().rev().take(200) {
        for b in &registered {
            if a.candidate != b.candidate {
                assert!(!a.rect.intersects(&b.rect));
            }
        }
    }
}

#[test]
fn test_brighter_deep_sky_label_keeps_its_first_choice() {
    let faint = LabelCandidate::new("M56", LabelClass::DeepSky, 9.0, 300.0, 300.0);
    let bright = LabelCandidate::new("M57", LabelClass::DeepSky, 6.0, 300.0, 300.0);

    let alone = LabelEngine::with_default_measurer().layout(&[bright.clone()]);
    let mut engine = LabelEngine::with_default_measurer();
    let layout = engine.layout(&[faint, bright]);

    assert_eq!(layout.stats.displaced, 1);
    assert_eq!(layout.stats.committed, 2);
    let m57 = layout.labels.iter().find(|l| l.candidate == 1).unwrap();
    let m56 = layout.labels.iter().find(|l| l.candidate == 0).unwrap();
    assert_eq!((m57.x, m57.y), (alone.labels[0].x, alone.labels[0].y));
    assert!(!m57.rect.intersects(&m56.rect));
}

#[test]
fn test_star_labels_are_placed_before_constellations() {
    let figure = LabelCandidate::new("Orion", LabelClass::Constellation, 0.0, 400.0, 400.0);
    let star = LabelCandidate::new("Alnilam", LabelClass::Star, 1.7, 400.0, 400.0);
    let layout = LabelEngine::with_default_measurer().layout(&[figure, star]);
    assert_eq!(layout.labels[0].candidate, 1);
    assert_eq!(layout.stats.committed, 2);
}

// --- Session ---

#[test]
fn test_session_draws_and_picks_only_visible_objects() {
    let catalog = Catalog {
        stars: vec![
            CatalogObject::new(ObjectClass::Star, 18.6, 60.0, 0.0).named("Vega"),
            CatalogObject::new(ObjectClass::Star, 6.75, -30.0, 0.0).named("Sirius"),
        ],
        ..Catalog::default()
    };
    let mut session = near_pole_session(catalog);
    let mut canvas = RecordingCanvas::new();
    let stats = session.redraw(&mut canvas).unwrap();

    assert_eq!(stats.culling.drawn, 1);
    assert_eq!(stats.culling.below_horizon, 1);
    assert_eq!(session.hits().len(), 1);
    assert!(canvas.text_at("Vega").is_some());
    assert!(canvas.text_at("Sirius").is_none());

    let frame = session.frame();
    let vega = frame.project_equatorial(18.6, 60.0);
    let sirius = frame.project_equatorial(6.75, -30.0);
    assert!(vega.is_visible());
    assert!(!sirius.is_visible());

    let hit = session.pick(vega.x + 3.0, vega.y).unwrap();
    assert_eq!(hit.target, star_ref(0));
    assert_eq!(session.selection(), Some(star_ref(0)));
    assert!(session.goto_target().is_some());

    assert!(session.pick(sirius.x, sirius.y).is_none());
    assert_eq!(session.selection(), None);
    assert!(session.goto_target().is_none());
}

#[test]
fn test_pick_prefers_the_nearer_of_two_stars() {
    let catalog = Catalog {
        stars: vec![
            CatalogObject::new(ObjectClass::Star, 0.0, 70.0, 3.0),
            CatalogObject::new(ObjectClass::Star, 0.0, 69.0, 3.0),
        ],
        ..Catalog::default()
    };
    let mut session = near_pole_session(catalog);
    let mut canvas = RecordingCanvas::new();
    session.redraw(&mut canvas).unwrap();
    assert_eq!(session.hits().len(), 2);

    let frame = session.frame();
    let a = frame.project_equatorial(0.0, 70.0);
    let b = frame.project_equatorial(0.0, 69.0);
    let near_b = (a.x + 0.8 * (b.x - a.x), a.y + 0.8 * (b.y - a.y));
    let hit = session.pick(near_b.0, near_b.1).unwrap();
    assert_eq!(hit.target, star_ref(1));
}

#[test]
fn test_overlapping_redraw_is_skipped() {
    let mut session = near_pole_session(Catalog::default());
    let flag = session.redraw_flag();
    let guard = flag.try_acquire().unwrap();
    assert!(session.redraw(&mut RecordingCanvas::new()).is_none());
    drop(guard);
    assert!(session.redraw(&mut RecordingCanvas::new()).is_some());
    assert_eq!(session.stats().skipped_redraws, 1);
    assert_eq!(session.stats().frames, 1);
}

// --- Catalog loading ---

#[test]
fn test_loader_prefers_corrected_files_and_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("corrected_stars.json"),
        r#"[{"RtAsc": 18.6, "Declin": 38.78, "Mag": 0.03, "Name": "Vega"}]"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("stars.json"),
        r#"[{"RtAsc": 18.6, "Declin": 38.7, "Mag": 0.03, "Name": "Vega"},
            {"RtAsc": 6.75, "Declin": -16.7, "Mag": -1.46, "Name": "Sirius"}]"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("galaxies.json"),
        r#"[{"RtAsc": 0.71, "Declin": 41.27, "Mag": 3.4, "Name": "M31"}]"#,
    )
    .unwrap();
    fs::write(dir.path().join("corrected_nebula.json"), "not json").unwrap();

    let catalog = CatalogLoader::new(Box::new(DirectorySource::corrected(dir.path())))
        .with_fallback(Box::new(DirectorySource::plain(dir.path())))
        .load();

    assert_eq!(catalog.stars.len(), 1);
    assert!((catalog.stars[0].dec_deg - 38.78).abs() < 1e-12);
    assert_eq!(catalog.galaxies.len(), 1);
    assert!(catalog.nebulae.is_empty());
    assert!(catalog.constellations.is_empty());
}
