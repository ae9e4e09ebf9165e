//! The chart session: all mutable view state, passed explicitly.
//!
//! A session owns the catalog, the clock, the viewport, the toggles, the
//! visibility policy, the label engine, the hit index, the selection and the
//! mount reticle. The host drives it from a single thread:
//!
//! ```text
//! input  ──> handle_input ──> throttle ──> viewport / selection ──┐
//! timers ──> tick ──> mount poll, clock sync, calibration refresh ├─> redraw
//! ```
//!
//! Only one redraw runs at a time. A redraw requested while another holds the
//! [`RedrawGuard`] is skipped and counted.

use crate::canvas::Canvas;
use crate::catalog::{parse_calibration_points, parse_solar_system, Catalog, CatalogSource};
use crate::events::{wheel_zoom_factor, InputEvent, Scheduler, Throttle, TimerKind};
use crate::hittest::{Hit, HitIndex, HitTarget};
use crate::labels::{AverageAdvance, LabelEngine};
use crate::mount::{GotoTarget, MountService};
use crate::profile::DeviceProfile;
use crate::render::{render, FrameStats, Scene};
use crate::state::{ViewState, ViewToggles};
use crate::visibility::VisibilityPolicy;
use chrono::{DateTime, Utc};
use skyview_coords::{ChartGeometry, FrameTransform, Horizontal, Viewport};
use skyview_core::{Location, SkyError, SkyResult};
use skyview_time::{ServerSyncedClock, SkyClock};
use std::cell::Cell;
use std::rc::Rc;
use tracing::{debug, info, warn};

/// Shared "redraw in progress" flag.
#[derive(Debug, Clone, Default)]
pub struct RedrawFlag(Rc<Cell<bool>>);

impl RedrawFlag {
    pub fn is_busy(&self) -> bool {
        self.0.get()
    }

    /// Takes the flag, or `None` if a redraw already holds it.
    pub fn try_acquire(&self) -> Option<RedrawGuard> {
        if self.0.replace(true) {
            None
        } else {
            Some(RedrawGuard(Rc::clone(&self.0)))
        }
    }
}

/// Clears the flag when dropped, on every exit path.
#[derive(Debug)]
pub struct RedrawGuard(Rc<Cell<bool>>);

impl Drop for RedrawGuard {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Server wall clock, reported as `HH:MM:SS` UTC.
pub trait TimeService {
    fn server_time(&mut self) -> SkyResult<String>;
}

/// Remote services reached from timer callbacks. Absent services are skipped.
#[derive(Default)]
pub struct Services<'a> {
    pub mount: Option<&'a mut dyn MountService>,
    pub time: Option<&'a mut dyn TimeService>,
    pub live_data: Option<&'a dyn CatalogSource>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SessionStats {
    pub frames: u64,
    pub skipped_redraws: u64,
    pub last_frame: Option<FrameStats>,
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub location: Location,
    pub width: f64,
    pub height: f64,
    pub profile: DeviceProfile,
    pub state: ViewState,
}

struct Drag {
    last_x: f64,
    last_y: f64,
}

pub struct SkyviewSession<C: SkyClock> {
    catalog: Catalog,
    clock: ServerSyncedClock<C>,
    location: Location,
    geometry: ChartGeometry,
    viewport: Viewport,
    toggles: ViewToggles,
    profile: DeviceProfile,
    policy: VisibilityPolicy,
    labels: LabelEngine<AverageAdvance>,
    hits: HitIndex,
    selection: Option<HitTarget>,
    goto: Option<GotoTarget>,
    reticle: Option<Horizontal>,
    redraw_flag: RedrawFlag,
    dirty: bool,
    drag: Option<Drag>,
    wheel: Throttle<InputEvent>,
    moves: Throttle<InputEvent>,
    scheduler: Scheduler,
    stats: SessionStats,
}

impl<C: SkyClock> SkyviewSession<C> {
    pub fn new(catalog: Catalog, clock: C, config: SessionConfig) -> Self {
        let clock = ServerSyncedClock::new(clock);
        let scheduler = Scheduler::start(clock.local().now());
        let throttle_ms = config.profile.throttle_ms;
        info!(
            tier = ?config.profile.tier,
            throttle_ms,
            objects = catalog.len(),
            "skyview session started"
        );
        Self {
            catalog,
            clock,
            location: config.location,
            geometry: ChartGeometry::for_canvas(config.width, config.height),
            viewport: Viewport::new(1.0, 0.0, 0.0, config.state.mirrored),
            toggles: config.state.toggles,
            policy: VisibilityPolicy::new(&config.profile),
            profile: config.profile,
            labels: LabelEngine::with_default_measurer(),
            hits: HitIndex::new(),
            selection: None,
            goto: None,
            reticle: None,
            redraw_flag: RedrawFlag::default(),
            dirty: true,
            drag: None,
            wheel: Throttle::new(throttle_ms),
            moves: Throttle::new(throttle_ms),
            scheduler,
            stats: SessionStats::default(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn toggles(&self) -> &ViewToggles {
        &self.toggles
    }

    pub fn set_toggles(&mut self, toggles: ViewToggles) {
        self.toggles = toggles;
        self.dirty = true;
    }

    pub fn set_mirrored(&mut self, mirrored: bool) {
        self.viewport.mirrored = mirrored;
        self.dirty = true;
    }

    /// Zooms about the chart centre; clamped like wheel zoom.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.viewport.set_zoom(zoom);
        self.dirty = true;
    }

    pub fn view_state(&self) -> ViewState {
        ViewState {
            toggles: self.toggles,
            mirrored: self.viewport.mirrored,
        }
    }

    pub fn reset_view(&mut self) {
        self.viewport.reset();
        self.dirty = true;
    }

    pub fn policy_mut(&mut self) -> &mut VisibilityPolicy {
        self.dirty = true;
        &mut self.policy
    }

    pub fn profile(&self) -> &DeviceProfile {
        &self.profile
    }

    pub fn set_profile(&mut self, profile: DeviceProfile) {
        let mut policy = VisibilityPolicy::new(&profile);
        for class in crate::catalog::ObjectClass::GLYPH_CLASSES {
            policy.set_user_ceiling(class, self.policy.user_ceiling(class));
        }
        self.policy = policy;
        self.wheel.set_interval_ms(profile.throttle_ms);
        self.moves.set_interval_ms(profile.throttle_ms);
        self.profile = profile;
        self.dirty = true;
    }

    pub fn selection(&self) -> Option<HitTarget> {
        self.selection
    }

    pub fn goto_target(&self) -> Option<&GotoTarget> {
        self.goto.as_ref()
    }

    pub fn reticle(&self) -> Option<Horizontal> {
        self.reticle
    }

    pub fn hits(&self) -> &HitIndex {
        &self.hits
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn redraw_flag(&self) -> RedrawFlag {
        self.redraw_flag.clone()
    }

    pub fn needs_redraw(&self) -> bool {
        self.dirty
    }

    pub fn clock(&self) -> &ServerSyncedClock<C> {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut ServerSyncedClock<C> {
        &mut self.clock
    }

    /// Time base for throttles and timers. Unaffected by server sync, so a
    /// backward offset never stalls input or polling.
    fn loop_now(&self) -> DateTime<Utc> {
        self.clock.local().now()
    }

    /// Transform for the current instant and view.
    pub fn frame(&self) -> FrameTransform {
        FrameTransform::at(&self.clock.now(), self.location, self.geometry, self.viewport)
    }

    /// Draws one frame, or returns `None` when another redraw is in flight.
    pub fn redraw(&mut self, canvas: &mut dyn Canvas) -> Option<FrameStats> {
        let Some(_guard) = self.redraw_flag.try_acquire() else {
            self.stats.skipped_redraws += 1;
            debug!(skipped = self.stats.skipped_redraws, "redraw already in progress");
            return None;
        };
        let frame = self.frame();
        let scene = Scene {
            catalog: &self.catalog,
            frame: &frame,
            toggles: &self.toggles,
            policy: &self.policy,
            max_stars: self.profile.max_stars,
            reticle: self.reticle,
            selection: self.selection,
        };
        let stats = render(&scene, &mut self.labels, &mut self.hits, canvas);
        self.stats.frames += 1;
        self.stats.last_frame = Some(stats);
        self.dirty = false;
        Some(stats)
    }

    /// Feeds one input event. Wheel and drag moves are throttled, keeping
    /// only the latest pending event of each kind.
    pub fn handle_input(&mut self, event: InputEvent) {
        let now = self.loop_now();
        let ready = match event {
            InputEvent::Wheel { .. } => self.wheel.offer(event, now),
            InputEvent::PointerMove { .. } => self.moves.offer(event, now),
            _ => Some(event),
        };
        if let Some(event) = ready {
            self.apply(event);
        }
    }

    fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::Wheel { x, y, delta_y } => {
                self.viewport.zoom_about(wheel_zoom_factor(delta_y), x, y);
                self.dirty = true;
            }
            InputEvent::PointerDown { x, y } => {
                self.pick(x, y);
                self.drag = Some(Drag { last_x: x, last_y: y });
            }
            InputEvent::PointerMove { x, y } => {
                if let Some(drag) = &mut self.drag {
                    self.viewport.pan_by(x - drag.last_x, y - drag.last_y);
                    drag.last_x = x;
                    drag.last_y = y;
                    self.dirty = true;
                }
            }
            InputEvent::PointerUp { .. } => {
                if let Some(ev) = self.moves.flush(self.loop_now()) {
                    self.apply(ev);
                }
                self.drag = None;
            }
            InputEvent::Resize { width, height } => {
                self.geometry = ChartGeometry::for_canvas(width, height);
                self.dirty = true;
            }
        }
    }

    /// Resolves a click against the last drawn frame and updates the selection.
    pub fn pick(&mut self, x: f64, y: f64) -> Option<Hit> {
        let hit = self.hits.pick(x, y);
        self.selection = hit.map(|h| h.target);
        let frame = self.frame();
        self.goto = match self.selection {
            Some(HitTarget::Catalog(r)) => self
                .catalog
                .get(r)
                .map(|obj| GotoTarget::for_object(obj, &frame)),
            Some(HitTarget::Calibration(i)) => self.catalog.calibration.get(i).map(|p| {
                GotoTarget::for_horizontal(Horizontal::new(p.alt_deg, p.az_deg), &frame)
            }),
            None => None,
        };
        debug!(x, y, selection = ?self.selection, "pick");
        self.dirty = true;
        hit
    }

    /// Releases buffered input, runs due timers and redraws when anything changed.
    pub fn tick(&mut self, services: &mut Services<'_>, canvas: &mut dyn Canvas) -> Vec<TimerKind> {
        let now = self.loop_now();
        if let Some(ev) = self.wheel.poll(now) {
            self.apply(ev);
        }
        if let Some(ev) = self.moves.poll(now) {
            self.apply(ev);
        }

        let fired = self.scheduler.due(now);
        for &timer in &fired {
            match timer {
                TimerKind::MountPoll => {
                    if let Some(mount) = services.mount.as_deref_mut() {
                        self.poll_mount(mount);
                    }
                }
                TimerKind::ClockSync => {
                    if let Some(time) = services.time.as_deref_mut() {
                        self.sync_clock(time);
                    }
                }
                TimerKind::CalibrationRefresh => {
                    if let Some(source) = services.live_data {
                        self.refresh_calibration(source);
                    }
                }
            }
        }

        if self.dirty {
            self.redraw(canvas);
        }
        fired
    }

    /// Stops all timers; the host calls this on teardown.
    pub fn shutdown(&mut self) {
        self.scheduler.stop();
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    pub fn poll_mount(&mut self, mount: &mut dyn MountService) {
        self.reticle = match mount.status() {
            Ok(status) => status.position(),
            Err(e) => {
                warn!(error = %e, "mount status unavailable");
                None
            }
        };
        self.dirty = true;
    }

    pub fn sync_clock(&mut self, time: &mut dyn TimeService) {
        let result = time
            .server_time()
            .and_then(|t| self.clock.apply_server_time(&t));
        match result {
            Ok(offset) => debug!(offset_ms = offset.num_milliseconds(), "clock synced"),
            Err(e) => warn!(error = %e, "clock sync failed"),
        }
        self.dirty = true;
    }

    /// Reloads calibration points; on failure the previous set is kept.
    pub fn refresh_calibration(&mut self, source: &dyn CatalogSource) {
        match source.fetch("cal_points").and_then(|t| parse_calibration_points(&t)) {
            Ok(points) => {
                if let Some(HitTarget::Calibration(i)) = self.selection {
                    if i >= points.len() {
                        self.selection = None;
                        self.goto = None;
                    }
                }
                self.catalog.calibration = points;
                self.dirty = true;
            }
            Err(e) => warn!(error = %e, "calibration refresh failed"),
        }
    }

    /// Reloads solar-system positions; on failure the list is emptied.
    pub fn refresh_solar_system(&mut self, source: &dyn CatalogSource) {
        self.catalog.solar_system = match source
            .fetch("solar_system")
            .and_then(|t| parse_solar_system(&t))
        {
            Ok(bodies) => bodies,
            Err(e) => {
                warn!(error = %e, "solar system refresh failed");
                Vec::new()
            }
        };
        if let Some(HitTarget::Catalog(r)) = self.selection {
            if self.catalog.get(r).is_none() {
                self.selection = None;
                self.goto = None;
            }
        }
        self.dirty = true;
    }

    /// Sends the current selection's goto target to the mount.
    pub fn goto_selection(&mut self, mount: &mut dyn MountService) -> SkyResult<()> {
        let target = self
            .goto
            .as_ref()
            .ok_or_else(|| SkyError::out_of_range("goto", "nothing selected"))?;
        info!(alt = %target.alt, az = %target.az, "goto selection");
        mount.goto(target.command)
    }
}
