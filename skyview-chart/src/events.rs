//! Input buffering and periodic timers for the single-threaded event loop.
//!
//! Nothing here blocks or spawns. The host feeds input and the current time
//! in; the session decides what to apply and when to redraw.

use chrono::{DateTime, Duration, Utc};
use skyview_time::clock::SYNC_PERIOD_MS;
use tracing::debug;

/// Mouse wheel zoom sensitivity, per unit of `delta_y`.
pub const WHEEL_ZOOM_RATE: f64 = 0.002;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Wheel { x: f64, y: f64, delta_y: f64 },
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp { x: f64, y: f64 },
    Resize { width: f64, height: f64 },
}

impl InputEvent {
    /// Wheel and drag moves arrive in bursts and go through a throttle.
    pub fn is_throttled(&self) -> bool {
        matches!(self, Self::Wheel { .. } | Self::PointerMove { .. })
    }
}

/// Zoom factor for one wheel event; scrolling down zooms out.
pub fn wheel_zoom_factor(delta_y: f64) -> f64 {
    (1.0 - delta_y * WHEEL_ZOOM_RATE).max(0.05)
}

/// Holds at most one value; a newer push replaces the older one.
#[derive(Debug, Clone, Default)]
pub struct LatestEventBuffer<T> {
    pending: Option<T>,
    replaced: u64,
}

impl<T> LatestEventBuffer<T> {
    pub fn new() -> Self {
        Self {
            pending: None,
            replaced: 0,
        }
    }

    pub fn push(&mut self, value: T) {
        if self.pending.replace(value).is_some() {
            self.replaced += 1;
        }
    }

    pub fn take(&mut self) -> Option<T> {
        self.pending.take()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Values dropped because a newer one arrived.
    pub fn replaced(&self) -> u64 {
        self.replaced
    }
}

/// Passes at most one value per interval; the rest are coalesced into a
/// [`LatestEventBuffer`] and released by [`Throttle::poll`].
#[derive(Debug, Clone)]
pub struct Throttle<T> {
    interval: Duration,
    last_fire: Option<DateTime<Utc>>,
    pending: LatestEventBuffer<T>,
}

impl<T> Throttle<T> {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval: Duration::milliseconds(interval_ms as i64),
            last_fire: None,
            pending: LatestEventBuffer::new(),
        }
    }

    pub fn set_interval_ms(&mut self, interval_ms: u64) {
        self.interval = Duration::milliseconds(interval_ms as i64);
    }

    fn ready(&self, now: DateTime<Utc>) -> bool {
        self.last_fire.map_or(true, |last| now - last >= self.interval)
    }

    pub fn offer(&mut self, value: T, now: DateTime<Utc>) -> Option<T> {
        if self.ready(now) {
            self.last_fire = Some(now);
            self.pending.take();
            Some(value)
        } else {
            self.pending.push(value);
            None
        }
    }

    pub fn poll(&mut self, now: DateTime<Utc>) -> Option<T> {
        if self.pending.is_pending() && self.ready(now) {
            self.last_fire = Some(now);
            self.pending.take()
        } else {
            None
        }
    }

    /// Releases the pending value regardless of the interval.
    pub fn flush(&mut self, now: DateTime<Utc>) -> Option<T> {
        let value = self.pending.take()?;
        self.last_fire = Some(now);
        Some(value)
    }

    pub fn coalesced(&self) -> u64 {
        self.pending.replaced()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    MountPoll,
    ClockSync,
    CalibrationRefresh,
}

impl TimerKind {
    pub const ALL: [TimerKind; 3] = [Self::MountPoll, Self::ClockSync, Self::CalibrationRefresh];

    pub fn period(self) -> Duration {
        match self {
            Self::MountPoll => Duration::seconds(2),
            Self::ClockSync => Duration::milliseconds(SYNC_PERIOD_MS),
            Self::CalibrationRefresh => Duration::seconds(10),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Timer {
    kind: TimerKind,
    next_due: DateTime<Utc>,
}

/// Periodic timers. Every timer fires once at start; a timer that fell more
/// than one period behind fires once and is rescheduled from `now`.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    timers: Vec<Timer>,
}

impl Scheduler {
    pub fn start(now: DateTime<Utc>) -> Self {
        Self {
            timers: TimerKind::ALL
                .iter()
                .map(|&kind| Timer {
                    kind,
                    next_due: now,
                })
                .collect(),
        }
    }

    pub fn is_running(&self) -> bool {
        !self.timers.is_empty()
    }

    pub fn stop(&mut self) {
        debug!(timers = self.timers.len(), "scheduler stopped");
        self.timers.clear();
    }

    pub fn due(&mut self, now: DateTime<Utc>) -> Vec<TimerKind> {
        let mut fired = Vec::new();
        for timer in &mut self.timers {
            if now < timer.next_due {
                continue;
            }
            fired.push(timer.kind);
            let period = timer.kind.period();
            let next = timer.next_due + period;
            timer.next_due = if next <= now { now + period } else { next };
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t(ms: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap() + Duration::milliseconds(ms)
    }

    #[test]
    fn test_latest_wins() {
        let mut buf = LatestEventBuffer::new();
        buf.push(1);
        buf.push(2);
        buf.push(3);
        assert_eq!(buf.take(), Some(3));
        assert_eq!(buf.take(), None);
        assert_eq!(buf.replaced(), 2);
    }

    #[test]
    fn test_throttle_coalesces_burst() {
        let mut th = Throttle::new(33);
        assert_eq!(th.offer("a", t(0)), Some("a"));
        assert_eq!(th.offer("b", t(10)), None);
        assert_eq!(th.offer("c", t(20)), None);
        assert_eq!(th.poll(t(30)), None);
        assert_eq!(th.poll(t(33)), Some("c"));
        assert_eq!(th.poll(t(100)), None);
        assert_eq!(th.coalesced(), 1);
        assert_eq!(th.offer("d", t(110)), None);
        assert_eq!(th.flush(t(111)), Some("d"));
        assert_eq!(th.flush(t(112)), None);
    }

    #[test]
    fn test_scheduler_periods() {
        let mut s = Scheduler::start(t(0));
        assert_eq!(s.due(t(0)).len(), 3);
        assert!(s.due(t(1999)).is_empty());
        assert_eq!(s.due(t(2000)), vec![TimerKind::MountPoll]);
        assert_eq!(
            s.due(t(10_000)),
            vec![TimerKind::MountPoll, TimerKind::CalibrationRefresh]
        );
        // far behind: fires once, then resumes a full period later
        assert_eq!(s.due(t(70_000)).len(), 3);
        assert!(s.due(t(71_000)).is_empty());
        s.stop();
        assert!(!s.is_running());
        assert!(s.due(t(1_000_000)).is_empty());
    }

    #[test]
    fn test_clock_sync_timer_matches_staleness() {
        assert_eq!(TimerKind::ClockSync.period().num_milliseconds(), SYNC_PERIOD_MS);
    }

    #[test]
    fn test_wheel_factor() {
        assert!((wheel_zoom_factor(-100.0) - 1.2).abs() < 1e-12);
        assert!((wheel_zoom_factor(100.0) - 0.8).abs() < 1e-12);
        assert_eq!(wheel_zoom_factor(10_000.0), 0.05);
        assert!(InputEvent::Wheel { x: 0.0, y: 0.0, delta_y: 1.0 }.is_throttled());
        assert!(!InputEvent::PointerDown { x: 0.0, y: 0.0 }.is_throttled());
    }
}
