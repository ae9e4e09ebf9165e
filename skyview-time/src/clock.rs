//! Wall-clock sources for the chart.
//!
//! Every redraw asks a [`SkyClock`] for "now". The mount controller's clock
//! is authoritative for pointing, so [`ServerSyncedClock`] applies the offset
//! between the controller's reported time of day and the local clock.

use chrono::{DateTime, Duration, TimeZone, Utc};
use skyview_core::angle::parse_sexagesimal;
use skyview_core::{SkyError, SkyResult};
use tracing::{debug, warn};

/// Server time sync period; an offset older than this is stale.
pub const SYNC_PERIOD_MS: i64 = 60_000;

pub trait SkyClock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SkyClock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    at: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self { at }
    }

    pub fn set(&mut self, at: DateTime<Utc>) {
        self.at = at;
    }

    pub fn advance_millis(&mut self, ms: i64) {
        self.at += Duration::milliseconds(ms);
    }
}

impl SkyClock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.at
    }
}

impl<C: SkyClock + ?Sized> SkyClock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// Local clock corrected by the offset to a remote clock.
#[derive(Debug, Clone)]
pub struct ServerSyncedClock<C> {
    local: C,
    offset: Duration,
    last_sync: Option<DateTime<Utc>>,
}

impl<C: SkyClock> ServerSyncedClock<C> {
    pub fn new(local: C) -> Self {
        Self {
            local,
            offset: Duration::zero(),
            last_sync: None,
        }
    }

    pub fn offset(&self) -> Duration {
        self.offset
    }

    pub fn local(&self) -> &C {
        &self.local
    }

    pub fn local_mut(&mut self) -> &mut C {
        &mut self.local
    }

    /// True before the first sync and once the last one is older than one sync period.
    pub fn needs_sync(&self) -> bool {
        match self.last_sync {
            None => true,
            Some(at) => (self.local.now() - at).num_milliseconds() > SYNC_PERIOD_MS,
        }
    }

    /// Applies a server time-of-day string (`HH:MM:SS`, UTC).
    ///
    /// The server instant is placed on the local clock's UTC date and the
    /// resulting offset is folded into `[-12h, +12h]`, so a sync just after
    /// midnight on one side does not produce a day-long jump. On error the
    /// previous offset is kept.
    pub fn apply_server_time(&mut self, server_time: &str) -> SkyResult<Duration> {
        let local_now = self.local.now();
        let server_now = match server_instant(server_time, &local_now) {
            Ok(t) => t,
            Err(e) => {
                warn!(input = server_time, error = %e, "server time sync ignored");
                return Err(e);
            }
        };

        let mut offset = server_now - local_now;
        let half_day = Duration::hours(12);
        if offset > half_day {
            offset -= Duration::days(1);
        } else if offset < -half_day {
            offset += Duration::days(1);
        }

        debug!(offset_ms = offset.num_milliseconds(), "server time sync");
        self.offset = offset;
        self.last_sync = Some(local_now);
        Ok(offset)
    }
}

impl<C: SkyClock> SkyClock for ServerSyncedClock<C> {
    fn now(&self) -> DateTime<Utc> {
        self.local.now() + self.offset
    }
}

fn server_instant(server_time: &str, local_now: &DateTime<Utc>) -> SkyResult<DateTime<Utc>> {
    if !server_time.contains(':') {
        return Err(SkyError::malformed(
            "server time",
            server_time,
            "expected HH:MM:SS",
        ));
    }
    let hours = parse_sexagesimal(server_time)?;
    if !(0.0..24.0).contains(&hours) {
        return Err(SkyError::malformed(
            "server time",
            server_time,
            "hour outside 0..24",
        ));
    }
    let millis = (hours * 3_600_000.0).round() as i64;
    let midnight = local_now
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| SkyError::out_of_range("server time", "no midnight for local date"))?;
    Ok(Utc.from_utc_datetime(&midnight) + Duration::milliseconds(millis))
}
