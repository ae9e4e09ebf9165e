//! Telescope mount status and goto requests.
//!
//! The mount controller reports its pointing as raw values that may be
//! `DDD:MM:SS` strings or plain numbers. Azimuth is measured from north
//! through east, like the chart. Anything unparsable means "position
//! unknown", which hides the reticle rather than drawing it somewhere wrong.

use crate::catalog::CatalogObject;
use serde::{Deserialize, Serialize};
use skyview_coords::{FrameTransform, Horizontal};
use skyview_core::angle::{parse_dms, wrap_0_360, DmsFmt, HmsFmt};
use skyview_core::{Angle, SkyError, SkyResult};
use tracing::{debug, warn};

/// Screen radius of the mount reticle; the crosshair arms reach 1.3× further.
pub const RETICLE_RADIUS: f64 = 18.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAngle {
    Number(f64),
    Text(String),
}

impl RawAngle {
    pub fn degrees(&self) -> SkyResult<f64> {
        let value = match self {
            Self::Number(v) => *v,
            Self::Text(s) => parse_dms(s)?.degrees(),
        };
        if value.is_finite() {
            Ok(value)
        } else {
            Err(SkyError::malformed("mount angle", &format!("{:?}", self), "not finite"))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MountStatus {
    pub alt: Option<RawAngle>,
    pub az: Option<RawAngle>,
}

impl MountStatus {
    pub fn from_json(text: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Decoded pointing, or `None` when either axis is missing or malformed.
    pub fn position(&self) -> Option<Horizontal> {
        let (Some(alt), Some(az)) = (&self.alt, &self.az) else {
            return None;
        };
        match (alt.degrees(), az.degrees()) {
            (Ok(alt), Ok(az)) if (-90.0..=90.0).contains(&alt) => {
                Some(Horizontal::new(alt, wrap_0_360(az)))
            }
            (alt, az) => {
                warn!(?alt, ?az, "mount position unreadable");
                None
            }
        }
    }
}

/// Target sent to the mount, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GotoCommand {
    pub alt: f64,
    pub az: f64,
}

impl GotoCommand {
    pub fn from_horizontal(hz: Horizontal) -> Self {
        Self {
            alt: hz.alt_deg,
            az: hz.az_deg,
        }
    }
}

/// Remote mount controller.
pub trait MountService {
    fn status(&mut self) -> SkyResult<MountStatus>;

    fn goto(&mut self, command: GotoCommand) -> SkyResult<()>;
}

/// Goto fields for a selected object, as shown in the input boxes.
#[derive(Debug, Clone, PartialEq)]
pub struct GotoTarget {
    pub command: GotoCommand,
    pub alt: String,
    pub az: String,
    pub ra: String,
    pub dec: String,
}

impl GotoTarget {
    pub fn for_object(obj: &CatalogObject, frame: &FrameTransform) -> Self {
        Self::for_equatorial(obj.ra_hours, obj.dec_deg, frame)
    }

    pub fn for_equatorial(ra_hours: f64, dec_deg: f64, frame: &FrameTransform) -> Self {
        let hz = frame.to_horizontal(ra_hours, dec_deg);
        let dms = DmsFmt::default();
        Self {
            command: GotoCommand::from_horizontal(hz),
            alt: dms.fmt(Angle::from_degrees(hz.alt_deg)),
            az: dms.fmt(Angle::from_degrees(hz.az_deg)),
            ra: HmsFmt::default().fmt(Angle::from_hours(ra_hours)),
            dec: dms.fmt(Angle::from_degrees(dec_deg)),
        }
    }

    /// For horizontal targets such as calibration points.
    pub fn for_horizontal(hz: Horizontal, frame: &FrameTransform) -> Self {
        let eq = frame.to_equatorial(hz);
        let mut target = Self::for_equatorial(eq.ra_hours, eq.dec_deg, frame);
        target.command = GotoCommand::from_horizontal(hz);
        target
    }
}

/// Parses user-typed alt/az goto fields.
pub fn parse_goto(alt: &str, az: &str) -> SkyResult<GotoCommand> {
    let alt = parse_dms(alt)?.degrees();
    let az = parse_dms(az)?.degrees();
    if !(-90.0..=90.0).contains(&alt) {
        return Err(SkyError::out_of_range("goto altitude", "must be within ±90°"));
    }
    let command = GotoCommand {
        alt,
        az: wrap_0_360(az),
    };
    debug!(?command, "goto parsed");
    Ok(command)
}
