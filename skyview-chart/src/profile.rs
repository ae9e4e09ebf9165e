//! Device capability profile.
//!
//! A device-classification service assigns a tier and rendering hints; the
//! engine only consumes the result. When the service fails, the conservative
//! default (medium tier, 33 ms throttle, viewport culling on) is used.
//!
//! Magnitude ceilings per tier come from a table of zoom brackets. Each
//! bracket covers zoom levels strictly below `below_zoom`; the last bracket
//! has no upper bound.
//!
//! | group | low | medium | high |
//! |-------|-----|--------|------|
//! | stars | <2:4, <4:5, 6 | <2:5, <4:6, 7 | <2:5, <4:6, <6:7, 8 |
//! | galaxies | <4:12, <6:14, 16 | <4:14, <6:16, 18 | <4:10, <6:14.5, <8:19, 20.1 |
//! | clusters | <2:10, <4:12, 14 | <2:12, <4:14, 16 | <2:8, <4:12, <6:16, 18 |
//! | other | 20 | 20 | 20 |

use crate::catalog::ObjectClass;
use serde::{Deserialize, Serialize};
use skyview_core::SkyResult;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceTier {
    Low,
    #[default]
    Medium,
    High,
}

/// Which ceiling table row a class reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CeilingGroup {
    Stars,
    Galaxies,
    Clusters,
    Other,
}

impl CeilingGroup {
    pub fn for_class(class: ObjectClass) -> Self {
        match class {
            ObjectClass::Star => Self::Stars,
            ObjectClass::Galaxy => Self::Galaxies,
            ObjectClass::OpenCluster => Self::Clusters,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomBracket {
    /// Exclusive upper zoom bound; `None` for the open-ended last bracket.
    pub below_zoom: Option<f64>,
    pub magnitude: f64,
}

impl ZoomBracket {
    const fn below(zoom: f64, magnitude: f64) -> Self {
        Self {
            below_zoom: Some(zoom),
            magnitude,
        }
    }

    const fn rest(magnitude: f64) -> Self {
        Self {
            below_zoom: None,
            magnitude,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CeilingTable {
    pub stars: Vec<ZoomBracket>,
    pub galaxies: Vec<ZoomBracket>,
    pub clusters: Vec<ZoomBracket>,
    pub other: f64,
}

impl CeilingTable {
    pub fn for_tier(tier: DeviceTier) -> Self {
        use ZoomBracket as Z;
        match tier {
            DeviceTier::Low => Self {
                stars: vec![Z::below(2.0, 4.0), Z::below(4.0, 5.0), Z::rest(6.0)],
                galaxies: vec![Z::below(4.0, 12.0), Z::below(6.0, 14.0), Z::rest(16.0)],
                clusters: vec![Z::below(2.0, 10.0), Z::below(4.0, 12.0), Z::rest(14.0)],
                other: 20.0,
            },
            DeviceTier::Medium => Self {
                stars: vec![Z::below(2.0, 5.0), Z::below(4.0, 6.0), Z::rest(7.0)],
                galaxies: vec![Z::below(4.0, 14.0), Z::below(6.0, 16.0), Z::rest(18.0)],
                clusters: vec![Z::below(2.0, 12.0), Z::below(4.0, 14.0), Z::rest(16.0)],
                other: 20.0,
            },
            DeviceTier::High => Self {
                stars: vec![
                    Z::below(2.0, 5.0),
                    Z::below(4.0, 6.0),
                    Z::below(6.0, 7.0),
                    Z::rest(8.0),
                ],
                galaxies: vec![
                    Z::below(4.0, 10.0),
                    Z::below(6.0, 14.5),
                    Z::below(8.0, 19.0),
                    Z::rest(20.1),
                ],
                clusters: vec![
                    Z::below(2.0, 8.0),
                    Z::below(4.0, 12.0),
                    Z::below(6.0, 16.0),
                    Z::rest(18.0),
                ],
                other: 20.0,
            },
        }
    }

    pub fn ceiling(&self, group: CeilingGroup, zoom: f64) -> f64 {
        let brackets = match group {
            CeilingGroup::Stars => &self.stars,
            CeilingGroup::Galaxies => &self.galaxies,
            CeilingGroup::Clusters => &self.clusters,
            CeilingGroup::Other => return self.other,
        };
        brackets
            .iter()
            .find(|b| b.below_zoom.map_or(true, |limit| zoom < limit))
            .or_else(|| brackets.last())
            .map_or(self.other, |b| b.magnitude)
    }

    /// Rewrites the table so every row is non-decreasing in zoom.
    ///
    /// A supplied table with a dip would make objects vanish on zoom-in.
    fn monotone(mut self) -> Self {
        for row in [&mut self.stars, &mut self.galaxies, &mut self.clusters] {
            let mut floor = f64::NEG_INFINITY;
            for bracket in row.iter_mut() {
                bracket.magnitude = bracket.magnitude.max(floor);
                floor = bracket.magnitude;
            }
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceProfile {
    pub tier: DeviceTier,
    pub throttle_ms: u64,
    pub viewport_culling: bool,
    pub max_stars: usize,
    /// Overrides the built-in table for the tier.
    pub ceilings: Option<CeilingTable>,
}

impl Default for DeviceProfile {
    fn default() -> Self {
        Self::conservative()
    }
}

impl DeviceProfile {
    /// The fallback used when classification is unavailable.
    pub fn conservative() -> Self {
        Self {
            tier: DeviceTier::Medium,
            throttle_ms: 33,
            viewport_culling: true,
            max_stars: 3000,
            ceilings: None,
        }
    }

    pub fn for_tier(tier: DeviceTier) -> Self {
        let (throttle_ms, max_stars) = match tier {
            DeviceTier::Low => (50, 1500),
            DeviceTier::Medium => (33, 3000),
            DeviceTier::High => (16, 10_000),
        };
        Self {
            tier,
            throttle_ms,
            max_stars,
            ..Self::conservative()
        }
    }

    pub fn ceiling_table(&self) -> CeilingTable {
        self.ceilings
            .clone()
            .map(CeilingTable::monotone)
            .unwrap_or_else(|| CeilingTable::for_tier(self.tier))
    }

    pub fn from_json(text: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// External classifier of the rendering device.
pub trait DeviceProfileService {
    fn profile(&self) -> SkyResult<DeviceProfile>;
}

/// Asks the service, substituting the conservative default on failure.
pub fn resolve_profile(service: &dyn DeviceProfileService) -> DeviceProfile {
    match service.profile() {
        Ok(profile) => profile,
        Err(e) => {
            warn!(error = %e, "device profile unavailable, using conservative default");
            DeviceProfile::conservative()
        }
    }
}
