//! Persisted view toggles and the mirror flag.
//!
//! State is restored field by field: any key that is missing or not a
//! boolean keeps its default, and a file that is not JSON at all yields the
//! full default set. Saving never fails the caller's redraw; errors are
//! returned for the UI to report.

use crate::catalog::ObjectClass;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewToggles {
    pub stars: bool,
    pub star_names: bool,
    pub constellations: bool,
    pub constellation_labels: bool,
    pub messier_names: bool,
    pub galaxies: bool,
    pub open_clusters: bool,
    pub globular_clusters: bool,
    pub nebulae: bool,
    pub planetary_nebulae: bool,
    pub calibration_points: bool,
    pub solar_system: bool,
    pub night_mode: bool,
}

impl Default for ViewToggles {
    fn default() -> Self {
        Self {
            stars: true,
            star_names: true,
            constellations: true,
            constellation_labels: false,
            messier_names: true,
            galaxies: false,
            open_clusters: false,
            globular_clusters: false,
            nebulae: false,
            planetary_nebulae: false,
            calibration_points: false,
            solar_system: true,
            night_mode: false,
        }
    }
}

impl ViewToggles {
    /// Whether glyphs of `class` are drawn (and therefore pickable).
    pub fn shows(&self, class: ObjectClass) -> bool {
        match class {
            ObjectClass::Star => self.stars,
            ObjectClass::Galaxy => self.galaxies,
            ObjectClass::OpenCluster => self.open_clusters,
            ObjectClass::GlobularCluster => self.globular_clusters,
            ObjectClass::Nebula => self.nebulae,
            ObjectClass::PlanetaryNebula => self.planetary_nebulae,
            ObjectClass::SolarSystem => self.solar_system,
            ObjectClass::Constellation => self.constellations,
            ObjectClass::Calibration => self.calibration_points,
        }
    }

    fn fields_mut(&mut self) -> [(&'static str, &mut bool); 13] {
        [
            ("stars", &mut self.stars),
            ("star_names", &mut self.star_names),
            ("constellations", &mut self.constellations),
            ("constellation_labels", &mut self.constellation_labels),
            ("messier_names", &mut self.messier_names),
            ("galaxies", &mut self.galaxies),
            ("open_clusters", &mut self.open_clusters),
            ("globular_clusters", &mut self.globular_clusters),
            ("nebulae", &mut self.nebulae),
            ("planetary_nebulae", &mut self.planetary_nebulae),
            ("calibration_points", &mut self.calibration_points),
            ("solar_system", &mut self.solar_system),
            ("night_mode", &mut self.night_mode),
        ]
    }

    fn overlay(&mut self, saved: &Map<String, Value>) -> usize {
        let mut restored = 0;
        for (key, slot) in self.fields_mut() {
            if let Some(Value::Bool(b)) = saved.get(key) {
                *slot = *b;
                restored += 1;
            }
        }
        restored
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub toggles: ViewToggles,
    pub mirrored: bool,
}

impl ViewState {
    /// Lenient restore; see the module docs.
    pub fn from_json(text: &str) -> Self {
        let mut state = Self::default();
        let root = match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(map)) => map,
            Ok(_) | Err(_) => {
                warn!("view state unreadable, using defaults");
                return state;
            }
        };
        if let Some(Value::Object(toggles)) = root.get("toggles") {
            let restored = state.toggles.overlay(toggles);
            debug!(restored, "view toggles restored");
        }
        if let Some(Value::Bool(m)) = root.get("mirrored") {
            state.mirrored = *m;
        }
        state
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Where view state lives between sessions.
pub trait StateStore {
    fn load(&self) -> ViewState;

    fn save(&mut self, state: &ViewState) -> Result<()>;
}

/// JSON file store.
#[derive(Debug, Clone)]
pub struct FileStateStore {
    path: PathBuf,
}

impl FileStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl StateStore for FileStateStore {
    fn load(&self) -> ViewState {
        match fs::read_to_string(&self.path) {
            Ok(text) => ViewState::from_json(&text),
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "no saved view state");
                ViewState::default()
            }
        }
    }

    fn save(&mut self, state: &ViewState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, state.to_json()?)?;
        Ok(())
    }
}

/// Non-persistent store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStateStore {
    pub saved: Option<ViewState>,
}

impl StateStore for MemoryStateStore {
    fn load(&self) -> ViewState {
        self.saved.unwrap_or_default()
    }

    fn save(&mut self, state: &ViewState) -> Result<()> {
        self.saved = Some(*state);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_first_run() {
        let t = ViewToggles::default();
        assert!(t.stars && t.star_names && t.constellations && t.messier_names && t.solar_system);
        assert!(!t.galaxies && !t.calibration_points && !t.night_mode && !t.constellation_labels);
        assert!(!ViewState::default().mirrored);
    }

    #[test]
    fn test_partial_state_keeps_other_defaults() {
        let s = ViewState::from_json(
            r#"{"toggles": {"galaxies": true, "stars": "yes", "night_mode": true}, "mirrored": true}"#,
        );
        assert!(s.toggles.galaxies);
        assert!(s.toggles.night_mode);
        assert!(s.toggles.stars);
        assert!(s.mirrored);
    }

    #[test]
    fn test_corrupt_state_is_default() {
        assert_eq!(ViewState::from_json("{not json"), ViewState::default());
        assert_eq!(ViewState::from_json("[1,2]"), ViewState::default());
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStateStore::new(dir.path().join("nested").join("view.json"));
        assert_eq!(store.load(), ViewState::default());

        let mut state = ViewState::default();
        state.toggles.nebulae = true;
        state.mirrored = true;
        store.save(&state).unwrap();
        assert_eq!(store.load(), state);
    }

    #[test]
    fn test_calibration_visibility_follows_toggle() {
        let mut t = ViewToggles::default();
        assert!(!t.shows(ObjectClass::Calibration));
        t.calibration_points = true;
        assert!(t.shows(ObjectClass::Calibration));
    }
}
