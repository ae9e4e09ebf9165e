//! Catalog entities and tolerant loading.
//!
//! Catalog files are JSON arrays in the field layout of the observatory
//! exports (`RtAsc` hours, `Declin` degrees, `Mag`, `Name`, `HIPNum`, ...).
//! Numbers may arrive as strings. A record that cannot be read is dropped
//! with a warning; a file that cannot be read falls back to the secondary
//! source and then to an empty list, so a missing catalog never stops the
//! chart from drawing.
//!
//! | File | Contents |
//! |------|----------|
//! | `stars` | Star records |
//! | `galaxies`, `open_clusters`, `globular_clusters`, `nebula`, `planetary_nebula` | Deep-sky records |
//! | `messier` | Named deep-sky objects, sexagesimal `ra`/`dec` strings |
//! | `constellations` | GeoJSON `FeatureCollection` of `LineString`/`MultiLineString`, degrees |

use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use skyview_core::angle::{parse_dms, parse_hms};
use skyview_core::{SkyError, SkyResult};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectClass {
    Star,
    Galaxy,
    OpenCluster,
    GlobularCluster,
    Nebula,
    PlanetaryNebula,
    SolarSystem,
    Constellation,
    Calibration,
}

impl ObjectClass {
    /// Classes drawn as glyphs from catalog positions, in draw order.
    pub const GLYPH_CLASSES: [ObjectClass; 7] = [
        ObjectClass::Galaxy,
        ObjectClass::OpenCluster,
        ObjectClass::GlobularCluster,
        ObjectClass::Nebula,
        ObjectClass::PlanetaryNebula,
        ObjectClass::Star,
        ObjectClass::SolarSystem,
    ];

    pub fn is_deep_sky(self) -> bool {
        matches!(
            self,
            Self::Galaxy
                | Self::OpenCluster
                | Self::GlobularCluster
                | Self::Nebula
                | Self::PlanetaryNebula
        )
    }

    /// Magnitude assumed when a record omits one; `None` means the field is required.
    fn default_magnitude(self) -> Option<f64> {
        match self {
            Self::Star => None,
            Self::Galaxy => Some(0.0),
            Self::OpenCluster | Self::GlobularCluster | Self::Nebula => Some(10.0),
            Self::PlanetaryNebula => Some(12.0),
            Self::SolarSystem | Self::Constellation | Self::Calibration => Some(0.0),
        }
    }

    fn from_type_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "gx" | "galaxy" => Some(Self::Galaxy),
            "oc" | "open cluster" => Some(Self::OpenCluster),
            "gc" | "globular cluster" => Some(Self::GlobularCluster),
            "nb" | "neb" | "nebula" => Some(Self::Nebula),
            "pn" | "planetary nebula" => Some(Self::PlanetaryNebula),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogObject {
    pub name: Option<String>,
    pub class: ObjectClass,
    pub ra_hours: f64,
    pub dec_deg: f64,
    pub magnitude: f64,
    pub hip: Option<u32>,
    pub hd: Option<u32>,
    pub hr: Option<u32>,
    pub spectral_type: Option<String>,
    /// Apparent size; open clusters use it for the glyph radius.
    pub size: Option<f64>,
}

impl CatalogObject {
    pub fn new(class: ObjectClass, ra_hours: f64, dec_deg: f64, magnitude: f64) -> Self {
        Self {
            name: None,
            class,
            ra_hours,
            dec_deg,
            magnitude,
            hip: None,
            hd: None,
            hr: None,
            spectral_type: None,
            size: None,
        }
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Display name, falling back to catalog numbers.
    pub fn display_name(&self) -> Option<String> {
        self.name
            .clone()
            .or_else(|| self.hip.map(|n| format!("HIP {}", n)))
            .or_else(|| self.hd.map(|n| format!("HD {}", n)))
    }
}

/// Back-reference from a drawn glyph to its catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogRef {
    pub class: ObjectClass,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstellationFigure {
    pub id: String,
    /// Polylines of `(ra_hours, dec_deg)` vertices.
    pub lines: Vec<Vec<(f64, f64)>>,
}

impl ConstellationFigure {
    pub fn vertices(&self) -> impl Iterator<Item = &(f64, f64)> {
        self.lines.iter().flatten()
    }
}

/// A mount-model calibration sample, already in horizontal coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationPoint {
    pub az_deg: f64,
    pub alt_deg: f64,
    pub enabled: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub stars: Vec<CatalogObject>,
    pub galaxies: Vec<CatalogObject>,
    pub open_clusters: Vec<CatalogObject>,
    pub globular_clusters: Vec<CatalogObject>,
    pub nebulae: Vec<CatalogObject>,
    pub planetary_nebulae: Vec<CatalogObject>,
    pub solar_system: Vec<CatalogObject>,
    /// Named deep-sky objects; label anchors only.
    pub messier: Vec<CatalogObject>,
    pub constellations: Vec<ConstellationFigure>,
    pub calibration: Vec<CalibrationPoint>,
}

impl Catalog {
    pub fn objects(&self, class: ObjectClass) -> &[CatalogObject] {
        match class {
            ObjectClass::Star => &self.stars,
            ObjectClass::Galaxy => &self.galaxies,
            ObjectClass::OpenCluster => &self.open_clusters,
            ObjectClass::GlobularCluster => &self.globular_clusters,
            ObjectClass::Nebula => &self.nebulae,
            ObjectClass::PlanetaryNebula => &self.planetary_nebulae,
            ObjectClass::SolarSystem => &self.solar_system,
            ObjectClass::Constellation | ObjectClass::Calibration => &[],
        }
    }

    pub fn get(&self, r: CatalogRef) -> Option<&CatalogObject> {
        self.objects(r.class).get(r.index)
    }

    pub fn len(&self) -> usize {
        ObjectClass::GLYPH_CLASSES
            .iter()
            .map(|c| self.objects(*c).len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Provider of raw catalog JSON by file stem.
pub trait CatalogSource {
    fn fetch(&self, name: &str) -> Result<String>;

    fn describe(&self) -> String;
}

/// Reads `<root>/<prefix><name>.json`.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
    prefix: String,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>, prefix: &str) -> Self {
        Self {
            root: root.into(),
            prefix: prefix.to_string(),
        }
    }

    /// Epoch-corrected exports, `corrected_<name>.json`.
    pub fn corrected(root: impl Into<PathBuf>) -> Self {
        Self::new(root, "corrected_")
    }

    pub fn plain(root: impl Into<PathBuf>) -> Self {
        Self::new(root, "")
    }
}

impl CatalogSource for DirectorySource {
    fn fetch(&self, name: &str) -> Result<String> {
        let path = self.root.join(format!("{}{}.json", self.prefix, name));
        Ok(fs::read_to_string(path)?)
    }

    fn describe(&self) -> String {
        format!("{}/{}*.json", self.root.display(), self.prefix)
    }
}

/// Loads every catalog file, trying the primary source before the fallback.
pub struct CatalogLoader {
    primary: Box<dyn CatalogSource>,
    fallback: Option<Box<dyn CatalogSource>>,
}

impl CatalogLoader {
    pub fn new(primary: Box<dyn CatalogSource>) -> Self {
        Self {
            primary,
            fallback: None,
        }
    }

    pub fn with_fallback(mut self, fallback: Box<dyn CatalogSource>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn load(&self) -> Catalog {
        let catalog = Catalog {
            stars: self.load_objects("stars", ObjectClass::Star),
            galaxies: self.load_objects("galaxies", ObjectClass::Galaxy),
            open_clusters: self.load_objects("open_clusters", ObjectClass::OpenCluster),
            globular_clusters: self.load_objects("globular_clusters", ObjectClass::GlobularCluster),
            nebulae: self.load_objects("nebula", ObjectClass::Nebula),
            planetary_nebulae: self.load_objects("planetary_nebula", ObjectClass::PlanetaryNebula),
            messier: self.load_with("messier", parse_messier),
            constellations: self.load_with("constellations", parse_constellations),
            ..Catalog::default()
        };
        debug!(
            stars = catalog.stars.len(),
            deep_sky = catalog.len() - catalog.stars.len(),
            constellations = catalog.constellations.len(),
            "catalog loaded"
        );
        catalog
    }

    fn load_objects(&self, name: &str, class: ObjectClass) -> Vec<CatalogObject> {
        self.load_with(name, |text| parse_objects(text, class))
    }

    fn load_with<T>(&self, name: &str, parse: impl Fn(&str) -> Result<Vec<T>>) -> Vec<T> {
        let sources = std::iter::once(self.primary.as_ref()).chain(self.fallback.as_deref());
        for source in sources {
            match source.fetch(name).and_then(|text| parse(&text)) {
                Ok(items) => return items,
                Err(e) => warn!(
                    catalog = name,
                    source = %source.describe(),
                    error = %e,
                    "catalog source failed"
                ),
            }
        }
        warn!(catalog = name, "no catalog source available, using empty list");
        Vec::new()
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Lenient {
    Num(f64),
    Text(String),
}

impl Lenient {
    fn value(&self) -> Option<f64> {
        let v = match self {
            Self::Num(v) => *v,
            Self::Text(s) => s.trim().parse().ok()?,
        };
        v.is_finite().then_some(v)
    }
}

#[derive(Debug, Deserialize)]
struct ObjectRecord {
    #[serde(rename = "RtAsc")]
    ra: Option<Lenient>,
    #[serde(rename = "Declin")]
    dec: Option<Lenient>,
    #[serde(rename = "Mag", alias = "mag")]
    mag: Option<Lenient>,
    #[serde(rename = "Name", alias = "name")]
    name: Option<String>,
    #[serde(rename = "HIPNum")]
    hip: Option<Lenient>,
    #[serde(rename = "HDNum")]
    hd: Option<Lenient>,
    #[serde(rename = "HRNum")]
    hr: Option<Lenient>,
    #[serde(rename = "SpectType")]
    spectral_type: Option<String>,
    #[serde(rename = "Size")]
    size: Option<Lenient>,
}

fn required(field: &Option<Lenient>, what: &str) -> SkyResult<f64> {
    field
        .as_ref()
        .and_then(Lenient::value)
        .ok_or_else(|| SkyError::malformed("catalog record", what, "missing or not a number"))
}

fn catalog_number(field: &Option<Lenient>) -> Option<u32> {
    field
        .as_ref()
        .and_then(Lenient::value)
        .filter(|v| *v > 0.0 && *v <= u32::MAX as f64)
        .map(|v| v as u32)
}

fn clean_name(name: Option<String>) -> Option<String> {
    name.map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty() && n != "NoName")
}

impl ObjectRecord {
    fn into_object(self, class: ObjectClass) -> SkyResult<CatalogObject> {
        let ra_hours = required(&self.ra, "RtAsc")?;
        let dec_deg = required(&self.dec, "Declin")?;
        if !(-90.0..=90.0).contains(&dec_deg) {
            return Err(SkyError::out_of_range("catalog record", "Declin beyond a pole"));
        }
        let magnitude = match (self.mag.as_ref().and_then(Lenient::value), class.default_magnitude()) {
            (Some(m), _) => m,
            (None, Some(m)) => m,
            (None, None) => return Err(SkyError::malformed("catalog record", "Mag", "missing")),
        };
        Ok(CatalogObject {
            name: clean_name(self.name),
            class,
            ra_hours,
            dec_deg,
            magnitude,
            hip: catalog_number(&self.hip),
            hd: catalog_number(&self.hd),
            hr: catalog_number(&self.hr),
            spectral_type: self.spectral_type.filter(|s| !s.trim().is_empty()),
            size: self.size.as_ref().and_then(Lenient::value),
        })
    }
}

/// Applies `convert` to every element of a JSON array, dropping failures.
fn parse_records<T>(
    values: Vec<Value>,
    what: &str,
    convert: impl Fn(Value) -> SkyResult<T>,
) -> Vec<T> {
    let total = values.len();
    let items: Vec<T> = values
        .into_iter()
        .enumerate()
        .filter_map(|(i, v)| match convert(v) {
            Ok(item) => Some(item),
            Err(e) => {
                debug!(catalog = what, index = i, error = %e, "record dropped");
                None
            }
        })
        .collect();
    if items.len() < total {
        warn!(catalog = what, dropped = total - items.len(), "malformed records dropped");
    }
    items
}

fn from_value<T: for<'de> Deserialize<'de>>(v: Value, what: &str) -> SkyResult<T> {
    serde_json::from_value(v).map_err(|e| SkyError::malformed(what, "record", &e.to_string()))
}

pub fn parse_objects(text: &str, class: ObjectClass) -> Result<Vec<CatalogObject>> {
    let values: Vec<Value> = serde_json::from_str(text)?;
    Ok(parse_records(values, "objects", |v| {
        from_value::<ObjectRecord>(v, "catalog record")?.into_object(class)
    }))
}

#[derive(Debug, Deserialize)]
struct MessierRecord {
    name: String,
    ra: Option<String>,
    dec: Option<String>,
    mag: Option<Lenient>,
    ra_corrected_hours: Option<f64>,
    dec_corrected_degrees: Option<f64>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

impl MessierRecord {
    fn into_object(self) -> SkyResult<CatalogObject> {
        let (ra_hours, dec_deg) = match (self.ra_corrected_hours, self.dec_corrected_degrees) {
            (Some(ra), Some(dec)) => (ra, dec),
            _ => {
                let ra = self.ra.as_deref().unwrap_or_default();
                let dec = self.dec.as_deref().unwrap_or_default();
                (parse_hms(ra)?.hours(), parse_dms(dec)?.degrees())
            }
        };
        let class = self
            .kind
            .as_deref()
            .and_then(ObjectClass::from_type_code)
            .unwrap_or(ObjectClass::Nebula);
        let magnitude = self.mag.as_ref().and_then(Lenient::value).unwrap_or(99.0);
        Ok(CatalogObject::new(class, ra_hours, dec_deg, magnitude).named(&self.name))
    }
}

pub fn parse_messier(text: &str) -> Result<Vec<CatalogObject>> {
    let values: Vec<Value> = serde_json::from_str(text)?;
    Ok(parse_records(values, "messier", |v| {
        from_value::<MessierRecord>(v, "messier record")?.into_object()
    }))
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
enum Geometry {
    LineString(Vec<[f64; 2]>),
    MultiLineString(Vec<Vec<[f64; 2]>>),
}

#[derive(Debug, Deserialize)]
struct Feature {
    id: String,
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    features: Vec<Value>,
}

fn to_hours(line: Vec<[f64; 2]>) -> Vec<(f64, f64)> {
    line.into_iter().map(|[ra, dec]| (ra / 15.0, dec)).collect()
}

pub fn parse_constellations(text: &str) -> Result<Vec<ConstellationFigure>> {
    let collection: FeatureCollection = serde_json::from_str(text)?;
    Ok(parse_records(collection.features, "constellations", |v| {
        let f: Feature = from_value(v, "constellation feature")?;
        let lines = match f.geometry {
            Geometry::LineString(line) => vec![to_hours(line)],
            Geometry::MultiLineString(lines) => lines.into_iter().map(to_hours).collect(),
        };
        Ok(ConstellationFigure { id: f.id, lines })
    }))
}

#[derive(Debug, Deserialize)]
struct SolarRecord {
    ra: Option<f64>,
    dec: Option<f64>,
}

/// Parses the solar-system feed: an object keyed by body name with `ra` (hours) and `dec`.
///
/// Bodies with null coordinates are skipped; an `error` key yields an empty list.
pub fn parse_solar_system(text: &str) -> Result<Vec<CatalogObject>> {
    let map: serde_json::Map<String, Value> = serde_json::from_str(text)?;
    if let Some(err) = map.get("error") {
        warn!(error = %err, "solar system feed reported an error");
        return Ok(Vec::new());
    }
    let mut bodies: Vec<CatalogObject> = map
        .into_iter()
        .filter_map(|(name, v)| {
            let rec: SolarRecord = serde_json::from_value(v).ok()?;
            let (ra, dec) = (rec.ra?, rec.dec?);
            (ra.is_finite() && dec.is_finite())
                .then(|| CatalogObject::new(ObjectClass::SolarSystem, ra, dec, 0.0).named(&name))
        })
        .collect();
    bodies.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(bodies)
}

#[derive(Debug, Deserialize)]
struct CalibrationRecord {
    /// Azimuth, in the field the mount controller names `ra`.
    ra: f64,
    /// Altitude, in the field the mount controller names `dec`.
    dec: f64,
    #[serde(default = "default_enabled")]
    enabled: bool,
}

fn default_enabled() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CalibrationPayload {
    Wrapped { points: Vec<Value> },
    Bare(Vec<Value>),
}

pub fn parse_calibration_points(text: &str) -> Result<Vec<CalibrationPoint>> {
    let values = match serde_json::from_str(text)? {
        CalibrationPayload::Wrapped { points } => points,
        CalibrationPayload::Bare(points) => points,
    };
    Ok(parse_records(values, "calibration", |v| {
        let rec: CalibrationRecord = from_value(v, "calibration point")?;
        Ok(CalibrationPoint {
            az_deg: skyview_core::angle::wrap_0_360(rec.ra),
            alt_deg: rec.dec,
            enabled: rec.enabled,
        })
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::collections::HashMap;

    struct MemorySource(HashMap<&'static str, &'static str>);

    impl CatalogSource for MemorySource {
        fn fetch(&self, name: &str) -> Result<String> {
            self.0
                .get(name)
                .map(|s| s.to_string())
                .ok_or_else(|| Error::Sky(SkyError::data_unavailable("memory", name, "absent")))
        }

        fn describe(&self) -> String {
            "memory".into()
        }
    }

    #[test]
    fn test_parses_star_records() {
        let text = r#"[
            {"RtAsc": 6.752, "Declin": -16.716, "Mag": -1.46, "Name": "Sirius", "HIPNum": 32349, "SpectType": "A1V"},
            {"RtAsc": "5.919", "Declin": "7.407", "Mag": "0.45", "Name": "NoName", "HDNum": 39801},
            {"RtAsc": 1.0, "Declin": 95.0, "Mag": 3.0},
            {"RtAsc": 1.0, "Declin": 5.0},
            {"Declin": 5.0, "Mag": 3.0}
        ]"#;
        let stars = parse_objects(text, ObjectClass::Star).unwrap();
        assert_eq!(stars.len(), 2);
        assert_eq!(stars[0].name.as_deref(), Some("Sirius"));
        assert_eq!(stars[0].hip, Some(32349));
        assert_eq!(stars[1].name, None);
        assert_eq!(stars[1].display_name().as_deref(), Some("HD 39801"));
        assert!((stars[1].magnitude - 0.45).abs() < 1e-12);
    }

    #[test]
    fn test_deep_sky_defaults_magnitude() {
        let text = r#"[{"RtAsc": 0.71, "Declin": 41.27, "Name": "NGC 224", "Size": "178"}]"#;
        let gal = parse_objects(text, ObjectClass::Galaxy).unwrap();
        assert_eq!(gal[0].magnitude, 0.0);
        assert_eq!(gal[0].size, Some(178.0));
    }

    #[test]
    fn test_parses_messier_strings_and_corrections() {
        let text = r#"[
            {"name": "M42", "ra": "05:35:17", "dec": "-05:23:28", "mag": 4.0},
            {"name": "M31", "ra": "00:42:44", "dec": "+41:16:09", "mag": 3.4,
             "ra_corrected_hours": 0.7250, "dec_corrected_degrees": 41.40, "type": "Gx"},
            {"name": "bad", "ra": "xx", "dec": "+00:00:00"}
        ]"#;
        let m = parse_messier(text).unwrap();
        assert_eq!(m.len(), 2);
        assert!((m[0].ra_hours - (5.0 + 35.0 / 60.0 + 17.0 / 3600.0)).abs() < 1e-9);
        assert!(m[0].dec_deg < -5.0);
        assert_eq!(m[1].class, ObjectClass::Galaxy);
        assert_eq!(m[1].ra_hours, 0.7250);
    }

    #[test]
    fn test_parses_constellation_geojson() {
        let text = r#"{"type": "FeatureCollection", "features": [
            {"id": "Ori", "geometry": {"type": "LineString", "coordinates": [[88.79, 7.41], [81.28, 6.35]]}},
            {"id": "UMa", "geometry": {"type": "MultiLineString", "coordinates": [[[165.0, 56.0], [178.0, 53.0]], [[183.0, 57.0], [193.0, 55.0]]]}},
            {"id": "Bad", "geometry": {"type": "Point", "coordinates": [1.0, 2.0]}}
        ]}"#;
        let figures = parse_constellations(text).unwrap();
        assert_eq!(figures.len(), 2);
        assert!((figures[0].lines[0][0].0 - 88.79 / 15.0).abs() < 1e-12);
        assert_eq!(figures[1].lines.len(), 2);
        assert_eq!(figures[1].vertices().count(), 4);
    }

    #[test]
    fn test_parses_solar_system_feed() {
        let text = r#"{"sun": {"ra": 13.2, "dec": -8.0}, "moon": {"ra": null, "dec": 3.0}, "mars": {"ra": 2.0, "dec": 11.0}}"#;
        let bodies = parse_solar_system(text).unwrap();
        let names: Vec<_> = bodies.iter().filter_map(|b| b.name.as_deref()).collect();
        assert_eq!(names, vec!["mars", "sun"]);
        assert!(parse_solar_system(r#"{"error": "ephemeris offline"}"#).unwrap().is_empty());
    }

    #[test]
    fn test_parses_calibration_points() {
        let text = r#"{"points": [{"ra": 370.0, "dec": 45.0, "enabled": false}, {"ra": 90.0, "dec": 10.0}]}"#;
        let pts = parse_calibration_points(text).unwrap();
        assert_eq!(pts.len(), 2);
        assert!((pts[0].az_deg - 10.0).abs() < 1e-9);
        assert!(!pts[0].enabled);
        assert!(pts[1].enabled);
        assert_eq!(parse_calibration_points("[]").unwrap().len(), 0);
    }

    #[test]
    fn test_loader_falls_back_then_empties() {
        let primary = MemorySource(HashMap::from([
            ("stars", "not json"),
            ("galaxies", r#"[{"RtAsc": 1.0, "Declin": 2.0, "Mag": 9.0}]"#),
        ]));
        let fallback = MemorySource(HashMap::from([(
            "stars",
            r#"[{"RtAsc": 1.0, "Declin": 2.0, "Mag": 3.0, "Name": "Fallback"}]"#,
        )]));
        let catalog = CatalogLoader::new(Box::new(primary))
            .with_fallback(Box::new(fallback))
            .load();
        assert_eq!(catalog.stars[0].name.as_deref(), Some("Fallback"));
        assert_eq!(catalog.galaxies.len(), 1);
        assert!(catalog.nebulae.is_empty());
        assert!(catalog.constellations.is_empty());
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_directory_source_reads_prefixed_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("corrected_stars.json"),
            r#"[{"RtAsc": 18.6, "Declin": 38.8, "Mag": 0.03, "Name": "Vega"}]"#,
        )
        .unwrap();
        let catalog = CatalogLoader::new(Box::new(DirectorySource::corrected(dir.path())))
            .with_fallback(Box::new(DirectorySource::plain(dir.path())))
            .load();
        assert_eq!(catalog.stars.len(), 1);
        let r = CatalogRef {
            class: ObjectClass::Star,
            index: 0,
        };
        assert_eq!(catalog.get(r).and_then(|o| o.name.as_deref()), Some("Vega"));
    }
}
