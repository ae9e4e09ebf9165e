//! Colors and the night-mode palette.
//!
//! In night mode every foreground element is drawn pure red on black so the
//! chart does not spoil dark adaptation.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);

    pub fn alpha_f64(&self) -> f64 {
        self.a as f64 / 255.0
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// What a color is used for; selects the day color and the night override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Background,
    Border,
    Grid,
    Compass,
    ConstellationLine,
    Galaxy,
    OpenCluster,
    GlobularCluster,
    Nebula,
    PlanetaryNebula,
    StarLabel,
    DeepSkyLabel,
    ConstellationLabel,
    Reticle,
    Selection,
    CalibrationEnabled,
    CalibrationDisabled,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Palette {
    pub night_mode: bool,
}

impl Palette {
    pub fn new(night_mode: bool) -> Self {
        Self { night_mode }
    }

    pub fn color(&self, role: Role) -> Color {
        self.resolve(day_color(role), role == Role::Background)
    }

    /// Star fill by the first letter of the spectral type.
    pub fn star(&self, spectral_type: Option<&str>) -> Color {
        let day = match spectral_type
            .and_then(|s| s.chars().next())
            .map(|c| c.to_ascii_uppercase())
        {
            Some('O') => Color::rgb(0x9b, 0xb0, 0xff),
            Some('B') => Color::rgb(0xaa, 0xbf, 0xff),
            Some('A') => Color::rgb(0xca, 0xd7, 0xff),
            Some('F') => Color::rgb(0xf8, 0xf7, 0xff),
            Some('G') => Color::rgb(0xff, 0xf4, 0xea),
            Some('K') => Color::rgb(0xff, 0xd2, 0xa1),
            Some('M') => Color::rgb(0xb8, 0x3d, 0x3b),
            _ => Color::WHITE,
        };
        self.resolve(day, false)
    }

    pub fn solar_body(&self, body: &str) -> Color {
        self.resolve(solar_body_style(body).1, false)
    }

    fn resolve(&self, day: Color, background: bool) -> Color {
        match (self.night_mode, background) {
            (false, _) => day,
            (true, true) => Color::BLACK,
            (true, false) => Color::rgba(255, 0, 0, day.a),
        }
    }
}

fn day_color(role: Role) -> Color {
    match role {
        Role::Background => Color::rgb(0x05, 0x07, 0x12),
        Role::Border => Color::rgb(0x88, 0x88, 0x88),
        Role::Grid => Color::rgba(0x88, 0x88, 0x88, 0x80),
        Role::Compass => Color::rgb(0xdd, 0xdd, 0xdd),
        Role::ConstellationLine => Color::rgba(0x66, 0x88, 0xcc, 0xa0),
        Role::Galaxy => Color::rgb(255, 100, 150),
        Role::OpenCluster => Color::rgb(0xff, 0xd7, 0x00),
        Role::GlobularCluster => Color::rgb(0xff, 0xa5, 0x00),
        Role::Nebula => Color::rgb(0x00, 0xff, 0x7f),
        Role::PlanetaryNebula => Color::rgb(0x40, 0xe0, 0xd0),
        Role::StarLabel => Color::rgba(255, 255, 255, 178),
        Role::DeepSkyLabel => Color::rgba(224, 195, 252, 230),
        Role::ConstellationLabel => Color::rgba(224, 195, 252, 250),
        Role::Reticle => Color::rgb(0x00, 0xff, 0x00),
        Role::Selection => Color::rgba(255, 120, 30, 191),
        Role::CalibrationEnabled => Color::rgb(255, 255, 0),
        Role::CalibrationDisabled => Color::RED,
    }
}

/// Base glyph size in pixels and day color for a solar-system body, by name.
pub fn solar_body_style(body: &str) -> (f64, Color) {
    match body.to_ascii_lowercase().as_str() {
        "sun" => (12.0, Color::rgb(0xff, 0xdd, 0x00)),
        "moon" => (10.0, Color::rgb(0xdd, 0xdd, 0xdd)),
        "mercury" => (6.0, Color::rgb(0x8c, 0x78, 0x53)),
        "venus" => (7.0, Color::rgb(0xff, 0xc6, 0x49)),
        "mars" => (7.0, Color::rgb(0xcd, 0x5c, 0x5c)),
        "jupiter" => (10.0, Color::rgb(0xd8, 0xca, 0x9d)),
        "saturn" => (9.0, Color::rgb(0xfa, 0xd5, 0xa5)),
        "uranus" => (7.0, Color::rgb(0x4f, 0xd0, 0xe7)),
        "neptune" => (7.0, Color::rgb(0x4b, 0x70, 0xdd)),
        "pluto" => (5.0, Color::rgb(0x96, 0x71, 0x17)),
        _ => (8.0, Color::rgb(0xff, 0xff, 0x00)),
    }
}
