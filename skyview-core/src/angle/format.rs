//! Sexagesimal formatting for goto fields and object info panels.
//!
//! | Formatter | Output | Used for |
//! |-----------|--------|----------|
//! | [`DmsFmt`] | `-012:30:45` | Altitude, azimuth, declination |
//! | [`HmsFmt`] | `05:35:17` | Right ascension, server clock |
//!
//! Seconds are rounded to `frac_digits` decimals; a rounded value of 60
//! carries into the minutes (and minutes into the leading field), so the
//! output never shows `:60`.

use super::Angle;

/// Degrees-minutes-seconds formatter with a zero-padded leading field.
#[derive(Debug, Clone, Copy)]
pub struct DmsFmt {
    pub frac_digits: u8,
    pub deg_width: usize,
}

impl Default for DmsFmt {
    fn default() -> Self {
        Self {
            frac_digits: 0,
            deg_width: 3,
        }
    }
}

impl DmsFmt {
    pub fn new(frac_digits: u8) -> Self {
        Self {
            frac_digits,
            ..Self::default()
        }
    }

    pub fn fmt(&self, angle: Angle) -> String {
        let deg = angle.degrees();
        let sign = if deg < 0.0 { "-" } else { "" };
        let (d, m, s) = split_sexagesimal(deg.abs(), self.frac_digits);
        format!(
            "{}{:0dw$}:{:02}:{}",
            sign,
            d,
            m,
            seconds_field(s, self.frac_digits),
            dw = self.deg_width
        )
    }
}

/// Hours-minutes-seconds formatter; the input is wrapped to `[0, 24)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HmsFmt {
    pub frac_digits: u8,
}

impl HmsFmt {
    pub fn new(frac_digits: u8) -> Self {
        Self { frac_digits }
    }

    pub fn fmt(&self, angle: Angle) -> String {
        let hours = super::wrap_0_24(angle.hours());
        let (h, m, s) = split_sexagesimal(hours, self.frac_digits);
        format!("{:02}:{:02}:{}", h % 24, m, seconds_field(s, self.frac_digits))
    }
}

fn split_sexagesimal(value: f64, frac_digits: u8) -> (u64, u64, f64) {
    let scale = 10f64.powi(frac_digits as i32);
    let total_seconds = (value * 3600.0 * scale).round() / scale;
    let whole = (total_seconds / 3600.0).floor();
    let rem = total_seconds - whole * 3600.0;
    let minutes = (rem / 60.0).floor();
    let seconds = (rem - minutes * 60.0).max(0.0);
    (whole as u64, minutes as u64, seconds)
}

fn seconds_field(s: f64, frac_digits: u8) -> String {
    if frac_digits == 0 {
        format!("{:02}", s.round() as u64)
    } else {
        let width = 3 + frac_digits as usize;
        format!("{:0w$.p$}", s, w = width, p = frac_digits as usize)
    }
}
