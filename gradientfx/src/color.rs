use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Produces a color with given RGB values. The values range from 0 to 255.
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Produces a gray of the given brightness, where 0 is black and 255 is white.
    pub fn gray(brightness: u8) -> Self {
        Self::rgb(brightness, brightness, brightness)
    }

    pub fn black() -> Self {
        Self::gray(0)
    }

    pub fn white() -> Self {
        Self::gray(255)
    }

    /// Produces an instance of Color from a hex color code. The code can start
    /// with a hash symbol and must contain exactly six hex digits.
    ///
    /// In case of an invalid hex code, the function will return `None`.
    pub fn from_hex_str(code: &str) -> Option<Self> {
        let code = code.strip_prefix('#').unwrap_or(code);
        if code.len() != 6 || !code.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let x = u32::from_str_radix(code, 16).ok()?;

        Some(Self {
            r: ((x & 0xFF0000) >> 16) as u8,
            g: ((x & 0x00FF00) >> 8) as u8,
            b: (x & 0x0000FF) as u8,
        })
    }

    /// Parses a hex color code, degrading any invalid input (wrong length,
    /// 3-digit shorthand, non-hex characters, alpha channel) to black.
    /// Callers that build render specs rely on this never failing.
    pub fn from_hex_lossy(code: &str) -> Self {
        Self::from_hex_str(code).unwrap_or_else(Self::black)
    }

    /// Produces a 6-digit hex code with a hash symbol at the beginning,
    /// representing the color stored in current instance of `Color`.
    pub fn to_hex_string(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn with_alpha(self, alpha: f64) -> ColorWithAlpha {
        ColorWithAlpha::new(self, alpha)
    }

    /// Relative luminance as defined by WCAG 2.0: channels normalized to
    /// [0, 1], linearized with the piecewise sRGB transform and combined
    /// with the 0.2126/0.7152/0.0722 weights.
    pub fn relative_luminance(&self) -> f64 {
        fn linearize(channel: u8) -> f64 {
            let c = channel as f64 / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }

        0.2126 * linearize(self.r) + 0.7152 * linearize(self.g) + 0.0722 * linearize(self.b)
    }
}

pub struct ColorWithAlpha {
    color: Color,
    alpha: f64,
}

impl ColorWithAlpha {
    pub fn new(color: Color, alpha: f64) -> Self {
        Self { color, alpha }
    }
}

impl fmt::Display for ColorWithAlpha {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "rgba({}, {}, {}, {})",
            self.color.r, self.color.g, self.color.b, self.alpha
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_to_rgb() {
        assert_eq!(
            Color::from_hex_str("#FFFFFF"),
            Some(Color::rgb(255, 255, 255)),
            "white"
        );
        assert_eq!(
            Color::from_hex_str("8b0000"),
            Some(Color::rgb(139, 0, 0)),
            "no hash"
        );
        assert_eq!(
            Color::from_hex_str("#8B0000"),
            Color::from_hex_str("#8b0000"),
            "case insensitive"
        );
        assert_eq!(Color::from_hex_str("not-a-color"), None, "garbage");
        assert_eq!(Color::from_hex_str("#fff"), None, "shorthand");
        assert_eq!(Color::from_hex_str("#ff0000ff"), None, "alpha channel");
        assert_eq!(Color::from_hex_str("#;;;;;;"), None, "non-hex characters");
        assert_eq!(Color::from_hex_str("+0ffff"), None, "sign is not a digit");
    }

    #[test]
    fn hex_to_rgb_lossy() {
        assert_eq!(Color::from_hex_lossy("#FFFFFF"), Color::white());
        assert_eq!(Color::from_hex_lossy("not-a-color"), Color::black());
        assert_eq!(Color::from_hex_lossy("#fff"), Color::black());
        assert_eq!(Color::from_hex_lossy(""), Color::black());
    }

    #[test]
    fn rgb_to_hex() {
        assert_eq!(Color::rgb(255, 0, 0).to_hex_string(), "#ff0000");
        assert_eq!(Color::black().to_hex_string(), "#000000");
    }

    #[test]
    fn relative_luminance_endpoints() {
        assert!((Color::white().relative_luminance() - 1.0).abs() < 1e-9, "white");
        assert!(Color::black().relative_luminance().abs() < 1e-9, "black");
    }

    #[test]
    fn rgba_display() {
        assert_eq!(
            Color::rgb(255, 128, 0).with_alpha(0.25).to_string(),
            "rgba(255, 128, 0, 0.25)"
        );
        assert_eq!(
            Color::black().with_alpha(0.3).to_string(),
            "rgba(0, 0, 0, 0.3)"
        );
    }
}
