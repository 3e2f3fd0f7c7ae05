use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Color;

/// Role tags assigned by the upstream palette extraction engine, in
/// extraction order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum SwatchRole {
    Vibrant,
    DarkVibrant,
    LightVibrant,
    Muted,
    DarkMuted,
    LightMuted,
}

impl SwatchRole {
    pub const ALL: [SwatchRole; 6] = [
        SwatchRole::Vibrant,
        SwatchRole::DarkVibrant,
        SwatchRole::LightVibrant,
        SwatchRole::Muted,
        SwatchRole::DarkMuted,
        SwatchRole::LightMuted,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SwatchRole::Vibrant => "Vibrant",
            SwatchRole::DarkVibrant => "DarkVibrant",
            SwatchRole::LightVibrant => "LightVibrant",
            SwatchRole::Muted => "Muted",
            SwatchRole::DarkMuted => "DarkMuted",
            SwatchRole::LightMuted => "LightMuted",
        }
    }
}

impl fmt::Display for SwatchRole {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One representative color extracted from an image. Immutable once
/// created; `rgb` is the extractor's own triple and feeds all contrast
/// math, while `hex` is the string form the render specs are built from.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Swatch {
    pub role: SwatchRole,
    pub hex: String,
    pub rgb: Color,
    pub population: u32,
}

impl Swatch {
    pub fn new(role: SwatchRole, hex: String, rgb: Color, population: u32) -> Self {
        Self {
            role,
            hex,
            rgb,
            population,
        }
    }

    /// Builds a swatch whose `rgb` is derived from the hex code, degrading
    /// malformed input to black.
    pub fn from_hex(role: SwatchRole, hex: &str, population: u32) -> Self {
        Self {
            role,
            hex: hex.to_owned(),
            rgb: Color::from_hex_lossy(hex),
            population,
        }
    }
}

/// The ordered set of up to six swatches produced by one extraction call.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Palette {
    swatches: Vec<Swatch>,
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.swatches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.swatches.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Swatch> {
        self.swatches.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<Swatch> {
        self.swatches.iter()
    }

    pub fn swatches(&self) -> &[Swatch] {
        &self.swatches
    }

    pub fn push(&mut self, swatch: Swatch) {
        self.swatches.push(swatch);
    }
}

impl FromIterator<Swatch> for Palette {
    fn from_iter<I: IntoIterator<Item = Swatch>>(iter: I) -> Self {
        Self {
            swatches: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a Swatch;
    type IntoIter = std::slice::Iter<'a, Swatch>;

    fn into_iter(self) -> Self::IntoIter {
        self.swatches.iter()
    }
}
