use serde::{Deserialize, Serialize};

use crate::{is_legible_pair, Color, Palette, Swatch};

/// Upper bound on the candidate set, regardless of palette size.
pub const MAX_CANDIDATES: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum GradientKind {
    #[serde(rename = "radial-2-color")]
    RadialPair,
    #[serde(rename = "linear-2-color")]
    LinearPair,
    #[serde(rename = "radial-3-color")]
    RadialTriple,
    #[serde(rename = "linear-3-color")]
    LinearTriple,
}

/// One generated gradient background option. Derived purely from a tuple of
/// swatches; regenerable at any time from the same palette. These four
/// fields are exactly what gets persisted when the user applies one.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct GradientCandidate {
    pub kind: GradientKind,
    pub colors: Vec<String>,
    pub css: String,
    pub accessible: bool,
}

fn rgba(swatch: &Swatch, alpha: f64) -> String {
    Color::from_hex_lossy(&swatch.hex).with_alpha(alpha).to_string()
}

fn radial_pair(a: &Swatch, b: &Swatch) -> GradientCandidate {
    GradientCandidate {
        kind: GradientKind::RadialPair,
        colors: vec![a.hex.clone(), b.hex.clone()],
        css: format!(
            "radial-gradient(ellipse at top left, {} 0%, {} 50%, transparent 70%)",
            rgba(a, 0.3),
            rgba(b, 0.2)
        ),
        accessible: is_legible_pair(a, b),
    }
}

fn linear_pair(a: &Swatch, b: &Swatch) -> GradientCandidate {
    GradientCandidate {
        kind: GradientKind::LinearPair,
        colors: vec![a.hex.clone(), b.hex.clone()],
        css: format!(
            "linear-gradient(135deg, {} 0%, {} 100%)",
            rgba(a, 0.25),
            rgba(b, 0.25)
        ),
        accessible: is_legible_pair(a, b),
    }
}

fn radial_triple(a: &Swatch, b: &Swatch, c: &Swatch) -> GradientCandidate {
    GradientCandidate {
        kind: GradientKind::RadialTriple,
        colors: vec![a.hex.clone(), b.hex.clone(), c.hex.clone()],
        css: format!(
            "radial-gradient(ellipse at top left, {} 0%, {} 40%, {} 70%, transparent 90%)",
            rgba(a, 0.25),
            rgba(b, 0.2),
            rgba(c, 0.15)
        ),
        accessible: is_legible_pair(a, b) && is_legible_pair(b, c),
    }
}

fn linear_triple(a: &Swatch, b: &Swatch, c: &Swatch) -> GradientCandidate {
    GradientCandidate {
        kind: GradientKind::LinearTriple,
        colors: vec![a.hex.clone(), b.hex.clone(), c.hex.clone()],
        css: format!(
            "linear-gradient(180deg, {} 0%, {} 50%, {} 100%)",
            rgba(a, 0.2),
            rgba(b, 0.2),
            rgba(c, 0.2)
        ),
        accessible: is_legible_pair(a, b) && is_legible_pair(b, c),
    }
}

/// Turns an ordered palette into a deduplicated, bounded list of gradient
/// candidates. Two-color combinations come first, then consecutive
/// three-color runs; generation order is the final order and the list is
/// cut off at [`MAX_CANDIDATES`]. Deterministic: the same palette always
/// yields the same candidates.
pub fn generate_candidates(palette: &Palette) -> Vec<GradientCandidate> {
    let swatches = palette.swatches();
    let len = swatches.len();
    let mut candidates = Vec::new();

    if len < 2 {
        return candidates;
    }

    for i in 0..usize::min(3, len - 1) {
        for j in (i + 1)..usize::min(4, len) {
            candidates.push(radial_pair(&swatches[i], &swatches[j]));
            candidates.push(linear_pair(&swatches[i], &swatches[j]));
        }
    }

    if len >= 3 {
        for i in 0..usize::min(2, len - 2) {
            candidates.push(radial_triple(
                &swatches[i],
                &swatches[i + 1],
                &swatches[i + 2],
            ));
            candidates.push(linear_triple(
                &swatches[i],
                &swatches[i + 1],
                &swatches[i + 2],
            ));
        }
    }

    candidates.truncate(MAX_CANDIDATES);
    candidates
}
