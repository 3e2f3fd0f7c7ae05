use crate::{Color, Swatch};

/// WCAG AA contrast threshold for large text.
pub const AA_LARGE_TEXT: f64 = 3.0;

/// Contrast ratio between two colors per WCAG 2.0. Symmetric, at least 1,
/// roughly 21 for black against white.
pub fn contrast_ratio(a: Color, b: Color) -> f64 {
    let lum_a = a.relative_luminance();
    let lum_b = b.relative_luminance();
    let brightest = lum_a.max(lum_b);
    let darkest = lum_a.min(lum_b);
    (brightest + 0.05) / (darkest + 0.05)
}

/// Contrast of a color against black and white text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextContrast {
    pub on_black: f64,
    pub on_white: f64,
}

pub fn text_contrast(color: Color) -> TextContrast {
    TextContrast {
        on_black: contrast_ratio(color, Color::black()),
        on_white: contrast_ratio(color, Color::white()),
    }
}

/// Whether a gradient built from these two swatches leaves black text
/// readable. The gradients render at low alpha over a light page, so only
/// the on-black ratio gates; on-white is computed for inspection but does
/// not take part in the decision.
pub fn is_legible_pair(a: &Swatch, b: &Swatch) -> bool {
    text_contrast(a.rgb).on_black >= AA_LARGE_TEXT
        || text_contrast(b.rgb).on_black >= AA_LARGE_TEXT
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SwatchRole;

    #[test]
    fn contrast_ratio_symmetry() {
        let a = Color::rgb(255, 99, 71);
        let b = Color::rgb(70, 130, 180);
        assert_eq!(contrast_ratio(a, b), contrast_ratio(b, a));
    }

    #[test]
    fn contrast_ratio_floor() {
        let a = Color::rgb(123, 45, 67);
        assert_eq!(contrast_ratio(a, a), 1.0, "identical luminance");
        assert!(contrast_ratio(a, Color::white()) >= 1.0);
    }

    #[test]
    fn black_on_white() {
        let ratio = contrast_ratio(Color::black(), Color::white());
        assert!((ratio - 21.0).abs() < 1e-9, "ratio was {ratio}");
    }

    #[test]
    fn text_contrast_reports_both_sides() {
        let report = text_contrast(Color::black());
        assert_eq!(report.on_black, 1.0);
        assert!((report.on_white - 21.0).abs() < 1e-9);
    }

    #[test]
    fn yellow_and_black_pair_is_legible() {
        let black = Swatch::from_hex(SwatchRole::DarkMuted, "#000000", 10);
        let yellow = Swatch::from_hex(SwatchRole::Vibrant, "#FFFF00", 10);
        // black against black text is 1, but yellow carries the pair
        assert!(text_contrast(yellow.rgb).on_black > AA_LARGE_TEXT);
        assert!(is_legible_pair(&black, &yellow));
        assert!(is_legible_pair(&yellow, &black));
    }

    #[test]
    fn dark_pair_is_not_legible() {
        let a = Swatch::from_hex(SwatchRole::DarkVibrant, "#1a1a1a", 10);
        let b = Swatch::from_hex(SwatchRole::DarkMuted, "#000000", 10);
        assert!(!is_legible_pair(&a, &b));
    }
}
