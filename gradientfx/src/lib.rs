mod color;
mod contrast;
mod gradient;
mod swatch;

pub use color::{Color, ColorWithAlpha};
pub use contrast::{contrast_ratio, is_legible_pair, text_contrast, TextContrast, AA_LARGE_TEXT};
pub use gradient::{generate_candidates, GradientCandidate, GradientKind, MAX_CANDIDATES};
pub use swatch::{Palette, Swatch, SwatchRole};
