use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use gradientfx::{Color, Palette, Swatch, SwatchRole};
use log::debug;
use serde::Deserialize;

use crate::{ExtractionError, PaletteExtractor};

/// One entry of the sidecar file exported by the upstream extraction
/// engine: hex is mandatory, the rgb triple and population are not.
#[derive(Debug, Deserialize)]
struct SwatchRecord {
    hex: String,
    rgb: Option<[u8; 3]>,
    population: Option<u32>,
}

/// Reads a palette sidecar JSON keyed by extraction role name and
/// assembles the swatches in extraction order, skipping absent roles.
/// A missing rgb triple falls back to the lossy hex parse; malformed hex
/// degrades per-field to black rather than rejecting the palette.
#[derive(Clone, Copy, Default)]
pub struct SwatchFileExtractor;

impl SwatchFileExtractor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PaletteExtractor for SwatchFileExtractor {
    async fn extract(&self, source: &Path) -> Result<Palette, ExtractionError> {
        let raw = tokio::fs::read(source)
            .await
            .map_err(|e| ExtractionError::SourceUnreadable {
                reason: e.to_string(),
            })?;

        let mut records: HashMap<String, SwatchRecord> =
            serde_json::from_slice(&raw).map_err(|e| ExtractionError::SourceUnreadable {
                reason: e.to_string(),
            })?;

        let palette: Palette = SwatchRole::ALL
            .into_iter()
            .filter_map(|role| {
                let record = records.remove(role.name())?;
                let rgb = match record.rgb {
                    Some([r, g, b]) => Color::rgb(r, g, b),
                    None => Color::from_hex_lossy(&record.hex),
                };
                Some(Swatch::new(
                    role,
                    record.hex,
                    rgb,
                    record.population.unwrap_or(0),
                ))
            })
            .collect();

        if palette.is_empty() {
            return Err(ExtractionError::NoColorsFound);
        }

        debug!(
            "Extracted {} swatches from {}",
            palette.len(),
            source.display()
        );
        Ok(palette)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    async fn extract_str(contents: &str) -> Result<Palette, ExtractionError> {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        SwatchFileExtractor::new().extract(file.path()).await
    }

    #[tokio::test]
    async fn reads_swatches_in_extraction_order() {
        let palette = extract_str(
            r##"{
                "Muted": { "hex": "#808080", "rgb": [128, 128, 128], "population": 52 },
                "Vibrant": { "hex": "#FF0000", "rgb": [255, 0, 0], "population": 120 },
                "DarkMuted": { "hex": "#404040" }
            }"##,
        )
        .await
        .unwrap();

        assert_eq!(palette.len(), 3);
        assert_eq!(palette.get(0).unwrap().role, SwatchRole::Vibrant);
        assert_eq!(palette.get(1).unwrap().role, SwatchRole::Muted);
        assert_eq!(palette.get(2).unwrap().role, SwatchRole::DarkMuted);
        assert_eq!(
            palette.get(2).unwrap().rgb,
            Color::rgb(64, 64, 64),
            "missing rgb falls back to the hex parse"
        );
        assert_eq!(palette.get(2).unwrap().population, 0);
    }

    #[tokio::test]
    async fn malformed_hex_degrades_to_black() {
        let palette = extract_str(r##"{ "Vibrant": { "hex": "#zzz" } }"##)
            .await
            .unwrap();
        assert_eq!(palette.get(0).unwrap().rgb, Color::black());
        assert_eq!(palette.get(0).unwrap().hex, "#zzz");
    }

    #[tokio::test]
    async fn empty_sidecar_means_no_colors() {
        assert_eq!(
            extract_str("{}").await,
            Err(ExtractionError::NoColorsFound)
        );
    }

    #[tokio::test]
    async fn missing_file_is_unreadable() {
        let result = SwatchFileExtractor::new()
            .extract(Path::new("/definitely/not/here.json"))
            .await;
        assert!(matches!(
            result,
            Err(ExtractionError::SourceUnreadable { .. })
        ));
    }

    #[tokio::test]
    async fn garbage_json_is_unreadable() {
        let result = extract_str("not json at all").await;
        assert!(matches!(
            result,
            Err(ExtractionError::SourceUnreadable { .. })
        ));
    }
}
