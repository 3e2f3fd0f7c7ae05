pub mod swatch_file;

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use gradientfx::Palette;
use thiserror::Error;

pub use swatch_file::SwatchFileExtractor;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ExtractionError {
    #[error("could not read image source: {reason}")]
    SourceUnreadable { reason: String },

    #[error("no colors found in image source")]
    NoColorsFound,
}

/// The external palette-extraction collaborator. Resolves once per upload
/// with a completed palette of 0 to 6 role-tagged swatches; on failure the
/// caller reports a retryable "try another image" condition and the
/// gradient engine is never invoked.
#[async_trait]
pub trait PaletteExtractor {
    async fn extract(&self, source: &Path) -> Result<Palette, ExtractionError>;
}

pub struct MockPaletteExtractor {
    response: Result<Palette, ExtractionError>,
    requests: Mutex<Vec<PathBuf>>,
}

impl MockPaletteExtractor {
    pub fn new(response: Result<Palette, ExtractionError>) -> Self {
        Self {
            response,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requested_sources(&self) -> Vec<PathBuf> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaletteExtractor for MockPaletteExtractor {
    async fn extract(&self, source: &Path) -> Result<Palette, ExtractionError> {
        self.requests.lock().unwrap().push(source.to_owned());
        self.response.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradientfx::{Swatch, SwatchRole};

    #[tokio::test]
    async fn mock_records_requests() {
        let palette: Palette = [Swatch::from_hex(SwatchRole::Vibrant, "#FF0000", 42)]
            .into_iter()
            .collect();
        let mock = MockPaletteExtractor::new(Ok(palette.clone()));

        let extracted = mock.extract(Path::new("logo.png")).await.unwrap();
        assert_eq!(extracted, palette);
        assert_eq!(mock.requested_sources(), vec![PathBuf::from("logo.png")]);
    }

    #[tokio::test]
    async fn mock_replays_failures() {
        let mock = MockPaletteExtractor::new(Err(ExtractionError::NoColorsFound));
        let result = mock.extract(Path::new("blank.png")).await;
        assert_eq!(result, Err(ExtractionError::NoColorsFound));
    }
}
