use crate::constants::DEFAULT_PAGE_DIMENSIONS;
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tool configuration shared by the booklet and outline commands
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ToolOptions {
    // Outline
    /// Added to every page number when writing an outline into a document
    pub outline_page_offset: i64,
    /// Reject outline pages beyond the document's page count
    pub strict_page_bounds: bool,

    // Booklet
    /// Size of padding pages (width, height in points) when the first page
    /// has no usable MediaBox
    pub blank_page_size: Option<(f32, f32)>,

    // Output naming
    /// Append a timestamp to derived output file names
    pub timestamp_outputs: bool,
}

impl Default for ToolOptions {
    fn default() -> Self {
        Self {
            outline_page_offset: 0,
            strict_page_bounds: true,
            blank_page_size: None,
            timestamp_outputs: true,
        }
    }
}

impl ToolOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options: Self = serde_json::from_slice(&bytes)
            .map_err(|e| PagesError::Config(format!("Failed to parse config: {}", e)))?;
        options.validate()?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| PagesError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if let Some((width, height)) = self.blank_page_size {
            if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
                return Err(PagesError::Config(format!(
                    "Blank page size must be positive, got {} x {}",
                    width, height
                )));
            }
        }

        if self.outline_page_offset.unsigned_abs() > u64::from(u32::MAX) {
            return Err(PagesError::Config(format!(
                "Outline page offset {} is out of range",
                self.outline_page_offset
            )));
        }

        Ok(())
    }

    /// Padding page size in points
    pub fn blank_page_dimensions(&self) -> (f32, f32) {
        self.blank_page_size.unwrap_or(DEFAULT_PAGE_DIMENSIONS)
    }

    /// Page count bound applied when writing outlines
    pub fn page_bound(&self, page_count: u32) -> Option<u32> {
        self.strict_page_bounds.then_some(page_count)
    }
}
