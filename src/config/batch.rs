use crate::detector::FrameParams;
use crate::types::{GeoCoord, ImageSize, Line};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// One map sheet: the detector's lines plus optional corner coordinates.
#[derive(Clone, Debug, Deserialize)]
pub struct SheetConfig {
    pub name: String,
    pub width: u32,
    pub height: u32,
    /// `[distance, angle]` pairs from the Hough transform.
    pub lines: Vec<Line>,
    /// `[latitude, longitude]` of the upper-left, upper-right, lower-left
    /// and lower-right frame corners. Without them no GCPs are produced.
    #[serde(default)]
    pub coordinates: Option<Vec<GeoCoord>>,
}

impl SheetConfig {
    pub fn size(&self) -> ImageSize {
        ImageSize::new(self.width, self.height)
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct BatchOutputConfig {
    /// Destination of the JSON batch report; stdout when absent.
    pub json_out: Option<PathBuf>,
    /// Per-sheet GCP files `<name>_gcp.json` are written here when set.
    pub gcp_dir: Option<PathBuf>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct BatchConfig {
    pub sheets: Vec<SheetConfig>,
    #[serde(default)]
    pub params: FrameParams,
    /// Use the full image rectangle for sheets whose frame cannot be
    /// resolved instead of skipping them.
    #[serde(default)]
    pub fallback_to_image_bounds: bool,
    #[serde(default)]
    pub output: BatchOutputConfig,
}

pub fn load_config(path: &Path) -> Result<BatchConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&data).map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

pub fn parse_config(data: &str) -> Result<BatchConfig, String> {
    let config: BatchConfig = serde_json::from_str(data).map_err(|e| e.to_string())?;
    config.params.validate().map_err(|e| e.to_string())?;
    Ok(config)
}
