//! JSON helpers for the command-line tools.
//!
//! - `read_json_file`: deserialize a value from disk.
//! - `write_json_file`: pretty-print a serializable value to disk.
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;

pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    serde_json::from_str(&data).map_err(|e| format!("Failed to parse {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GroundControlPoint;

    #[test]
    fn gcp_list_round_trips_through_disk() {
        let dir = std::env::temp_dir().join(format!("map_frame_io_{}", std::process::id()));
        let path = dir.join("nested").join("gcp.json");
        let gcps = vec![GroundControlPoint {
            id: "gcp1".to_string(),
            pixel: [10, 20],
            world: [139.1, 35.1],
        }];
        write_json_file(&path, &gcps).unwrap();
        let back: Vec<GroundControlPoint> = read_json_file(&path).unwrap();
        assert_eq!(back, gcps);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = read_json_file::<serde_json::Value>(Path::new("/nonexistent/frame.json"))
            .unwrap_err();
        assert!(err.contains("/nonexistent/frame.json"), "{err}");
    }
}
