//! Config file loading.

use std::path::Path;

use effects_model::AppConfig;

use crate::error::{IngestError, Result};

/// Reads a JSON config document. Keys it omits keep their defaults.
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let text = std::fs::read_to_string(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| IngestError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"minTotalN": 300}"#).unwrap();
        let config = load_config(&path).unwrap();
        assert_eq!(config.min_total_n, 300.0);
        assert_eq!(config.patch_label, "Patch");
    }

    #[test]
    fn test_load_config_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            load_config(&path),
            Err(IngestError::ConfigParse { .. })
        ));
    }
}
