use crate::common::{config::ModelConfig, FaceError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LbphParams {
    pub radius: i32,
    pub neighbors: i32,
    pub grid_x: i32,
    pub grid_y: i32,
    pub threshold: f64,
}

impl Default for LbphParams {
    fn default() -> Self {
        Self {
            radius: 1,
            neighbors: 8,
            grid_x: 8,
            grid_y: 8,
            threshold: f64::MAX,
        }
    }
}

impl From<&ModelConfig> for LbphParams {
    fn from(config: &ModelConfig) -> Self {
        Self {
            radius: config.radius,
            neighbors: config.neighbors,
            grid_x: config.grid_x,
            grid_y: config.grid_y,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelledHistogram {
    pub label: i64,
    pub histogram: Vec<f32>,
}

/// Persisted LBPH recognizer state. Nothing trains it yet, so `samples` stays empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LbphModel {
    pub params: LbphParams,
    #[serde(default)]
    pub samples: Vec<LabelledHistogram>,
}

impl LbphModel {
    pub fn new(params: LbphParams) -> Self {
        Self { params, samples: Vec::new() }
    }

    pub fn is_trained(&self) -> bool {
        !self.samples.is_empty()
    }

    pub fn read(path: &Path) -> Result<Self> {
        let data = fs::read(path)?;
        serde_json::from_slice(&data)
            .map_err(|e| FaceError::Model(format!("Failed to parse {}: {}", path.display(), e)))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let encoded = serde_json::to_vec_pretty(self)
            .map_err(|e| FaceError::Model(format!("Failed to serialize model: {}", e)))?;
        fs::write(path, encoded)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_from_config_keep_unbounded_threshold() {
        let config = ModelConfig { radius: 2, neighbors: 16, grid_x: 4, grid_y: 6 };
        let params = LbphParams::from(&config);
        assert_eq!(params.radius, 2);
        assert_eq!(params.grid_y, 6);
        assert_eq!(params.threshold, f64::MAX);
    }

    #[test]
    fn save_then_read_in_place() {
        let path = std::env::temp_dir().join(format!("classface-lbph-{}.json", std::process::id()));
        let model = LbphModel::new(LbphParams::default());
        model.save(&path).unwrap();

        let loaded = LbphModel::read(&path).unwrap();
        assert_eq!(loaded, model);
        assert!(!loaded.is_trained());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn garbage_file_is_a_model_error() {
        let path = std::env::temp_dir().join(format!("classface-lbph-bad-{}.json", std::process::id()));
        fs::write(&path, b"not json").unwrap();
        assert!(matches!(LbphModel::read(&path), Err(FaceError::Model(_))));
        let _ = fs::remove_file(&path);
    }
}
