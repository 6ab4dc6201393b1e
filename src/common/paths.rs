use std::fs;
use std::path::PathBuf;
use crate::common::{config::StorageConfig, dev_mode::DevMode, error::Result};

/// Locations of the persisted model and label files.
#[derive(Debug, Clone)]
pub struct DataPaths {
    pub data_dir: PathBuf,
    pub model_path: PathBuf,
    pub labels_path: PathBuf,
}

impl DataPaths {
    pub fn from_config(storage: &StorageConfig, dev_mode: &DevMode) -> Self {
        let data_dir = dev_mode.resolve(&storage.data_dir);
        Self {
            model_path: data_dir.join(&storage.model_file),
            labels_path: data_dir.join(&storage.labels_file),
            data_dir,
        }
    }

    pub fn ensure(&self) -> Result<()> {
        fs::create_dir_all(&self.data_dir)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn files_live_under_data_dir() {
        let paths = DataPaths::from_config(&StorageConfig::default(), &DevMode::disabled());
        assert_eq!(paths.data_dir, PathBuf::from("facial_data"));
        assert_eq!(paths.model_path, PathBuf::from("facial_data/trained_model.json"));
        assert_eq!(paths.labels_path, PathBuf::from("facial_data/labels.bin"));
    }
}
