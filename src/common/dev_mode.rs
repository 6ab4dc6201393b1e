use std::path::{Path, PathBuf};
use std::fs;
use crate::common::error::Result;

#[derive(Debug, Clone)]
pub struct DevMode {
    enabled: bool,
    base_dir: PathBuf,
}

impl DevMode {
    pub fn new(enabled: bool) -> Result<Self> {
        let base_dir = if enabled {
            PathBuf::from("./dev_data")
        } else {
            PathBuf::new() // Not used when disabled
        };

        if enabled {
            fs::create_dir_all(&base_dir)?;
            fs::create_dir_all(base_dir.join("debug"))?;

            tracing::info!("Development mode enabled - data will be saved to: {}",
                           base_dir.display());
        }

        Ok(Self { enabled, base_dir })
    }

    pub fn disabled() -> Self {
        Self { enabled: false, base_dir: PathBuf::new() }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Relative paths are rebased under the dev directory when enabled.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if self.enabled && path.is_relative() {
            self.base_dir.join(path)
        } else {
            path.to_path_buf()
        }
    }

    pub fn get_debug_path(&self, prefix: &str) -> Option<PathBuf> {
        if !self.enabled {
            return None;
        }
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        Some(self.base_dir.join("debug").join(format!("{}_{}.png", prefix, timestamp)))
    }
}
