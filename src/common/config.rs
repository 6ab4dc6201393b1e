use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::common::error::{FaceError, Result};

pub const DEFAULT_CONFIG_PATH: &str = "configs/classface.toml";

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub detector: DetectorConfig,
    #[serde(default)]
    pub matcher: MatcherConfig,
    #[serde(default)]
    pub model: ModelConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_model_file")]
    pub model_file: String,
    #[serde(default = "default_labels_file")]
    pub labels_file: String,
}

fn default_data_dir() -> PathBuf { PathBuf::from("facial_data") }
fn default_model_file() -> String { "trained_model.json".into() }
fn default_labels_file() -> String { "labels.bin".into() }

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            model_file: default_model_file(),
            labels_file: default_labels_file(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DetectorConfig {
    /// SeetaFace cascade model, e.g. `model/seeta_fd_frontal_v1.0.bin` from the rustface repository
    #[serde(default = "default_detector_model")]
    pub model_path: PathBuf,
    #[serde(default = "default_scale_factor")]
    pub scale_factor: f32,
    /// Kept for parity with Haar settings; the cascade merges its windows itself
    #[serde(default = "default_min_neighbors")]
    pub min_neighbors: u32,
    #[serde(default = "default_min_size")]
    pub min_size: u32,
    /// Cascade window score threshold
    #[serde(default = "default_score_threshold")]
    pub score_threshold: f64,
}

fn default_detector_model() -> PathBuf { PathBuf::from("models/seeta_fd_frontal_v1.0.bin") }
fn default_scale_factor() -> f32 { 1.1 }
fn default_min_neighbors() -> u32 { 5 }
fn default_min_size() -> u32 { 30 }
fn default_score_threshold() -> f64 { 2.0 }

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            model_path: default_detector_model(),
            scale_factor: default_scale_factor(),
            min_neighbors: default_min_neighbors(),
            min_size: default_min_size(),
            score_threshold: default_score_threshold(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MatcherConfig {
    #[serde(default = "default_roster")]
    pub roster: Vec<i64>,
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f64,
    #[serde(default = "default_max_confidence")]
    pub max_confidence: f64,
}

fn default_roster() -> Vec<i64> { vec![1, 2, 3, 4, 5] }
fn default_min_confidence() -> f64 { 85.0 }
fn default_max_confidence() -> f64 { 95.0 }

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            roster: default_roster(),
            min_confidence: default_min_confidence(),
            max_confidence: default_max_confidence(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ModelConfig {
    #[serde(default = "default_radius")]
    pub radius: i32,
    #[serde(default = "default_neighbors")]
    pub neighbors: i32,
    #[serde(default = "default_grid")]
    pub grid_x: i32,
    #[serde(default = "default_grid")]
    pub grid_y: i32,
}

fn default_radius() -> i32 { 1 }
fn default_neighbors() -> i32 { 8 }
fn default_grid() -> i32 { 8 }

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            radius: default_radius(),
            neighbors: default_neighbors(),
            grid_x: default_grid(),
            grid_y: default_grid(),
        }
    }
}

impl Config {
    /// Like [`Config::load_from_path`], but a missing file yields the built-in defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            let config = Self::default();
            config.validate()?;
            return Ok(config);
        }
        Self::load_from_path(path)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(FaceError::Config(format!(
                "Config file not found: {}", path.display()
            )));
        }

        tracing::info!("Loading config from: {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| FaceError::Config(format!("Config parse error: {}", e)))
    }

    pub fn validate(&self) -> Result<()> {
        // Detection parameters
        if !(self.detector.scale_factor > 1.0 && self.detector.scale_factor <= 2.0) {
            return Err(FaceError::Config(format!(
                "Scale factor must be in (1.0, 2.0], got {}", self.detector.scale_factor
            )));
        }
        if self.detector.min_size == 0 || self.detector.min_size > 4096 {
            return Err(FaceError::Config(format!(
                "Minimum face size must be between 1 and 4096, got {}", self.detector.min_size
            )));
        }
        // Placeholder confidence range
        let (lo, hi) = (self.matcher.min_confidence, self.matcher.max_confidence);
        if !(0.0..=100.0).contains(&lo) || !(0.0..=100.0).contains(&hi) || lo > hi {
            return Err(FaceError::Config(format!(
                "Confidence range must satisfy 0 <= min <= max <= 100, got {}..{}", lo, hi
            )));
        }

        if self.model.radius < 1 || self.model.neighbors < 1 {
            return Err(FaceError::Config(format!(
                "LBPH radius and neighbors must be positive, got {} and {}",
                self.model.radius, self.model.neighbors
            )));
        }
        if self.model.grid_x < 1 || self.model.grid_y < 1 {
            return Err(FaceError::Config(format!(
                "LBPH grid must be at least 1x1, got {}x{}", self.model.grid_x, self.model.grid_y
            )));
        }

        if self.storage.model_file.is_empty() || self.storage.labels_file.is_empty() {
            return Err(FaceError::Config("Storage file names must not be empty".into()));
        }

        Ok(())
    }
}
