use crate::common::{config::DetectorConfig, FaceError, Result};
use image::DynamicImage;
use rustface::ImageData;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Axis-aligned face rectangle in source image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceRegion {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl FaceRegion {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }
}

/// Multi-scale detection settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionParams {
    pub scale_factor: f32,
    /// Not consumed by the SeetaFace cascade, which merges overlapping windows internally
    pub min_neighbors: u32,
    pub min_size: u32,
    pub score_threshold: f64,
}

impl Default for DetectionParams {
    fn default() -> Self {
        Self {
            scale_factor: 1.1,
            min_neighbors: 5,
            min_size: 30,
            score_threshold: 2.0,
        }
    }
}

impl DetectionParams {
    pub fn from_config(config: &DetectorConfig) -> Self {
        Self {
            scale_factor: config.scale_factor,
            min_neighbors: config.min_neighbors,
            min_size: config.min_size,
            score_threshold: config.score_threshold,
        }
    }

    /// Image pyramid shrink ratio per level.
    pub fn pyramid_scale(&self) -> f32 {
        1.0 / self.scale_factor
    }
}

pub trait FaceDetector {
    fn detect(&mut self, image: &DynamicImage) -> Result<Vec<FaceRegion>>;
}

/// SeetaFace funnel-structured cascade.
pub struct CascadeDetector {
    detector: Box<dyn rustface::Detector>,
}

impl CascadeDetector {
    pub fn new(model_path: &Path, params: &DetectionParams) -> Result<Self> {
        if !model_path.exists() {
            return Err(FaceError::Model(
                format!("Cascade model not found at: {:?}", model_path)
            ));
        }
        let path = model_path.to_str()
            .ok_or_else(|| FaceError::Model(format!("Invalid model path: {:?}", model_path)))?;

        let mut detector = rustface::create_detector(path)
            .map_err(|e| FaceError::Model(format!("Failed to load cascade: {}", e)))?;
        detector.set_min_face_size(params.min_size);
        detector.set_score_thresh(params.score_threshold);
        detector.set_pyramid_scale_factor(params.pyramid_scale());
        detector.set_slide_window_step(4, 4);

        tracing::debug!("Loaded cascade from {:?} with {:?}", model_path, params);
        Ok(Self { detector })
    }
}

impl FaceDetector for CascadeDetector {
    fn detect(&mut self, image: &DynamicImage) -> Result<Vec<FaceRegion>> {
        let gray = image.to_luma8();
        let data = ImageData::new(gray.as_raw(), gray.width(), gray.height());

        let faces = self.detector.detect(&data)
            .iter()
            .map(|face| {
                let bbox = face.bbox();
                FaceRegion::new(bbox.x(), bbox.y(), bbox.width(), bbox.height())
            })
            .collect::<Vec<_>>();

        tracing::debug!("Cascade found {} face(s)", faces.len());
        Ok(faces)
    }
}

pub fn create_detector(config: &DetectorConfig) -> Result<Box<dyn FaceDetector>> {
    let params = DetectionParams::from_config(config);
    Ok(Box::new(CascadeDetector::new(&config.model_path, &params)?))
}
