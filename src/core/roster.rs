use crate::{
    common::{Config, DataPaths, DevMode, FaceError, Result},
    core::{
        annotate::draw_regions,
        detector::{create_detector, FaceDetector},
        face::{encode_face, extract_face},
        lbph::{LbphModel, LbphParams},
        matcher::PlaceholderMatcher,
    },
    protocol::{RecognitionReport, RegistrationReport},
    storage::LabelStore,
};
use image::DynamicImage;
use std::path::Path;

/// Registers students and runs the placeholder recognizer against persisted state.
pub struct FaceRoster {
    detector: Box<dyn FaceDetector>,
    matcher: PlaceholderMatcher,
    labels: LabelStore,
    model: LbphModel,
    paths: DataPaths,
    dev_mode: DevMode,
}

impl FaceRoster {
    pub fn new(config: &Config, dev_mode: DevMode) -> Result<Self> {
        let detector = create_detector(&config.detector)?;
        let matcher = PlaceholderMatcher::from_entropy(&config.matcher);
        Self::with_parts(config, dev_mode, detector, matcher)
    }

    /// Creates the data directory and loads whatever model and labels exist there.
    pub fn with_parts(
        config: &Config,
        dev_mode: DevMode,
        detector: Box<dyn FaceDetector>,
        matcher: PlaceholderMatcher,
    ) -> Result<Self> {
        let paths = DataPaths::from_config(&config.storage, &dev_mode);
        paths.ensure()?;

        let mut roster = Self {
            detector,
            matcher,
            labels: LabelStore::new(paths.labels_path.clone()),
            model: LbphModel::new(LbphParams::from(&config.model)),
            paths,
            dev_mode,
        };

        if !roster.load_model() {
            tracing::warn!("Continuing without previously saved model state");
        }
        if !roster.paths.model_path.exists() && roster.save_model() {
            tracing::info!("Created empty model at {:?}", roster.paths.model_path);
        }

        Ok(roster)
    }

    pub fn register_student(&mut self, image_path: &Path, student_id: &str) -> Result<RegistrationReport> {
        let image = load_image(image_path)?;

        let faces = self.detector.detect(&image)?;
        let face = match faces.as_slice() {
            [] => return Err(FaceError::NoFaceDetected),
            [face] => *face,
            many => return Err(FaceError::MultipleFaces(many.len())),
        };

        let face_image = extract_face(&image.to_luma8(), &face)?;

        let id = parse_student_id(student_id)?;
        if let Some(previous) = self.labels.insert(id, student_id.to_string()) {
            tracing::info!("Re-registering student {} (was {:?})", id, previous);
        }
        self.save_labels();

        // The crop is encoded but not kept; no recognizer consumes it yet
        let encoding = encode_face(&face_image)?;

        if let Some(debug_path) = self.dev_mode.get_debug_path(&format!("register_{}", id)) {
            match face_image.save(&debug_path) {
                Ok(()) => tracing::debug!("Saved face crop to {:?}", debug_path),
                Err(e) => tracing::warn!("Could not save face crop: {}", e),
            }
        }

        tracing::info!("Registered student {} from {:?}", id, image_path);
        Ok(RegistrationReport::new(encoding.len()))
    }

    pub fn recognize_faces(&mut self, image_path: &Path) -> Result<RecognitionReport> {
        let image = load_image(image_path)?;

        let faces = self.detector.detect(&image)?;
        if faces.is_empty() {
            return Err(FaceError::NoFaceDetected);
        }

        let recognitions = self.matcher.assign(&faces);

        if let Some(debug_path) = self.dev_mode.get_debug_path("recognize") {
            match draw_regions(&image, &faces).save(&debug_path) {
                Ok(()) => tracing::debug!("Saved annotated image to {:?}", debug_path),
                Err(e) => tracing::warn!("Could not save annotated image: {}", e),
            }
        }

        tracing::info!("{} face(s) detected, {} assigned", faces.len(), recognitions.len());
        Ok(RecognitionReport::new(recognitions, faces.len()))
    }

    /// Reloads the model file if one exists.
    pub fn train_model(&mut self) -> bool {
        if !self.paths.model_path.exists() {
            return true;
        }
        match LbphModel::read(&self.paths.model_path) {
            Ok(model) => {
                self.model = model;
                true
            }
            Err(e) => {
                tracing::warn!("Failed to reload model: {}", e);
                false
            }
        }
    }

    pub fn save_model(&self) -> bool {
        match self.model.save(&self.paths.model_path) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to save model: {}", e);
                false
            }
        }
    }

    /// Loads the model file, then the label file. Either may be absent.
    pub fn load_model(&mut self) -> bool {
        if !self.train_model() {
            return false;
        }

        if self.labels.path().exists() {
            if let Err(e) = self.labels.reload() {
                tracing::warn!("Failed to load labels: {}", e);
                return false;
            }
        }

        true
    }

    pub fn save_labels(&self) -> bool {
        match self.labels.save() {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to save labels: {}", e);
                false
            }
        }
    }

    pub fn labels(&self) -> &LabelStore {
        &self.labels
    }

    pub fn model(&self) -> &LbphModel {
        &self.model
    }

    pub fn paths(&self) -> &DataPaths {
        &self.paths
    }
}

/// Decimal integer with optional sign and surrounding whitespace. Underscores may
/// separate digit groups (`1_000`). Values outside `i64` are rejected.
fn parse_student_id(raw: &str) -> Result<i64> {
    let invalid = || FaceError::InvalidStudentId(raw.to_string());

    let trimmed = raw.trim();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let grouped = !digits.is_empty()
        && digits.split('_').all(|group| !group.is_empty() && group.bytes().all(|b| b.is_ascii_digit()));
    if !grouped {
        return Err(invalid());
    }

    let mut number = digits.replace('_', "");
    if negative {
        number.insert(0, '-');
    }
    number.parse().map_err(|_| invalid())
}

fn load_image(path: &Path) -> Result<DynamicImage> {
    image::open(path).map_err(|e| {
        tracing::debug!("Failed to open {:?}: {}", path, e);
        FaceError::ImageLoad(path.to_path_buf())
    })
}
