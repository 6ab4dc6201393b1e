// Core modules
pub mod core;
pub mod storage;
pub mod cli;
pub mod common;
pub mod protocol;

// Re-export commonly used types
pub use common::{Config, DataPaths, DevMode, FaceError, Result};
pub use crate::core::{
    FaceDetector, FaceRegion, FaceRoster, DetectionParams, PlaceholderMatcher, Recognition,
    LbphModel, FACE_SIZE,
};
pub use storage::LabelStore;
pub use protocol::Response;
