pub mod annotate;
pub mod detector;
pub mod face;
pub mod lbph;
pub mod matcher;
pub mod roster;

pub use detector::{create_detector, CascadeDetector, DetectionParams, FaceDetector, FaceRegion};
pub use face::{encode_face, extract_face, FACE_SIZE};
pub use lbph::{LbphModel, LbphParams};
pub use matcher::{PlaceholderMatcher, Recognition};
pub use roster::FaceRoster;
