use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FaceError {
    #[error("Could not load image")]
    ImageLoad(PathBuf),

    #[error("No faces detected in image")]
    NoFaceDetected,

    #[error("Multiple faces detected. Please use image with single face")]
    MultipleFaces(usize),

    #[error("Invalid student ID: {0}")]
    InvalidStudentId(String),

    #[error("Model error: {0}")]
    Model(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, FaceError>;
