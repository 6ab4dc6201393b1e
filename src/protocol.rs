use serde::{Serialize, Deserialize};
use crate::core::matcher::Recognition;

// Response types, one JSON object per invocation
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Response {
    Registered(RegistrationReport),
    Recognized(RecognitionReport),
    Failed(Failure),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RegistrationReport {
    pub success: bool,
    pub message: String,
    /// Byte length of the encoded face crop
    pub encodings: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecognitionReport {
    pub success: bool,
    pub message: String,
    pub recognitions: Vec<Recognition>,
    pub total_faces: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Failure {
    pub success: bool,
    pub error: String,
}

impl RegistrationReport {
    pub fn new(encodings: usize) -> Self {
        Self {
            success: true,
            message: "Student registered successfully".into(),
            encodings,
        }
    }
}

impl RecognitionReport {
    pub fn new(recognitions: Vec<Recognition>, total_faces: usize) -> Self {
        Self {
            success: true,
            message: format!("Recognized {} faces", recognitions.len()),
            recognitions,
            total_faces,
        }
    }
}

impl Response {
    pub fn failure(error: impl ToString) -> Self {
        Response::Failed(Failure { success: false, error: error.to_string() })
    }

    pub fn is_success(&self) -> bool {
        match self {
            Response::Registered(r) => r.success,
            Response::Recognized(r) => r.success,
            Response::Failed(f) => f.success,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl<E: std::fmt::Display> From<Result<RegistrationReport, E>> for Response {
    fn from(result: Result<RegistrationReport, E>) -> Self {
        result.map_or_else(Response::failure, Response::Registered)
    }
}

impl<E: std::fmt::Display> From<Result<RecognitionReport, E>> for Response {
    fn from(result: Result<RecognitionReport, E>) -> Self {
        result.map_or_else(Response::failure, Response::Recognized)
    }
}
