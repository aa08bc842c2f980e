use thiserror::Error;

/// Errors surfaced by the boundary detection pipeline.
///
/// An empty detection is never an error: "nothing found" comes back as empty
/// boundary and gap lists.
#[derive(Error, Debug)]
pub enum DetectError {
    /// The region or image cannot be processed (zero area, malformed bounds, no selection)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The configuration cannot drive the pipeline
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Writing a debug image failed
    #[error("failed to save debug image")]
    Debug(#[from] image::ImageError),

    /// Creating the debug directory failed
    #[error("debug output")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DetectError>;
