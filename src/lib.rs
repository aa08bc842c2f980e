pub mod annotate;
pub mod config;
pub mod detection;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod roi;
pub mod session;

pub use annotate::annotate;
pub use config::PipelineConfig;
pub use error::DetectError;
pub use models::{Boundary, Detection, GapRecord, LineSegment};
pub use pipeline::{
    DebugConfig, Pipeline, PipelineContext, PipelineStep, detect_boundaries, detect_shelves,
};
pub use roi::Roi;
pub use session::{SessionResult, ShelfSession};
