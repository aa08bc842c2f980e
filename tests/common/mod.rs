mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from shelfgaps for tests
pub use shelfgaps::{
    DetectError, Detection, GapRecord, Pipeline, PipelineConfig, Roi, ShelfSession,
    detect_boundaries, detect_shelves,
};
