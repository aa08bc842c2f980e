pub mod preprocessing;
pub mod edges;
pub mod hough;
pub mod angles;
pub mod clustering;
pub mod gaps;
pub mod steps;

pub use angles::{AngleBand, filter_vertical};
pub use clustering::group_close_lines;
pub use edges::extract_edges;
pub use gaps::report_gaps;
pub use hough::{HoughParams, detect_segments};
pub use preprocessing::preprocess;
