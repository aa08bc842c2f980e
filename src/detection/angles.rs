use crate::config::PipelineConfig;
use crate::models::LineSegment;

/// Inclusive band of absolute segment angles, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleBand {
    pub min_deg: f64,
    pub max_deg: f64,
}

impl AngleBand {
    pub fn new(min_deg: f64, max_deg: f64) -> Self {
        Self { min_deg, max_deg }
    }

    pub fn contains(&self, angle_deg: f64) -> bool {
        let a = angle_deg.abs();
        a >= self.min_deg && a <= self.max_deg
    }
}

impl From<&PipelineConfig> for AngleBand {
    fn from(config: &PipelineConfig) -> Self {
        Self::new(config.vertical_angle_min_deg, config.vertical_angle_max_deg)
    }
}

/// Keep the near-vertical segments, preserving input order.
pub fn filter_vertical(segments: &[LineSegment], band: AngleBand) -> Vec<LineSegment> {
    segments
        .iter()
        .filter(|s| band.contains(s.angle_deg()))
        .copied()
        .collect()
}
